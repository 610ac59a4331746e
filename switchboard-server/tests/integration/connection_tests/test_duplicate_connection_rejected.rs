use switchboard_core::{RelayError, ServerMessage, UserId};

use crate::utils::{TestPeer, create_test_service, init_tracing};

#[tokio::test]
async fn test_duplicate_connection_rejected() {
    init_tracing();

    let service = create_test_service();
    let mut first = TestPeer::attach(&service, "ada");

    let err = TestPeer::attach_with_id(&service, first.id, "impostor").unwrap_err();
    assert_eq!(err, RelayError::DuplicateConnection(first.id));

    // the original connection is untouched and still works
    first.join("r1", "ada").await;
    assert_eq!(
        first.expect_message().await,
        ServerMessage::ExistingMembers { members: vec![] }
    );
    assert_eq!(
        service.relay().registry().lookup(&first.id).unwrap().user,
        UserId::from("ada")
    );
}

use switchboard_core::{RoomId, ServerMessage};

use crate::utils::{TestPeer, create_test_service, init_tracing};

#[tokio::test]
async fn test_middle_peer_disconnect_notifies_each_member_once() {
    init_tracing();

    let service = create_test_service();
    let mut a = TestPeer::attach(&service, "ada");
    let mut b = TestPeer::attach(&service, "bob");
    let mut c = TestPeer::attach(&service, "cal");

    a.join("r2", "ada").await;
    b.join("r2", "bob").await;
    c.join("r2", "cal").await;
    a.drain();
    b.drain();
    c.drain();

    b.disconnect();

    let expected = ServerMessage::PeerLeft { connection_id: b.id };
    assert_eq!(a.drain(), vec![expected.clone()]);
    assert_eq!(c.drain(), vec![expected]);

    // the departed peer gets nothing and the survivors remain members
    b.expect_silence();
    assert_eq!(
        service.relay().rooms().members_of(&RoomId::from("r2")),
        vec![a.id, c.id]
    );
}

use switchboard_core::{ClientMessage, RoomId, ServerMessage};

use crate::utils::{TestPeer, create_test_service, init_tracing};

/// An explicit leave and a transport disconnect can race for the same
/// connection; both paths must converge on one teardown with a single
/// `peer-left` broadcast.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_leave_and_disconnect_notify_once() {
    init_tracing();

    let service = create_test_service();
    let mut a = TestPeer::attach(&service, "ada");
    let mut b = TestPeer::attach(&service, "bob");
    a.join("r1", "ada").await;
    b.join("r1", "bob").await;
    a.drain();
    b.drain();

    let leave_service = service.clone();
    let disconnect_service = service.clone();
    let id = a.id;

    let leave = tokio::spawn(async move {
        leave_service.handle_message(id, ClientMessage::Leave).await;
    });
    let disconnect = tokio::spawn(async move {
        disconnect_service.disconnect(id);
    });

    leave.await.expect("leave task panicked");
    disconnect.await.expect("disconnect task panicked");

    let peer_lefts = b
        .drain()
        .into_iter()
        .filter(|msg| matches!(msg, ServerMessage::PeerLeft { connection_id } if *connection_id == id))
        .count();
    assert_eq!(peer_lefts, 1, "teardown must broadcast exactly once");

    // both paths converge on the same end state
    assert!(service.relay().registry().lookup(&id).is_err());
    assert_eq!(
        service.relay().rooms().members_of(&RoomId::from("r1")),
        vec![b.id]
    );
}

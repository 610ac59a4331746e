use serde_json::json;
use switchboard_core::{ClientMessage, MemberInfo, ServerMessage, UserId};

use crate::utils::{TestPeer, create_test_service, init_tracing};

#[tokio::test]
async fn test_offer_routed_to_target_only() {
    init_tracing();

    let service = create_test_service();
    let mut a = TestPeer::attach(&service, "ada");
    let mut b = TestPeer::attach(&service, "bob");

    a.join("r1", "ada").await;
    assert_eq!(
        a.expect_message().await,
        ServerMessage::ExistingMembers { members: vec![] }
    );

    b.join("r1", "bob").await;
    assert_eq!(
        b.expect_message().await,
        ServerMessage::ExistingMembers {
            members: vec![MemberInfo {
                connection_id: a.id,
                user: UserId::from("ada"),
            }],
        }
    );
    assert_eq!(
        a.expect_message().await,
        ServerMessage::PeerJoined {
            connection_id: b.id,
            user: UserId::from("bob"),
        }
    );

    a.send(ClientMessage::Offer {
        target: b.id,
        payload: json!("x"),
    })
    .await;

    assert_eq!(
        b.expect_message().await,
        ServerMessage::Offer {
            from: a.id,
            payload: json!("x"),
        }
    );
    // delivered exactly once, and nothing is echoed to the sender
    b.expect_silence();
    a.expect_silence();

    b.send(ClientMessage::Answer {
        target: a.id,
        payload: json!("y"),
    })
    .await;

    assert_eq!(
        a.expect_message().await,
        ServerMessage::Answer {
            from: b.id,
            payload: json!("y"),
        }
    );

    a.send(ClientMessage::Candidate {
        target: b.id,
        payload: json!({"candidate": "candidate:0 1 UDP ..."}),
    })
    .await;

    assert_eq!(
        b.expect_message().await,
        ServerMessage::Candidate {
            from: a.id,
            payload: json!({"candidate": "candidate:0 1 UDP ..."}),
        }
    );
}

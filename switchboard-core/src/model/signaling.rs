use crate::error::ErrorKind;
use crate::model::connection::{ConnectionId, UserId};
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// STUN/TURN server entry handed to clients in `ice-config`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

/// One room member as seen by a new joiner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberInfo {
    pub connection_id: ConnectionId,
    pub user: UserId,
}

/// Messages a client sends to the relay.
///
/// Negotiation payloads (`payload`) are opaque: the relay forwards them
/// unmodified and its correctness never depends on their contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ClientMessage {
    Join {
        room: RoomId,
        user: UserId,
    },
    /// Implicit target: the sender's current room.
    Leave,
    Offer {
        target: ConnectionId,
        payload: Value,
    },
    Answer {
        target: ConnectionId,
        payload: Value,
    },
    Candidate {
        target: ConnectionId,
        payload: Value,
    },
}

/// Messages the relay sends to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// First frame on every accepted connection.
    Welcome {
        connection_id: ConnectionId,
    },
    IceConfig {
        ice_servers: Vec<IceServerConfig>,
    },
    /// Sent to the new joiner only, in join order, so it can initiate an
    /// offer toward each existing member.
    ExistingMembers {
        members: Vec<MemberInfo>,
    },
    /// Sent to every member that was already in the room.
    PeerJoined {
        connection_id: ConnectionId,
        user: UserId,
    },
    PeerLeft {
        connection_id: ConnectionId,
    },
    Offer {
        from: ConnectionId,
        payload: Value,
    },
    Answer {
        from: ConnectionId,
        payload: Value,
    },
    Candidate {
        from: ConnectionId,
        payload: Value,
    },
    /// Reported to the offending sender only, never to other members.
    Error {
        kind: ErrorKind,
        detail: String,
    },
}

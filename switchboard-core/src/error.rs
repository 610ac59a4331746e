use crate::model::{ConnectionId, RoomId, ServerMessage, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire-visible error categories carried by the `error` event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorKind {
    DuplicateConnection,
    AlreadyMember,
    UnknownTarget,
    InvalidMessage,
    NotFound,
    Unauthorized,
}

/// Everything that can go wrong while relaying. Errors are local to the
/// originating connection: they are reported back to the sender and never
/// abort the relay or touch other participants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelayError {
    #[error("connection {0} is already registered")]
    DuplicateConnection(ConnectionId),

    #[error("connection {connection} is already a member of room \"{room}\"")]
    AlreadyMember {
        connection: ConnectionId,
        room: RoomId,
    },

    #[error("target {0} is not a member of the sender's room")]
    UnknownTarget(ConnectionId),

    #[error("invalid message: {0}")]
    InvalidMessage(String),

    #[error("connection {0} is not registered")]
    NotFound(ConnectionId),

    #[error("join of room \"{room}\" denied for user \"{user}\"")]
    Unauthorized { room: RoomId, user: UserId },
}

impl RelayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelayError::DuplicateConnection(_) => ErrorKind::DuplicateConnection,
            RelayError::AlreadyMember { .. } => ErrorKind::AlreadyMember,
            RelayError::UnknownTarget(_) => ErrorKind::UnknownTarget,
            RelayError::InvalidMessage(_) => ErrorKind::InvalidMessage,
            RelayError::NotFound(_) => ErrorKind::NotFound,
            RelayError::Unauthorized { .. } => ErrorKind::Unauthorized,
        }
    }

    /// The `error` event delivered to the offending sender.
    pub fn to_message(&self) -> ServerMessage {
        ServerMessage::Error {
            kind: self.kind(),
            detail: self.to_string(),
        }
    }
}

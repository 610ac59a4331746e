use switchboard_core::{ConnectionId, ServerMessage};

/// One send the transport adapter must perform on the relay's behalf.
///
/// Dispatch returns these instead of sending as a side effect, so routing
/// decisions can be asserted on without a live socket.
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub to: ConnectionId,
    pub message: ServerMessage,
}

impl Outbound {
    pub fn new(to: ConnectionId, message: ServerMessage) -> Self {
        Self { to, message }
    }
}

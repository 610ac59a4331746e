mod connection;
mod room;
mod signaling;

pub use connection::{ConnectionId, UserId};
pub use room::RoomId;
pub use signaling::{ClientMessage, IceServerConfig, MemberInfo, ServerMessage};

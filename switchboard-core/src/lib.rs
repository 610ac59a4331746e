pub mod error;
pub mod model;

pub use error::{ErrorKind, RelayError};
pub use model::{
    ClientMessage, ConnectionId, IceServerConfig, MemberInfo, RoomId, ServerMessage, UserId,
};

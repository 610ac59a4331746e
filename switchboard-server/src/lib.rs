pub mod auth;
pub mod config;
pub mod registry;
pub mod relay;
pub mod room;
pub mod signaling;

pub use auth::{AllowAll, JoinAuthorizer};
pub use config::ServerConfig;
pub use registry::{Connection, ConnectionRegistry};
pub use relay::{Outbound, SignalingRelay};
pub use room::RoomDirectory;
pub use signaling::{SignalingService, ws_handler};

mod outbound;
mod signaling_relay;

pub use outbound::*;
pub use signaling_relay::*;

//! WebSocket signaling relay for two-party WebRTC negotiation

mod actor;
mod messages;
mod server;
mod types;

pub use actor::RouterHandle;
pub use messages::{ClientMessage, ServerMessage};
pub use server::{DEFAULT_RELAY_PORT, RelayServer};
pub use types::{ConnId, OutboundMessage, ParseError};

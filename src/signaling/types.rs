use std::fmt;

use rand::Rng;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Utf8Bytes;

/// Failure to interpret an inbound payload as a signaling message
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("payload is not UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("invalid signaling message: {0}")]
    Json(#[from] serde_json::Error),
}

const CONN_ID_LEN: usize = 13;
const HEX_CHARS: &[u8] = b"0123456789abcdef";

/// Connection ID: 13-byte fixed array ("conn_" + 8 hex)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnId {
    bytes: [u8; CONN_ID_LEN],
    len: u8,
}

impl ConnId {
    pub fn generate() -> Self {
        let mut bytes = [0u8; CONN_ID_LEN];
        bytes[..5].copy_from_slice(b"conn_");

        let mut rng = rand::rng();
        let value: u32 = rng.random();

        for i in 0..8 {
            let nibble = ((value >> (28 - i * 4)) & 0xF) as usize;
            bytes[5 + i] = HEX_CHARS[nibble];
        }
        Self {
            bytes,
            len: CONN_ID_LEN as u8,
        }
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or("")
    }
}

impl fmt::Display for ConnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ConnId {
    fn from(s: &str) -> Self {
        let mut bytes = [0u8; CONN_ID_LEN];
        let src = s.as_bytes();
        let len = src.len().min(CONN_ID_LEN);
        bytes[..len].copy_from_slice(&src[..len]);
        Self {
            bytes,
            len: len as u8,
        }
    }
}

/// Wrapper for outbound WebSocket messages using tungstenite's Utf8Bytes.
#[derive(Debug, Clone)]
pub struct OutboundMessage(Utf8Bytes);

impl OutboundMessage {
    /// Create a new outbound message from any string type
    pub fn new(s: impl Into<Utf8Bytes>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Get the inner Utf8Bytes for tungstenite Message::Text
    pub fn into_inner(self) -> Utf8Bytes {
        self.0
    }
}

impl From<String> for OutboundMessage {
    fn from(s: String) -> Self {
        Self(Utf8Bytes::from(s))
    }
}

/// One bound occupant of a role slot.
/// Holds its own clone of the connection's outbound channel, so the slot
/// stays usable (as a no-op) after the connection is gone.
#[derive(Debug)]
pub(crate) struct Seat {
    pub id: ConnId,
    pub tx: mpsc::UnboundedSender<OutboundMessage>,
}

/// The process-wide role assignment: whichever connection most recently
/// declared each role. Slots are never cleared, only overwritten.
#[derive(Debug, Default)]
pub(crate) struct Roles {
    pub sender: Option<Seat>,
    pub receiver: Option<Seat>,
}

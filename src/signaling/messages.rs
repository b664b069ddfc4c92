use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::ParseError;

/// Messages received from connected clients
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Claim the sender role
    #[serde(rename = "sender")]
    Sender,

    /// Claim the receiver role
    #[serde(rename = "receiver")]
    Receiver,

    /// SDP offer, relayed sender -> receiver
    #[serde(rename = "createOffer")]
    CreateOffer { sdp: String },

    /// SDP answer, relayed receiver -> sender
    #[serde(rename = "createAnswer")]
    CreateAnswer { sdp: String },

    /// ICE candidate, relayed to the opposite role
    #[serde(rename = "iceCandidate")]
    IceCandidate { candidate: Value },

    /// Any type tag the relay does not route
    #[serde(other)]
    Unknown,
}

impl ClientMessage {
    /// Decode a raw inbound payload. The wire format is UTF-8 JSON with a
    /// mandatory string `type` field.
    pub fn parse(payload: &[u8]) -> Result<Self, ParseError> {
        let text = std::str::from_utf8(payload)?;
        Ok(serde_json::from_str(text)?)
    }
}

/// Messages relayed to the counterpart connection. Role declarations are
/// never relayed, so they have no variant here.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "createOffer")]
    CreateOffer { sdp: String },

    #[serde(rename = "createAnswer")]
    CreateAnswer { sdp: String },

    #[serde(rename = "iceCandidate")]
    IceCandidate { candidate: Value },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_sender_declaration() {
        let msg = ClientMessage::parse(br#"{"type":"sender"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Sender));
    }

    #[test]
    fn parse_receiver_declaration() {
        let msg = ClientMessage::parse(br#"{"type":"receiver"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Receiver));
    }

    #[test]
    fn parse_create_offer() {
        let msg = ClientMessage::parse(br#"{"type":"createOffer","sdp":"v=0"}"#).unwrap();
        if let ClientMessage::CreateOffer { sdp } = msg {
            assert_eq!(sdp, "v=0");
        } else {
            panic!("Expected CreateOffer");
        }
    }

    #[test]
    fn parse_create_answer() {
        let msg = ClientMessage::parse(br#"{"type":"createAnswer","sdp":"v=0"}"#).unwrap();
        if let ClientMessage::CreateAnswer { sdp } = msg {
            assert_eq!(sdp, "v=0");
        } else {
            panic!("Expected CreateAnswer");
        }
    }

    #[test]
    fn parse_ice_candidate_keeps_opaque_value() {
        let msg =
            ClientMessage::parse(br#"{"type":"iceCandidate","candidate":{"c":1}}"#).unwrap();
        if let ClientMessage::IceCandidate { candidate } = msg {
            assert_eq!(candidate, json!({"c": 1}));
        } else {
            panic!("Expected IceCandidate");
        }
    }

    #[test]
    fn parse_unknown_type_tag() {
        let msg = ClientMessage::parse(br#"{"type":"chat","text":"hi"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Unknown));
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(ClientMessage::parse(b"not json").is_err());
    }

    #[test]
    fn parse_rejects_missing_type() {
        assert!(ClientMessage::parse(br#"{"sdp":"v=0"}"#).is_err());
    }

    #[test]
    fn parse_rejects_offer_without_sdp() {
        assert!(ClientMessage::parse(br#"{"type":"createOffer"}"#).is_err());
    }

    #[test]
    fn parse_rejects_invalid_utf8() {
        let err = ClientMessage::parse(&[0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, ParseError::Utf8(_)));
    }

    #[test]
    fn serialize_relayed_offer() {
        let msg = ServerMessage::CreateOffer {
            sdp: "v=0".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"type":"createOffer","sdp":"v=0"}"#);
    }

    #[test]
    fn serialize_relayed_answer() {
        let msg = ServerMessage::CreateAnswer {
            sdp: "v=0".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"type":"createAnswer","sdp":"v=0"}"#);
    }

    #[test]
    fn serialize_relayed_candidate() {
        let msg = ServerMessage::IceCandidate {
            candidate: json!({"sdpMid": "0"}),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("iceCandidate"));
        assert!(json.contains("sdpMid"));
    }
}

//! The `{eventName, message}` wire envelope.

use crate::base::error::ClientError;
use serde::{Deserialize, Serialize};

/// One event as carried in a text frame.
///
/// Inbound frames may omit `message`; outbound frames always carry it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "eventName")]
    pub event_name: String,
}

/// Borrowed form used for encoding, so emitting never clones the payload.
#[derive(Serialize)]
struct OutboundEnvelope<'a> {
    message: &'a str,
    #[serde(rename = "eventName")]
    event_name: &'a str,
}

impl Envelope {
    /// Parse an inbound text frame.
    pub fn parse(text: &str) -> Result<Self, ClientError> {
        serde_json::from_str(text).map_err(|e| ClientError::MalformedEnvelope(e.to_string()))
    }
}

/// Encode `{"message": ..., "eventName": ...}` without building an `Envelope`.
pub fn encode(event_name: &str, message: &str) -> Result<String, ClientError> {
    Ok(serde_json::to_string(&OutboundEnvelope {
        message,
        event_name,
    })?)
}

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ClientError {
    // Connection Errors
    #[error("Connection closed")]
    ConnectionClosed,
    #[error("Connection failed")]
    ConnectionFailed,
    #[error("Socket not connected")]
    NotConnected,
    #[error("Connection timed out")]
    ConnectionTimedOut,
    #[error("WebSocket protocol error")]
    WsProtocolError,

    // Request Errors
    #[error("Invalid URL")]
    InvalidUrl,

    // Client Errors (custom codes starting at -900)
    #[error("Invalid argument in {function}: {reason}")]
    InvalidArgument {
        function: &'static str,
        reason: &'static str,
    },
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),
    #[error("Payload serialization failed: {0}")]
    Serialization(String),
    #[error("Client is already connected")]
    AlreadyConnected,
}

impl ClientError {
    /// Reserved sentinel used as an application event name.
    pub(crate) fn reserved_name(function: &'static str) -> Self {
        ClientError::InvalidArgument {
            function,
            reason: "event name \"*\" is reserved for the catch-all handler",
        }
    }

    pub fn as_i32(&self) -> i32 {
        match self {
            ClientError::ConnectionClosed => -100,
            ClientError::ConnectionFailed => -104,
            ClientError::NotConnected => -112,
            ClientError::ConnectionTimedOut => -118,
            ClientError::WsProtocolError => -145,

            ClientError::InvalidUrl => -300,

            ClientError::InvalidArgument { .. } => -900,
            ClientError::MalformedEnvelope(_) => -901,
            ClientError::Serialization(_) => -902,
            ClientError::AlreadyConnected => -903,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Serialization(err.to_string())
    }
}

//! Ergonomic error context helpers.
//!
//! Provides an extension trait for adding context to tungstenite `Result`s,
//! converting transport errors into `ClientError` variants.

use crate::base::error::ClientError;
use tokio_tungstenite::tungstenite;

/// Extension trait for adding context to WebSocket Results.
pub trait TransportResultExt<T> {
    /// Map a handshake failure against `url`.
    ///
    /// # Example
    /// ```ignore
    /// use stalync::base::context::TransportResultExt;
    ///
    /// let (stream, _) = connect_async(url).await.connect_context(url)?;
    /// ```
    fn connect_context(self, url: &str) -> Result<T, ClientError>;

    /// Map a failure while reading or writing an established socket.
    fn io_context(self, op: &'static str) -> Result<T, ClientError>;
}

impl<T> TransportResultExt<T> for Result<T, tungstenite::Error> {
    fn connect_context(self, url: &str) -> Result<T, ClientError> {
        self.map_err(|e| {
            tracing::debug!(url = %url, error = %e, "WebSocket connect error");
            match e {
                tungstenite::Error::Url(_) => ClientError::InvalidUrl,
                _ => ClientError::ConnectionFailed,
            }
        })
    }

    fn io_context(self, op: &'static str) -> Result<T, ClientError> {
        self.map_err(|e| {
            tracing::debug!(op, error = %e, "WebSocket transport error");
            match e {
                tungstenite::Error::Protocol(_)
                | tungstenite::Error::Capacity(_)
                | tungstenite::Error::Utf8 => ClientError::WsProtocolError,
                _ => ClientError::ConnectionClosed,
            }
        })
    }
}

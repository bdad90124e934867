//! Transport capability traits.
//!
//! The event client never picks a socket implementation by probing its
//! environment. It is handed a [`Connector`], which produces one
//! [`Transport`] per `connect` call. The default connector is
//! [`TungsteniteConnector`](super::TungsteniteConnector).

use super::message::{CloseFrame, Message};
use crate::base::error::ClientError;
use std::{future::Future, pin::Pin, sync::Arc};

/// Alias for the `Future` returned by transport operations.
pub type TransportFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ClientError>> + Send + 'a>>;

/// Alias for the `Future` returned by a connector.
pub type Connecting = Pin<Box<dyn Future<Output = Result<Arc<dyn Transport>, ClientError>> + Send>>;

/// An open, bidirectional message stream.
///
/// Implementations must allow `send` to run while another task is parked
/// in `recv`.
pub trait Transport: Send + Sync {
    /// Write one frame.
    fn send(&self, msg: Message) -> TransportFuture<'_, ()>;

    /// Read the next frame. `None` means the stream ended.
    fn recv(&self) -> TransportFuture<'_, Option<Message>>;

    /// Start the closing handshake.
    fn close(&self, frame: Option<CloseFrame>) -> TransportFuture<'_, ()> {
        self.send(Message::Close(frame))
    }
}

/// Opens transports for a URL.
///
/// This is the seam for replacing the socket implementation, the same way
/// browsers offer several interchangeable WebSocket constructors.
pub trait Connector: Send + Sync {
    /// Open a transport to `url`. Resolves once the handshake completed.
    fn connect(&self, url: String) -> Connecting;
}

/// Blanket implementation for Arc-wrapped connectors.
impl<C: Connector + ?Sized> Connector for Arc<C> {
    fn connect(&self, url: String) -> Connecting {
        (**self).connect(url)
    }
}

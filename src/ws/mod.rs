//! WebSocket transport.
//!
//! [`Transport`] and [`Connector`] are the capability seam the event client
//! talks to; [`WebSocket`] and [`TungsteniteConnector`] implement them with
//! tokio-tungstenite.
//!
//! # Example
//! ```ignore
//! use stalync::ws::{Message, Transport, WebSocket};
//!
//! let ws = WebSocket::connect("ws://127.0.0.1:9001").await?;
//! ws.send(Message::Text("Hello".into())).await?;
//! let msg = ws.recv().await?;
//! ```

mod connection;
mod message;
mod transport;

pub use connection::{TungsteniteConnector, WebSocket};
pub use message::{CloseCode, CloseFrame, Message};
pub use transport::{Connecting, Connector, Transport, TransportFuture};

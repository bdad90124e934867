//! # stalync
//!
//! A publish/subscribe event client for the Stalync realtime service.
//!
//! `stalync` keeps one WebSocket connection open and turns it into named
//! events: register a handler per event name, emit events with any
//! serializable payload, and observe the connection through the lifecycle
//! events `$connected`, `$disconnected` and `$error`.
//!
//! ## Wire format
//!
//! Every event is one text frame holding `{"message": <string>, "eventName": <string>}`.
//! Payloads are converted to a string before sending; receivers parse them
//! back themselves.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stalync::EventClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), stalync::ClientError> {
//!     let client = EventClient::new("my-developer-id", "my-app");
//!     client.on_event("$connected", |_, _| println!("online"))?;
//!     client.on_event("chat", |_, msg| println!("chat: {msg:?}"))?;
//!     client.connect().await?;
//!     client.emit_event("chat", "hello").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error and connection state types
//! - [`client`] - The event client and its builder
//! - [`event`] - Envelope format, payload conversion and dispatch
//! - [`ws`] - Transport traits and the tokio-tungstenite transport

pub mod base;
pub mod client;
pub mod event;
pub mod ws;

pub use base::error::ClientError;
pub use base::state::ConnectionState;
pub use client::{EventClient, EventClientBuilder};

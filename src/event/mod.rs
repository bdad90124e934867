//! Event envelope, payload conversion and dispatch.
//!
//! # Example
//! ```
//! use stalync::event::{Envelope, EventRegistry};
//!
//! let registry = EventRegistry::new();
//! registry.set_handler("greet", |name, msg| {
//!     println!("{name}: {msg:?}");
//! });
//!
//! let env = Envelope::parse(r#"{"eventName":"greet","message":"hi"}"#).unwrap();
//! assert!(registry.dispatch(&env.event_name, env.message.as_deref()));
//! ```

pub mod envelope;
pub mod payload;
pub mod registry;

pub use envelope::Envelope;
pub use payload::to_wire_message;
pub use registry::{
    EventHandler, EventRegistry, MessageHandler, CATCH_ALL, CONNECTED, DISCONNECTED, ERROR,
};

//! Base types and error handling.
//!
//! Provides foundational types shared by the client and transport:
//! - [`ClientError`](error::ClientError): error taxonomy with stable numeric codes
//! - [`ConnectionState`](state::ConnectionState): connection lifecycle states

pub mod context;
pub mod error;
pub mod state;

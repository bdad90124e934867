//! Event handler registry and dispatch.
//!
//! Holds at most one handler per event name plus a single catch-all handler.
//! The catch-all only receives events dispatched under the reserved name
//! [`CATCH_ALL`]; named and lifecycle events never reach it.

use dashmap::DashMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Reserved event name routed to the catch-all handler.
pub const CATCH_ALL: &str = "*";

/// Dispatched after the transport opens.
pub const CONNECTED: &str = "$connected";

/// Dispatched after the transport closes.
pub const DISCONNECTED: &str = "$disconnected";

/// Dispatched when the transport reports an error.
pub const ERROR: &str = "$error";

/// Handler for a named event, called with `(event_name, message)`.
pub type EventHandler = Arc<dyn Fn(&str, Option<&str>) + Send + Sync>;

/// Catch-all handler, called with `message` only.
pub type MessageHandler = Arc<dyn Fn(Option<&str>) + Send + Sync>;

/// Instance-scoped mapping from event name to handler.
///
/// Handlers are cloned out before being invoked, so a handler may register or
/// remove handlers on the same registry.
#[derive(Default)]
pub struct EventRegistry {
    events: DashMap<String, EventHandler>,
    catch_all: RwLock<Option<MessageHandler>>,
}

impl EventRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event_name`, returning the handler it replaced.
    pub fn set_handler<F>(&self, event_name: impl Into<String>, handler: F) -> Option<EventHandler>
    where
        F: Fn(&str, Option<&str>) + Send + Sync + 'static,
    {
        self.events.insert(event_name.into(), Arc::new(handler))
    }

    /// Remove the handler for `event_name`.
    pub fn remove_handler(&self, event_name: &str) -> Option<EventHandler> {
        self.events.remove(event_name).map(|(_, handler)| handler)
    }

    /// Set the catch-all handler, returning the previous one.
    pub fn set_catch_all<F>(&self, handler: F) -> Option<MessageHandler>
    where
        F: Fn(Option<&str>) + Send + Sync + 'static,
    {
        self.catch_all.write().replace(Arc::new(handler))
    }

    /// Remove the catch-all handler.
    pub fn clear_catch_all(&self) -> Option<MessageHandler> {
        self.catch_all.write().take()
    }

    /// Route one event.
    ///
    /// [`CATCH_ALL`] goes to the catch-all handler with `message` only; any
    /// other name goes to its registered handler with `(event_name, message)`.
    /// Returns whether a handler ran.
    pub fn dispatch(&self, event_name: &str, message: Option<&str>) -> bool {
        if event_name == CATCH_ALL {
            let handler = self.catch_all.read().clone();
            return match handler {
                Some(handler) => {
                    handler(message);
                    true
                }
                None => false,
            };
        }

        // The shard guard must be released before the handler runs.
        let handler = self.events.get(event_name).map(|entry| entry.value().clone());
        match handler {
            Some(handler) => {
                handler(event_name, message);
                true
            }
            None => {
                tracing::trace!(event = %event_name, "no handler registered");
                false
            }
        }
    }
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.events.iter().map(|e| e.key().clone()).collect();
        names.sort_unstable();
        f.debug_struct("EventRegistry")
            .field("events", &names)
            .field("catch_all", &self.catch_all.read().is_some())
            .finish()
    }
}

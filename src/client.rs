//! Event client with builder pattern.
//!
//! Wraps one WebSocket connection and exposes it as named events.
//!
//! # Example
//!
//! ```rust,ignore
//! use stalync::EventClient;
//!
//! let client = EventClient::new("dev-123", "chat");
//! client.on_event("$connected", |_, _| println!("connected"))?;
//! client.on_event("message", |name, msg| println!("{name}: {msg:?}"))?;
//! client.connect().await?;
//! client.emit_event("message", "hello").await?;
//! ```

use crate::base::error::ClientError;
use crate::base::state::ConnectionState;
use crate::event::envelope::{self, Envelope};
use crate::event::payload::to_wire_message;
use crate::event::registry::{EventRegistry, CATCH_ALL, CONNECTED, DISCONNECTED, ERROR};
use crate::ws::{CloseFrame, Connector, Message, Transport, TungsteniteConnector};
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "ws.stalync.tech";

#[derive(Default)]
struct Connection {
    transport: Option<Arc<dyn Transport>>,
    state: ConnectionState,
    // Bumped on every connect so a finished delivery task cannot clear a newer socket.
    generation: u64,
    delivery: Option<JoinHandle<()>>,
}

type SharedConnection = Arc<Mutex<Connection>>;

/// Marks the connection of one generation closed when dropped.
///
/// Covers a `connect` future dropped mid-handshake and a delivery task that
/// is aborted or unwinds.
struct CloseOnDrop {
    connection: SharedConnection,
    generation: u64,
    armed: bool,
}

impl CloseOnDrop {
    fn new(connection: SharedConnection, generation: u64) -> Self {
        Self {
            connection,
            generation,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for CloseOnDrop {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut conn = self.connection.lock();
        if conn.generation == self.generation {
            conn.transport = None;
            conn.state = ConnectionState::Closed;
        }
    }
}

/// Publish/subscribe client over a single WebSocket connection.
///
/// Use [`EventClient::new`] for the defaults or [`EventClient::builder`] to
/// configure the host, transport or connect timeout. Handlers may be
/// registered and replaced before or after [`connect`](Self::connect).
pub struct EventClient {
    developer_id: String,
    application_name: String,
    host: String,
    connector: Arc<dyn Connector>,
    connect_timeout: Option<Duration>,
    registry: Arc<EventRegistry>,
    connection: SharedConnection,
}

impl EventClient {
    /// Create a client for the given credentials with default settings.
    ///
    /// The credentials are found on the Stalync profile page. They are not
    /// validated here.
    pub fn new(developer_id: impl Into<String>, application_name: impl Into<String>) -> Self {
        Self::builder(developer_id, application_name).build()
    }

    /// Create a new client builder.
    pub fn builder(
        developer_id: impl Into<String>,
        application_name: impl Into<String>,
    ) -> EventClientBuilder {
        EventClientBuilder {
            developer_id: developer_id.into(),
            application_name: application_name.into(),
            host: None,
            connector: None,
            connect_timeout: None,
        }
    }

    pub fn developer_id(&self) -> &str {
        &self.developer_id
    }

    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    /// The URL `connect` opens. Identifiers are interpolated as-is.
    pub fn connection_url(&self) -> String {
        format!(
            "ws://{}?developerID={}&applicationName={}",
            self.host, self.developer_id, self.application_name
        )
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.connection.lock().state
    }

    /// Open the connection.
    ///
    /// On success a delivery task starts; it dispatches `$connected` and then
    /// every inbound event. On failure `$error` and then `$disconnected` are
    /// dispatched and the error is returned. The connection is never
    /// re-opened automatically; call `connect` again after `$disconnected`
    /// to reconnect. Dropping the returned future before it completes leaves
    /// the client `Closed`, ready for another `connect`.
    pub async fn connect(&self) -> Result<(), ClientError> {
        let url = self.connection_url();
        let generation = {
            let mut conn = self.connection.lock();
            if conn.state.is_active() {
                return Err(ClientError::AlreadyConnected);
            }
            conn.state = ConnectionState::Connecting;
            conn.generation += 1;
            conn.generation
        };

        let pending = CloseOnDrop::new(self.connection.clone(), generation);

        tracing::debug!(url = %url, "connecting");
        let connecting = self.connector.connect(url.clone());
        let result = match self.connect_timeout {
            Some(limit) => tokio::time::timeout(limit, connecting)
                .await
                .unwrap_or(Err(ClientError::ConnectionTimedOut)),
            None => connecting.await,
        };

        let transport = match result {
            Ok(transport) => transport,
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "connection failed");
                drop(pending);
                self.registry.dispatch(ERROR, None);
                self.registry.dispatch(DISCONNECTED, None);
                return Err(err);
            }
        };

        {
            let mut conn = self.connection.lock();
            conn.transport = Some(transport.clone());
            conn.state = ConnectionState::Open;
        }
        pending.disarm();

        let delivery = tokio::spawn(deliver(
            transport,
            self.registry.clone(),
            self.connection.clone(),
            generation,
        ));
        let mut conn = self.connection.lock();
        if conn.generation == generation {
            conn.delivery = Some(delivery);
        }
        Ok(())
    }

    /// Send `message` as event `event_name`.
    ///
    /// Strings, numbers and booleans are sent as their text, `()`/`None`/null
    /// as `""`, and anything else as JSON text. Nothing is queued: without an
    /// open connection this returns [`ClientError::NotConnected`].
    pub async fn emit_event<M: Serialize>(
        &self,
        event_name: &str,
        message: M,
    ) -> Result<(), ClientError> {
        if event_name == CATCH_ALL {
            let err = ClientError::reserved_name("emit_event");
            tracing::error!(error = %err, "event not sent");
            return Err(err);
        }

        let message = to_wire_message(&message).inspect_err(|err| {
            tracing::error!(event = %event_name, error = %err, "event not sent");
        })?;
        let frame = envelope::encode(event_name, &message)?;

        let transport = self
            .connection
            .lock()
            .transport
            .clone()
            .ok_or(ClientError::NotConnected)?;
        tracing::trace!(event = %event_name, "emitting event");
        transport.send(Message::Text(frame)).await
    }

    /// Register `callback` for `event_name`, replacing any previous handler.
    ///
    /// The callback receives `(event_name, message)`; lifecycle events
    /// (`$connected`, `$disconnected`, `$error`) carry no message.
    pub fn on_event<F>(&self, event_name: impl Into<String>, callback: F) -> Result<(), ClientError>
    where
        F: Fn(&str, Option<&str>) + Send + Sync + 'static,
    {
        let event_name = event_name.into();
        if event_name == CATCH_ALL {
            let err = ClientError::reserved_name("on_event");
            tracing::error!(error = %err, "handler not registered");
            return Err(err);
        }
        self.registry.set_handler(event_name, callback);
        Ok(())
    }

    /// Set the catch-all handler, replacing any previous one.
    ///
    /// It is called only for events the server sends under the name `"*"`,
    /// never for named or lifecycle events.
    pub fn on_message<F>(&self, callback: F)
    where
        F: Fn(Option<&str>) + Send + Sync + 'static,
    {
        self.registry.set_catch_all(callback);
    }

    /// Remove the handler for `event_name`. Returns whether one was registered.
    pub fn remove_event(&self, event_name: &str) -> bool {
        self.registry.remove_handler(event_name).is_some()
    }

    /// Remove the catch-all handler. Returns whether one was set.
    pub fn clear_message_handler(&self) -> bool {
        self.registry.clear_catch_all().is_some()
    }

    /// Start a normal close. `$disconnected` follows once the peer answers.
    pub async fn disconnect(&self) -> Result<(), ClientError> {
        let transport = self
            .connection
            .lock()
            .transport
            .clone()
            .ok_or(ClientError::NotConnected)?;
        tracing::debug!("closing connection");
        transport.close(Some(CloseFrame::normal())).await
    }
}

impl Drop for EventClient {
    fn drop(&mut self) {
        let delivery = self.connection.lock().delivery.take();
        if let Some(delivery) = delivery {
            delivery.abort();
        }
    }
}

impl fmt::Debug for EventClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventClient")
            .field("developer_id", &self.developer_id)
            .field("application_name", &self.application_name)
            .field("host", &self.host)
            .field("connect_timeout", &self.connect_timeout)
            .field("state", &self.state())
            .field("registry", &self.registry)
            .finish()
    }
}

/// Dispatch `$connected`, then read frames until the transport ends,
/// dispatching each envelope.
async fn deliver(
    transport: Arc<dyn Transport>,
    registry: Arc<EventRegistry>,
    connection: SharedConnection,
    generation: u64,
) {
    let closing = CloseOnDrop::new(connection, generation);
    registry.dispatch(CONNECTED, None);

    loop {
        match transport.recv().await {
            Ok(Some(Message::Text(text))) => match Envelope::parse(&text) {
                Ok(env) => {
                    registry.dispatch(&env.event_name, env.message.as_deref());
                }
                Err(err) => {
                    tracing::error!(error = %err, "dropping malformed frame");
                }
            },
            Ok(Some(Message::Close(frame))) => {
                // Keep reading so the close reply is flushed; the stream ends next.
                tracing::debug!(?frame, "close frame received");
            }
            Ok(Some(other)) => {
                tracing::debug!(?other, "ignoring non-text frame");
            }
            Ok(None) => break,
            Err(err) => {
                tracing::debug!(error = %err, "transport failed");
                registry.dispatch(ERROR, None);
                break;
            }
        }
    }

    drop(closing);
    registry.dispatch(DISCONNECTED, None);
}

/// Builder for creating an [`EventClient`].
pub struct EventClientBuilder {
    developer_id: String,
    application_name: String,
    host: Option<String>,
    connector: Option<Arc<dyn Connector>>,
    connect_timeout: Option<Duration>,
}

impl EventClientBuilder {
    /// Set the host (and optional port) to connect to.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the transport connector.
    pub fn connector<C: Connector + 'static>(mut self, connector: C) -> Self {
        self.connector = Some(Arc::new(connector));
        self
    }

    /// Fail `connect` if the handshake takes longer than `timeout`.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> EventClient {
        EventClient {
            developer_id: self.developer_id,
            application_name: self.application_name,
            host: self.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            connector: self
                .connector
                .unwrap_or_else(|| Arc::new(TungsteniteConnector)),
            connect_timeout: self.connect_timeout,
            registry: Arc::new(EventRegistry::new()),
            connection: SharedConnection::default(),
        }
    }
}

impl fmt::Debug for EventClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventClientBuilder")
            .field("developer_id", &self.developer_id)
            .field("application_name", &self.application_name)
            .field("host", &self.host)
            .field("connect_timeout", &self.connect_timeout)
            .finish_non_exhaustive()
    }
}

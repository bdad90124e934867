/// The current state of an `EventClient` connection.
/// This roughly matches the WebSocket `readyState` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// `connect` has not been called yet.
    #[default]
    Idle,

    /// The handshake is in progress.
    Connecting,

    /// The socket is open and delivering events.
    Open,

    /// The socket closed or failed to open.
    Closed,
}

impl ConnectionState {
    /// Whether a connection attempt is live (connecting or open).
    pub fn is_active(self) -> bool {
        matches!(self, ConnectionState::Connecting | ConnectionState::Open)
    }
}

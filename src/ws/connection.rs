//! WebSocket connection with tokio-tungstenite.
//!
//! The default [`Transport`] used by the event client.

use super::message::{CloseCode, CloseFrame, Message};
use super::transport::{Connecting, Connector, Transport, TransportFuture};
use crate::base::context::TransportResultExt;
use crate::base::error::ClientError;
use bytes::Bytes;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use std::fmt;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::{connect_async, tungstenite, MaybeTlsStream, WebSocketStream};
use url::Url;

/// Type alias for the WebSocket stream.
type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket connection.
///
/// Sink and stream halves are locked separately, so one task can write
/// while another waits for the next frame.
pub struct WebSocket {
    sink: Arc<Mutex<SplitSink<WsStream, tungstenite::Message>>>,
    stream: Arc<Mutex<SplitStream<WsStream>>>,
    url: Url,
}

impl WebSocket {
    /// Connect to a WebSocket server.
    ///
    /// # Example
    /// ```ignore
    /// let ws = WebSocket::connect("ws://ws.stalync.tech?developerID=d&applicationName=a").await?;
    /// ```
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        let url = Url::parse(url).map_err(|_| ClientError::InvalidUrl)?;

        // Validate scheme
        if url.scheme() != "ws" && url.scheme() != "wss" {
            return Err(ClientError::InvalidUrl);
        }

        let (ws_stream, _response) = connect_async(url.as_str())
            .await
            .connect_context(url.as_str())?;
        tracing::debug!(url = %url, "WebSocket connected");

        let (sink, stream) = ws_stream.split();

        Ok(Self {
            sink: Arc::new(Mutex::new(sink)),
            stream: Arc::new(Mutex::new(stream)),
            url,
        })
    }

    /// Get the URL this WebSocket is connected to.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Send a text frame.
    pub async fn send_text(&self, text: impl Into<String>) -> Result<(), ClientError> {
        Transport::send(self, Message::Text(text.into())).await
    }
}

impl Transport for WebSocket {
    fn send(&self, msg: Message) -> TransportFuture<'_, ()> {
        Box::pin(async move {
            let mut sink = self.sink.lock().await;
            sink.send(message_to_tungstenite(msg)).await.io_context("send")
        })
    }

    fn recv(&self) -> TransportFuture<'_, Option<Message>> {
        Box::pin(async move {
            let mut stream = self.stream.lock().await;
            match stream.next().await {
                Some(msg) => msg.map(|m| Some(tungstenite_to_message(m))).io_context("recv"),
                None => Ok(None),
            }
        })
    }
}

impl fmt::Debug for WebSocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebSocket").field("url", &self.url.as_str()).finish()
    }
}

/// Opens [`WebSocket`] transports.
#[derive(Debug, Clone, Copy, Default)]
pub struct TungsteniteConnector;

impl Connector for TungsteniteConnector {
    fn connect(&self, url: String) -> Connecting {
        Box::pin(async move {
            let ws = WebSocket::connect(&url).await?;
            Ok(Arc::new(ws) as Arc<dyn Transport>)
        })
    }
}

/// Convert our Message to tungstenite Message.
fn message_to_tungstenite(msg: Message) -> tungstenite::Message {
    match msg {
        Message::Text(s) => tungstenite::Message::Text(s),
        Message::Binary(b) => tungstenite::Message::Binary(b.to_vec()),
        Message::Ping(d) => tungstenite::Message::Ping(d),
        Message::Pong(d) => tungstenite::Message::Pong(d),
        Message::Close(frame) => {
            let tung_frame = frame.map(|f| tungstenite::protocol::CloseFrame {
                code: tungstenite::protocol::frame::coding::CloseCode::from(f.code.0),
                reason: f.reason.into(),
            });
            tungstenite::Message::Close(tung_frame)
        }
    }
}

/// Convert tungstenite Message to our Message.
fn tungstenite_to_message(msg: tungstenite::Message) -> Message {
    match msg {
        tungstenite::Message::Text(s) => Message::Text(s.to_string()),
        tungstenite::Message::Binary(b) => Message::Binary(Bytes::from(b.to_vec())),
        tungstenite::Message::Ping(d) => Message::Ping(d.to_vec()),
        tungstenite::Message::Pong(d) => Message::Pong(d.to_vec()),
        tungstenite::Message::Close(frame) => {
            let our_frame = frame.map(|f| CloseFrame {
                code: CloseCode(f.code.into()),
                reason: f.reason.to_string(),
            });
            Message::Close(our_frame)
        }
        tungstenite::Message::Frame(_) => Message::Binary(Bytes::new()),
    }
}

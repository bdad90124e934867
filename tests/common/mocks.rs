//! In-memory transport for driving the client without a network.

use stalync::ws::{Connecting, Connector, Message, Transport, TransportFuture};
use stalync::ClientError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// Transport backed by two channels.
pub struct MockTransport {
    sent: mpsc::UnboundedSender<Message>,
    inbound: tokio::sync::Mutex<mpsc::UnboundedReceiver<Result<Message, ClientError>>>,
}

impl Transport for MockTransport {
    fn send(&self, msg: Message) -> TransportFuture<'_, ()> {
        let result = self.sent.send(msg).map_err(|_| ClientError::ConnectionClosed);
        Box::pin(async move { result })
    }

    fn recv(&self) -> TransportFuture<'_, Option<Message>> {
        Box::pin(async move {
            let mut inbound = self.inbound.lock().await;
            match inbound.recv().await {
                Some(Ok(msg)) => Ok(Some(msg)),
                Some(Err(err)) => Err(err),
                None => Ok(None),
            }
        })
    }
}

/// The server side of a [`MockTransport`].
pub struct MockPeer {
    pub sent: mpsc::UnboundedReceiver<Message>,
    pub inbound: mpsc::UnboundedSender<Result<Message, ClientError>>,
}

impl MockPeer {
    /// Deliver a text frame to the client.
    pub fn push_text(&self, text: &str) {
        self.inbound.send(Ok(Message::Text(text.to_string()))).unwrap();
    }

    /// Make the client's next read fail.
    pub fn push_error(&self, err: ClientError) {
        self.inbound.send(Err(err)).unwrap();
    }

    /// Next frame the client wrote.
    pub async fn next_sent(&mut self) -> Message {
        tokio::time::timeout(Duration::from_secs(2), self.sent.recv())
            .await
            .expect("timed out waiting for frame")
            .expect("transport dropped")
    }

    /// Next text frame the client wrote.
    pub async fn next_text(&mut self) -> String {
        match self.next_sent().await {
            Message::Text(text) => text,
            other => panic!("expected text frame, got {:?}", other),
        }
    }
}

/// Hands out one [`MockTransport`] per `connect`, recording requested URLs.
#[derive(Clone, Default)]
pub struct MockConnector {
    ready: Arc<Mutex<Vec<Arc<MockTransport>>>>,
    pub urls: Arc<Mutex<Vec<String>>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a transport for the next `connect` and return its peer.
    pub fn prepare(&self) -> MockPeer {
        let (sent_tx, sent_rx) = mpsc::unbounded_channel();
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        self.ready.lock().unwrap().push(Arc::new(MockTransport {
            sent: sent_tx,
            inbound: tokio::sync::Mutex::new(in_rx),
        }));
        MockPeer {
            sent: sent_rx,
            inbound: in_tx,
        }
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl Connector for MockConnector {
    fn connect(&self, url: String) -> Connecting {
        self.urls.lock().unwrap().push(url);
        let next = {
            let mut ready = self.ready.lock().unwrap();
            if ready.is_empty() {
                None
            } else {
                Some(ready.remove(0))
            }
        };
        Box::pin(async move {
            match next {
                Some(transport) => Ok(transport as Arc<dyn Transport>),
                None => Err(ClientError::ConnectionFailed),
            }
        })
    }
}

/// Connector whose handshake never completes.
pub struct StalledConnector;

impl Connector for StalledConnector {
    fn connect(&self, _url: String) -> Connecting {
        Box::pin(futures::future::pending::<Result<Arc<dyn Transport>, ClientError>>())
    }
}

/// Stalls the first handshake, then hands out transports from `inner`.
#[derive(Clone, Default)]
pub struct StallFirstConnector {
    pub inner: MockConnector,
    stalled: Arc<AtomicBool>,
}

impl Connector for StallFirstConnector {
    fn connect(&self, url: String) -> Connecting {
        if !self.stalled.swap(true, Ordering::SeqCst) {
            return StalledConnector.connect(url);
        }
        self.inner.connect(url)
    }
}

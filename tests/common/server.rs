//! Loopback WebSocket server for exercising the real transport.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::{accept_hdr_async, WebSocketStream};

pub type ServerSocket = WebSocketStream<TcpStream>;

/// A server on 127.0.0.1 that accepts every handshake.
pub struct TestServer {
    pub addr: SocketAddr,
    paths: mpsc::UnboundedReceiver<String>,
    sockets: mpsc::UnboundedReceiver<ServerSocket>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (path_tx, paths) = mpsc::unbounded_channel();
        let (socket_tx, sockets) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let path_tx = path_tx.clone();
                let record = move |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
                    let _ = path_tx.send(req.uri().to_string());
                    Ok(resp)
                };
                if let Ok(ws) = accept_hdr_async(stream, record).await {
                    let _ = socket_tx.send(ws);
                }
            }
        });

        Self {
            addr,
            paths,
            sockets,
        }
    }

    /// `host:port` to hand to the client builder.
    pub fn host(&self) -> String {
        self.addr.to_string()
    }

    /// Next accepted socket and the request target it asked for.
    pub async fn accept(&mut self) -> (ServerSocket, String) {
        let socket = tokio::time::timeout(Duration::from_secs(2), self.sockets.recv())
            .await
            .expect("timed out waiting for handshake")
            .expect("server stopped");
        let path = self.paths.recv().await.expect("server stopped");
        (socket, path)
    }
}

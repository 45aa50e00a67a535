//! Shared helpers for the server integration tests.
//!
//! The router runs in-process on an ephemeral port and is driven by real
//! WebSocket (`tokio-tungstenite`) and HTTP (`reqwest`) clients.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use tokio::{net::TcpStream, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use tsuzuri_server::{
    config::ServerConfig,
    domain::DocumentStore,
    infrastructure::{
        dto::websocket::{ClientMessage, ServerMessage},
        message_pusher::WebSocketMessagePusher,
        repository::InMemorySessionRegistry,
    },
    ui::{AppState, Server},
};
use tsuzuri_shared::time::FixedClock;

/// 2024-01-01T00:00:00.000Z
pub const FIXED_NOW: i64 = 1704067200000;

const RECV_TIMEOUT: Duration = Duration::from_secs(2);
const SILENCE_TIMEOUT: Duration = Duration::from_millis(200);

/// Helper struct to manage the in-process server lifecycle
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a test server backed by the given store
    pub async fn start(store: Arc<dyn DocumentStore>) -> Self {
        let state = Arc::new(AppState::new(
            Arc::new(InMemorySessionRegistry::new()),
            store,
            Arc::new(WebSocketMessagePusher::default()),
            Arc::new(FixedClock::new(FIXED_NOW)),
        ));
        let app = Server::new(state, ServerConfig::default())
            .router()
            .expect("default origin should be a valid header");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("listener has an address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server error");
        });

        TestServer { addr, handle }
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Helper struct wrapping one WebSocket connection
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    pub async fn connect(server: &TestServer) -> Self {
        let (stream, _) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        TestClient { stream }
    }

    pub async fn send(&mut self, msg: &ClientMessage) {
        let json = serde_json::to_string(msg).expect("client message serializes");
        self.send_raw(&json).await;
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.into()))
            .await
            .expect("Failed to send message");
    }

    pub async fn join(&mut self, doc_id: &str) {
        self.send(&ClientMessage::JoinDoc {
            doc_id: doc_id.to_string(),
        })
        .await;
    }

    /// Wait for the next server message
    pub async fn recv(&mut self) -> ServerMessage {
        loop {
            let frame = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for a server message")
                .expect("Connection closed")
                .expect("WebSocket error");
            if let Message::Text(text) = frame {
                return serde_json::from_str(&text).expect("server message should be valid JSON");
            }
        }
    }

    /// Assert that nothing arrives for a short while
    pub async fn expect_silence(&mut self) {
        if let Ok(Some(Ok(Message::Text(text)))) =
            tokio::time::timeout(SILENCE_TIMEOUT, self.stream.next()).await
        {
            panic!("Unexpected message: {}", text);
        }
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}

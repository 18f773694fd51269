//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use call_signaling_rs::{ServerConfig, run};

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A signaling server running in a background task for the test's lifetime
pub struct TestServer {
    port: u16,
}

impl TestServer {
    /// Spawn the server on the given port and wait until it answers health
    /// checks. Each test uses its own port so tests can run in parallel.
    pub async fn start(port: u16) -> Self {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port,
        };
        tokio::spawn(async move {
            if let Err(e) = run(config).await {
                eprintln!("test server error: {e}");
            }
        });

        let server = Self { port };
        server.wait_until_ready().await;
        server
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn ws_url(&self, peer_id: &str) -> String {
        format!("ws://127.0.0.1:{}/ws?peer_id={}", self.port, peer_id)
    }

    async fn wait_until_ready(&self) {
        let client = reqwest::Client::new();
        let url = format!("{}/api/health", self.base_url());
        for _ in 0..100 {
            if let Ok(response) = client.get(&url).send().await
                && response.status().is_success()
            {
                return;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!("test server did not become ready on port {}", self.port);
    }

    /// Open a WebSocket connection for the given peer identity
    pub async fn connect_peer(&self, peer_id: &str) -> WsClient {
        let (ws, _response) = connect_async(self.ws_url(peer_id))
            .await
            .expect("Failed to open WebSocket connection");
        ws
    }
}

/// Send one signaling message as a JSON text frame
pub async fn send_json(ws: &mut WsClient, msg: serde_json::Value) {
    ws.send(Message::Text(msg.to_string().into()))
        .await
        .expect("Failed to send WebSocket message");
}

/// Receive the next JSON text frame, panicking after 5 seconds
pub async fn recv_json(ws: &mut WsClient) -> serde_json::Value {
    let frame = tokio::time::timeout(Duration::from_secs(5), async {
        while let Some(msg) = ws.next().await {
            let msg = msg.expect("WebSocket error while receiving");
            if let Message::Text(text) = msg {
                return text.to_string();
            }
        }
        panic!("WebSocket closed while waiting for a message");
    })
    .await
    .expect("Timed out waiting for a WebSocket message");

    serde_json::from_str(&frame).expect("Received frame is not valid JSON")
}

/// Assert that no text frame arrives within the given window
pub async fn assert_silence(ws: &mut WsClient, window: Duration) {
    let received = tokio::time::timeout(window, async {
        while let Some(msg) = ws.next().await {
            if let Ok(Message::Text(text)) = msg {
                return text.to_string();
            }
        }
        // Closed streams count as silence here
        String::new()
    })
    .await;

    if let Ok(frame) = received
        && !frame.is_empty()
    {
        panic!("Expected no message, but received: {frame}");
    }
}

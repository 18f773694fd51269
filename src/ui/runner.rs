//! Server runner: router assembly and the accept loop.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    infrastructure::repository::{InMemoryConnectionRegistry, InMemoryRoomDirectory},
    ui::{
        handler::{get_peers, get_room_detail, get_rooms, health_check, websocket_handler},
        signal::shutdown_signal,
        state::AppState,
    },
};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind (e.g. "0.0.0.0")
    pub host: String,
    /// TCP port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Build the application router with fresh in-memory state
pub fn build_router() -> Router {
    let state = Arc::new(AppState {
        registry: Arc::new(InMemoryConnectionRegistry::new()),
        directory: Arc::new(InMemoryRoomDirectory::new()),
    });

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/peers", get(get_peers))
        .route("/api/rooms", get(get_rooms))
        .route("/api/rooms/{room_id}", get(get_room_detail))
        .route("/ws", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the signaling server until shutdown is requested
pub async fn run(config: ServerConfig) -> Result<(), std::io::Error> {
    let app = build_router();

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Signaling server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

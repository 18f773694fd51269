//! Server state and connection management.

use serde::Deserialize;
use std::sync::Arc;

use crate::domain::{ConnectionRegistry, RoomDirectory};

/// Query parameters for the WebSocket handshake.
///
/// The identity is established here, before the upgrade, and stays fixed for
/// the connection's lifetime.
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub peer_id: String,
}

/// Shared application state
pub struct AppState {
    /// Connection registry (identity -> live connection)
    pub registry: Arc<dyn ConnectionRegistry>,
    /// Room directory (room -> member set)
    pub directory: Arc<dyn RoomDirectory>,
}

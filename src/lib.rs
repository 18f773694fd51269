//! WebRTC signaling relay for multi-party video calls.
//!
//! This library tracks which peers belong to which call room and relays
//! session-negotiation messages (offers, answers, ICE candidates) and
//! media-control events (audio/video toggles) between them over WebSocket.
//! Media never flows through this server; peers connect to each other
//! directly in a full mesh, using an external STUN/TURN service.

pub mod domain;
pub mod infrastructure;
pub mod logger;
pub mod time;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use ui::{ServerConfig, run};

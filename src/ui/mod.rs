//! UI layer: the WebSocket gateway and debug HTTP endpoints.

mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{ServerConfig, build_router, run};

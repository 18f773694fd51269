//! WebRTC signaling relay server.
//!
//! Accepts WebSocket connections from call participants and relays
//! offer/answer/ICE and media-toggle events between peers in the same room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server -- --port 8080
//! ```

use clap::Parser;

use call_signaling_rs::{ServerConfig, logger::setup_logger, run};

#[derive(Debug, Parser)]
#[command(name = "server", about = "WebRTC signaling relay server")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// TCP port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let config = ServerConfig {
        host: args.host,
        port: args.port,
    };

    // Run the server
    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

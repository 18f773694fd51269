//! WebSocket message DTOs for the signaling protocol.
//!
//! Messages are JSON text frames tagged by a kebab-case `type` field. SDP and
//! ICE payloads are carried as opaque JSON values; the relay never inspects
//! them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Messages a client sends to the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Enter a call room. `peer_id` must match the identity bound at the
    /// handshake; a mismatched claim is dropped.
    JoinRoom { room_id: String, peer_id: String },
    /// Session description offer for one peer in the room
    Offer {
        room_id: String,
        sdp: Value,
        target_id: String,
    },
    /// Session description answer for one peer in the room
    Answer {
        room_id: String,
        sdp: Value,
        target_id: String,
    },
    /// ICE candidate for one peer in the room
    IceCandidate {
        room_id: String,
        candidate: Value,
        target_id: String,
    },
    /// Microphone state change, broadcast to the rest of the room
    ToggleAudio {
        room_id: String,
        peer_id: String,
        enabled: bool,
    },
    /// Camera state change, broadcast to the rest of the room
    ToggleVideo {
        room_id: String,
        peer_id: String,
        enabled: bool,
    },
    /// Leave the call room
    LeaveRoom { room_id: String, peer_id: String },
}

/// Messages the gateway sends to a client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// Join acknowledgement carrying the peers already in the room
    RoomJoined {
        room_id: String,
        peers: Vec<PeerInfo>,
    },
    /// A new peer entered the room; receivers initiate their offer to it
    UserConnected { peer_id: String },
    /// A peer left the room (explicit leave or transport close)
    UserDisconnected { peer_id: String },
    /// Relayed offer, stamped with the sender's identity
    Offer {
        sdp: Value,
        from_id: String,
        target_id: String,
    },
    /// Relayed answer, stamped with the sender's identity
    Answer {
        sdp: Value,
        from_id: String,
        target_id: String,
    },
    /// Relayed ICE candidate, stamped with the sender's identity
    IceCandidate {
        candidate: Value,
        from_id: String,
        target_id: String,
    },
    /// A peer toggled its microphone
    UserAudioToggled { peer_id: String, enabled: bool },
    /// A peer toggled its camera
    UserVideoToggled { peer_id: String, enabled: bool },
}

/// Peer information in the `room-joined` acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerInfo {
    pub peer_id: String,
}

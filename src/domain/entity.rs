//! Core domain models for the signaling server.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

use super::value_object::{PeerId, RoomId, Timestamp};

/// Represents one call room and its current members.
///
/// A room is created implicitly by the first join and must be dropped by its
/// owner (the room directory) as soon as the member list empties; there is no
/// "empty but retained" state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Room identifier
    pub id: RoomId,
    /// Peers currently in the room, in join order
    pub members: Vec<Member>,
    /// Timestamp when the room was created (first join)
    pub created_at: Timestamp,
}

impl Room {
    /// Create a new empty room with the given ID and creation timestamp
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            members: Vec::new(),
            created_at,
        }
    }

    /// Add a member to the room.
    ///
    /// Adding a peer that is already a member is a no-op; duplicate joins are
    /// expected from a lossy control channel and must not corrupt the set.
    pub fn add_member(&mut self, member: Member) {
        if self.contains(&member.id) {
            return;
        }
        self.members.push(member);
    }

    /// Remove a member from the room by peer ID. Unknown peers are a no-op.
    pub fn remove_member(&mut self, peer_id: &PeerId) {
        self.members.retain(|m| &m.id != peer_id);
    }

    /// Whether the given peer is currently a member
    pub fn contains(&self, peer_id: &PeerId) -> bool {
        self.members.iter().any(|m| &m.id == peer_id)
    }

    /// Whether the room has no members left
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Snapshot of the member peer IDs, in join order
    pub fn member_ids(&self) -> Vec<PeerId> {
        self.members.iter().map(|m| m.id.clone()).collect()
    }
}

/// Represents a peer participating in a call room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Participant identity (peer_id)
    pub id: PeerId,
    /// Timestamp when the peer joined the room
    pub joined_at: Timestamp,
}

impl Member {
    /// Create a new member
    pub fn new(id: PeerId, joined_at: Timestamp) -> Self {
        Self { id, joined_at }
    }
}

/// Live connection information held by the connection registry
#[derive(Debug, Clone)]
pub struct ConnectionEntry {
    /// Per-connection id, for log correlation
    pub connection_id: Uuid,
    /// Message sender channel
    pub sender: mpsc::UnboundedSender<String>,
    /// Room the connection is currently in, if any
    pub room_id: Option<RoomId>,
    /// Unix timestamp when connected (UTC, milliseconds)
    pub connected_at: Timestamp,
}

impl ConnectionEntry {
    /// Create a fresh entry for a connection that is not in any room yet
    pub fn new(sender: mpsc::UnboundedSender<String>, connected_at: Timestamp) -> Self {
        Self {
            connection_id: Uuid::new_v4(),
            sender,
            room_id: None,
            connected_at,
        }
    }
}

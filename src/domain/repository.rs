//! Repository traits owned by the domain layer.
//!
//! The use-case layer depends on these traits, not on the in-memory
//! implementations in the infrastructure layer (dependency inversion).

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use super::{
    entity::{ConnectionEntry, Room},
    error::RegistryError,
    value_object::{PeerId, RoomId, Timestamp},
};

/// Result of a room join: who was already there, and whether the join
/// actually changed the member set (duplicate joins do not).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSnapshot {
    /// Members present before the join, excluding the joiner
    pub prior_members: Vec<PeerId>,
    /// False when the peer was already a member
    pub newly_joined: bool,
}

/// Room directory: the room -> member-set mapping.
///
/// This is the only correctness-critical shared state in the signaling core.
/// Every operation is a no-op on invalid input rather than an error; the
/// control channel can legitimately deliver duplicate or out-of-order
/// join/leave events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    /// Add a peer to a room, creating the room if absent.
    ///
    /// The snapshot holds the members present *before* the add, so callers
    /// know which peers to notify. A duplicate join returns the same
    /// snapshot with `newly_joined` false and leaves the set unchanged.
    async fn join(&self, room_id: RoomId, peer_id: PeerId, joined_at: Timestamp) -> JoinSnapshot;

    /// Remove a peer from a room, deleting the room entry if it empties.
    ///
    /// Returns the remaining members when the peer was actually removed, so
    /// callers know which peers to notify. Leaving a room one is not in, or
    /// a nonexistent room, is a no-op returning `None`.
    async fn leave(&self, room_id: &RoomId, peer_id: &PeerId) -> Option<Vec<PeerId>>;

    /// Whether the peer is currently a member of the room
    async fn is_member(&self, room_id: &RoomId, peer_id: &PeerId) -> bool;

    /// Read-only snapshot of the room's members (empty if the room does not
    /// exist). Observability only; relay decisions go through join/leave and
    /// `is_member`.
    async fn members(&self, room_id: &RoomId) -> Vec<PeerId>;

    /// Snapshot of all live rooms, for the debug HTTP surface
    async fn rooms(&self) -> Vec<Room>;

    /// Snapshot of a single room, if it exists
    async fn get_room(&self, room_id: &RoomId) -> Option<Room>;
}

/// Connection registry: maps each bound identity to its live connection.
///
/// The identity is fixed for the connection's lifetime (set once at
/// handshake); only the room association changes afterwards.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Bind an identity to a live connection.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::AlreadyBound` if another connection already
    /// holds this identity.
    async fn bind(&self, peer_id: PeerId, entry: ConnectionEntry) -> Result<(), RegistryError>;

    /// Remove the connection and return its entry (including the room it was
    /// in, if any) so the caller can run the leave cleanup.
    async fn unbind(&self, peer_id: &PeerId) -> Option<ConnectionEntry>;

    /// The room this connection is currently in, if any
    async fn current_room(&self, peer_id: &PeerId) -> Option<RoomId>;

    /// Replace the connection's room association
    async fn set_current_room(&self, peer_id: &PeerId, room_id: Option<RoomId>);

    /// Outbound message channel for the peer, if connected
    async fn sender(&self, peer_id: &PeerId) -> Option<UnboundedSender<String>>;

    /// Snapshot of all currently bound identities, for the debug HTTP surface
    async fn connected_peers(&self) -> Vec<PeerId>;
}

//! UseCase: peer disconnection cleanup.

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, PeerId, RoomDirectory, RoomId};

/// Tears down a connection when its transport closes.
///
/// Runs the same leave sequence an explicit leave would, for whatever room
/// the connection was in. The transport closing is the only cancellation
/// signal in the core, so this path must run exactly once per connection,
/// even when the client never sent a leave.
pub struct DisconnectPeerUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    directory: Arc<dyn RoomDirectory>,
}

impl DisconnectPeerUseCase {
    /// Create a new DisconnectPeerUseCase
    pub fn new(registry: Arc<dyn ConnectionRegistry>, directory: Arc<dyn RoomDirectory>) -> Self {
        Self {
            registry,
            directory,
        }
    }

    /// Execute the disconnect cleanup.
    ///
    /// # Returns
    ///
    /// * `Some((room, remaining))` - the room the peer was in and the members
    ///   still there, to be notified
    /// * `None` - the peer was in no room (or already unbound)
    pub async fn execute(&self, peer_id: &PeerId) -> Option<(RoomId, Vec<PeerId>)> {
        // Unbind first: racing disconnect paths then resolve to a single
        // winner, and no message can be routed to the dead channel anymore.
        let entry = self.registry.unbind(peer_id).await?;
        let room_id = entry.room_id?;

        let remaining = self.directory.leave(&room_id, peer_id).await?;
        Some((room_id, remaining))
    }
}

//! UseCase: leaving a call room.

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, PeerId, RoomDirectory, RoomId};

/// Moves a connection out of a room.
///
/// Leaving a room one is not in is a no-op; the control channel can replay
/// or reorder leave events and other participants must never see an error
/// because of it.
pub struct LeaveRoomUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    directory: Arc<dyn RoomDirectory>,
}

impl LeaveRoomUseCase {
    /// Create a new LeaveRoomUseCase
    pub fn new(registry: Arc<dyn ConnectionRegistry>, directory: Arc<dyn RoomDirectory>) -> Self {
        Self {
            registry,
            directory,
        }
    }

    /// Execute the leave.
    ///
    /// # Returns
    ///
    /// * `Some(remaining)` - the members still in the room, to be notified
    /// * `None` - the peer was not a member; nothing to announce
    pub async fn execute(&self, peer_id: &PeerId, room_id: &RoomId) -> Option<Vec<PeerId>> {
        let remaining = self.directory.leave(room_id, peer_id).await;

        // Clear the room association only if it still points at this room;
        // a racing join to another room must not be clobbered.
        if self.registry.current_room(peer_id).await.as_ref() == Some(room_id) {
            self.registry.set_current_room(peer_id, None).await;
        }

        remaining
    }
}

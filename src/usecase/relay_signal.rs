//! UseCase: signaling message routing.
//!
//! Pure routing decisions over the room directory's current state. The relay
//! never mutates membership and never inspects SDP or ICE payloads; it only
//! computes recipients.

use std::sync::Arc;

use crate::domain::{PeerId, RoomDirectory, RoomId};

/// Computes the recipients of a signaling message.
pub struct RelaySignalUseCase {
    directory: Arc<dyn RoomDirectory>,
}

impl RelaySignalUseCase {
    /// Create a new RelaySignalUseCase
    pub fn new(directory: Arc<dyn RoomDirectory>) -> Self {
        Self { directory }
    }

    /// Recipient of a point-to-point negotiation message (offer, answer,
    /// ICE candidate).
    ///
    /// Exactly one recipient: the named target, if and only if it is still a
    /// member of the room. A stale target (already left) yields `None` and
    /// the message is dropped; the sender will receive the corresponding
    /// leave notification and tear that peer connection down itself.
    pub async fn direct_target(&self, room_id: &RoomId, target_id: &PeerId) -> Option<PeerId> {
        if self.directory.is_member(room_id, target_id).await {
            Some(target_id.clone())
        } else {
            None
        }
    }

    /// Recipients of a room-wide event (audio/video toggle): every member of
    /// the room except the sender.
    pub async fn broadcast_targets(&self, room_id: &RoomId, from_id: &PeerId) -> Vec<PeerId> {
        self.directory
            .members(room_id)
            .await
            .into_iter()
            .filter(|id| id != from_id)
            .collect()
    }
}

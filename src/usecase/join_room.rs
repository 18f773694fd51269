//! UseCase: joining a call room.

use std::sync::Arc;

use crate::{
    domain::{ConnectionRegistry, PeerId, RoomDirectory, RoomId, Timestamp},
    time::unix_timestamp_millis,
};

/// Outcome of a join, driving the gateway's notification fan-out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// Peers already in the room, excluding the joiner
    pub prior_members: Vec<PeerId>,
    /// False when this was a duplicate join; prior members must not be
    /// re-notified in that case
    pub newly_joined: bool,
    /// Room the peer implicitly left to honor the one-room-at-a-time
    /// invariant, with the members remaining there to notify
    pub left_previous: Option<(RoomId, Vec<PeerId>)>,
}

/// Moves a connection into a room.
///
/// A connection may only be in one room at a time; joining while in a
/// different room first runs the leave sequence for that room.
pub struct JoinRoomUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    directory: Arc<dyn RoomDirectory>,
}

impl JoinRoomUseCase {
    /// Create a new JoinRoomUseCase
    pub fn new(registry: Arc<dyn ConnectionRegistry>, directory: Arc<dyn RoomDirectory>) -> Self {
        Self {
            registry,
            directory,
        }
    }

    /// Execute the join and return the notification targets.
    ///
    /// Never fails: duplicate joins are absorbed by the directory and the
    /// outcome flags tell the gateway what (not) to announce.
    pub async fn execute(&self, peer_id: PeerId, room_id: RoomId) -> JoinOutcome {
        let left_previous = match self.registry.current_room(&peer_id).await {
            Some(previous) if previous != room_id => self
                .directory
                .leave(&previous, &peer_id)
                .await
                .map(|remaining| (previous, remaining)),
            _ => None,
        };

        let snapshot = self
            .directory
            .join(
                room_id.clone(),
                peer_id.clone(),
                Timestamp::new(unix_timestamp_millis()),
            )
            .await;
        self.registry
            .set_current_room(&peer_id, Some(room_id))
            .await;

        JoinOutcome {
            prior_members: snapshot.prior_members,
            newly_joined: snapshot.newly_joined,
            left_previous,
        }
    }
}

//! In-memory RoomDirectory implementation.
//!
//! Implements the domain-layer `RoomDirectory` trait over a `HashMap` guarded
//! by a single mutex, so concurrent join/leave for the same room can never
//! interleave into an inconsistent member set.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{JoinSnapshot, Member, PeerId, Room, RoomDirectory, RoomId, Timestamp};

/// In-memory room directory.
///
/// Room lifecycle is derived entirely from membership: an entry is created on
/// first join and removed the moment its member list empties.
#[derive(Default)]
pub struct InMemoryRoomDirectory {
    rooms: Arc<Mutex<HashMap<RoomId, Room>>>,
}

impl InMemoryRoomDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomDirectory for InMemoryRoomDirectory {
    async fn join(&self, room_id: RoomId, peer_id: PeerId, joined_at: Timestamp) -> JoinSnapshot {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .entry(room_id.clone())
            .or_insert_with(|| Room::new(room_id, joined_at));

        // Snapshot before the add: these are the peers the caller notifies,
        // and rejoining must not list the joiner itself.
        let newly_joined = !room.contains(&peer_id);
        let prior_members: Vec<PeerId> = room
            .member_ids()
            .into_iter()
            .filter(|id| id != &peer_id)
            .collect();

        room.add_member(Member::new(peer_id, joined_at));
        JoinSnapshot {
            prior_members,
            newly_joined,
        }
    }

    async fn leave(&self, room_id: &RoomId, peer_id: &PeerId) -> Option<Vec<PeerId>> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.get_mut(room_id)?;
        if !room.contains(peer_id) {
            return None;
        }

        room.remove_member(peer_id);
        let remaining = room.member_ids();
        if remaining.is_empty() {
            rooms.remove(room_id);
        }
        Some(remaining)
    }

    async fn is_member(&self, room_id: &RoomId, peer_id: &PeerId) -> bool {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).is_some_and(|room| room.contains(peer_id))
    }

    async fn members(&self, room_id: &RoomId) -> Vec<PeerId> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).map(Room::member_ids).unwrap_or_default()
    }

    async fn rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        rooms.values().cloned().collect()
    }

    async fn get_room(&self, room_id: &RoomId) -> Option<Room> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(id: &str) -> PeerId {
        PeerId::new(id.to_string()).unwrap()
    }

    fn room_id(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_join_creates_room_and_returns_empty_snapshot() {
        // given:
        let directory = InMemoryRoomDirectory::new();

        // when: the first peer joins
        let snapshot = directory
            .join(room_id("r1"), peer("alice"), Timestamp::new(1))
            .await;

        // then: nobody was there before, and the room now exists
        assert!(snapshot.prior_members.is_empty());
        assert!(snapshot.newly_joined);
        assert_eq!(directory.members(&room_id("r1")).await, vec![peer("alice")]);
    }

    #[tokio::test]
    async fn test_join_returns_prior_members() {
        // given:
        let directory = InMemoryRoomDirectory::new();
        directory
            .join(room_id("r1"), peer("alice"), Timestamp::new(1))
            .await;

        // when: a second peer joins
        let snapshot = directory
            .join(room_id("r1"), peer("bob"), Timestamp::new(2))
            .await;

        // then: the snapshot holds only the existing member
        assert_eq!(snapshot.prior_members, vec![peer("alice")]);
        assert!(snapshot.newly_joined);
        assert_eq!(
            directory.members(&room_id("r1")).await,
            vec![peer("alice"), peer("bob")]
        );
    }

    #[tokio::test]
    async fn test_duplicate_join_is_idempotent() {
        // given:
        let directory = InMemoryRoomDirectory::new();
        directory
            .join(room_id("r1"), peer("alice"), Timestamp::new(1))
            .await;
        directory
            .join(room_id("r1"), peer("bob"), Timestamp::new(2))
            .await;

        // when: bob joins again
        let snapshot = directory
            .join(room_id("r1"), peer("bob"), Timestamp::new(3))
            .await;

        // then: same snapshot as the first join, membership unchanged
        assert_eq!(snapshot.prior_members, vec![peer("alice")]);
        assert!(!snapshot.newly_joined);
        assert_eq!(
            directory.members(&room_id("r1")).await,
            vec![peer("alice"), peer("bob")]
        );
    }

    #[tokio::test]
    async fn test_leave_returns_remaining_members() {
        // given:
        let directory = InMemoryRoomDirectory::new();
        directory
            .join(room_id("r1"), peer("alice"), Timestamp::new(1))
            .await;
        directory
            .join(room_id("r1"), peer("bob"), Timestamp::new(2))
            .await;

        // when:
        let remaining = directory.leave(&room_id("r1"), &peer("bob")).await;

        // then: the room survives with the remaining member
        assert_eq!(remaining, Some(vec![peer("alice")]));
        assert_eq!(directory.members(&room_id("r1")).await, vec![peer("alice")]);
    }

    #[tokio::test]
    async fn test_last_leave_deletes_room() {
        // given:
        let directory = InMemoryRoomDirectory::new();
        directory
            .join(room_id("r1"), peer("alice"), Timestamp::new(1))
            .await;

        // when: the last member leaves
        let remaining = directory.leave(&room_id("r1"), &peer("alice")).await;

        // then: the entry is gone, not retained empty
        assert_eq!(remaining, Some(Vec::new()));
        assert!(directory.get_room(&room_id("r1")).await.is_none());
        assert!(directory.rooms().await.is_empty());
    }

    #[tokio::test]
    async fn test_leave_unknown_room_is_noop() {
        // given:
        let directory = InMemoryRoomDirectory::new();

        // when:
        let remaining = directory.leave(&room_id("ghost"), &peer("alice")).await;

        // then:
        assert!(remaining.is_none());
    }

    #[tokio::test]
    async fn test_leave_non_member_is_noop() {
        // given:
        let directory = InMemoryRoomDirectory::new();
        directory
            .join(room_id("r1"), peer("alice"), Timestamp::new(1))
            .await;

        // when: a peer who never joined leaves
        let remaining = directory.leave(&room_id("r1"), &peer("bob")).await;

        // then: no-op, membership unchanged
        assert!(remaining.is_none());
        assert_eq!(directory.members(&room_id("r1")).await, vec![peer("alice")]);
    }

    #[tokio::test]
    async fn test_join_then_leave_round_trips_to_empty_directory() {
        // given:
        let directory = InMemoryRoomDirectory::new();

        // when: a full join/leave cycle
        directory
            .join(room_id("r1"), peer("alice"), Timestamp::new(1))
            .await;
        directory.leave(&room_id("r1"), &peer("alice")).await;

        // then: directory is back to its pre-join state
        assert!(directory.rooms().await.is_empty());
        assert!(!directory.is_member(&room_id("r1"), &peer("alice")).await);
    }

    #[tokio::test]
    async fn test_is_member() {
        // given:
        let directory = InMemoryRoomDirectory::new();
        directory
            .join(room_id("r1"), peer("alice"), Timestamp::new(1))
            .await;

        // then:
        assert!(directory.is_member(&room_id("r1"), &peer("alice")).await);
        assert!(!directory.is_member(&room_id("r1"), &peer("bob")).await);
        assert!(!directory.is_member(&room_id("r2"), &peer("alice")).await);
    }
}

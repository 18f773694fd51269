//! In-memory ConnectionRegistry implementation.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::UnboundedSender};

use crate::domain::{ConnectionEntry, ConnectionRegistry, PeerId, RegistryError, RoomId};

/// In-memory connection registry keyed by bound identity.
///
/// The duplicate-identity check and the insert happen under one lock, so two
/// racing handshakes for the same identity cannot both bind.
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    connections: Arc<Mutex<HashMap<PeerId, ConnectionEntry>>>,
}

impl InMemoryConnectionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn bind(&self, peer_id: PeerId, entry: ConnectionEntry) -> Result<(), RegistryError> {
        let mut connections = self.connections.lock().await;
        if connections.contains_key(&peer_id) {
            return Err(RegistryError::AlreadyBound(peer_id.into_string()));
        }
        connections.insert(peer_id, entry);
        Ok(())
    }

    async fn unbind(&self, peer_id: &PeerId) -> Option<ConnectionEntry> {
        let mut connections = self.connections.lock().await;
        connections.remove(peer_id)
    }

    async fn current_room(&self, peer_id: &PeerId) -> Option<RoomId> {
        let connections = self.connections.lock().await;
        connections.get(peer_id).and_then(|e| e.room_id.clone())
    }

    async fn set_current_room(&self, peer_id: &PeerId, room_id: Option<RoomId>) {
        let mut connections = self.connections.lock().await;
        if let Some(entry) = connections.get_mut(peer_id) {
            entry.room_id = room_id;
        }
    }

    async fn sender(&self, peer_id: &PeerId) -> Option<UnboundedSender<String>> {
        let connections = self.connections.lock().await;
        connections.get(peer_id).map(|e| e.sender.clone())
    }

    async fn connected_peers(&self) -> Vec<PeerId> {
        let connections = self.connections.lock().await;
        connections.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;
    use tokio::sync::mpsc;

    fn peer(id: &str) -> PeerId {
        PeerId::new(id.to_string()).unwrap()
    }

    fn room_id(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    fn entry() -> ConnectionEntry {
        let (tx, _rx) = mpsc::unbounded_channel();
        ConnectionEntry::new(tx, Timestamp::new(0))
    }

    #[tokio::test]
    async fn test_bind_success() {
        // given:
        let registry = InMemoryConnectionRegistry::new();

        // when:
        let result = registry.bind(peer("alice"), entry()).await;

        // then:
        assert!(result.is_ok());
        assert!(registry.sender(&peer("alice")).await.is_some());
    }

    #[tokio::test]
    async fn test_bind_duplicate_identity_fails() {
        // given:
        let registry = InMemoryConnectionRegistry::new();
        registry.bind(peer("alice"), entry()).await.unwrap();

        // when: a second connection claims the same identity
        let result = registry.bind(peer("alice"), entry()).await;

        // then:
        assert_eq!(
            result,
            Err(RegistryError::AlreadyBound("alice".to_string()))
        );
    }

    #[tokio::test]
    async fn test_unbind_returns_entry_with_room() {
        // given:
        let registry = InMemoryConnectionRegistry::new();
        registry.bind(peer("alice"), entry()).await.unwrap();
        registry
            .set_current_room(&peer("alice"), Some(room_id("r1")))
            .await;

        // when:
        let removed = registry.unbind(&peer("alice")).await;

        // then: the entry carries the room for the caller's leave cleanup
        assert_eq!(removed.unwrap().room_id, Some(room_id("r1")));
        assert!(registry.sender(&peer("alice")).await.is_none());
    }

    #[tokio::test]
    async fn test_unbind_unknown_peer_is_none() {
        // given:
        let registry = InMemoryConnectionRegistry::new();

        // when:
        let removed = registry.unbind(&peer("ghost")).await;

        // then:
        assert!(removed.is_none());
    }

    #[tokio::test]
    async fn test_connected_peers_tracks_binds_and_unbinds() {
        // given:
        let registry = InMemoryConnectionRegistry::new();
        assert!(registry.connected_peers().await.is_empty());
        registry.bind(peer("alice"), entry()).await.unwrap();
        registry.bind(peer("bob"), entry()).await.unwrap();

        // when:
        let mut peers = registry.connected_peers().await;
        peers.sort();

        // then:
        assert_eq!(peers, vec![peer("alice"), peer("bob")]);

        // when: alice disconnects
        registry.unbind(&peer("alice")).await;

        // then:
        assert_eq!(registry.connected_peers().await, vec![peer("bob")]);
    }

    #[tokio::test]
    async fn test_set_current_room_replaces_association() {
        // given:
        let registry = InMemoryConnectionRegistry::new();
        registry.bind(peer("alice"), entry()).await.unwrap();
        assert_eq!(registry.current_room(&peer("alice")).await, None);

        // when:
        registry
            .set_current_room(&peer("alice"), Some(room_id("r1")))
            .await;

        // then:
        assert_eq!(
            registry.current_room(&peer("alice")).await,
            Some(room_id("r1"))
        );

        // when: the association is cleared on leave
        registry.set_current_room(&peer("alice"), None).await;

        // then:
        assert_eq!(registry.current_room(&peer("alice")).await, None);
    }
}

//! UseCase: peer connection registration.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::{
    domain::{ConnectionEntry, ConnectionRegistry, PeerId, Timestamp},
    time::unix_timestamp_millis,
};

use super::error::ConnectError;

/// Registers an authenticated connection in the connection registry.
///
/// Identity is bound here, once, at handshake time. Later room joins can
/// only reference it, never replace it.
pub struct ConnectPeerUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl ConnectPeerUseCase {
    /// Create a new ConnectPeerUseCase
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Bind the identity to the connection's outbound channel.
    ///
    /// # Errors
    ///
    /// Returns `ConnectError::DuplicateIdentity` if another live connection
    /// already holds this identity.
    pub async fn execute(
        &self,
        peer_id: PeerId,
        sender: UnboundedSender<String>,
    ) -> Result<(), ConnectError> {
        let entry = ConnectionEntry::new(sender, Timestamp::new(unix_timestamp_millis()));
        tracing::debug!(
            "Binding connection {} to peer '{}'",
            entry.connection_id,
            peer_id
        );
        self.registry.bind(peer_id, entry).await?;
        Ok(())
    }
}

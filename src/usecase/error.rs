//! UseCase layer error definitions.

use thiserror::Error;

use crate::domain::RegistryError;

/// Errors returned when registering a new connection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// Another connection already holds this identity
    #[error("peer '{0}' is already connected")]
    DuplicateIdentity(String),
}

impl From<RegistryError> for ConnectError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::AlreadyBound(peer_id) => Self::DuplicateIdentity(peer_id),
        }
    }
}

//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// PeerId validation error
    #[error("PeerId cannot be empty")]
    PeerIdEmpty,

    /// PeerId too long error
    #[error("PeerId cannot exceed {max} characters (got {actual})")]
    PeerIdTooLong { max: usize, actual: usize },

    /// RoomId validation error
    #[error("RoomId cannot be empty")]
    RoomIdEmpty,

    /// RoomId too long error
    #[error("RoomId cannot exceed {max} characters (got {actual})")]
    RoomIdTooLong { max: usize, actual: usize },
}

/// Errors related to the connection registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A connection is already bound to this identity
    #[error("peer '{0}' is already connected")]
    AlreadyBound(String),
}

//! Domain layer for the signaling server.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod repository;
pub mod value_object;

pub use entity::{ConnectionEntry, Member, Room};
pub use error::{RegistryError, ValueObjectError};
pub use repository::{ConnectionRegistry, JoinSnapshot, RoomDirectory};
pub use value_object::{PeerId, RoomId, Timestamp};

#[cfg(test)]
pub use repository::MockRoomDirectory;

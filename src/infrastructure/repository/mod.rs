//! Repository implementations.
//!
//! Concrete implementations of the repository traits defined by the domain
//! layer. The use-case layer depends on the traits, not on these types
//! (dependency inversion).

pub mod inmemory;

pub use inmemory::{InMemoryConnectionRegistry, InMemoryRoomDirectory};

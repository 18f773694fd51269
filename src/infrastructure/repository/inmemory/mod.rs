//! In-memory repository implementations backed by mutex-guarded HashMaps.

pub mod directory;
pub mod registry;

pub use directory::InMemoryRoomDirectory;
pub use registry::InMemoryConnectionRegistry;

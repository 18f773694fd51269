//! UseCase layer.
//!
//! Business operations of the signaling core, called from the UI layer.
//! Each use case depends on the domain-layer repository traits only.

pub mod connect_peer;
pub mod disconnect_peer;
pub mod error;
pub mod join_room;
pub mod leave_room;
pub mod relay_signal;

pub use connect_peer::ConnectPeerUseCase;
pub use disconnect_peer::DisconnectPeerUseCase;
pub use error::ConnectError;
pub use join_room::{JoinOutcome, JoinRoomUseCase};
pub use leave_room::LeaveRoomUseCase;
pub use relay_signal::RelaySignalUseCase;

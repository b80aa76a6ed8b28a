//! Synchronization with the store shared by both participants
//!
//! The store is eventually consistent: writes may be delivered more than
//! once, late, or not at all, and nothing guarantees a participant reads its
//! own last write back.

mod channel;
mod memory;
mod snapshot;

pub use channel::SharedStateChannel;
pub use memory::{MemoryChannel, MemoryRoom};
pub use snapshot::{Participant, PlayerId, PlayerSnapshot, RoomStatus};

use thiserror::Error;

/// Failures talking to the shared store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("The store rejected the write")]
    WriteRejected,

    #[error("The room already has two players")]
    RoomFull,

    #[error("Name '{0}' is already taken in this room")]
    NameTaken(String),

    #[error("Not a member of this room")]
    NotInRoom,

    #[error("Round {0} is outside the match")]
    InvalidRound(u8),

    #[error("Failed to encode snapshot: {0}")]
    Encode(String),

    #[error("Failed to decode snapshot: {0}")]
    Decode(String),
}

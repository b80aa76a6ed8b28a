use crate::sync::SyncError;
use thiserror::Error;

/// Why a duel operation was refused or failed
///
/// Every rejection leaves the match state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DuelError {
    #[error("Guess must be exactly 5 letters, got {0}")]
    InvalidGuessLength(usize),

    #[error("'{0}' is not in the word list")]
    GuessNotInDictionary(String),

    #[error("Already submitted a guess for round {0}")]
    DuplicateSubmission(u8),

    #[error("The match is already over")]
    MatchOver,

    /// A delayed guess arrived after its round or match ended
    #[error("Guess was scheduled for round {round} of match {epoch}, which is closed")]
    StaleTicket { epoch: u64, round: u8 },

    /// The shared room has fewer than two players
    #[error("Waiting for an opponent to join")]
    WaitingForOpponent,

    #[error("This match has no local opponent")]
    NoLocalOpponent,

    /// Publishing to the shared store failed; local state is kept as is
    #[error("Shared state write failed: {0}")]
    ChannelWriteFailure(#[from] SyncError),
}

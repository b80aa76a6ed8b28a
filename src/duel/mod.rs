//! Two-player duel logic
//!
//! A [`DuelCoordinator`] owns one participant's [`MatchState`] and turns
//! guesses and peer snapshots into [`Step`]s: events for the presentation
//! layer plus writes for the shared store.

mod coordinator;
mod error;
mod events;
mod outcome;
mod round;
mod state;

pub use coordinator::DuelCoordinator;
pub use error::DuelError;
pub use events::{ChannelWrite, DuelEvent, Step, Submission};
pub use outcome::{MatchOutcome, resolve};
pub use round::{Round, RoundPhase, Side};
pub use state::{MatchState, MatchSummary, PeerMode, RoundTicket};

//! AI opponent
//!
//! A fair opponent: it narrows its own candidate set from its own verdicts and
//! guesses a random consistent word after a human-like delay.

mod filter;
pub mod pacing;

pub use filter::ConstraintFilter;
pub use pacing::{AiSchedule, Pacing, PendingGuess};

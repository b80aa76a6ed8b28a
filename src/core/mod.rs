//! Core domain types for the duel
//!
//! Words, verdicts, keyboards and guess histories. Everything here is pure and
//! free of I/O; the duel and AI layers build on these types.

mod history;
mod keyboard;
mod verdict;
mod word;

pub use history::{GuessEntry, GuessHistory, MAX_ROUNDS};
pub use keyboard::{Keyboard, QWERTY_ROWS};
pub use verdict::{Tag, Verdict};
pub use word::{WORD_LEN, Word, WordError};

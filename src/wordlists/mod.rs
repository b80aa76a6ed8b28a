//! Word lists for the duel
//!
//! Provides embedded word lists compiled into the binary, a file loader for
//! custom lists, and the [`Dictionary`] the coordinator validates guesses with.

mod dictionary;
mod embedded;
pub mod loader;

pub use dictionary::{Dictionary, WordBank};
pub use embedded::{ALLOWED, ALLOWED_COUNT, ANSWERS, ANSWERS_COUNT};

/// Word bank built from the embedded lists
#[must_use]
pub fn embedded_bank() -> WordBank {
    WordBank::new(
        loader::words_from_slice(ANSWERS),
        &loader::words_from_slice(ALLOWED),
    )
}

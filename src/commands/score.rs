//! Score command
//!
//! Scores a single guess against a secret.

use crate::core::{Verdict, Word, WordError};

/// Result of scoring one guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreResult {
    pub secret: Word,
    pub guess: Word,
    pub verdict: Verdict,
}

/// Score `guess` against `secret`
///
/// Neither word has to be in a word list.
///
/// # Errors
/// Returns `WordError` if either input is not a 5-letter word.
pub fn score_guess(secret: &str, guess: &str) -> Result<ScoreResult, WordError> {
    let secret = Word::new(secret)?;
    let guess = Word::new(guess)?;
    let verdict = Verdict::evaluate(&secret, &guess);

    Ok(ScoreResult {
        secret,
        guess,
        verdict,
    })
}

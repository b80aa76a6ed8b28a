//! Dictionary collaborator used to validate guesses and pick secrets

use crate::core::Word;
use rand::RngCore;
use rand::seq::IndexedRandom;
use rustc_hash::FxHashSet;

/// Word membership and secret selection
pub trait Dictionary {
    /// Whether `word` may be submitted as a guess
    fn is_accepted_guess(&self, word: &Word) -> bool;

    /// Draw a secret uniformly from the answer list
    ///
    /// Returns `None` only for an empty answer list.
    fn pick_random_secret(&self, rng: &mut dyn RngCore) -> Option<Word>;
}

/// Answer list plus the wider set of accepted guesses
///
/// Every answer is also an accepted guess, whether or not the guess list names it.
#[derive(Debug, Clone)]
pub struct WordBank {
    answers: Vec<Word>,
    accepted: FxHashSet<Word>,
}

impl WordBank {
    #[must_use]
    pub fn new(answers: Vec<Word>, allowed: &[Word]) -> Self {
        let accepted = allowed.iter().chain(&answers).cloned().collect();
        Self { answers, accepted }
    }

    /// Secrets and the AI's starting candidates
    #[must_use]
    pub fn answers(&self) -> &[Word] {
        &self.answers
    }

    #[must_use]
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }
}

impl Dictionary for WordBank {
    fn is_accepted_guess(&self, word: &Word) -> bool {
        self.accepted.contains(word)
    }

    fn pick_random_secret(&self, rng: &mut dyn RngCore) -> Option<Word> {
        self.answers.choose(rng).cloned()
    }
}

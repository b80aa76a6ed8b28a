//! Candidate narrowing for the AI opponent
//!
//! The AI only ever sees verdicts for its own guesses. Each verdict removes
//! every dictionary word that, taken as the secret, would have scored the
//! guess differently.

use crate::core::{GuessHistory, Verdict, Word};
use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Candidate set for one match
pub struct ConstraintFilter<'a> {
    dictionary: &'a [Word],
    candidates: Vec<&'a Word>,
    observed: usize,
}

impl<'a> ConstraintFilter<'a> {
    /// Start with every dictionary word as a candidate
    #[must_use]
    pub fn new(dictionary: &'a [Word]) -> Self {
        Self {
            dictionary,
            candidates: dictionary.iter().collect(),
            observed: 0,
        }
    }

    /// Forget all observations
    pub fn reset(&mut self) {
        self.candidates = self.dictionary.iter().collect();
        self.observed = 0;
    }

    /// Narrow the candidates with one scored guess
    ///
    /// If nothing survives (an inconsistent history or a dictionary that does
    /// not contain the secret) the set falls back to the full dictionary.
    pub fn observe(&mut self, guess: &Word, verdict: &Verdict) {
        self.candidates
            .retain(|&candidate| Verdict::evaluate(candidate, guess) == *verdict);
        self.observed += 1;

        if self.candidates.is_empty() {
            debug!(
                "no candidates consistent with {guess} {}, resetting to {} words",
                verdict.to_emoji(),
                self.dictionary.len()
            );
            self.candidates = self.dictionary.iter().collect();
        }
    }

    /// Fold in any history entries not yet observed
    ///
    /// A history shorter than what was already observed belongs to a new
    /// match, so the filter starts over.
    pub fn sync(&mut self, history: &GuessHistory) {
        if history.len() < self.observed {
            self.reset();
        }
        for entry in &history.entries()[self.observed..] {
            self.observe(&entry.guess, &entry.verdict);
        }
    }

    /// Pick the next guess uniformly from the candidates
    ///
    /// Returns `None` only when the dictionary itself is empty.
    pub fn next_guess<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'a Word> {
        self.candidates.choose(rng).copied()
    }

    #[must_use]
    pub fn candidates(&self) -> &[&'a Word] {
        &self.candidates
    }

    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Number of verdicts folded in since the last reset
    #[must_use]
    pub const fn observed(&self) -> usize {
        self.observed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::ANSWERS;
    use crate::wordlists::loader::words_from_slice;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn setup_words() -> Vec<Word> {
        words_from_slice(&["crane", "slate", "irate", "crate", "grate", "alloy"])
    }

    #[test]
    fn starts_with_full_dictionary() {
        let words = setup_words();
        let filter = ConstraintFilter::new(&words);
        assert_eq!(filter.candidate_count(), words.len());
        assert_eq!(filter.observed(), 0);
    }

    #[test]
    fn observe_keeps_words_that_reproduce_the_verdict() {
        let words = setup_words();
        let mut filter = ConstraintFilter::new(&words);

        let secret = Word::new("grate").unwrap();
        let guess = Word::new("crane").unwrap();
        filter.observe(&guess, &Verdict::evaluate(&secret, &guess));

        let texts: Vec<&str> = filter.candidates().iter().map(|w| w.text()).collect();
        // CRATE would have scored the C correct
        assert_eq!(texts, ["irate", "grate"]);
    }

    #[test]
    fn solved_verdict_leaves_only_the_guess() {
        let words = setup_words();
        let mut filter = ConstraintFilter::new(&words);

        let guess = Word::new("irate").unwrap();
        filter.observe(&guess, &Verdict::SOLVED);

        assert_eq!(filter.candidate_count(), 1);
        assert_eq!(filter.candidates()[0].text(), "irate");
    }

    #[test]
    fn impossible_verdict_resets_to_dictionary() {
        let words = setup_words();
        let mut filter = ConstraintFilter::new(&words);

        // No dictionary word scores ZZZZZ all correct
        let guess = Word::new("zzzzz").unwrap();
        filter.observe(&guess, &Verdict::SOLVED);

        assert_eq!(filter.candidate_count(), words.len());
        assert!(filter.next_guess(&mut StdRng::seed_from_u64(1)).is_some());
    }

    #[test]
    fn sync_folds_only_new_entries_and_restarts_on_shorter_history() {
        let words = setup_words();
        let mut filter = ConstraintFilter::new(&words);
        let secret = Word::new("crate").unwrap();

        let mut history = GuessHistory::new();
        let guess = Word::new("slate").unwrap();
        history.push(guess.clone(), Verdict::evaluate(&secret, &guess));

        filter.sync(&history);
        filter.sync(&history);
        assert_eq!(filter.observed(), 1);
        let narrowed = filter.candidate_count();
        assert!(narrowed < words.len());

        filter.sync(&GuessHistory::new());
        assert_eq!(filter.observed(), 0);
        assert_eq!(filter.candidate_count(), words.len());
    }

    #[test]
    fn empty_dictionary_has_no_guess() {
        let filter = ConstraintFilter::new(&[]);
        assert!(filter.next_guess(&mut StdRng::seed_from_u64(1)).is_none());
    }

    #[test]
    fn converges_on_secret_without_growing() {
        let dictionary = words_from_slice(ANSWERS);
        let mut rng = StdRng::seed_from_u64(42);

        for secret in dictionary.iter().step_by(97) {
            let mut filter = ConstraintFilter::new(&dictionary);
            let mut previous = filter.candidate_count();

            for _ in 0..12 {
                let guess = filter.next_guess(&mut rng).unwrap().clone();
                filter.observe(&guess, &Verdict::evaluate(secret, &guess));

                assert!(filter.candidates().contains(&secret), "lost {secret}");
                assert!(filter.candidate_count() <= previous);
                previous = filter.candidate_count();

                if filter.candidate_count() == 1 {
                    break;
                }
            }

            assert_eq!(filter.candidate_count(), 1, "did not converge on {secret}");
        }
    }
}

//! Ordered record of one participant's guesses

use super::verdict::Verdict;
use super::word::Word;
use serde::{Deserialize, Serialize};

/// Maximum number of rounds in a duel
pub const MAX_ROUNDS: usize = 6;

/// One scored guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessEntry {
    pub guess: Word,
    pub verdict: Verdict,
}

/// Append-only list of scored guesses, at most [`MAX_ROUNDS`] long
///
/// Entry `i` belongs to round `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuessHistory {
    entries: Vec<GuessEntry>,
}

impl GuessHistory {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a history from raw entries, keeping at most [`MAX_ROUNDS`]
    #[must_use]
    pub fn from_entries(mut entries: Vec<GuessEntry>) -> Self {
        entries.truncate(MAX_ROUNDS);
        Self { entries }
    }

    /// Append a scored guess
    ///
    /// Returns `false` without appending once the history is full.
    pub fn push(&mut self, guess: Word, verdict: Verdict) -> bool {
        if self.is_full() {
            return false;
        }
        self.entries.push(GuessEntry { guess, verdict });
        true
    }

    #[must_use]
    pub fn entries(&self) -> &[GuessEntry] {
        &self.entries
    }

    /// Entry for a 1-based round index
    #[must_use]
    pub fn round(&self, round: u8) -> Option<&GuessEntry> {
        usize::from(round)
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
    }

    #[must_use]
    pub fn last(&self) -> Option<&GuessEntry> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_ROUNDS
    }

    /// The first `rounds` entries
    #[must_use]
    pub fn prefix(&self, rounds: usize) -> &[GuessEntry] {
        &self.entries[..rounds.min(self.entries.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(secret: &str, guess: &str) -> (Word, Verdict) {
        let secret = Word::new(secret).unwrap();
        let guess = Word::new(guess).unwrap();
        let verdict = Verdict::evaluate(&secret, &guess);
        (guess, verdict)
    }

    #[test]
    fn push_appends_in_order() {
        let mut history = GuessHistory::new();
        let (g, v) = entry("slate", "crane");
        assert!(history.push(g, v));
        let (g, v) = entry("slate", "plant");
        assert!(history.push(g, v));

        assert_eq!(history.len(), 2);
        assert_eq!(history.round(1).unwrap().guess.text(), "crane");
        assert_eq!(history.round(2).unwrap().guess.text(), "plant");
        assert!(history.round(0).is_none());
        assert!(history.round(3).is_none());
    }

    #[test]
    fn push_stops_at_max_rounds() {
        let mut history = GuessHistory::new();
        for _ in 0..MAX_ROUNDS {
            let (g, v) = entry("slate", "crane");
            assert!(history.push(g, v));
        }
        let (g, v) = entry("slate", "crane");
        assert!(!history.push(g, v));
        assert_eq!(history.len(), MAX_ROUNDS);
    }

    #[test]
    fn from_entries_truncates() {
        let (g, v) = entry("slate", "crane");
        let entries = vec![GuessEntry { guess: g, verdict: v }; 9];
        assert_eq!(GuessHistory::from_entries(entries).len(), MAX_ROUNDS);
    }

    #[test]
    fn prefix_is_clamped() {
        let mut history = GuessHistory::new();
        let (g, v) = entry("slate", "crane");
        history.push(g, v);

        assert_eq!(history.prefix(0).len(), 0);
        assert_eq!(history.prefix(1).len(), 1);
        assert_eq!(history.prefix(4).len(), 1);
    }
}

//! What a coordinator transition produces

use super::MatchOutcome;
use crate::core::{GuessEntry, Verdict};
use crate::sync::PlayerSnapshot;

/// Externally visible happenings, in the order they occurred
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuelEvent {
    /// The local player's guess for `round` was accepted
    PlayerSubmitted { round: u8, verdict: Verdict },
    /// The remote opponent started or stopped typing a guess
    OpponentTyping { typing: bool },
    /// The opponent has a guess in for `round`; the word stays hidden until reveal
    OpponentSubmitted { round: u8 },
    /// Both guesses for `round` are now visible
    Revealed {
        round: u8,
        player: GuessEntry,
        opponent: GuessEntry,
    },
    /// `round` is open for guesses
    RoundAdvanced { round: u8 },
    GameOver { outcome: MatchOutcome },
}

/// A write the coordinator wants published to the shared store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelWrite {
    PlayerState(PlayerSnapshot),
    RoundRevealed(u8),
}

/// Output of one coordinator transition
///
/// Writes must be issued in order; the coordinator has already applied the
/// transition locally and does not wait for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step {
    pub events: Vec<DuelEvent>,
    pub writes: Vec<ChannelWrite>,
}

impl Step {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.writes.is_empty()
    }

    /// Append another step's output after this one's
    pub fn append(&mut self, other: Self) {
        self.events.extend(other.events);
        self.writes.extend(other.writes);
    }

    /// Number of reveals in this step
    #[must_use]
    pub fn reveals(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, DuelEvent::Revealed { .. }))
            .count()
    }

    /// The terminal outcome, if this step ended the match
    #[must_use]
    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.events.iter().find_map(|event| match event {
            DuelEvent::GameOver { outcome } => Some(*outcome),
            _ => None,
        })
    }
}

/// Accepted guess plus the transition it caused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub verdict: Verdict,
    pub step: Step,
}

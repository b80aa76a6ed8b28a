//! Per-round submission and reveal state
//!
//! ```text
//! Open ──submit──▶ OneSubmitted ──submit(other side)──▶ BothSubmitted ──latch──▶ Revealed
//! ```
//!
//! The reveal latch is the only way into `Revealed` and succeeds once per
//! round, so however many triggers observe "both submitted", only the first
//! one resolves the round.

use crate::core::MAX_ROUNDS;

/// Which participant an action belongs to, from the local point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Opponent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Open,
    OneSubmitted,
    BothSubmitted,
    Revealed,
}

/// Submission flags for one 1-based round index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    index: u8,
    submitted_player: bool,
    submitted_opponent: bool,
    revealed: bool,
}

impl Round {
    /// The first round of a match
    #[must_use]
    pub const fn first() -> Self {
        Self::open(1)
    }

    const fn open(index: u8) -> Self {
        Self {
            index,
            submitted_player: false,
            submitted_opponent: false,
            revealed: false,
        }
    }

    #[must_use]
    pub const fn index(&self) -> u8 {
        self.index
    }

    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.index as usize >= MAX_ROUNDS
    }

    #[must_use]
    pub const fn phase(&self) -> RoundPhase {
        match (self.submitted_player, self.submitted_opponent, self.revealed) {
            (_, _, true) => RoundPhase::Revealed,
            (true, true, false) => RoundPhase::BothSubmitted,
            (false, false, false) => RoundPhase::Open,
            _ => RoundPhase::OneSubmitted,
        }
    }

    #[must_use]
    pub const fn is_submitted(&self, side: Side) -> bool {
        match side {
            Side::Player => self.submitted_player,
            Side::Opponent => self.submitted_opponent,
        }
    }

    #[must_use]
    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Record a submission
    ///
    /// Returns `false` if that side had already submitted this round.
    pub(crate) fn submit(&mut self, side: Side) -> bool {
        let flag = match side {
            Side::Player => &mut self.submitted_player,
            Side::Opponent => &mut self.submitted_opponent,
        };
        !std::mem::replace(flag, true)
    }

    /// Enter `Revealed` if both sides have submitted
    ///
    /// Returns `true` exactly once per round: for the call that performs the
    /// transition. Every later call, and any call before both sides have
    /// submitted, returns `false`.
    pub(crate) fn latch_reveal(&mut self) -> bool {
        if self.phase() != RoundPhase::BothSubmitted {
            return false;
        }
        self.revealed = true;
        true
    }

    /// The round after this one
    ///
    /// Only a revealed round that is not the last has a successor.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        if self.revealed && !self.is_last() {
            Some(Self::open(self.index + 1))
        } else {
            None
        }
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_round_is_open() {
        let round = Round::first();
        assert_eq!(round.index(), 1);
        assert_eq!(round.phase(), RoundPhase::Open);
    }

    #[test]
    fn phases_follow_submissions_in_either_order() {
        for (first, second) in [
            (Side::Player, Side::Opponent),
            (Side::Opponent, Side::Player),
        ] {
            let mut round = Round::first();
            assert!(round.submit(first));
            assert_eq!(round.phase(), RoundPhase::OneSubmitted);
            assert!(round.submit(second));
            assert_eq!(round.phase(), RoundPhase::BothSubmitted);
        }
    }

    #[test]
    fn duplicate_submission_is_reported() {
        let mut round = Round::first();
        assert!(round.submit(Side::Player));
        assert!(!round.submit(Side::Player));
        assert_eq!(round.phase(), RoundPhase::OneSubmitted);
    }

    #[test]
    fn latch_requires_both_submissions() {
        let mut round = Round::first();
        assert!(!round.latch_reveal());
        round.submit(Side::Opponent);
        assert!(!round.latch_reveal());
        assert_eq!(round.phase(), RoundPhase::OneSubmitted);
    }

    #[test]
    fn latch_fires_once() {
        let mut round = Round::first();
        round.submit(Side::Player);
        round.submit(Side::Opponent);

        assert!(round.latch_reveal());
        assert!(!round.latch_reveal());
        assert_eq!(round.phase(), RoundPhase::Revealed);
    }

    #[test]
    fn next_round_only_after_reveal() {
        let mut round = Round::first();
        assert!(round.next().is_none());

        round.submit(Side::Player);
        round.submit(Side::Opponent);
        assert!(round.next().is_none());

        round.latch_reveal();
        let next = round.next().unwrap();
        assert_eq!(next.index(), 2);
        assert_eq!(next.phase(), RoundPhase::Open);
    }

    #[test]
    fn last_round_has_no_successor() {
        let mut round = Round::first();
        for _ in 1..MAX_ROUNDS {
            round.submit(Side::Player);
            round.submit(Side::Opponent);
            round.latch_reveal();
            round = round.next().unwrap();
        }
        assert!(round.is_last());

        round.submit(Side::Player);
        round.submit(Side::Opponent);
        round.latch_reveal();
        assert!(round.next().is_none());
    }
}

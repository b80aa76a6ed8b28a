//! Match outcome and round resolution

use crate::core::{GuessEntry, MAX_ROUNDS};
use serde::{Deserialize, Serialize};

/// State of a match after its most recent reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    #[default]
    Ongoing,
    PlayerWin,
    OpponentWin,
    /// Both solved in the same round
    BothWon,
    /// Both submitted the same unsolved word in the same round
    Collision,
    /// Six rounds without a winner
    Exhausted,
}

impl MatchOutcome {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Ongoing)
    }

    #[must_use]
    pub const fn is_draw(self) -> bool {
        matches!(self, Self::BothWon | Self::Collision | Self::Exhausted)
    }

    /// The same outcome seen from the opponent's side
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Self::PlayerWin => Self::OpponentWin,
            Self::OpponentWin => Self::PlayerWin,
            other => other,
        }
    }

    /// Short result line for the local player
    #[must_use]
    pub const fn headline(self) -> &'static str {
        match self {
            Self::Ongoing => "Match in progress",
            Self::PlayerWin => "You Win!",
            Self::OpponentWin => "You Lose!",
            Self::BothWon => "Both players guessed correctly - Draw!",
            Self::Collision => "COLLISION! Both players lose!",
            Self::Exhausted => "Draw - Neither player guessed the word",
        }
    }

    /// All terminal outcomes, in reporting order
    pub const TERMINAL: [Self; 5] = [
        Self::PlayerWin,
        Self::OpponentWin,
        Self::BothWon,
        Self::Collision,
        Self::Exhausted,
    ];
}

/// Decide the match state once both guesses for `round` are known
///
/// Checks run in a fixed order because several can hold at once. Wins come
/// before the collision check, so two identical correct guesses are a shared
/// win, not a collision.
#[must_use]
pub fn resolve(round: u8, player: &GuessEntry, opponent: &GuessEntry) -> MatchOutcome {
    let player_solved = player.verdict.is_solved();
    let opponent_solved = opponent.verdict.is_solved();

    match (player_solved, opponent_solved) {
        (true, true) => MatchOutcome::BothWon,
        (true, false) => MatchOutcome::PlayerWin,
        (false, true) => MatchOutcome::OpponentWin,
        (false, false) if player.guess == opponent.guess => MatchOutcome::Collision,
        (false, false) if usize::from(round) >= MAX_ROUNDS => MatchOutcome::Exhausted,
        (false, false) => MatchOutcome::Ongoing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Verdict, Word};

    fn entry(secret: &str, guess: &str) -> GuessEntry {
        let secret = Word::new(secret).unwrap();
        let guess = Word::new(guess).unwrap();
        let verdict = Verdict::evaluate(&secret, &guess);
        GuessEntry { guess, verdict }
    }

    #[test]
    fn both_solved_is_both_won() {
        let outcome = resolve(2, &entry("slate", "slate"), &entry("slate", "slate"));
        assert_eq!(outcome, MatchOutcome::BothWon);
    }

    #[test]
    fn single_solver_wins() {
        assert_eq!(
            resolve(1, &entry("slate", "slate"), &entry("slate", "crane")),
            MatchOutcome::PlayerWin
        );
        assert_eq!(
            resolve(1, &entry("slate", "crane"), &entry("slate", "slate")),
            MatchOutcome::OpponentWin
        );
    }

    #[test]
    fn identical_wrong_guesses_collide() {
        let outcome = resolve(3, &entry("slate", "crane"), &entry("slate", "crane"));
        assert_eq!(outcome, MatchOutcome::Collision);
    }

    #[test]
    fn collision_beats_exhaustion_in_last_round() {
        let outcome = resolve(6, &entry("slate", "crane"), &entry("slate", "crane"));
        assert_eq!(outcome, MatchOutcome::Collision);
    }

    #[test]
    fn unsolved_last_round_is_exhausted() {
        let outcome = resolve(6, &entry("slate", "crane"), &entry("slate", "plant"));
        assert_eq!(outcome, MatchOutcome::Exhausted);
    }

    #[test]
    fn unsolved_earlier_round_continues() {
        let outcome = resolve(5, &entry("slate", "crane"), &entry("slate", "plant"));
        assert_eq!(outcome, MatchOutcome::Ongoing);
    }

    #[test]
    fn win_in_last_round_is_not_exhaustion() {
        let outcome = resolve(6, &entry("slate", "slate"), &entry("slate", "plant"));
        assert_eq!(outcome, MatchOutcome::PlayerWin);
    }

    #[test]
    fn mirrored_swaps_only_wins() {
        assert_eq!(MatchOutcome::PlayerWin.mirrored(), MatchOutcome::OpponentWin);
        assert_eq!(MatchOutcome::OpponentWin.mirrored(), MatchOutcome::PlayerWin);
        assert_eq!(MatchOutcome::Collision.mirrored(), MatchOutcome::Collision);
    }

    #[test]
    fn terminal_outcomes_are_over() {
        assert!(!MatchOutcome::Ongoing.is_over());
        for outcome in MatchOutcome::TERMINAL {
            assert!(outcome.is_over());
        }
        assert!(MatchOutcome::BothWon.is_draw());
        assert!(!MatchOutcome::PlayerWin.is_draw());
    }
}

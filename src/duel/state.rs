//! The explicit value holding everything about one match

use super::outcome::MatchOutcome;
use super::round::{Round, RoundPhase, Side};
use crate::core::{GuessEntry, GuessHistory, Keyboard, MAX_ROUNDS, Word};

/// Where the opponent's guesses come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerMode {
    /// Scripted opponent in this process, scored against its own secret
    Ai { secret: Word },
    /// Human or AI elsewhere, seen through the shared store
    Remote,
}

impl PeerMode {
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote)
    }
}

/// Identifies one round of one match
///
/// Delayed work carries a ticket so it can be rejected once its round closes
/// or the match is restarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundTicket {
    pub epoch: u64,
    pub round: u8,
}

impl RoundTicket {
    #[must_use]
    pub const fn new(epoch: u64, round: u8) -> Self {
        Self { epoch, round }
    }
}

/// State of one match, owned and written only by its coordinator
///
/// The opponent's guesses are kept as a mirror of what the store last
/// reported, but only revealed rounds are exposed.
#[derive(Debug, Clone)]
pub struct MatchState {
    pub(super) secret: Word,
    pub(super) peer: PeerMode,
    pub(super) epoch: u64,
    pub(super) round: Round,
    pub(super) player: GuessHistory,
    pub(super) opponent: GuessHistory,
    pub(super) revealed_rounds: u8,
    pub(super) opponent_typing: bool,
    pub(super) outcome: MatchOutcome,
}

impl MatchState {
    pub(super) fn new(secret: Word, peer: PeerMode, epoch: u64) -> Self {
        Self {
            secret,
            peer,
            epoch,
            round: Round::first(),
            player: GuessHistory::new(),
            opponent: GuessHistory::new(),
            revealed_rounds: 0,
            opponent_typing: false,
            outcome: MatchOutcome::Ongoing,
        }
    }

    /// The word the local player is guessing
    ///
    /// Presentation layers should only show it once the match is over.
    #[must_use]
    pub const fn secret(&self) -> &Word {
        &self.secret
    }

    /// Increments on every restart
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub const fn round(&self) -> &Round {
        &self.round
    }

    #[must_use]
    pub const fn ticket(&self) -> RoundTicket {
        RoundTicket::new(self.epoch, self.round.index())
    }

    #[must_use]
    pub const fn outcome(&self) -> MatchOutcome {
        self.outcome
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    /// Whether the remote opponent last reported a partial guess
    #[must_use]
    pub const fn opponent_typing(&self) -> bool {
        self.opponent_typing
    }

    #[must_use]
    pub const fn revealed_rounds(&self) -> u8 {
        self.revealed_rounds
    }

    /// Own guesses, including an unrevealed one for the current round
    #[must_use]
    pub fn player_board(&self) -> &[GuessEntry] {
        self.player.entries()
    }

    #[must_use]
    pub const fn player_history(&self) -> &GuessHistory {
        &self.player
    }

    /// Opponent guesses for revealed rounds only
    #[must_use]
    pub fn opponent_board(&self) -> &[GuessEntry] {
        self.opponent.prefix(usize::from(self.revealed_rounds))
    }

    #[must_use]
    pub fn player_keyboard(&self) -> Keyboard {
        Keyboard::from_history(&self.player)
    }

    /// Local player is in and the opponent has not submitted yet
    #[must_use]
    pub const fn awaiting_opponent(&self) -> bool {
        !self.outcome.is_over()
            && self.round.is_submitted(Side::Player)
            && !self.round.is_submitted(Side::Opponent)
    }

    /// Opponent has a hidden guess in for the current round
    #[must_use]
    pub fn opponent_waiting(&self) -> bool {
        !self.outcome.is_over() && self.round.phase() != RoundPhase::Revealed
            && self.round.is_submitted(Side::Opponent)
    }

    /// Result of a finished match
    #[must_use]
    pub fn summary(&self) -> Option<MatchSummary> {
        self.outcome.is_over().then(|| MatchSummary {
            outcome: self.outcome,
            rounds_played: self.revealed_rounds,
            secret: self.secret.clone(),
            player: self.player.clone(),
            opponent: GuessHistory::from_entries(self.opponent_board().to_vec()),
        })
    }
}

/// Finished match, with both boards fully revealed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    pub outcome: MatchOutcome,
    pub rounds_played: u8,
    pub secret: Word,
    pub player: GuessHistory,
    pub opponent: GuessHistory,
}

impl MatchSummary {
    #[must_use]
    pub fn went_the_distance(&self) -> bool {
        usize::from(self.rounds_played) == MAX_ROUNDS
    }
}

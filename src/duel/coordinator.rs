//! Drives one match: validates guesses, mirrors the opponent and reveals rounds
//!
//! Every operation is a synchronous transition on [`MatchState`]. Anything
//! that has to reach the shared store comes back as [`ChannelWrite`]s in the
//! returned [`Step`], so the reveal latch is always set before the caller gets
//! a chance to do asynchronous work.

use super::error::DuelError;
use super::events::{ChannelWrite, DuelEvent, Step, Submission};
use super::outcome::resolve;
use super::round::Side;
use super::state::{MatchState, PeerMode, RoundTicket};
use crate::core::{GuessHistory, MAX_ROUNDS, Verdict, WORD_LEN, Word};
use crate::sync::PlayerSnapshot;
use crate::wordlists::Dictionary;
use log::{debug, trace, warn};

/// Coordinator for one participant's view of a duel
pub struct DuelCoordinator<'a, D: Dictionary + ?Sized> {
    dictionary: &'a D,
    state: MatchState,
    /// Submitted markers from the last accepted peer snapshot
    peer_flags: [bool; MAX_ROUNDS],
}

impl<'a, D: Dictionary + ?Sized> DuelCoordinator<'a, D> {
    /// Start a match against `peer`, guessing `secret`
    #[must_use]
    pub fn start(dictionary: &'a D, secret: Word, peer: PeerMode) -> Self {
        debug!("Starting match (remote peer: {})", peer.is_remote());
        Self {
            dictionary,
            state: MatchState::new(secret, peer, 0),
            peer_flags: [false; MAX_ROUNDS],
        }
    }

    /// Throw the current match away and start a fresh one
    ///
    /// Tickets issued for the old match are rejected from now on.
    pub fn restart(&mut self, secret: Word, peer: PeerMode) {
        let epoch = self.state.epoch + 1;
        debug!("Restarting match, epoch {epoch}");
        self.state = MatchState::new(secret, peer, epoch);
        self.peer_flags = [false; MAX_ROUNDS];
    }

    #[must_use]
    pub const fn state(&self) -> &MatchState {
        &self.state
    }

    /// Ticket for the round currently open
    #[must_use]
    pub const fn ticket(&self) -> RoundTicket {
        self.state.ticket()
    }

    /// Submit the local player's guess for the current round
    ///
    /// # Errors
    /// - `MatchOver` once the match has ended
    /// - `DuplicateSubmission` if this round already has the player's guess
    /// - `InvalidGuessLength` unless the input is 5 characters
    /// - `GuessNotInDictionary` for non-letters or words the dictionary rejects
    ///
    /// A rejected guess leaves the match untouched.
    pub fn submit_guess(&mut self, input: &str) -> Result<Submission, DuelError> {
        if self.state.is_over() {
            return Err(DuelError::MatchOver);
        }

        let index = self.state.round.index();
        if self.state.round.is_submitted(Side::Player) {
            return Err(DuelError::DuplicateSubmission(index));
        }

        let input = input.trim();
        let len = input.chars().count();
        if len != WORD_LEN {
            return Err(DuelError::InvalidGuessLength(len));
        }

        let word = Word::new(input)
            .map_err(|_| DuelError::GuessNotInDictionary(input.to_lowercase()))?;
        if !self.dictionary.is_accepted_guess(&word) {
            return Err(DuelError::GuessNotInDictionary(word.text().to_string()));
        }

        let verdict = Verdict::evaluate(&self.state.secret, &word);
        self.state.player.push(word, verdict);
        self.state.round.submit(Side::Player);
        debug!("Player submitted round {index}: {verdict}");

        let mut step = Step::default();
        step.events.push(DuelEvent::PlayerSubmitted {
            round: index,
            verdict,
        });
        if self.state.peer.is_remote() {
            step.writes.push(ChannelWrite::PlayerState(PlayerSnapshot::of_history(
                &self.state.player,
            )));
        }
        self.try_reveal(&mut step);

        Ok(Submission { verdict, step })
    }

    /// Submit the local AI opponent's guess for the round named by `ticket`
    ///
    /// The guess is scored against the AI's own secret and is not checked
    /// against the dictionary.
    ///
    /// # Errors
    /// - `NoLocalOpponent` when the peer is remote
    /// - `StaleTicket` if the ticket's round or match has moved on
    /// - `MatchOver` once the match has ended
    /// - `DuplicateSubmission` if the AI already guessed this round
    pub fn submit_opponent_guess(
        &mut self,
        ticket: RoundTicket,
        word: Word,
    ) -> Result<Submission, DuelError> {
        let PeerMode::Ai { secret } = &self.state.peer else {
            return Err(DuelError::NoLocalOpponent);
        };
        if ticket != self.state.ticket() {
            return Err(DuelError::StaleTicket {
                epoch: ticket.epoch,
                round: ticket.round,
            });
        }
        if self.state.is_over() {
            return Err(DuelError::MatchOver);
        }
        let index = ticket.round;
        if self.state.round.is_submitted(Side::Opponent) {
            return Err(DuelError::DuplicateSubmission(index));
        }

        let verdict = Verdict::evaluate(secret, &word);
        self.state.opponent.push(word, verdict);
        self.state.round.submit(Side::Opponent);
        debug!("Opponent submitted round {index}");

        let mut step = Step::default();
        step.events.push(DuelEvent::OpponentSubmitted { round: index });
        self.try_reveal(&mut step);

        Ok(Submission { verdict, step })
    }

    /// Apply the latest snapshot of the remote opponent
    ///
    /// The snapshot replaces the mirror wholesale. One shorter than the
    /// current mirror is an out-of-order delivery and is dropped, as is
    /// anything arriving after the match ended. Repeated deliveries of the
    /// same snapshot produce an empty step.
    pub fn on_peer_update(&mut self, snapshot: PlayerSnapshot) -> Step {
        let mut step = Step::default();

        if !self.state.peer.is_remote() {
            warn!("Ignoring peer snapshot in a match against a local opponent");
            return step;
        }
        if self.state.is_over() {
            trace!("Ignoring peer snapshot after the match ended");
            return step;
        }

        let PlayerSnapshot {
            history,
            submitted,
            typing,
        } = snapshot;
        if history.len() < self.state.opponent.len() {
            warn!(
                "Dropping stale peer snapshot ({} guesses, mirror has {})",
                history.len(),
                self.state.opponent.len()
            );
            return step;
        }
        let history = if history.len() > MAX_ROUNDS {
            warn!("Peer snapshot has {} guesses, keeping {MAX_ROUNDS}", history.len());
            GuessHistory::from_entries(history.entries().to_vec())
        } else {
            history
        };

        self.state.opponent = history;
        self.peer_flags = submitted;
        if typing != self.state.opponent_typing {
            self.state.opponent_typing = typing;
            step.events.push(DuelEvent::OpponentTyping { typing });
        }
        self.sync_peer_submission(&mut step);
        self.try_reveal(&mut step);
        step
    }

    /// Mark the opponent as submitted for the open round if the mirror says so
    fn sync_peer_submission(&mut self, step: &mut Step) {
        let index = self.state.round.index();
        if self.state.round.is_submitted(Side::Opponent) || !self.peer_has_submitted(index) {
            return;
        }
        self.state.round.submit(Side::Opponent);
        debug!("Peer submitted round {index}");
        step.events.push(DuelEvent::OpponentSubmitted { round: index });
    }

    fn peer_has_submitted(&self, round: u8) -> bool {
        let Some(slot) = usize::from(round).checked_sub(1) else {
            return false;
        };
        self.peer_flags.get(slot).copied().unwrap_or(false) && self.state.opponent.len() > slot
    }

    /// Reveal the open round once both guesses are in
    ///
    /// The latch is taken before anything else, so a second trigger for the
    /// same round finds it closed and does nothing.
    fn try_reveal(&mut self, step: &mut Step) {
        let index = self.state.round.index();
        let (Some(player), Some(opponent)) = (
            self.state.player.round(index).cloned(),
            self.state.opponent.round(index).cloned(),
        ) else {
            return;
        };
        if !self.state.round.latch_reveal() {
            trace!("Round {index} reveal already handled or not ready");
            return;
        }

        self.state.revealed_rounds = index;
        let outcome = resolve(index, &player, &opponent);
        debug!("Revealed round {index}: {outcome:?}");

        step.events.push(DuelEvent::Revealed {
            round: index,
            player,
            opponent,
        });
        if self.state.peer.is_remote() {
            step.writes.push(ChannelWrite::RoundRevealed(index));
        }

        if outcome.is_over() {
            self.state.outcome = outcome;
            step.events.push(DuelEvent::GameOver { outcome });
            return;
        }

        if let Some(next) = self.state.round.next() {
            self.state.round = next;
            step.events.push(DuelEvent::RoundAdvanced {
                round: next.index(),
            });
            if self.state.peer.is_remote() {
                self.sync_peer_submission(step);
            }
        }
    }
}

//! Glue between a coordinator and a shared store
//!
//! Coordinator transitions run synchronously on the caller's task. The writes
//! they request go to a single writer task, so they reach the store in the
//! order they were produced and never hold up local play.

use crate::duel::{ChannelWrite, DuelCoordinator, DuelError, MatchState, Side, Step, Submission};
use crate::sync::{Participant, PlayerSnapshot, SharedStateChannel, SyncError};
use crate::wordlists::Dictionary;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Something the session observed while waiting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// A peer snapshot was applied
    Step(Step),
    /// Someone joined or left the room
    Roster(Vec<Participant>),
    /// A write to the store failed; local state was kept
    WriteFailed(DuelError),
    /// The store stopped delivering snapshots
    Disconnected,
}

/// Everything the writer task publishes, in queue order
#[derive(Debug)]
enum Outgoing {
    Duel(ChannelWrite),
    Typing(bool),
    MatchFinished,
}

/// A coordinator playing through a [`SharedStateChannel`]
///
/// Guesses are refused until the room holds two players.
pub struct RemoteSession<'a, D: Dictionary + ?Sized> {
    coordinator: DuelCoordinator<'a, D>,
    opponent_rx: UnboundedReceiver<PlayerSnapshot>,
    roster_rx: UnboundedReceiver<Vec<Participant>>,
    writes_tx: UnboundedSender<Outgoing>,
    failures_rx: UnboundedReceiver<SyncError>,
    writer: JoinHandle<()>,
    opponent_present: bool,
    typing: bool,
    finish_reported: bool,
}

impl<'a, D: Dictionary + ?Sized> RemoteSession<'a, D> {
    /// Subscribe to the opponent and the roster, and start the writer task
    ///
    /// Must be called inside a tokio runtime.
    ///
    /// # Errors
    /// Returns the channel's error if a subscription is refused.
    pub async fn connect<C>(
        coordinator: DuelCoordinator<'a, D>,
        channel: Arc<C>,
    ) -> Result<Self, SyncError>
    where
        C: SharedStateChannel + 'static,
    {
        let opponent_rx = channel.on_opponent_state_changed().await?;
        let mut roster_rx = channel.on_room_roster_changed().await?;
        let roster = roster_rx.recv().await.unwrap_or_default();
        let (writes_tx, writes_rx) = mpsc::unbounded_channel();
        let (failures_tx, failures_rx) = mpsc::unbounded_channel();
        let writer = tokio::spawn(run_writer(channel, writes_rx, failures_tx));

        Ok(Self {
            coordinator,
            opponent_rx,
            roster_rx,
            writes_tx,
            failures_rx,
            writer,
            opponent_present: has_opponent(&roster),
            typing: false,
            finish_reported: false,
        })
    }

    #[must_use]
    pub const fn state(&self) -> &MatchState {
        self.coordinator.state()
    }

    /// Whether the room currently holds both players
    #[must_use]
    pub const fn opponent_present(&self) -> bool {
        self.opponent_present
    }

    /// Submit the local guess and queue whatever it has to publish
    ///
    /// # Errors
    /// `WaitingForOpponent` while the room has a single player, otherwise any
    /// rejection from [`DuelCoordinator::submit_guess`]. Nothing is published
    /// in either case.
    pub fn submit_guess(&mut self, input: &str) -> Result<Submission, DuelError> {
        if !self.opponent_present && !self.state().is_over() {
            return Err(DuelError::WaitingForOpponent);
        }
        let submission = self.coordinator.submit_guess(input)?;
        // The published snapshot carries a cleared typing flag
        self.typing = false;
        self.publish(&submission.step);
        Ok(submission)
    }

    /// Tell the opponent whether a guess is being typed
    ///
    /// Only changes are published, and never once this round's guess is in.
    pub fn set_typing(&mut self, typing: bool) {
        if typing == self.typing {
            return;
        }
        let state = self.state();
        if typing && (state.is_over() || state.round().is_submitted(Side::Player)) {
            return;
        }
        self.typing = typing;
        self.queue(Outgoing::Typing(typing));
    }

    /// Wait for the next peer snapshot, roster change or write failure
    pub async fn next_update(&mut self) -> SessionUpdate {
        tokio::select! {
            Some(error) = self.failures_rx.recv() => {
                SessionUpdate::WriteFailed(DuelError::ChannelWriteFailure(error))
            }
            Some(roster) = self.roster_rx.recv() => {
                self.opponent_present = has_opponent(&roster);
                info!("Room roster changed, {} player(s) in", roster.len());
                SessionUpdate::Roster(roster)
            }
            snapshot = self.opponent_rx.recv() => match snapshot {
                Some(snapshot) => {
                    let step = self.coordinator.on_peer_update(snapshot);
                    self.publish(&step);
                    SessionUpdate::Step(step)
                }
                None => SessionUpdate::Disconnected,
            },
        }
    }

    /// Stop accepting writes and wait until the queued ones were attempted
    pub async fn close(self) {
        let Self {
            writes_tx, writer, ..
        } = self;
        drop(writes_tx);
        if let Err(e) = writer.await {
            warn!("Writer task ended abnormally: {e}");
        }
    }

    fn publish(&mut self, step: &Step) {
        for write in &step.writes {
            self.queue(Outgoing::Duel(write.clone()));
        }
        if step.outcome().is_some() && !self.finish_reported {
            self.finish_reported = true;
            self.queue(Outgoing::MatchFinished);
        }
    }

    fn queue(&self, outgoing: Outgoing) {
        if let Err(e) = self.writes_tx.send(outgoing) {
            warn!("Writer task is gone, dropping {:?}", e.0);
        }
    }
}

fn has_opponent(roster: &[Participant]) -> bool {
    roster.len() >= 2
}

async fn run_writer<C: SharedStateChannel>(
    channel: Arc<C>,
    mut writes: UnboundedReceiver<Outgoing>,
    failures: UnboundedSender<SyncError>,
) {
    while let Some(write) = writes.recv().await {
        let result = match write {
            Outgoing::Duel(ChannelWrite::PlayerState(snapshot)) => {
                channel.write_player_state(snapshot).await
            }
            Outgoing::Duel(ChannelWrite::RoundRevealed(round)) => {
                channel.mark_round_revealed(round).await
            }
            Outgoing::Typing(typing) => channel.update_typing_status(typing).await,
            Outgoing::MatchFinished => channel.mark_match_finished().await,
        };
        if let Err(e) = result {
            warn!("Shared state write failed: {e}");
            // Session may already be gone; the failure is logged either way
            let _ = failures.send(e);
        }
    }
    debug!("Writer task finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::duel::{DuelEvent, MatchOutcome, PeerMode};
    use crate::sync::{MemoryRoom, RoomStatus};
    use crate::wordlists::WordBank;
    use crate::wordlists::loader::words_from_slice;

    fn bank() -> WordBank {
        WordBank::new(words_from_slice(&["slate", "crane", "plant", "grate"]), &[])
    }

    fn slate() -> Word {
        Word::new("slate").unwrap()
    }

    async fn connect<'a>(
        bank: &'a WordBank,
        channel: crate::sync::MemoryChannel,
    ) -> RemoteSession<'a, WordBank> {
        RemoteSession::connect(
            DuelCoordinator::start(bank, slate(), PeerMode::Remote),
            Arc::new(channel),
        )
        .await
        .unwrap()
    }

    async fn pair<'a>(
        bank: &'a WordBank,
        room: &MemoryRoom,
    ) -> (RemoteSession<'a, WordBank>, RemoteSession<'a, WordBank>) {
        let host = room.join("ada").await.unwrap();
        let guest = room.join("bob").await.unwrap();
        (connect(bank, host).await, connect(bank, guest).await)
    }

    #[tokio::test]
    async fn peer_guess_reveals_round() {
        let bank = bank();
        let room = MemoryRoom::create(slate());
        let (mut ada, mut bob) = pair(&bank, &room).await;

        ada.submit_guess("crane").unwrap();
        bob.submit_guess("plant").unwrap();

        let SessionUpdate::Step(step) = ada.next_update().await else {
            panic!("expected a step");
        };
        assert_eq!(step.reveals(), 1);
        assert!(
            step.events
                .contains(&DuelEvent::RoundAdvanced { round: 2 })
        );
        assert_eq!(ada.state().opponent_board()[0].guess.text(), "plant");
    }

    #[tokio::test]
    async fn guesses_wait_for_the_second_player() {
        let bank = bank();
        let room = MemoryRoom::create(slate());
        let mut ada = connect(&bank, room.join("ada").await.unwrap()).await;

        assert!(!ada.opponent_present());
        assert_eq!(ada.submit_guess("crane"), Err(DuelError::WaitingForOpponent));
        assert!(ada.state().player_board().is_empty());

        let _bob = room.join("bob").await.unwrap();
        let SessionUpdate::Roster(roster) = ada.next_update().await else {
            panic!("expected a roster change");
        };
        assert_eq!(roster.len(), 2);
        assert!(ada.opponent_present());
        assert!(ada.submit_guess("crane").is_ok());
    }

    #[tokio::test]
    async fn typing_reaches_the_opponent() {
        let bank = bank();
        let room = MemoryRoom::create(slate());
        let (mut ada, mut bob) = pair(&bank, &room).await;

        ada.set_typing(true);
        let SessionUpdate::Step(step) = bob.next_update().await else {
            panic!("expected a step");
        };
        assert_eq!(step.events, vec![DuelEvent::OpponentTyping { typing: true }]);
        assert!(bob.state().opponent_typing());

        ada.submit_guess("crane").unwrap();
        // Typing again after submitting is not published
        ada.set_typing(true);
        let SessionUpdate::Step(step) = bob.next_update().await else {
            panic!("expected a step");
        };
        assert_eq!(
            step.events,
            vec![
                DuelEvent::OpponentTyping { typing: false },
                DuelEvent::OpponentSubmitted { round: 1 },
            ]
        );
    }

    #[tokio::test]
    async fn finished_match_is_reported_to_the_room() {
        let bank = bank();
        let room = MemoryRoom::create(slate());
        let (mut ada, mut bob) = pair(&bank, &room).await;

        ada.submit_guess("slate").unwrap();
        bob.submit_guess("crane").unwrap();
        let SessionUpdate::Step(step) = ada.next_update().await else {
            panic!("expected a step");
        };
        assert_eq!(step.outcome(), Some(MatchOutcome::PlayerWin));

        ada.close().await;
        assert_eq!(room.status().await, RoomStatus::Finished);
        assert!(room.is_revealed(1).await);
    }

    #[tokio::test]
    async fn write_failure_is_reported_not_fatal() {
        let bank = bank();
        let room = MemoryRoom::create(slate());
        let (mut ada, _bob) = pair(&bank, &room).await;
        room.set_write_failure(true).await;

        ada.submit_guess("crane").unwrap();
        assert!(matches!(
            ada.next_update().await,
            SessionUpdate::WriteFailed(DuelError::ChannelWriteFailure(SyncError::WriteRejected))
        ));
        assert_eq!(ada.state().player_board().len(), 1);
        assert!(ada.state().awaiting_opponent());
    }
}

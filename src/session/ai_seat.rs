//! An AI participant playing through the shared store

use super::remote::{RemoteSession, SessionUpdate};
use crate::ai::{AiSchedule, ConstraintFilter, Pacing};
use crate::core::Word;
use crate::duel::{DuelEvent, MatchSummary, Side};
use crate::wordlists::Dictionary;
use log::{debug, warn};
use rand::rngs::StdRng;
use tokio::time::{Instant, sleep_until};

/// Drives a [`RemoteSession`] with guesses from a [`ConstraintFilter`]
///
/// Each guess waits for a delay drawn from the seat's [`Pacing`]. The wait is
/// cancelled whenever the round it was meant for closes.
pub struct AiSeat<'a, D: Dictionary + ?Sized> {
    session: RemoteSession<'a, D>,
    filter: ConstraintFilter<'a>,
    pacing: Pacing,
    schedule: AiSchedule<Instant>,
    rng: StdRng,
}

impl<'a, D: Dictionary + ?Sized> AiSeat<'a, D> {
    /// Seat an AI that draws its guesses from `candidates`
    #[must_use]
    pub fn new(
        session: RemoteSession<'a, D>,
        candidates: &'a [Word],
        pacing: Pacing,
        rng: StdRng,
    ) -> Self {
        Self {
            session,
            filter: ConstraintFilter::new(candidates),
            pacing,
            schedule: AiSchedule::new(),
            rng,
        }
    }

    /// Play until the match ends
    ///
    /// `observer` sees every event in order. Returns `None` if the store
    /// disconnects first. A store that silently drops writes leaves the seat
    /// waiting for the opponent indefinitely. Pending writes are flushed
    /// before returning.
    pub async fn run(mut self, mut observer: impl FnMut(&DuelEvent)) -> Option<MatchSummary> {
        loop {
            if let Some(summary) = self.session.state().summary() {
                self.session.close().await;
                return Some(summary);
            }
            self.plan();

            let deadline = self.schedule.deadline();
            tokio::select! {
                () = wait_until(deadline) => {
                    if let Some(pending) = self.schedule.take_due(Instant::now())
                        && pending.ticket == self.session.state().ticket()
                    {
                        self.guess(&mut observer);
                    }
                }
                update = self.session.next_update() => match update {
                    SessionUpdate::Step(step) => {
                        for event in &step.events {
                            if matches!(
                                event,
                                DuelEvent::RoundAdvanced { .. } | DuelEvent::GameOver { .. }
                            ) {
                                self.schedule.cancel();
                            }
                            observer(event);
                        }
                    }
                    SessionUpdate::Roster(players) => {
                        debug!("AI seat sees {} player(s)", players.len());
                    }
                    SessionUpdate::WriteFailed(e) => warn!("AI seat: {e}"),
                    SessionUpdate::Disconnected => {
                        debug!("AI seat disconnected");
                        self.session.close().await;
                        return None;
                    }
                },
            }
        }
    }

    /// Make sure a guess is pending for the open round, unless one is in
    ///
    /// Nothing is planned until the opponent is in the room. While a guess is
    /// pending the seat shows as typing.
    fn plan(&mut self) {
        let state = self.session.state();
        let ticket = state.ticket();
        if state.is_over()
            || state.round().is_submitted(Side::Player)
            || !self.session.opponent_present()
        {
            self.schedule.cancel();
            return;
        }

        self.schedule.retain_ticket(ticket);
        if !self.schedule.is_pending_for(ticket) {
            let delay = self.pacing.sample(&mut self.rng);
            debug!("AI guessing round {} in {delay:?}", ticket.round);
            self.schedule.schedule(ticket, Instant::now() + delay);
            self.session.set_typing(true);
        }
    }

    fn guess(&mut self, observer: &mut impl FnMut(&DuelEvent)) {
        self.filter.sync(self.session.state().player_history());
        let Some(word) = self.filter.next_guess(&mut self.rng) else {
            warn!("AI has no words to guess from");
            return;
        };

        match self.session.submit_guess(word.text()) {
            Ok(submission) => {
                self.filter.observe(word, &submission.verdict);
                for event in &submission.step.events {
                    observer(event);
                }
            }
            Err(e) => warn!("AI guess '{word}' rejected: {e}"),
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

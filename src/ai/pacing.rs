//! Human-like pacing for AI guesses
//!
//! The AI waits a random delay before each submission. A scheduled guess is
//! bound to the round it was scheduled for and is dropped when that round ends
//! or the match is restarted.

use crate::duel::RoundTicket;
use rand::Rng;
use std::time::Duration;

/// Delay range before each AI guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub min: Duration,
    pub max: Duration,
}

impl Pacing {
    #[must_use]
    pub const fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    /// No delay at all, for simulations
    #[must_use]
    pub const fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Draw a delay uniformly from `min..=max`
    ///
    /// An inverted range collapses to `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        Duration::from_millis(rng.random_range(min..=max))
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new(Duration::from_secs(3), Duration::from_secs(10))
    }
}

/// An AI guess waiting for its deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingGuess<I> {
    pub ticket: RoundTicket,
    pub due: I,
}

/// At most one pending AI guess
///
/// Generic over the clock so the TUI can use `std::time::Instant` and the
/// async session `tokio::time::Instant`.
#[derive(Debug, Clone)]
pub struct AiSchedule<I> {
    pending: Option<PendingGuess<I>>,
}

impl<I> Default for AiSchedule<I> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<I: Copy + Ord> AiSchedule<I> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a guess for `ticket`, replacing anything already pending
    pub fn schedule(&mut self, ticket: RoundTicket, due: I) {
        self.pending = Some(PendingGuess { ticket, due });
    }

    /// Drop the pending guess, if any
    pub fn cancel(&mut self) -> Option<PendingGuess<I>> {
        self.pending.take()
    }

    /// Drop the pending guess unless it belongs to `ticket`
    pub fn retain_ticket(&mut self, ticket: RoundTicket) {
        if self.pending.is_some_and(|p| p.ticket != ticket) {
            self.pending = None;
        }
    }

    /// Take the pending guess once its deadline has passed
    pub fn take_due(&mut self, now: I) -> Option<PendingGuess<I>> {
        if self.pending.is_some_and(|p| p.due <= now) {
            self.pending.take()
        } else {
            None
        }
    }

    #[must_use]
    pub fn deadline(&self) -> Option<I> {
        self.pending.map(|p| p.due)
    }

    #[must_use]
    pub fn is_pending_for(&self, ticket: RoundTicket) -> bool {
        self.pending.is_some_and(|p| p.ticket == ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Instant;

    fn ticket(epoch: u64, round: u8) -> RoundTicket {
        RoundTicket::new(epoch, round)
    }

    #[test]
    fn default_pacing_is_three_to_ten_seconds() {
        let pacing = Pacing::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let delay = pacing.sample(&mut rng);
            assert!(delay >= Duration::from_secs(3));
            assert!(delay <= Duration::from_secs(10));
        }
    }

    #[test]
    fn instant_and_inverted_pacing_collapse_to_min() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(Pacing::instant().sample(&mut rng), Duration::ZERO);

        let inverted = Pacing::new(Duration::from_secs(5), Duration::from_secs(1));
        assert_eq!(inverted.sample(&mut rng), Duration::from_secs(5));
    }

    #[test]
    fn take_due_waits_for_deadline() {
        let start = Instant::now();
        let mut schedule = AiSchedule::new();
        schedule.schedule(ticket(0, 1), start + Duration::from_secs(2));

        assert!(schedule.take_due(start).is_none());
        assert!(schedule.is_pending_for(ticket(0, 1)));

        let due = schedule.take_due(start + Duration::from_secs(2)).unwrap();
        assert_eq!(due.ticket, ticket(0, 1));
        assert!(schedule.deadline().is_none());
    }

    #[test]
    fn cancel_drops_pending_guess() {
        let start = Instant::now();
        let mut schedule = AiSchedule::new();
        schedule.schedule(ticket(0, 1), start);

        assert!(schedule.cancel().is_some());
        assert!(schedule.take_due(start + Duration::from_secs(60)).is_none());
    }

    #[test]
    fn retain_ticket_drops_guess_for_another_round() {
        let start = Instant::now();
        let mut schedule = AiSchedule::new();

        schedule.schedule(ticket(0, 1), start);
        schedule.retain_ticket(ticket(0, 1));
        assert!(schedule.is_pending_for(ticket(0, 1)));

        schedule.retain_ticket(ticket(0, 2));
        assert!(schedule.deadline().is_none());

        schedule.schedule(ticket(0, 3), start);
        schedule.retain_ticket(ticket(1, 3));
        assert!(schedule.deadline().is_none());
    }
}

//! Benchmark command
//!
//! Plays many AI-vs-AI duels through a simulated store that duplicates and
//! reorders deliveries, then checks that both sides always agree on the
//! result and reveal each round exactly once.

use crate::ai::ConstraintFilter;
use crate::core::{MAX_ROUNDS, Word};
use crate::duel::{ChannelWrite, DuelCoordinator, MatchOutcome, PeerMode, Side, Step};
use crate::sync::PlayerSnapshot;
use crate::wordlists::{Dictionary, WordBank};
use indicatif::ProgressBar;
use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Upper bound on simulation steps for one match
const MAX_STEPS: usize = 10_000;

/// How the simulated store misbehaves
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkConfig {
    pub matches: usize,
    pub seed: u64,
    /// Chance that a snapshot is delivered twice
    pub duplicate_rate: f64,
}

impl BenchmarkConfig {
    #[must_use]
    pub const fn new(matches: usize, seed: u64) -> Self {
        Self {
            matches,
            seed,
            duplicate_rate: 0.3,
        }
    }
}

/// What one simulated match ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRecord {
    /// Outcome from the first player's side
    pub outcome: MatchOutcome,
    pub rounds: u8,
    /// Second player saw the mirrored outcome
    pub agreed: bool,
    /// Each side marked every played round revealed exactly once
    pub single_reveals: bool,
    pub deliveries: usize,
}

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub total_matches: usize,
    pub distribution: FxHashMap<MatchOutcome, usize>,
    pub average_rounds: f64,
    pub disagreements: usize,
    pub repeated_reveals: usize,
    pub stalled: usize,
    pub deliveries: usize,
    pub duration: Duration,
    pub matches_per_second: f64,
}

/// Run `config.matches` duels in parallel
///
/// Match `i` is seeded from `config.seed + i`, so results are reproducible.
pub fn run_benchmark(
    bank: &WordBank,
    config: &BenchmarkConfig,
    progress: &ProgressBar,
) -> BenchmarkResult {
    let start = Instant::now();

    let records: Vec<Option<MatchRecord>> = (0..config.matches)
        .into_par_iter()
        .map(|i| {
            let record = simulate_match(bank, config.seed.wrapping_add(i as u64), config);
            progress.inc(1);
            record
        })
        .collect();
    progress.finish_and_clear();

    let duration = start.elapsed();
    let mut distribution: FxHashMap<MatchOutcome, usize> = FxHashMap::default();
    let mut total_rounds = 0usize;
    let mut disagreements = 0;
    let mut repeated_reveals = 0;
    let mut stalled = 0;
    let mut deliveries = 0;
    let mut finished = 0usize;

    for record in &records {
        let Some(record) = record else {
            stalled += 1;
            continue;
        };
        finished += 1;
        *distribution.entry(record.outcome).or_insert(0) += 1;
        total_rounds += usize::from(record.rounds);
        disagreements += usize::from(!record.agreed);
        repeated_reveals += usize::from(!record.single_reveals);
        deliveries += record.deliveries;
    }

    BenchmarkResult {
        total_matches: config.matches,
        distribution,
        average_rounds: if finished == 0 {
            0.0
        } else {
            total_rounds as f64 / finished as f64
        },
        disagreements,
        repeated_reveals,
        stalled,
        deliveries,
        duration,
        matches_per_second: config.matches as f64 / duration.as_secs_f64().max(f64::EPSILON),
    }
}

/// One participant in the simulation
struct Seat<'a> {
    duel: DuelCoordinator<'a, WordBank>,
    filter: ConstraintFilter<'a>,
    reveal_marks: [u32; MAX_ROUNDS],
}

impl Seat<'_> {
    fn can_guess(&self) -> bool {
        let state = self.duel.state();
        !state.is_over() && !state.round().is_submitted(Side::Player)
    }
}

enum Action {
    Guess(usize),
    Deliver,
}

/// Play one match, or `None` if it never finished
pub fn simulate_match(bank: &WordBank, seed: u64, config: &BenchmarkConfig) -> Option<MatchRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let secret = bank.pick_random_secret(&mut rng)?;

    let mut seats: [Seat<'_>; 2] = std::array::from_fn(|_| Seat {
        duel: DuelCoordinator::start(bank, secret.clone(), PeerMode::Remote),
        filter: ConstraintFilter::new(bank.answers()),
        reveal_marks: [0; MAX_ROUNDS],
    });
    // (recipient, snapshot), delivered in random order
    let mut in_flight: Vec<(usize, PlayerSnapshot)> = Vec::new();
    let mut deliveries = 0;

    for _ in 0..MAX_STEPS {
        let mut actions: Vec<Action> = (0..2)
            .filter(|&side| seats[side].can_guess())
            .map(Action::Guess)
            .collect();
        if !in_flight.is_empty() {
            actions.push(Action::Deliver);
        }
        if actions.is_empty() {
            break;
        }

        match actions.swap_remove(rng.random_range(0..actions.len())) {
            Action::Guess(side) => {
                let seat = &mut seats[side];
                seat.filter.sync(seat.duel.state().player_history());
                let guess: Word = seat.filter.next_guess(&mut rng)?.clone();
                match seat.duel.submit_guess(guess.text()) {
                    Ok(submission) => {
                        seat.filter.observe(&guess, &submission.verdict);
                        publish(side, &submission.step, &mut seats, &mut in_flight, &mut rng, config);
                    }
                    Err(e) => warn!("Simulated guess '{guess}' rejected: {e}"),
                }
            }
            Action::Deliver => {
                let (to, snapshot) = in_flight.swap_remove(rng.random_range(0..in_flight.len()));
                deliveries += 1;
                let step = seats[to].duel.on_peer_update(snapshot);
                publish(to, &step, &mut seats, &mut in_flight, &mut rng, config);
            }
        }
    }

    let [first, second] = &seats;
    let (a, b) = (first.duel.state(), second.duel.state());
    if !a.is_over() || !b.is_over() {
        warn!("Simulated match {seed} stalled");
        return None;
    }

    let rounds = a.revealed_rounds();
    let single_reveals = seats.iter().all(|seat| {
        seat.reveal_marks
            .iter()
            .enumerate()
            .all(|(slot, &marks)| marks == u32::from(slot < usize::from(rounds)))
    });

    Some(MatchRecord {
        outcome: a.outcome(),
        rounds,
        agreed: a.outcome() == b.outcome().mirrored() && rounds == b.revealed_rounds(),
        single_reveals,
        deliveries,
    })
}

/// Apply a seat's writes to the simulated store
fn publish(
    from: usize,
    step: &Step,
    seats: &mut [Seat<'_>; 2],
    in_flight: &mut Vec<(usize, PlayerSnapshot)>,
    rng: &mut StdRng,
    config: &BenchmarkConfig,
) {
    let to = 1 - from;
    for write in &step.writes {
        match write {
            ChannelWrite::PlayerState(snapshot) => {
                in_flight.push((to, snapshot.clone()));
                if rng.random_bool(config.duplicate_rate) {
                    in_flight.push((to, snapshot.clone()));
                }
            }
            ChannelWrite::RoundRevealed(round) => {
                if let Some(marks) = usize::from(*round)
                    .checked_sub(1)
                    .and_then(|slot| seats[from].reveal_marks.get_mut(slot))
                {
                    *marks += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::embedded_bank;

    #[test]
    fn benchmark_runs() {
        let bank = embedded_bank();
        let config = BenchmarkConfig::new(20, 7);
        let result = run_benchmark(&bank, &config, &ProgressBar::hidden());

        assert_eq!(result.total_matches, 20);
        assert_eq!(result.stalled, 0);
        assert!(result.average_rounds >= 1.0);
        assert!(result.average_rounds <= 6.0);
    }

    #[test]
    fn benchmark_distribution_sums_correctly() {
        let bank = embedded_bank();
        let config = BenchmarkConfig::new(16, 11);
        let result = run_benchmark(&bank, &config, &ProgressBar::hidden());

        let distribution_sum: usize = result.distribution.values().sum();
        assert_eq!(distribution_sum + result.stalled, result.total_matches);
        assert!(!result.distribution.contains_key(&MatchOutcome::Ongoing));
    }

    #[test]
    fn sides_agree_despite_duplicates_and_reordering() {
        let bank = embedded_bank();
        let config = BenchmarkConfig {
            matches: 30,
            seed: 99,
            duplicate_rate: 0.9,
        };
        let result = run_benchmark(&bank, &config, &ProgressBar::hidden());

        assert_eq!(result.disagreements, 0);
        assert_eq!(result.repeated_reveals, 0);
    }

    #[test]
    fn same_seed_same_match() {
        let bank = embedded_bank();
        let config = BenchmarkConfig::new(1, 0);
        assert_eq!(
            simulate_match(&bank, 5, &config),
            simulate_match(&bank, 5, &config)
        );
    }

    #[test]
    fn empty_benchmark() {
        let bank = embedded_bank();
        let config = BenchmarkConfig::new(0, 1);
        let result = run_benchmark(&bank, &config, &ProgressBar::hidden());

        assert_eq!(result.total_matches, 0);
        assert!(result.distribution.is_empty());
        assert!(result.average_rounds.abs() < f64::EPSILON);
    }
}

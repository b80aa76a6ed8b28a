//! Watch command
//!
//! Seats two AIs in a shared room and narrates the match as the first one
//! sees it.

use crate::ai::Pacing;
use crate::duel::{DuelCoordinator, MatchSummary, PeerMode};
use crate::output::{narrate_event, print_roster};
use crate::session::{AiSeat, RemoteSession};
use crate::sync::{MemoryRoom, SharedStateChannel};
use crate::wordlists::{Dictionary, WordBank};
use anyhow::{Result, anyhow};
use log::debug;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;

/// Names of the two seats
pub const SEAT_NAMES: [&str; 2] = ["Alpha", "Beta"];

/// Run a narrated match on a fresh single-threaded runtime
///
/// # Errors
/// Fails if the runtime cannot be built or the room setup fails.
pub fn run_watch(bank: &WordBank, pacing: Pacing, seed: u64) -> Result<Option<MatchSummary>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(watch_match(bank, pacing, seed, true))
}

/// Play one networked AI-vs-AI match
///
/// Returns the first seat's summary, or `None` if the room went away first.
///
/// # Errors
/// Fails if the answer list is empty or the room refuses a player.
pub async fn watch_match(
    bank: &WordBank,
    pacing: Pacing,
    seed: u64,
    narrate: bool,
) -> Result<Option<MatchSummary>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let secret = bank
        .pick_random_secret(&mut rng)
        .ok_or_else(|| anyhow!("Answer list is empty"))?;
    let room = MemoryRoom::create(secret);
    watch_in_room(&room, bank, pacing, rng.next_u64(), narrate).await
}

/// Seat both AIs in `room`, play the match, then leave
///
/// # Errors
/// Fails if the room refuses a player or a subscription.
pub async fn watch_in_room(
    room: &MemoryRoom,
    bank: &WordBank,
    pacing: Pacing,
    seed: u64,
    narrate: bool,
) -> Result<Option<MatchSummary>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let host = room.join(SEAT_NAMES[0]).await?;
    let guest = room.join(SEAT_NAMES[1]).await?;
    let mut roster = host.on_room_roster_changed().await?;
    if narrate && let Some(players) = roster.recv().await {
        print_roster(&players);
    }

    let mut seats = Vec::with_capacity(2);
    for channel in [&host, &guest] {
        // Joiners learn the secret from the room, not from the host
        let secret = room.secret().await;
        let coordinator = DuelCoordinator::start(bank, secret, PeerMode::Remote);
        let session = RemoteSession::connect(coordinator, Arc::new(channel.clone())).await?;
        seats.push(AiSeat::new(
            session,
            bank.answers(),
            pacing,
            StdRng::seed_from_u64(rng.next_u64()),
        ));
    }
    let (Some(beta), Some(alpha)) = (seats.pop(), seats.pop()) else {
        return Err(anyhow!("Failed to seat both players"));
    };

    let (summary, _) = tokio::join!(
        alpha.run(|event| {
            if narrate {
                narrate_event(SEAT_NAMES[0], SEAT_NAMES[1], event);
            }
        }),
        beta.run(|_| {})
    );

    // Seats flushed their writes before returning, so leaving is safe
    host.leave().await;
    guest.leave().await;
    debug!("Both seats left the room");
    Ok(summary)
}

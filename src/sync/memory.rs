//! In-process shared store
//!
//! Stands in for a hosted realtime database: a room holds the host's secret,
//! a roster of at most two players, each player's published snapshot (kept as
//! JSON, like the hosted store), the per-round reveal markers and a status
//! that goes from waiting to active when the second player joins and to
//! finished when a player reports the end of the match. Failure and
//! duplicate delivery can be switched on to exercise the coordinator's
//! handling of an unreliable store.

use super::SyncError;
use super::channel::SharedStateChannel;
use super::snapshot::{Participant, PlayerId, PlayerSnapshot, RoomStatus};
use crate::core::{MAX_ROUNDS, Word};
use log::{debug, warn};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

const MAX_PLAYERS: usize = 2;

struct RoomData {
    secret: Word,
    players: Vec<Participant>,
    status: RoomStatus,
    states: FxHashMap<PlayerId, String>,
    revealed: [bool; MAX_ROUNDS],
    reveal_marks: [u32; MAX_ROUNDS],
    current_round: u8,
    joined: u32,
    fail_writes: bool,
    duplicate_delivery: bool,
    state_listeners: Vec<(PlayerId, UnboundedSender<PlayerSnapshot>)>,
    roster_listeners: Vec<UnboundedSender<Vec<Participant>>>,
}

impl RoomData {
    fn is_member(&self, id: &PlayerId) -> bool {
        self.players.iter().any(|p| &p.id == id)
    }

    fn member(&self, id: &PlayerId) -> Result<(), SyncError> {
        if self.is_member(id) {
            Ok(())
        } else {
            Err(SyncError::NotInRoom)
        }
    }

    /// Rejects writes from outsiders and while failure injection is on
    fn writable(&self, id: &PlayerId) -> Result<(), SyncError> {
        self.member(id)?;
        if self.fail_writes {
            return Err(SyncError::WriteRejected);
        }
        Ok(())
    }

    /// Push `from`'s stored payload to everyone else
    fn deliver(&mut self, from: &PlayerId, payload: &str) {
        let snapshot = match PlayerSnapshot::from_json(payload) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Not delivering unreadable snapshot from {from}: {e}");
                return;
            }
        };
        let copies = if self.duplicate_delivery { 2 } else { 1 };

        self.state_listeners.retain(|(listener, tx)| {
            if listener == from {
                return !tx.is_closed();
            }
            (0..copies).all(|_| tx.send(snapshot.clone()).is_ok())
        });
    }

    fn notify_roster(&mut self) {
        let roster = self.players.clone();
        self.roster_listeners
            .retain(|tx| tx.send(roster.clone()).is_ok());
    }
}

/// A shared room, cheap to clone
#[derive(Clone)]
pub struct MemoryRoom {
    data: Arc<RwLock<RoomData>>,
}

impl MemoryRoom {
    /// Open a room whose players all guess `secret`
    #[must_use]
    pub fn create(secret: Word) -> Self {
        Self {
            data: Arc::new(RwLock::new(RoomData {
                secret,
                players: Vec::new(),
                status: RoomStatus::Waiting,
                states: FxHashMap::default(),
                revealed: [false; MAX_ROUNDS],
                reveal_marks: [0; MAX_ROUNDS],
                current_round: 1,
                joined: 0,
                fail_writes: false,
                duplicate_delivery: false,
                state_listeners: Vec::new(),
                roster_listeners: Vec::new(),
            })),
        }
    }

    /// Join under a display name
    ///
    /// # Errors
    /// `RoomFull` once two players are in, `NameTaken` if another player
    /// already uses `name`.
    pub async fn join(&self, name: &str) -> Result<MemoryChannel, SyncError> {
        let mut data = self.data.write().await;
        if data.players.len() >= MAX_PLAYERS {
            return Err(SyncError::RoomFull);
        }
        if data.players.iter().any(|p| p.name == name) {
            return Err(SyncError::NameTaken(name.to_string()));
        }

        data.joined += 1;
        let me = Participant {
            id: PlayerId::new(format!("player-{}", data.joined)),
            name: name.to_string(),
        };
        debug!("{} joined as {}", me.name, me.id);
        data.players.push(me.clone());
        if data.players.len() == MAX_PLAYERS && data.status == RoomStatus::Waiting {
            data.status = RoomStatus::Active;
            debug!("Room is active");
        }
        data.notify_roster();

        Ok(MemoryChannel {
            room: self.clone(),
            me,
        })
    }

    pub async fn secret(&self) -> Word {
        self.data.read().await.secret.clone()
    }

    pub async fn roster(&self) -> Vec<Participant> {
        self.data.read().await.players.clone()
    }

    pub async fn status(&self) -> RoomStatus {
        self.data.read().await.status
    }

    /// The shared round pointer, starting at 1
    pub async fn current_round(&self) -> u8 {
        self.data.read().await.current_round
    }

    pub async fn is_revealed(&self, round: u8) -> bool {
        let data = self.data.read().await;
        round_slot(round).is_some_and(|slot| data.revealed[slot])
    }

    /// How many reveal writes `round` has received
    pub async fn reveal_marks(&self, round: u8) -> u32 {
        let data = self.data.read().await;
        round_slot(round).map_or(0, |slot| data.reveal_marks[slot])
    }

    /// Make every following write fail with `WriteRejected`
    pub async fn set_write_failure(&self, fail: bool) {
        self.data.write().await.fail_writes = fail;
    }

    /// Deliver every snapshot twice
    pub async fn set_duplicate_delivery(&self, duplicate: bool) {
        self.data.write().await.duplicate_delivery = duplicate;
    }

    /// The snapshot currently stored for `id`
    pub async fn snapshot_of(&self, id: &PlayerId) -> Option<PlayerSnapshot> {
        let data = self.data.read().await;
        data.states
            .get(id)
            .and_then(|payload| PlayerSnapshot::from_json(payload).ok())
    }
}

fn round_slot(round: u8) -> Option<usize> {
    usize::from(round)
        .checked_sub(1)
        .filter(|&slot| slot < MAX_ROUNDS)
}

/// A player's connection to a [`MemoryRoom`]
#[derive(Clone)]
pub struct MemoryChannel {
    room: MemoryRoom,
    me: Participant,
}

impl MemoryChannel {
    #[must_use]
    pub const fn id(&self) -> &PlayerId {
        &self.me.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.me.name
    }

    #[must_use]
    pub const fn room(&self) -> &MemoryRoom {
        &self.room
    }

    /// Leave the room, dropping this player's data and subscriptions
    pub async fn leave(self) {
        let mut data = self.room.data.write().await;
        data.players.retain(|p| p.id != self.me.id);
        data.states.remove(&self.me.id);
        data.state_listeners.retain(|(listener, _)| listener != &self.me.id);
        debug!("{} left", self.me.name);
        data.notify_roster();
    }
}

impl SharedStateChannel for MemoryChannel {
    async fn write_player_state(&self, snapshot: PlayerSnapshot) -> Result<(), SyncError> {
        let payload = snapshot.to_json()?;
        let mut data = self.room.data.write().await;
        data.writable(&self.me.id)?;

        data.states.insert(self.me.id.clone(), payload.clone());
        data.deliver(&self.me.id, &payload);
        Ok(())
    }

    async fn mark_round_revealed(&self, round: u8) -> Result<(), SyncError> {
        let slot = round_slot(round).ok_or(SyncError::InvalidRound(round))?;
        let mut data = self.room.data.write().await;
        data.writable(&self.me.id)?;

        data.revealed[slot] = true;
        data.reveal_marks[slot] += 1;
        if slot + 1 < MAX_ROUNDS && data.current_round <= round {
            data.current_round = round + 1;
        }
        Ok(())
    }

    async fn update_typing_status(&self, typing: bool) -> Result<(), SyncError> {
        let mut data = self.room.data.write().await;
        data.writable(&self.me.id)?;

        let mut snapshot = match data.states.get(&self.me.id) {
            Some(payload) => PlayerSnapshot::from_json(payload)?,
            None => PlayerSnapshot::default(),
        };
        if snapshot.typing == typing {
            return Ok(());
        }
        snapshot.typing = typing;
        let payload = snapshot.to_json()?;

        data.states.insert(self.me.id.clone(), payload.clone());
        data.deliver(&self.me.id, &payload);
        Ok(())
    }

    async fn mark_match_finished(&self) -> Result<(), SyncError> {
        let mut data = self.room.data.write().await;
        data.writable(&self.me.id)?;

        if data.status != RoomStatus::Finished {
            debug!("{} reported the match finished", self.me.name);
            data.status = RoomStatus::Finished;
        }
        Ok(())
    }

    async fn on_opponent_state_changed(&self) -> Result<UnboundedReceiver<PlayerSnapshot>, SyncError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut data = self.room.data.write().await;
        data.member(&self.me.id)?;

        let current: Vec<PlayerSnapshot> = data
            .states
            .iter()
            .filter(|(id, _)| *id != &self.me.id)
            .filter_map(|(_, payload)| PlayerSnapshot::from_json(payload).ok())
            .collect();
        for snapshot in current {
            // rx is still in scope, so this cannot fail
            let _ = tx.send(snapshot);
        }

        data.state_listeners.push((self.me.id.clone(), tx));
        Ok(rx)
    }

    async fn on_room_roster_changed(&self) -> Result<UnboundedReceiver<Vec<Participant>>, SyncError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut data = self.room.data.write().await;
        data.member(&self.me.id)?;

        let _ = tx.send(data.players.clone());
        data.roster_listeners.push(tx);
        Ok(rx)
    }
}

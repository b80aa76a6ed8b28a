use super::SyncError;
use super::snapshot::{Participant, PlayerSnapshot};
use std::future::Future;
use tokio::sync::mpsc::UnboundedReceiver;

/// One participant's handle on the shared store
///
/// Writes are upserts of the caller's own data. Notifications arrive on the
/// returned receivers and may repeat, lag behind, or carry partial data.
pub trait SharedStateChannel: Send + Sync {
    /// Replace the caller's published history and submitted markers
    fn write_player_state(
        &self,
        snapshot: PlayerSnapshot,
    ) -> impl Future<Output = Result<(), SyncError>> + Send;

    /// Mark `round` revealed, moving the shared round pointer on if `round < 6`
    ///
    /// Marking the same round again has no further effect.
    fn mark_round_revealed(&self, round: u8) -> impl Future<Output = Result<(), SyncError>> + Send;

    /// Publish whether the caller has a partial guess typed in
    ///
    /// Leaves the published history and markers as they are.
    fn update_typing_status(&self, typing: bool) -> impl Future<Output = Result<(), SyncError>> + Send;

    /// Record that the match in this room has ended
    fn mark_match_finished(&self) -> impl Future<Output = Result<(), SyncError>> + Send;

    /// Subscribe to the opponent's snapshots
    ///
    /// The current snapshot, if any, is delivered right away.
    fn on_opponent_state_changed(
        &self,
    ) -> impl Future<Output = Result<UnboundedReceiver<PlayerSnapshot>, SyncError>> + Send;

    /// Subscribe to roster changes, starting with the current roster
    fn on_room_roster_changed(
        &self,
    ) -> impl Future<Output = Result<UnboundedReceiver<Vec<Participant>>, SyncError>> + Send;
}

//! Data exchanged through the shared store

use super::SyncError;
use crate::core::{GuessHistory, MAX_ROUNDS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Full published state of one participant
///
/// Always sent whole; receivers replace their mirror with it instead of merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub history: GuessHistory,
    /// `submitted[i]` is set once the guess for round `i + 1` is in `history`
    pub submitted: [bool; MAX_ROUNDS],
    /// The participant has a partial guess typed in
    #[serde(default)]
    pub typing: bool,
}

impl PlayerSnapshot {
    /// Snapshot of a history where every listed round has been submitted
    #[must_use]
    pub fn of_history(history: &GuessHistory) -> Self {
        let mut submitted = [false; MAX_ROUNDS];
        for flag in submitted.iter_mut().take(history.len()) {
            *flag = true;
        }
        Self {
            history: history.clone(),
            submitted,
            typing: false,
        }
    }

    /// Whether the participant has submitted `round` (1-based)
    ///
    /// The flag only counts if the guess for that round is present as well,
    /// since a snapshot may carry the marker ahead of a partial history.
    #[must_use]
    pub fn has_submitted(&self, round: u8) -> bool {
        let Some(index) = usize::from(round).checked_sub(1) else {
            return false;
        };
        self.submitted.get(index).copied().unwrap_or(false) && self.history.len() > index
    }

    /// Encode for the store
    ///
    /// # Errors
    /// Returns `SyncError::Encode` if serialization fails.
    pub fn to_json(&self) -> Result<String, SyncError> {
        serde_json::to_string(self).map_err(|e| SyncError::Encode(e.to_string()))
    }

    /// Decode a payload read from the store
    ///
    /// # Errors
    /// Returns `SyncError::Decode` for malformed payloads, including words that
    /// are not 5 letters.
    pub fn from_json(payload: &str) -> Result<Self, SyncError> {
        serde_json::from_str(payload).map_err(|e| SyncError::Decode(e.to_string()))
    }
}

/// Identifier of a participant in a room
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of a shared room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    /// Only the host is in
    #[default]
    Waiting,
    /// Both players joined
    Active,
    /// A player reported the end of the match
    Finished,
}

/// Roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: PlayerId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Verdict, Word};

    fn history(guesses: &[&str]) -> GuessHistory {
        let secret = Word::new("slate").unwrap();
        let mut history = GuessHistory::new();
        for guess in guesses {
            let guess = Word::new(*guess).unwrap();
            let verdict = Verdict::evaluate(&secret, &guess);
            history.push(guess, verdict);
        }
        history
    }

    #[test]
    fn of_history_marks_listed_rounds() {
        let snapshot = PlayerSnapshot::of_history(&history(&["crane", "plant"]));
        assert_eq!(snapshot.submitted, [true, true, false, false, false, false]);
        assert!(snapshot.has_submitted(2));
        assert!(!snapshot.has_submitted(3));
        assert!(!snapshot.has_submitted(0));
    }

    #[test]
    fn marker_without_guess_does_not_count() {
        let mut snapshot = PlayerSnapshot::of_history(&history(&["crane"]));
        snapshot.submitted[1] = true;
        assert!(!snapshot.has_submitted(2));
    }

    #[test]
    fn json_round_trip_preserves_snapshot() {
        let snapshot = PlayerSnapshot::of_history(&history(&["crane"]));
        let payload = snapshot.to_json().unwrap();
        assert!(payload.contains("\"crane\""));
        assert_eq!(PlayerSnapshot::from_json(&payload).unwrap(), snapshot);
    }

    #[test]
    fn payload_without_typing_flag_still_decodes() {
        let payload = r#"{"history":[],"submitted":[false,false,false,false,false,false]}"#;
        let snapshot = PlayerSnapshot::from_json(payload).unwrap();
        assert!(!snapshot.typing);
        assert!(snapshot.history.is_empty());
    }

    #[test]
    fn room_status_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&RoomStatus::Finished).unwrap(),
            "\"finished\""
        );
        assert_eq!(RoomStatus::default(), RoomStatus::Waiting);
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        let payload = r#"{"history":[{"guess":"cr4ne","verdict":["absent","absent","absent","absent","absent"]}],"submitted":[true,false,false,false,false,false]}"#;
        assert!(matches!(
            PlayerSnapshot::from_json(payload),
            Err(SyncError::Decode(_))
        ));
    }
}

//! Board — a managed IoT device, and its normalized connectivity state.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::BoardId;
use crate::record;

const ONLINE_ALIASES: &[&str] = &["online", "enabled", "ready", "active", "up", "connected"];
const OFFLINE_ALIASES: &[&str] = &["offline", "disabled", "down"];

/// Canonical board record.
///
/// Remote records are converted with [`Board::from_record`]; nothing past
/// the adapter boundary looks at raw JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: Option<String>,
    /// Raw status string as reported by the API (`status` or `board_status`).
    pub status: Option<String>,
    /// Explicit liveness flag, when the API reports one.
    pub alive: Option<bool>,
    pub code: Option<String>,
    pub kind: Option<String>,
    pub agent: Option<String>,
}

impl Board {
    /// A board with only an identifier; every other field unknown.
    #[must_use]
    pub fn new(id: BoardId) -> Self {
        Self {
            id,
            name: None,
            status: None,
            alive: None,
            code: None,
            kind: None,
            agent: None,
        }
    }

    /// Build a board from a remote record.
    ///
    /// Returns `None` when no identifier can be found under `uuid`, `id`
    /// or `board_uuid`.
    #[must_use]
    pub fn from_record(record: &Value) -> Option<Self> {
        let id = record::first_scalar(record, &["uuid", "id", "board_uuid"])?;
        Some(Self {
            id: id.parse().ok()?,
            name: record::first_scalar(record, &["name", "board_name"]),
            status: record::first_scalar(record, &["status", "board_status"]),
            alive: record::strict_bool(record, "alive"),
            code: record::first_scalar(record, &["code"]),
            kind: record::first_scalar(record, &["type", "board_type"]),
            agent: record::first_scalar(record, &["agent"]),
        })
    }

    /// Name to show in tables: the board name, or its id when unnamed.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }

    /// Merge a freshly fetched copy of this board; fields present in
    /// `live` replace the cached ones, absent fields are kept.
    pub fn refresh_from(&mut self, live: Board) {
        if live.name.is_some() {
            self.name = live.name;
        }
        if live.status.is_some() {
            self.status = live.status;
        }
        if live.alive.is_some() {
            self.alive = live.alive;
        }
        if live.code.is_some() {
            self.code = live.code;
        }
        if live.kind.is_some() {
            self.kind = live.kind;
        }
        if live.agent.is_some() {
            self.agent = live.agent;
        }
    }

    /// Normalized connectivity state of this board.
    #[must_use]
    pub fn state(&self) -> BoardState {
        BoardState::normalize(self.alive, self.status.as_deref())
    }
}

/// Normalized connectivity state.
///
/// Unrecognised raw values are preserved in [`BoardState::Other`] so they
/// stay visible for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum BoardState {
    Online,
    Offline,
    Unknown,
    Other(String),
}

impl BoardState {
    /// Normalize the liveness flag and raw status string of a board.
    ///
    /// An explicit `alive` flag always wins. Otherwise the raw status is
    /// lowercased, stripped of hyphens and cut at the first `/` before
    /// being matched against the known aliases.
    #[must_use]
    pub fn normalize(alive: Option<bool>, raw_status: Option<&str>) -> Self {
        if let Some(alive) = alive {
            return if alive { Self::Online } else { Self::Offline };
        }

        let raw = raw_status.map(str::trim).unwrap_or_default();
        let lowered = raw.to_lowercase().replace('-', "");
        let head = lowered.split('/').next().unwrap_or_default().trim();

        if ONLINE_ALIASES.contains(&head) {
            Self::Online
        } else if OFFLINE_ALIASES.contains(&head) {
            Self::Offline
        } else if raw.is_empty() {
            Self::Unknown
        } else {
            Self::Other(raw.to_string())
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Unknown => "unknown",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<BoardState> for String {
    fn from(state: BoardState) -> Self {
        match state {
            BoardState::Other(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl From<String> for BoardState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "online" => Self::Online,
            "offline" => Self::Offline,
            "unknown" | "" => Self::Unknown,
            _ => Self::Other(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn board(record: Value) -> Board {
        Board::from_record(&record).unwrap()
    }

    #[test]
    fn should_report_online_when_alive_even_if_status_disagrees() {
        let b = board(json!({"uuid": "b1", "alive": true, "status": "offline"}));
        assert_eq!(b.state(), BoardState::Online);
    }

    #[test]
    fn should_report_offline_when_not_alive_even_if_status_disagrees() {
        let b = board(json!({"uuid": "b1", "alive": false, "status": "online"}));
        assert_eq!(b.state(), BoardState::Offline);
    }

    #[test]
    fn should_normalize_hyphenated_status_with_suffix() {
        assert_eq!(
            BoardState::normalize(None, Some("ON-LINE/ready")),
            BoardState::Online
        );
    }

    #[test]
    fn should_map_disabled_to_offline() {
        assert_eq!(
            BoardState::normalize(None, Some("Disabled")),
            BoardState::Offline
        );
    }

    #[test]
    fn should_map_every_online_alias() {
        for alias in ["enabled", "READY", "active", "up", "Connected"] {
            assert_eq!(BoardState::normalize(None, Some(alias)), BoardState::Online);
        }
    }

    #[test]
    fn should_report_unknown_when_status_is_empty() {
        assert_eq!(BoardState::normalize(None, Some("")), BoardState::Unknown);
        assert_eq!(BoardState::normalize(None, None), BoardState::Unknown);
    }

    #[test]
    fn should_pass_unexpected_status_through() {
        let state = BoardState::normalize(None, Some("degraded"));
        assert_eq!(state, BoardState::Other("degraded".to_string()));
        assert_eq!(state.to_string(), "degraded");
    }

    #[test]
    fn should_ignore_non_boolean_alive_field() {
        let b = board(json!({"uuid": "b1", "alive": "yes", "status": "down"}));
        assert_eq!(b.state(), BoardState::Offline);
    }

    #[test]
    fn should_read_board_status_when_status_missing() {
        let b = board(json!({"id": 12, "board_status": "online"}));
        assert_eq!(b.id.as_str(), "12");
        assert_eq!(b.state(), BoardState::Online);
    }

    #[test]
    fn should_treat_blank_status_as_absent() {
        let b = board(json!({"uuid": "b1", "status": "   ", "board_status": "offline"}));
        assert_eq!(b.state(), BoardState::Offline);
        let blank = board(json!({"uuid": "b1", "status": "   "}));
        assert!(blank.status.is_none());
        assert_eq!(blank.state(), BoardState::Unknown);
    }

    #[test]
    fn should_reject_record_without_identifier() {
        assert!(Board::from_record(&json!({"name": "orphan"})).is_none());
    }

    #[test]
    fn should_fall_back_to_id_for_display_name() {
        let b = board(json!({"uuid": "b1"}));
        assert_eq!(b.display_name(), "b1");
        let named = board(json!({"uuid": "b1", "board_name": "gateway"}));
        assert_eq!(named.display_name(), "gateway");
    }

    #[test]
    fn should_prefer_fresh_fields_when_refreshing() {
        let mut cached = board(json!({"uuid": "b1", "name": "gw", "status": "online"}));
        let live = board(json!({"uuid": "b1", "status": "offline"}));

        cached.refresh_from(live);

        assert_eq!(cached.name.as_deref(), Some("gw"));
        assert_eq!(cached.state(), BoardState::Offline);
    }

    #[test]
    fn should_serialize_state_as_plain_string() {
        let json = serde_json::to_string(&BoardState::Other("degraded".into())).unwrap();
        assert_eq!(json, "\"degraded\"");
        let parsed: BoardState = serde_json::from_str("\"online\"").unwrap();
        assert_eq!(parsed, BoardState::Online);
    }
}

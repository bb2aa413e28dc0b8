//! Plugin status on a fleet — one row per board.

use std::fmt;

use serde::Serialize;

use crate::board::{Board, BoardState};
use crate::id::BoardId;

/// Whether a plugin is deployed on a board, at any scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginPresence {
    Present,
    Absent,
}

impl PluginPresence {
    #[must_use]
    pub fn from_scope(scope: InjectionScope) -> Self {
        if scope == InjectionScope::None {
            Self::Absent
        } else {
            Self::Present
        }
    }
}

impl fmt::Display for PluginPresence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => f.write_str("present"),
            Self::Absent => f.write_str("absent"),
        }
    }
}

/// Where a plugin's presence on a board comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionScope {
    BoardAndFleet,
    Board,
    Fleet,
    None,
}

impl InjectionScope {
    #[must_use]
    pub fn from_flags(in_board: bool, in_fleet: bool) -> Self {
        match (in_board, in_fleet) {
            (true, true) => Self::BoardAndFleet,
            (true, false) => Self::Board,
            (false, true) => Self::Fleet,
            (false, false) => Self::None,
        }
    }

    /// Label shown in the "Injected on" column.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::BoardAndFleet => "Board/Fleet",
            Self::Board => "Board",
            Self::Fleet => "Fleet",
            Self::None => "Nessuna",
        }
    }
}

impl fmt::Display for InjectionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Status of one plugin on one board of a fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRow {
    pub board_id: BoardId,
    pub board_name: String,
    pub board_status: BoardState,
    pub plugin_status: PluginPresence,
    pub plugin_in_board: bool,
    pub plugin_in_fleet: bool,
    pub message: String,
}

impl StatusRow {
    /// Build the row for `board` given where the plugin was found.
    #[must_use]
    pub fn new(board: &Board, plugin_in_board: bool, plugin_in_fleet: bool) -> Self {
        let scope = InjectionScope::from_flags(plugin_in_board, plugin_in_fleet);
        Self {
            board_id: board.id.clone(),
            board_name: board.display_name().to_string(),
            board_status: board.state(),
            plugin_status: PluginPresence::from_scope(scope),
            plugin_in_board,
            plugin_in_fleet,
            message: String::new(),
        }
    }

    #[must_use]
    pub fn scope(&self) -> InjectionScope {
        InjectionScope::from_flags(self.plugin_in_board, self.plugin_in_fleet)
    }
}

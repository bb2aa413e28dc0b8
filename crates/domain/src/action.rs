//! Plugin actions that can be dispatched to a single board.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A state change requested for a plugin on one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginAction {
    Start,
    Stop,
    Remove,
    Reinject,
}

impl PluginAction {
    pub const ALL: [Self; 4] = [Self::Start, Self::Stop, Self::Reinject, Self::Remove];

    /// URL slug (`start`, `stop`, `remove`, `reinject`).
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Remove => "remove",
            Self::Reinject => "reinject",
        }
    }

    /// Button label on the status page.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "Start Plugin",
            Self::Stop => "Stop Plugin",
            Self::Remove => "Remove Plugin",
            Self::Reinject => "Re-Inject Plugin",
        }
    }

    /// Action name understood by the remote `plugin_action` call, for the
    /// actions that go through it.
    #[must_use]
    pub fn remote_name(self) -> Option<&'static str> {
        match self {
            Self::Start => Some("PluginStart"),
            Self::Stop => Some("PluginStop"),
            Self::Remove | Self::Reinject => None,
        }
    }

    /// Flash message shown after the action succeeded.
    #[must_use]
    pub fn success_message(self, board: &str) -> String {
        match self {
            Self::Start => format!("Plugin started on board {board}."),
            Self::Stop => format!("Plugin stopped on board {board}."),
            Self::Remove => format!("Plugin removed from board {board}."),
            Self::Reinject => format!("Plugin re-injected on board {board}."),
        }
    }

    /// Flash message shown after the action failed.
    #[must_use]
    pub fn failure_message(self, cause: &str) -> String {
        match self {
            Self::Start => format!("Unable to start plugin on board: {cause}"),
            Self::Stop => format!("Unable to stop plugin on board: {cause}"),
            Self::Remove => format!("Unable to remove plugin from board: {cause}"),
            Self::Reinject => format!("Unable to re-inject plugin on board: {cause}"),
        }
    }
}

impl fmt::Display for PluginAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for PluginAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.slug() == s)
            .ok_or_else(|| ValidationError::UnknownAction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_every_slug() {
        for action in PluginAction::ALL {
            assert_eq!(action.slug().parse::<PluginAction>().unwrap(), action);
        }
    }

    #[test]
    fn should_reject_unknown_slug() {
        assert_eq!(
            "restart".parse::<PluginAction>(),
            Err(ValidationError::UnknownAction("restart".to_string()))
        );
    }

    #[test]
    fn should_only_route_start_and_stop_through_plugin_action() {
        assert_eq!(PluginAction::Start.remote_name(), Some("PluginStart"));
        assert_eq!(PluginAction::Stop.remote_name(), Some("PluginStop"));
        assert_eq!(PluginAction::Remove.remote_name(), None);
        assert_eq!(PluginAction::Reinject.remote_name(), None);
    }

    #[test]
    fn should_format_flash_messages() {
        assert_eq!(
            PluginAction::Reinject.success_message("b1"),
            "Plugin re-injected on board b1."
        );
        assert_eq!(
            PluginAction::Remove.failure_message("boom"),
            "Unable to remove plugin from board: boom"
        );
    }
}

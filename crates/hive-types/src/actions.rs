//! The normalized action an agent submits for one tick.
//!
//! Whatever the decision provider replies is reduced to an
//! [`AgentAction`]. The resolver interprets `target` per action: a
//! direction index for `move`, an agent reference for `trade`, `chat` and
//! `ally`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::ActionType;

/// One agent's decision for one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AgentAction {
    /// What to do.
    pub action: ActionType,
    /// Direction index (`move`) or agent id / name (`trade`, `chat`, `ally`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Free text: the chat message or the vote proposal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AgentAction {
    /// An action with no target or detail.
    pub const fn bare(action: ActionType) -> Self {
        Self {
            action,
            target: None,
            detail: None,
        }
    }

    /// The do-nothing action.
    pub const fn idle() -> Self {
        Self::bare(ActionType::Idle)
    }

    /// Gather from the current cell.
    pub const fn gather() -> Self {
        Self::bare(ActionType::Gather)
    }

    /// Move one step in the given direction (0..=5).
    pub fn step(direction: usize) -> Self {
        Self {
            action: ActionType::Move,
            target: Some(direction.to_string()),
            detail: None,
        }
    }

    /// Attach a target.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Attach free-text detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_encodes_direction_as_target() {
        let action = AgentAction::step(4);
        assert_eq!(action.action, ActionType::Move);
        assert_eq!(action.target.as_deref(), Some("4"));
    }

    #[test]
    fn deserializes_minimal_reply() {
        let action: Result<AgentAction, _> = serde_json::from_str(r#"{"action":"gather"}"#);
        assert_eq!(action.ok(), Some(AgentAction::gather()));
    }
}

//! World events: the append-only record of everything that happened.
//!
//! Every event carries the acting agent, the agent's name as it was when
//! the event was emitted, the tick, an [`ActionType`] and a typed
//! [`EventDetail`]. Emergence events reuse the `ally` and `vote` types and
//! are told apart by their detail variant.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ActionType, ResourceType};
use crate::ids::{AgentId, AllianceId};
use crate::structs::HexCoord;

/// An immutable record of one thing that happened during a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldEvent {
    /// The agent the event is attributed to.
    pub agent_id: AgentId,
    /// The agent's name at emission time.
    pub agent_name: String,
    /// Event type, derived from the detail variant.
    #[serde(rename = "type")]
    pub event_type: ActionType,
    /// Action-specific payload.
    pub detail: EventDetail,
    /// The tick that produced the event.
    pub tick: u64,
}

impl WorldEvent {
    /// Build an event, deriving its type from `detail`.
    pub fn new(agent_id: AgentId, agent_name: &str, tick: u64, detail: EventDetail) -> Self {
        Self {
            agent_id,
            agent_name: agent_name.to_owned(),
            event_type: detail.event_type(),
            detail,
            tick,
        }
    }

    /// The emergence marker carried by this event, if any.
    pub const fn emergence(&self) -> Option<EmergenceKind> {
        self.detail.emergence()
    }
}

/// The kind of aggregate pattern an emergence event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum EmergenceKind {
    /// An alliance reached the large-alliance size threshold.
    LargeAlliance,
    /// One agent's reputation towers over the population.
    Leader,
}

/// Typed payload of a [`WorldEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventDetail {
    /// An agent moved (or tried to move off the grid).
    Move(MoveDetail),
    /// An agent gathered from its cell.
    Gather(GatherDetail),
    /// An agent attempted a trade.
    Trade(TradeDetail),
    /// An agent spoke.
    Chat(ChatDetail),
    /// An agent attempted to found or join an alliance.
    Ally(AllyDetail),
    /// An agent voted on a proposal.
    Vote(VoteDetail),
    /// An agent ran out of energy and died.
    Exhausted(ExhaustedDetail),
    /// An alliance grew large. Emitted once per alliance.
    LargeAlliance(LargeAllianceDetail),
    /// A reputation leader stands out. Emitted every qualifying tick.
    LeaderEmergence(LeaderDetail),
}

impl EventDetail {
    /// The event type this payload is recorded under.
    pub const fn event_type(&self) -> ActionType {
        match self {
            Self::Move(_) => ActionType::Move,
            Self::Gather(_) => ActionType::Gather,
            Self::Trade(_) => ActionType::Trade,
            Self::Chat(_) => ActionType::Chat,
            Self::Ally(_) | Self::LargeAlliance(_) => ActionType::Ally,
            Self::Vote(_) | Self::LeaderEmergence(_) => ActionType::Vote,
            Self::Exhausted(_) => ActionType::Idle,
        }
    }

    /// The emergence marker of this payload, if it is an emergence event.
    pub const fn emergence(&self) -> Option<EmergenceKind> {
        match self {
            Self::LargeAlliance(_) => Some(EmergenceKind::LargeAlliance),
            Self::LeaderEmergence(_) => Some(EmergenceKind::Leader),
            _ => None,
        }
    }
}

/// Payload of a move event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MoveDetail {
    /// Position before the move.
    pub from: HexCoord,
    /// Position after the move. Equal to `from` when the step was off-grid.
    pub to: HexCoord,
}

/// Payload of a gather event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GatherDetail {
    /// The cell's resource.
    pub resource: ResourceType,
    /// Units collected (0 when the cell was empty).
    pub amount: u32,
}

/// Payload of a trade event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TradeDetail {
    /// Whether a trading partner was found.
    ///
    /// Also `true` when the partner was found but nothing changed hands.
    pub success: bool,
    /// The partner's name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with: Option<String>,
    /// Why the trade failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Units swapped in each direction (0 when nothing moved).
    #[serde(default)]
    pub amount: u32,
}

/// Payload of a chat event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ChatDetail {
    /// The addressee's name, or a talking-to-self marker.
    pub with: String,
    /// What was said.
    pub message: String,
}

/// How an ally action changed alliance membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum AllyOutcome {
    /// A new alliance was founded.
    Created,
    /// An existing alliance was joined (or both parties were already
    /// affiliated and nothing changed).
    Joined,
}

/// Payload of an ally event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AllyDetail {
    /// Whether an ally was found.
    pub success: bool,
    /// Name of the alliance involved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alliance_name: Option<String>,
    /// What happened to membership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<AllyOutcome>,
    /// Why the ally action failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Payload of a vote event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct VoteDetail {
    /// The proposal text supplied by the agent.
    pub proposal: String,
    /// The recorded vote.
    pub vote: String,
}

/// Payload of an exhaustion event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ExhaustedDetail {
    /// Human-readable notice.
    pub message: String,
}

/// Payload of a large-alliance emergence event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LargeAllianceDetail {
    /// The alliance that grew large.
    pub alliance_id: AllianceId,
    /// Its name.
    pub alliance_name: String,
    /// Member count when detected.
    pub size: u32,
}

/// Payload of a leader emergence event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LeaderDetail {
    /// The leader's reputation.
    pub reputation: u32,
    /// Mean reputation of living agents, rounded.
    pub avg_reputation: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_follows_detail() {
        let agent = AgentId::new();
        let exhausted = WorldEvent::new(
            agent,
            "Nova",
            3,
            EventDetail::Exhausted(ExhaustedDetail {
                message: String::from("out of energy"),
            }),
        );
        assert_eq!(exhausted.event_type, ActionType::Idle);

        let leader = WorldEvent::new(
            agent,
            "Nova",
            3,
            EventDetail::LeaderEmergence(LeaderDetail {
                reputation: 30,
                avg_reputation: 8,
            }),
        );
        assert_eq!(leader.event_type, ActionType::Vote);
        assert_eq!(leader.emergence(), Some(EmergenceKind::Leader));
    }

    #[test]
    fn serialized_event_carries_type_and_kind() {
        let event = WorldEvent::new(
            AgentId::new(),
            "Echo",
            1,
            EventDetail::Gather(GatherDetail {
                resource: ResourceType::Food,
                amount: 3,
            }),
        );
        let value = serde_json::to_value(&event).unwrap_or_default();
        assert_eq!(value.get("type").and_then(|v| v.as_str()), Some("gather"));
        let detail = value.get("detail");
        assert_eq!(
            detail.and_then(|d| d.get("kind")).and_then(|v| v.as_str()),
            Some("gather")
        );
        assert_eq!(
            detail.and_then(|d| d.get("amount")).and_then(serde_json::Value::as_u64),
            Some(3)
        );
    }

    #[test]
    fn failed_trade_omits_partner() {
        let detail = TradeDetail {
            success: false,
            with: None,
            reason: Some(String::from("no nearby tradable agent")),
            amount: 0,
        };
        let value = serde_json::to_value(&detail).unwrap_or_default();
        assert!(value.get("with").is_none());
        assert!(value.get("reason").is_some());
    }
}

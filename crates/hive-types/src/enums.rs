//! Enumeration types for the Hive simulation.
//!
//! Resource kinds found on grid cells, the action vocabulary agents choose
//! from, and agent lifecycle status. All enums serialize as lowercase
//! strings, which is also the form the decision provider uses.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// A resource that a hex cell can hold and an agent can carry.
///
/// The declaration order is the iteration order used whenever a choice
/// between equally-stocked resources has to be made (e.g. picking an
/// agent's top resource for a trade).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Edible produce.
    Food,
    /// Building material.
    Material,
    /// Accumulated know-how.
    Knowledge,
    /// Raw energy; gathering it also restores the agent's own energy.
    Energy,
}

impl ResourceType {
    /// Every resource type, in canonical iteration order.
    pub const ALL: [Self; 4] = [Self::Food, Self::Material, Self::Knowledge, Self::Energy];

    /// Lowercase name used in prompts and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Material => "material",
            Self::Knowledge => "knowledge",
            Self::Energy => "energy",
        }
    }
}

impl core::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// The kind of action an agent takes in a tick, and the `type` of the
/// event that records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Step to an adjacent cell.
    Move,
    /// Collect resources from the current cell.
    Gather,
    /// Swap top resources with a nearby agent.
    Trade,
    /// Talk to a nearby agent.
    Chat,
    /// Found or join an alliance with a nearby agent.
    Ally,
    /// Cast a vote on a free-text proposal.
    Vote,
    /// Do nothing. Also the event type used for exhaustion notices.
    Idle,
}

impl ActionType {
    /// The actions a decision provider is allowed to pick from.
    pub const DECIDABLE: [Self; 6] = [
        Self::Move,
        Self::Gather,
        Self::Trade,
        Self::Chat,
        Self::Ally,
        Self::Vote,
    ];

    /// Lowercase wire name of the action.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Gather => "gather",
            Self::Trade => "trade",
            Self::Chat => "chat",
            Self::Ally => "ally",
            Self::Vote => "vote",
            Self::Idle => "idle",
        }
    }

    /// Parse a wire name, case-insensitively.
    ///
    /// Returns `None` for anything outside the action vocabulary.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "move" => Some(Self::Move),
            "gather" => Some(Self::Gather),
            "trade" => Some(Self::Trade),
            "chat" => Some(Self::Chat),
            "ally" => Some(Self::Ally),
            "vote" => Some(Self::Vote),
            "idle" => Some(Self::Idle),
            _ => None,
        }
    }
}

impl core::fmt::Display for ActionType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Agent status
// ---------------------------------------------------------------------------

/// Lifecycle status of an agent.
///
/// Only `Alive` agents take part in ticks. `Dead` is terminal; dead agents
/// stay in the roster for snapshots and history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Participates in every tick.
    Alive,
    /// Ran out of energy. Never acts again.
    Dead,
    /// Parked by an operator; skipped by the tick loop.
    Idle,
}

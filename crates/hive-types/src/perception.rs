//! Perception payload assembled for an agent before each decision.
//!
//! The perception is everything the decision provider learns about the
//! world: the agent's own state, its cell, the six neighbouring cells and
//! living agents within interaction range.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::ResourceType;
use crate::ids::AgentId;
use crate::structs::{AgentValues, HexCoord};

/// Everything an agent can see when deciding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Perception {
    /// Current tick number.
    pub tick: u64,
    /// The deciding agent.
    pub agent_id: AgentId,
    /// The agent's name.
    pub name: String,
    /// The agent's personality traits.
    pub values: AgentValues,
    /// Current position.
    pub position: HexCoord,
    /// Current energy.
    pub energy: u32,
    /// Maximum energy.
    pub max_energy: u32,
    /// Current reputation.
    pub reputation: u32,
    /// Carried resources, every resource type present.
    pub inventory: BTreeMap<ResourceType, u32>,
    /// The cell the agent stands on.
    pub current_cell: Option<CellView>,
    /// The agent's alliance, if any.
    pub alliance: Option<AllianceView>,
    /// Existing neighbouring cells, by direction index.
    pub neighbors: Vec<NeighborCell>,
    /// Living agents within interaction range.
    pub nearby_agents: Vec<VisibleAgent>,
}

/// A cell's resource as seen by an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CellView {
    /// Resource type.
    pub resource: ResourceType,
    /// Units available.
    pub amount: u32,
}

/// A neighbouring cell and the direction that reaches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NeighborCell {
    /// Direction index to pass as a move target.
    pub direction: u8,
    /// The cell's coordinate.
    pub position: HexCoord,
    /// Resource type.
    pub resource: ResourceType,
    /// Units available.
    pub amount: u32,
}

/// A nearby living agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct VisibleAgent {
    /// The agent's id, usable as an action target.
    pub id: AgentId,
    /// The agent's name.
    pub name: String,
    /// Its reputation.
    pub reputation: u32,
    /// Its energy.
    pub energy: u32,
    /// Hex distance from the perceiving agent.
    pub distance: u32,
}

/// Summary of the perceiving agent's alliance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AllianceView {
    /// Alliance name.
    pub name: String,
    /// Member count.
    pub size: u32,
    /// Whether the perceiving agent leads it.
    pub is_leader: bool,
}

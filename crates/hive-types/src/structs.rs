//! Core entity structs for the Hive simulation.
//!
//! Covers the hex grid cell, agents and their trait vector, alliances and
//! the full world snapshot served to presentation collaborators.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{AgentStatus, ResourceType};
use crate::events::WorldEvent;
use crate::ids::{AgentId, AllianceId};

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Axial hex coordinate.
///
/// Ordering is `q` first, then `r`, which matches grid generation order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct HexCoord {
    /// Axial column.
    pub q: i32,
    /// Axial row.
    pub r: i32,
}

impl HexCoord {
    /// Construct a coordinate.
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }
}

impl core::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// A single cell of the hex grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HexCell {
    /// Axial column.
    pub q: i32,
    /// Axial row.
    pub r: i32,
    /// The resource this cell yields. Fixed for the life of the world.
    pub resource: ResourceType,
    /// Units currently available, 0 to 10.
    pub amount: u32,
}

impl HexCell {
    /// The cell's coordinate.
    pub const fn coord(&self) -> HexCoord {
        HexCoord::new(self.q, self.r)
    }
}

// ---------------------------------------------------------------------------
// Agents
// ---------------------------------------------------------------------------

/// Four independent personality traits, each 0 to 100.
///
/// Values shape the persona described to the decision provider. They can be
/// changed at any time, independent of tick boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AgentValues {
    /// Cooperation (high) versus competition (low).
    pub cooperation: u8,
    /// Adventure (high) versus caution (low).
    pub adventure: u8,
    /// Sociability (high) versus independence (low).
    pub social: u8,
    /// Generosity (high) versus thrift (low).
    pub generosity: u8,
}

impl AgentValues {
    /// Upper bound of every trait.
    pub const MAX: u8 = 100;

    /// The neutral trait vector (50 everywhere).
    pub const NEUTRAL: Self = Self {
        cooperation: 50,
        adventure: 50,
        social: 50,
        generosity: 50,
    };

    /// Return a copy with every trait clamped into `0..=100`.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            cooperation: self.cooperation.min(Self::MAX),
            adventure: self.adventure.min(Self::MAX),
            social: self.social.min(Self::MAX),
            generosity: self.generosity.min(Self::MAX),
        }
    }

    /// Apply a partial update, leaving unspecified traits untouched.
    #[must_use]
    pub fn patched(self, patch: &ValuesPatch) -> Self {
        Self {
            cooperation: patch.cooperation.unwrap_or(self.cooperation),
            adventure: patch.adventure.unwrap_or(self.adventure),
            social: patch.social.unwrap_or(self.social),
            generosity: patch.generosity.unwrap_or(self.generosity),
        }
        .clamped()
    }
}

impl Default for AgentValues {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// A partial update to an [`AgentValues`] vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ValuesPatch {
    /// New cooperation value, if changing.
    #[serde(default)]
    pub cooperation: Option<u8>,
    /// New adventure value, if changing.
    #[serde(default)]
    pub adventure: Option<u8>,
    /// New social value, if changing.
    #[serde(default)]
    pub social: Option<u8>,
    /// New generosity value, if changing.
    #[serde(default)]
    pub generosity: Option<u8>,
}

/// Credentials the decision provider needs to act on an agent's behalf.
///
/// Never serialized: snapshots leave the process, credentials must not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderCredentials {
    /// The provider-side persona the agent speaks as.
    pub persona_id: String,
    /// Bearer token for the provider API.
    pub token: String,
}

/// An agent living in the hive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Agent {
    /// Unique identifier.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// The user who owns this agent.
    pub user_id: String,
    /// Provider credentials (not serialized).
    #[serde(skip)]
    #[ts(skip)]
    pub credentials: ProviderCredentials,
    /// Current cell. Always references an existing grid cell.
    pub position: HexCoord,
    /// Energy, 0 to 100. Reaching 0 kills the agent.
    pub energy: u32,
    /// Reputation, only ever increased by actions.
    pub reputation: u32,
    /// Resource counts carried by the agent.
    pub inventory: BTreeMap<ResourceType, u32>,
    /// Personality traits.
    pub values: AgentValues,
    /// The alliance the agent belongs to, if any.
    pub alliance_id: Option<AllianceId>,
    /// Lifecycle status.
    pub status: AgentStatus,
}

impl Agent {
    /// Whether the agent takes part in ticks.
    pub const fn is_alive(&self) -> bool {
        matches!(self.status, AgentStatus::Alive)
    }

    /// Units of `resource` in the inventory (0 when absent).
    pub fn holding(&self, resource: ResourceType) -> u32 {
        self.inventory.get(&resource).copied().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Alliances
// ---------------------------------------------------------------------------

/// A named, growing-only group of agents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Alliance {
    /// Unique identifier.
    pub id: AllianceId,
    /// Display name, derived from the two founders.
    pub name: String,
    /// The leading member.
    pub leader_id: AgentId,
    /// Members in joining order, without duplicates.
    pub member_ids: Vec<AgentId>,
    /// Governance rules. Reserved for future policy logic; votes do not
    /// populate it.
    pub rules: Vec<String>,
}

impl Alliance {
    /// Number of members.
    pub fn size(&self) -> usize {
        self.member_ids.len()
    }

    /// Whether `agent` is a member.
    pub fn has_member(&self, agent: AgentId) -> bool {
        self.member_ids.contains(&agent)
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A full, non-incremental dump of the world, suitable for polling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldSnapshot {
    /// The last completed tick (0 before the first tick).
    pub tick: u64,
    /// Every grid cell in generation order.
    pub grid: Vec<HexCell>,
    /// The full roster, dead agents included.
    pub agents: Vec<Agent>,
    /// Every alliance ever formed.
    pub alliances: Vec<Alliance>,
    /// The complete event history.
    pub events: Vec<WorldEvent>,
}

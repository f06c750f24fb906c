//! Agent construction.
//!
//! [`create_agent`] turns a [`NewAgent`] request into a full [`Agent`]
//! record with starting vitals from [`VitalsConfig`]. Placement on the grid
//! is the world's job: the returned agent sits at the origin until the
//! world assigns it a cell.

use std::collections::BTreeMap;

use hive_types::{
    Agent, AgentId, AgentStatus, AgentValues, HexCoord, ProviderCredentials, ResourceType,
};
use rand::Rng;
use tracing::debug;

use crate::config::VitalsConfig;

/// Everything the caller chooses about a new agent.
#[derive(Debug, Clone, Default)]
pub struct NewAgent {
    /// Display name.
    pub name: String,
    /// The owning user.
    pub user_id: String,
    /// Credentials for the decision provider.
    pub credentials: ProviderCredentials,
    /// Initial personality traits.
    pub values: AgentValues,
}

/// An inventory holding zero of every resource type.
pub fn empty_inventory() -> BTreeMap<ResourceType, u32> {
    ResourceType::ALL.iter().map(|r| (*r, 0)).collect()
}

/// Build a living agent with full starting energy, zero reputation, an
/// empty inventory and no alliance.
pub fn create_agent(params: NewAgent, config: &VitalsConfig) -> Agent {
    let id = AgentId::new();
    debug!(agent_id = %id, name = %params.name, "agent created");
    Agent {
        id,
        name: params.name,
        user_id: params.user_id,
        credentials: params.credentials,
        position: HexCoord::default(),
        energy: config.starting_energy.min(config.max_energy),
        reputation: 0,
        inventory: empty_inventory(),
        values: params.values.clamped(),
        alliance_id: None,
        status: AgentStatus::Alive,
    }
}

/// Draw a trait vector with each trait uniform in `0..=99`.
pub fn random_values<R: Rng + ?Sized>(rng: &mut R) -> AgentValues {
    AgentValues {
        cooperation: rng.random_range(0..100),
        adventure: rng.random_range(0..100),
        social: rng.random_range(0..100),
        generosity: rng.random_range(0..100),
    }
}

//! Single-writer host around the world.
//!
//! [`WorldHost`] owns one [`WorldState`] per process behind a
//! `tokio::sync::Mutex`, so at most one tick or mutation runs at a time.
//! It is also the factory: [`WorldHost::reset`] throws the current world
//! away and builds a fresh one from the same configuration.

use std::sync::Arc;

use hive_types::{
    ActionType, Agent, AgentId, AgentValues, HexCoord, ValuesPatch, WorldEvent, WorldSnapshot,
};
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::config::HiveConfig;
use crate::decision::DecisionProvider;
use crate::tick::{self, TickError, TickSummary};
use crate::world::{RosterError, WorldState};

/// Errors surfaced at the host boundary.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// A tick was requested for a world with an empty roster.
    #[error("no agents in world")]
    NoAgents,

    /// The tick failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },

    /// A roster or values operation failed.
    #[error("roster error: {source}")]
    Roster {
        /// The underlying roster error.
        #[from]
        source: RosterError,
    },
}

/// Shared handle to the process's world.
///
/// Cloning the handle shares the same world.
#[derive(Debug, Clone)]
pub struct WorldHost {
    world: Arc<Mutex<WorldState>>,
    config: Arc<HiveConfig>,
}

impl WorldHost {
    /// Create a host with a fresh world built from `config`.
    pub fn new(config: HiveConfig) -> Self {
        let world = WorldState::from_config(&config);
        Self {
            world: Arc::new(Mutex::new(world)),
            config: Arc::new(config),
        }
    }

    /// Create a host around an existing world. [`reset`](Self::reset) will
    /// still build from `config`.
    pub fn with_world(world: WorldState, config: HiveConfig) -> Self {
        Self {
            world: Arc::new(Mutex::new(world)),
            config: Arc::new(config),
        }
    }

    /// The configuration this host builds worlds from.
    pub fn config(&self) -> &HiveConfig {
        &self.config
    }

    /// Lock and return the current world.
    pub async fn get(&self) -> MutexGuard<'_, WorldState> {
        self.world.lock().await
    }

    /// Replace the current world with a fresh one.
    pub async fn reset(&self) {
        let mut world = self.world.lock().await;
        *world = WorldState::from_config(&self.config);
        info!(seed = self.config.world.seed, "world reset");
    }

    /// Run one tick.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::NoAgents`] if nobody was ever added, or
    /// [`HostError::Tick`] if the tick fails.
    pub async fn advance<P: DecisionProvider>(
        &self,
        provider: &mut P,
    ) -> Result<TickSummary, HostError> {
        let mut world = self.world.lock().await;
        if world.agents().is_empty() {
            return Err(HostError::NoAgents);
        }
        Ok(tick::run_tick(&mut world, provider).await?)
    }

    /// Add an agent on a random free cell.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Roster`] if the agent cannot be placed.
    pub async fn add_agent(&self, agent: Agent) -> Result<HexCoord, HostError> {
        Ok(self.world.lock().await.add_agent(agent)?)
    }

    /// A full copy of the current world.
    pub async fn snapshot(&self) -> WorldSnapshot {
        self.world.lock().await.to_snapshot()
    }

    /// Event history, optionally filtered by type.
    pub async fn events(&self, filter: Option<ActionType>) -> Vec<WorldEvent> {
        self.world
            .lock()
            .await
            .events_of_type(filter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// The first living agent's values, or neutral values.
    pub async fn current_values(&self) -> AgentValues {
        self.world.lock().await.current_values()
    }

    /// Apply a partial values update to every living agent.
    pub async fn update_values(&self, patch: &ValuesPatch) -> usize {
        self.world.lock().await.update_living_values(patch)
    }

    /// Apply a partial values update to one agent.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Roster`] if the agent does not exist.
    pub async fn update_agent_values(
        &self,
        id: AgentId,
        patch: &ValuesPatch,
    ) -> Result<AgentValues, HostError> {
        Ok(self.world.lock().await.set_agent_values(id, patch)?)
    }
}

#[cfg(test)]
mod tests {
    use hive_agents::{NewAgent, VitalsConfig, create_agent};
    use hive_types::AgentAction;

    use super::*;
    use crate::decision::ScriptedDecisionProvider;

    fn agent(name: &str) -> Agent {
        create_agent(
            NewAgent {
                name: name.to_owned(),
                ..NewAgent::default()
            },
            &VitalsConfig::default(),
        )
    }

    #[tokio::test]
    async fn refuses_to_tick_empty_roster() {
        let host = WorldHost::new(HiveConfig::default());
        let mut provider = ScriptedDecisionProvider::always(AgentAction::idle());
        let result = host.advance(&mut provider).await;
        assert!(matches!(result, Err(HostError::NoAgents)));
        assert_eq!(host.get().await.tick(), 0);
    }

    #[tokio::test]
    async fn advance_and_reset() {
        let host = WorldHost::new(HiveConfig::default());
        assert!(host.add_agent(agent("Ada")).await.is_ok());
        let mut provider = ScriptedDecisionProvider::always(AgentAction::idle());

        let summary = host.advance(&mut provider).await;
        assert_eq!(summary.ok().map(|s| s.tick), Some(1));
        assert_eq!(host.snapshot().await.tick, 1);

        let shared = host.clone();
        shared.reset().await;
        let snapshot = host.snapshot().await;
        assert_eq!(snapshot.tick, 0);
        assert!(snapshot.agents.is_empty());
    }

    #[tokio::test]
    async fn values_round_through_host() {
        let host = WorldHost::new(HiveConfig::default());
        assert_eq!(host.current_values().await, AgentValues::NEUTRAL);
        assert!(host.add_agent(agent("Ada")).await.is_ok());
        let patch = ValuesPatch {
            adventure: Some(90),
            ..ValuesPatch::default()
        };
        assert_eq!(host.update_values(&patch).await, 1);
        assert_eq!(host.current_values().await.adventure, 90);
    }
}

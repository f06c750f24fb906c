//! The world: grid, roster, alliances and the event history.
//!
//! [`WorldState`] is an owned value. Nothing in the engine reaches for a
//! global; callers hold the state (usually through
//! [`WorldHost`](crate::host::WorldHost)) and pass it to
//! [`run_tick`](crate::tick::run_tick) explicitly.
//!
//! The world owns a seeded `StdRng` that drives grid generation, agent
//! placement and fallback moves, so a fixed seed and a deterministic
//! decision provider reproduce a run exactly.

use std::time::Duration;

use hive_types::{
    ActionType, Agent, AgentId, AgentStatus, AgentValues, Alliance, AllianceId, HexCoord,
    ValuesPatch, WorldEvent, WorldSnapshot,
};
use hive_world::HexGrid;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::config::{HiveConfig, RulesConfig};
use crate::decision::DecisionProvider;
use crate::tick::{self, TickError};

/// Errors from roster and value operations.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// An agent with this id is already in the roster.
    #[error("agent {0} is already in the world")]
    DuplicateAgent(AgentId),

    /// No agent with this id exists.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    /// The requested placement is not a grid cell.
    #[error("no cell at {0}")]
    CellNotFound(HexCoord),

    /// The grid has no cells to place an agent on.
    #[error("cannot place an agent on an empty grid")]
    EmptyGrid,

    /// A new agent claims membership of an alliance that does not list it.
    #[error("agent {agent_id} claims membership of unknown alliance {alliance_id}")]
    UnknownAlliance {
        /// The agent being added.
        agent_id: AgentId,
        /// The alliance it names.
        alliance_id: AllianceId,
    },
}

/// The complete mutable state of one simulation.
#[derive(Debug)]
pub struct WorldState {
    pub(crate) tick: u64,
    pub(crate) grid: HexGrid,
    pub(crate) agents: Vec<Agent>,
    pub(crate) alliances: Vec<Alliance>,
    pub(crate) events: Vec<WorldEvent>,
    pub(crate) rng: StdRng,
    pub(crate) rules: RulesConfig,
    pub(crate) decision_timeout: Option<Duration>,
}

impl WorldState {
    /// A fresh world at tick 0 with a grid generated from `seed`.
    pub fn new(seed: u64, rules: RulesConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = HexGrid::generate(&mut rng);
        Self::assemble(grid, rng, rules)
    }

    /// A fresh world configured from `config`.
    pub fn from_config(config: &HiveConfig) -> Self {
        Self::new(config.world.seed, config.rules.clone())
            .with_decision_timeout(config.world.decision_timeout())
    }

    /// A fresh world on a caller-supplied grid.
    pub fn with_grid(grid: HexGrid, seed: u64, rules: RulesConfig) -> Self {
        Self::assemble(grid, StdRng::seed_from_u64(seed), rules)
    }

    fn assemble(grid: HexGrid, rng: StdRng, rules: RulesConfig) -> Self {
        info!(cells = grid.len(), "world created");
        Self {
            tick: 0,
            grid,
            agents: Vec::new(),
            alliances: Vec::new(),
            events: Vec::new(),
            rng,
            rules,
            decision_timeout: None,
        }
    }

    /// Set the per-decision deadline. `None` waits indefinitely.
    #[must_use]
    pub const fn with_decision_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.decision_timeout = timeout;
        self
    }

    // -------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------

    /// The last completed tick (0 before the first).
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// The grid.
    pub const fn grid(&self) -> &HexGrid {
        &self.grid
    }

    /// The grid, mutably. For operator tooling and test setups.
    pub const fn grid_mut(&mut self) -> &mut HexGrid {
        &mut self.grid
    }

    /// The full roster in insertion order, dead agents included.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// The agent with `id`, if present.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// The agent with `id`, mutably. For operator tooling and test setups.
    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|a| a.id == id)
    }

    /// Number of living agents.
    pub fn agents_alive(&self) -> usize {
        self.agents.iter().filter(|a| a.is_alive()).count()
    }

    /// Every alliance ever formed.
    pub fn alliances(&self) -> &[Alliance] {
        &self.alliances
    }

    /// The complete event history.
    pub fn events(&self) -> &[WorldEvent] {
        &self.events
    }

    /// History filtered to one event type, or all events for `None`.
    pub fn events_of_type(&self, filter: Option<ActionType>) -> Vec<&WorldEvent> {
        self.events
            .iter()
            .filter(|e| filter.is_none_or(|t| e.event_type == t))
            .collect()
    }

    /// The simulation rules.
    pub const fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// A full copy of the world for presentation.
    pub fn to_snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            grid: self.grid.to_vec(),
            agents: self.agents.clone(),
            alliances: self.alliances.clone(),
            events: self.events.clone(),
        }
    }

    // -------------------------------------------------------------------
    // Roster
    // -------------------------------------------------------------------

    /// Add an agent on a uniformly random cell free of living agents.
    ///
    /// When every cell is occupied the agent shares a random cell. Returns
    /// the chosen position. Energy above the ceiling is clamped, and a living
    /// agent with no energy joins as dead.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::DuplicateAgent`] if the id is already present,
    /// [`RosterError::UnknownAlliance`] if `alliance_id` names an alliance
    /// that does not list the agent, or [`RosterError::EmptyGrid`] if there
    /// is nowhere to stand.
    pub fn add_agent(&mut self, agent: Agent) -> Result<HexCoord, RosterError> {
        self.admit_check(&agent)?;
        let free: Vec<HexCoord> = self
            .grid
            .coords()
            .into_iter()
            .filter(|c| !self.agents.iter().any(|a| a.is_alive() && a.position == *c))
            .collect();
        let position = if let Some(cell) = free.choose(&mut self.rng) {
            *cell
        } else {
            let all = self.grid.coords();
            let cell = all.choose(&mut self.rng).ok_or(RosterError::EmptyGrid)?;
            warn!(agent_id = %agent.id, position = %cell, "no free cell, sharing an occupied one");
            *cell
        };
        self.place(agent, position);
        Ok(position)
    }

    /// Add an agent at a specific cell.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::DuplicateAgent`] if the id is already present,
    /// [`RosterError::UnknownAlliance`] for a dangling `alliance_id`, or
    /// [`RosterError::CellNotFound`] if `position` is off the grid.
    pub fn add_agent_at(&mut self, agent: Agent, position: HexCoord) -> Result<(), RosterError> {
        self.admit_check(&agent)?;
        if !self.grid.contains(position) {
            return Err(RosterError::CellNotFound(position));
        }
        self.place(agent, position);
        Ok(())
    }

    fn admit_check(&self, agent: &Agent) -> Result<(), RosterError> {
        if self.agents.iter().any(|a| a.id == agent.id) {
            return Err(RosterError::DuplicateAgent(agent.id));
        }
        if let Some(alliance_id) = agent.alliance_id {
            let listed = self
                .alliances
                .iter()
                .any(|a| a.id == alliance_id && a.has_member(agent.id));
            if !listed {
                return Err(RosterError::UnknownAlliance {
                    agent_id: agent.id,
                    alliance_id,
                });
            }
        }
        Ok(())
    }

    fn place(&mut self, mut agent: Agent, position: HexCoord) {
        let max_energy = self.rules.max_energy;
        if agent.energy > max_energy {
            warn!(
                agent_id = %agent.id,
                energy = agent.energy,
                max_energy,
                "clamping energy to the ceiling"
            );
            agent.energy = max_energy;
        }
        if agent.is_alive() && agent.energy == 0 {
            warn!(agent_id = %agent.id, "agent joined with no energy, marking dead");
            agent.status = AgentStatus::Dead;
        }
        agent.position = position;
        info!(agent_id = %agent.id, name = %agent.name, %position, "agent joined");
        self.agents.push(agent);
    }

    // -------------------------------------------------------------------
    // Values
    // -------------------------------------------------------------------

    /// The trait vector of agent `id`.
    pub fn agent_values(&self, id: AgentId) -> Option<AgentValues> {
        self.agent(id).map(|a| a.values)
    }

    /// Apply a partial trait update to agent `id`. Returns the new values.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::AgentNotFound`] if no such agent exists.
    pub fn set_agent_values(
        &mut self,
        id: AgentId,
        patch: &ValuesPatch,
    ) -> Result<AgentValues, RosterError> {
        let agent = self.agent_mut(id).ok_or(RosterError::AgentNotFound(id))?;
        agent.values = agent.values.patched(patch);
        Ok(agent.values)
    }

    /// Apply a partial trait update to every living agent. Returns how many
    /// agents were updated.
    pub fn update_living_values(&mut self, patch: &ValuesPatch) -> usize {
        let mut updated: usize = 0;
        for agent in self.agents.iter_mut().filter(|a| a.is_alive()) {
            agent.values = agent.values.patched(patch);
            updated = updated.saturating_add(1);
        }
        updated
    }

    /// The first living agent's values, or neutral values when nobody is
    /// alive.
    pub fn current_values(&self) -> AgentValues {
        self.agents
            .iter()
            .find(|a| a.is_alive())
            .map_or(AgentValues::NEUTRAL, |a| a.values)
    }

    // -------------------------------------------------------------------
    // Ticks
    // -------------------------------------------------------------------

    /// Run one tick and return the events it produced.
    ///
    /// # Errors
    ///
    /// Returns [`TickError`] if the world turns out to be structurally
    /// inconsistent.
    pub async fn execute_tick<P: DecisionProvider>(
        &mut self,
        provider: &mut P,
    ) -> Result<Vec<WorldEvent>, TickError> {
        tick::run_tick(self, provider).await.map(|s| s.events)
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use std::collections::BTreeSet;

    use hive_agents::{NewAgent, VitalsConfig, create_agent};

    use super::*;

    fn agent(name: &str) -> Agent {
        create_agent(
            NewAgent {
                name: name.to_owned(),
                ..NewAgent::default()
            },
            &VitalsConfig::default(),
        )
    }

    #[test]
    fn new_world_starts_at_tick_zero() {
        let world = WorldState::new(1, RulesConfig::default());
        assert_eq!(world.tick(), 0);
        assert_eq!(world.grid().len(), 37);
        assert!(world.agents().is_empty());
        assert!(world.events().is_empty());
    }

    #[test]
    fn same_seed_same_grid() {
        let a = WorldState::new(99, RulesConfig::default());
        let b = WorldState::new(99, RulesConfig::default());
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn agents_get_distinct_free_cells() {
        let mut world = WorldState::new(5, RulesConfig::default());
        let mut seen = BTreeSet::new();
        for i in 0..37 {
            let pos = world.add_agent(agent(&format!("A{i}")));
            assert!(pos.is_ok());
            seen.insert(pos.ok());
        }
        assert_eq!(seen.len(), 37);
        // the 38th has to share
        let extra = world.add_agent(agent("Extra"));
        assert!(extra.is_ok_and(|p| world.grid().contains(p)));
    }

    #[test]
    fn duplicate_agent_is_rejected() {
        let mut world = WorldState::new(5, RulesConfig::default());
        let a = agent("Ada");
        assert!(world.add_agent(a.clone()).is_ok());
        assert!(matches!(
            world.add_agent(a),
            Err(RosterError::DuplicateAgent(_))
        ));
    }

    #[test]
    fn add_agent_at_rejects_off_grid() {
        let mut world = WorldState::new(5, RulesConfig::default());
        let result = world.add_agent_at(agent("Ada"), HexCoord::new(4, 0));
        assert!(matches!(result, Err(RosterError::CellNotFound(_))));
        assert!(world.add_agent_at(agent("Bo"), HexCoord::new(0, 0)).is_ok());
        assert_eq!(world.agents()[0].position, HexCoord::new(0, 0));
    }

    #[test]
    fn dangling_alliance_is_rejected() {
        let mut world = WorldState::new(5, RulesConfig::default());
        let mut stray = agent("Bo");
        stray.alliance_id = Some(AllianceId::new());
        assert!(matches!(
            world.add_agent(stray.clone()),
            Err(RosterError::UnknownAlliance { .. })
        ));
        assert!(matches!(
            world.add_agent_at(stray, HexCoord::new(0, 0)),
            Err(RosterError::UnknownAlliance { .. })
        ));
        assert!(world.agents().is_empty());
    }

    #[test]
    fn joining_energy_is_normalized() {
        let mut world = WorldState::new(5, RulesConfig::default());
        let mut greedy = agent("Ada");
        greedy.energy = 250;
        let mut empty = agent("Bo");
        empty.energy = 0;
        assert!(world.add_agent(greedy).is_ok());
        assert!(world.add_agent(empty).is_ok());

        assert_eq!(world.agents()[0].energy, 100);
        assert_eq!(world.agents()[0].status, AgentStatus::Alive);
        assert_eq!(world.agents()[1].status, AgentStatus::Dead);
        assert_eq!(world.agents_alive(), 1);
    }

    #[test]
    fn values_update_and_current_values() {
        let mut world = WorldState::new(5, RulesConfig::default());
        assert_eq!(world.current_values(), AgentValues::NEUTRAL);

        let mut dead = agent("Ghost");
        dead.status = AgentStatus::Dead;
        dead.values.social = 5;
        let living = agent("Ada");
        let living_id = living.id;
        assert!(world.add_agent(dead).is_ok());
        assert!(world.add_agent(living).is_ok());

        let patch = ValuesPatch {
            social: Some(77),
            ..ValuesPatch::default()
        };
        assert_eq!(world.update_living_values(&patch), 1);
        assert_eq!(world.current_values().social, 77);
        assert_eq!(world.agents()[0].values.social, 5);

        let single = ValuesPatch {
            generosity: Some(12),
            ..ValuesPatch::default()
        };
        let updated = world.set_agent_values(living_id, &single);
        assert_eq!(updated.ok().map(|v| v.generosity), Some(12));
        assert_eq!(world.agent_values(living_id).map(|v| v.social), Some(77));
        assert!(world.set_agent_values(AgentId::new(), &single).is_err());
    }

    #[test]
    fn snapshot_mirrors_state() {
        let mut world = WorldState::new(5, RulesConfig::default());
        assert!(world.add_agent(agent("Ada")).is_ok());
        let snapshot = world.to_snapshot();
        assert_eq!(snapshot.tick, 0);
        assert_eq!(snapshot.grid.len(), 37);
        assert_eq!(snapshot.agents.len(), 1);
        assert!(snapshot.alliances.is_empty());
    }
}

//! Perception assembly for the decision phase.
//!
//! Before asking for a decision the orchestrator builds a [`Perception`] for
//! the agent: its own state, the cell it stands on, the existing neighbour
//! cells, living agents within the interaction radius and a summary of its
//! alliance. Nothing beyond that radius is visible.

use hive_types::{
    Agent, Alliance, AllianceView, CellView, NeighborCell, Perception, VisibleAgent,
};
use hive_world::{HexGrid, hex_distance};

use crate::config::RulesConfig;

/// World state shared by every perception assembled in one tick.
#[derive(Debug, Clone, Copy)]
pub struct PerceptionContext<'a> {
    /// The current tick number.
    pub tick: u64,
    /// The grid.
    pub grid: &'a HexGrid,
    /// The full roster.
    pub agents: &'a [Agent],
    /// Every alliance.
    pub alliances: &'a [Alliance],
    /// Simulation rules.
    pub rules: &'a RulesConfig,
}

/// Assemble the perception for `agent`.
pub fn assemble_perception(agent: &Agent, ctx: &PerceptionContext<'_>) -> Perception {
    let current_cell = ctx.grid.cell(agent.position).map(|cell| CellView {
        resource: cell.resource,
        amount: cell.amount,
    });

    let neighbors = ctx
        .grid
        .neighbors(agent.position)
        .into_iter()
        .map(|(dir, cell)| NeighborCell {
            direction: u8::try_from(dir).unwrap_or(u8::MAX),
            position: cell.coord(),
            resource: cell.resource,
            amount: cell.amount,
        })
        .collect();

    let alliance = agent
        .alliance_id
        .and_then(|id| ctx.alliances.iter().find(|a| a.id == id))
        .map(|a| AllianceView {
            name: a.name.clone(),
            size: u32::try_from(a.size()).unwrap_or(u32::MAX),
            is_leader: a.leader_id == agent.id,
        });

    Perception {
        tick: ctx.tick,
        agent_id: agent.id,
        name: agent.name.clone(),
        values: agent.values,
        position: agent.position,
        energy: agent.energy,
        max_energy: ctx.rules.max_energy,
        reputation: agent.reputation,
        inventory: agent.inventory.clone(),
        current_cell,
        alliance,
        neighbors,
        nearby_agents: nearby_agents(agent, ctx.agents, ctx.rules.interaction_radius),
    }
}

/// Living agents other than `agent` within `radius`, in roster order.
pub fn nearby_agents(agent: &Agent, roster: &[Agent], radius: u32) -> Vec<VisibleAgent> {
    roster
        .iter()
        .filter(|other| other.id != agent.id && other.is_alive())
        .filter_map(|other| {
            let distance = hex_distance(agent.position, other.position);
            (distance <= radius).then(|| VisibleAgent {
                id: other.id,
                name: other.name.clone(),
                reputation: other.reputation,
                energy: other.energy,
                distance,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use hive_agents::{NewAgent, VitalsConfig, create_agent, found_alliance};
    use hive_types::{AgentStatus, HexCoord};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn agent_at(name: &str, q: i32, r: i32) -> Agent {
        let mut agent = create_agent(
            NewAgent {
                name: name.to_owned(),
                ..NewAgent::default()
            },
            &VitalsConfig::default(),
        );
        agent.position = HexCoord::new(q, r);
        agent
    }

    #[test]
    fn sees_living_agents_within_two() {
        let mut rng = SmallRng::seed_from_u64(3);
        let grid = HexGrid::generate(&mut rng);
        let rules = RulesConfig::default();
        let me = agent_at("Me", 0, 0);
        let near = agent_at("Near", 1, 1);
        let far = agent_at("Far", 3, 0);
        let mut dead = agent_at("Dead", 1, 0);
        dead.status = AgentStatus::Dead;
        let agents = vec![me.clone(), near, far, dead];

        let ctx = PerceptionContext {
            tick: 4,
            grid: &grid,
            agents: &agents,
            alliances: &[],
            rules: &rules,
        };
        let perception = assemble_perception(&me, &ctx);

        assert_eq!(perception.tick, 4);
        let names: Vec<&str> = perception
            .nearby_agents
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["Near"]);
        assert_eq!(perception.neighbors.len(), 6);
        assert!(perception.current_cell.is_some());
        assert!(perception.alliance.is_none());
    }

    #[test]
    fn reports_alliance_summary() {
        let mut rng = SmallRng::seed_from_u64(3);
        let grid = HexGrid::generate(&mut rng);
        let rules = RulesConfig::default();
        let mut me = agent_at("Me", 0, 0);
        let other = agent_at("Other", 0, 1);
        let alliance = found_alliance(&me, &other);
        me.alliance_id = Some(alliance.id);
        let agents = vec![me.clone(), other];
        let alliances = vec![alliance];

        let ctx = PerceptionContext {
            tick: 1,
            grid: &grid,
            agents: &agents,
            alliances: &alliances,
            rules: &rules,
        };
        let view = assemble_perception(&me, &ctx).alliance;
        assert_eq!(view.as_ref().map(|v| v.size), Some(2));
        assert_eq!(view.map(|v| v.is_leader), Some(true));
    }
}

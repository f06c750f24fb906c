//! Action resolution: applying one agent's action to the world.
//!
//! Resolution is deterministic given the world state and the action. Bad
//! targets never fail the tick; they degrade into failure-flavoured events
//! (a trade with nobody, a chat with oneself). Only structural corruption
//! (an agent standing off the grid, an alliance id that points nowhere)
//! is reported as a [`ResolutionError`].
//!
//! Agent targets are looked up by id first, then by exact name among living
//! agents, and must be a different, living agent within the interaction
//! radius.

use hive_agents::inventory::{add_resource, remove_resource, top_resource};
use hive_agents::{AgentError, AllyPlan, admit, found_alliance, plan_alliance, reputation};
use hive_types::{
    ActionType, Agent, AgentAction, AgentId, Alliance, AllianceId, AllyDetail, AllyOutcome,
    ChatDetail, EventDetail, GatherDetail, HexCoord, MoveDetail, ResourceType, TradeDetail,
    VoteDetail, WorldEvent,
};
use hive_world::{HexGrid, WorldError, direction_from_target, hex_distance, offset};
use tracing::debug;

use crate::config::RulesConfig;

/// Failure reason recorded when a trade finds no partner.
pub const NO_TRADE_PARTNER: &str = "no nearby tradable agent";

/// Failure reason recorded when an ally action finds no partner.
pub const NO_ALLY_PARTNER: &str = "no nearby agent to ally with";

/// Chat addressee recorded when nobody valid was addressed.
pub const TALKING_TO_SELF: &str = "talking to self";

/// Chat message recorded when the agent said nothing.
pub const DEFAULT_CHAT_MESSAGE: &str = "...";

/// Proposal recorded when a vote names none.
pub const DEFAULT_PROPOSAL: &str = "unknown proposal";

/// The vote every ballot records.
pub const APPROVE: &str = "approve";

/// Structural problems discovered while resolving an action.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// No agent at the given roster index.
    #[error("no agent at roster index {index}")]
    AgentNotFound {
        /// The missing index.
        index: usize,
    },

    /// An agent's position is not a grid cell.
    #[error("agent {agent_id} stands off the grid at {position}")]
    AgentOffGrid {
        /// The misplaced agent.
        agent_id: AgentId,
        /// Where it claims to be.
        position: HexCoord,
    },

    /// An agent references an alliance that does not exist.
    #[error("agent {agent_id} references missing alliance {alliance_id}")]
    DanglingAlliance {
        /// The agent holding the reference.
        agent_id: AgentId,
        /// The missing alliance.
        alliance_id: AllianceId,
    },

    /// An alliance's leader is not in the roster.
    #[error("alliance {alliance_id} is led by unknown agent {leader_id}")]
    MissingLeader {
        /// The alliance.
        alliance_id: AllianceId,
        /// The leader it names.
        leader_id: AgentId,
    },

    /// An agent state operation failed.
    #[error("agent error for {agent_id}: {source}")]
    Agent {
        /// The agent involved.
        agent_id: AgentId,
        /// The underlying error.
        source: AgentError,
    },

    /// A grid operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying error.
        #[from]
        source: WorldError,
    },
}

/// Mutable world state an action may touch.
#[derive(Debug)]
pub struct ResolutionContext<'a> {
    /// The tick being resolved.
    pub tick: u64,
    /// The grid.
    pub grid: &'a mut HexGrid,
    /// The full roster.
    pub agents: &'a mut [Agent],
    /// Every alliance.
    pub alliances: &'a mut Vec<Alliance>,
    /// Simulation rules.
    pub rules: &'a RulesConfig,
}

/// Apply `action` for the agent at roster index `actor`.
///
/// Returns the event recording what happened, or `None` for `idle`.
///
/// # Errors
///
/// Returns [`ResolutionError`] when the world is structurally inconsistent.
pub fn resolve_action(
    ctx: &mut ResolutionContext<'_>,
    actor: usize,
    action: &AgentAction,
) -> Result<Option<WorldEvent>, ResolutionError> {
    let agent = agent_ref(ctx.agents, actor)?;
    if !ctx.grid.contains(agent.position) {
        return Err(ResolutionError::AgentOffGrid {
            agent_id: agent.id,
            position: agent.position,
        });
    }

    let target = action.target.as_deref();
    let detail = action.detail.as_deref();
    let event_detail = match action.action {
        ActionType::Move => resolve_move(ctx, actor, target)?,
        ActionType::Gather => resolve_gather(ctx, actor)?,
        ActionType::Trade => resolve_trade(ctx, actor, target)?,
        ActionType::Chat => resolve_chat(ctx, actor, target, detail)?,
        ActionType::Ally => resolve_ally(ctx, actor, target)?,
        ActionType::Vote => resolve_vote(detail),
        ActionType::Idle => return Ok(None),
    };

    let agent = agent_ref(ctx.agents, actor)?;
    debug!(
        tick = ctx.tick,
        agent_id = %agent.id,
        action = %action.action,
        "action resolved"
    );
    Ok(Some(WorldEvent::new(
        agent.id,
        &agent.name,
        ctx.tick,
        event_detail,
    )))
}

/// Roster index of the agent `target` refers to, if it is a valid partner
/// for `actor`: a different, living agent within `radius`.
pub fn find_target(
    agents: &[Agent],
    actor: usize,
    target: Option<&str>,
    radius: u32,
) -> Option<usize> {
    let target = target?.trim();
    if target.is_empty() {
        return None;
    }
    let me = agents.get(actor)?;
    let index = AgentId::parse(target)
        .and_then(|id| agents.iter().position(|a| a.id == id))
        .or_else(|| {
            agents
                .iter()
                .enumerate()
                .position(|(i, a)| i != actor && a.is_alive() && a.name == target)
        })?;
    let other = agents.get(index)?;
    let eligible =
        index != actor && other.is_alive() && hex_distance(me.position, other.position) <= radius;
    eligible.then_some(index)
}

// ---------------------------------------------------------------------------
// Per-action handlers
// ---------------------------------------------------------------------------

fn resolve_move(
    ctx: &mut ResolutionContext<'_>,
    actor: usize,
    target: Option<&str>,
) -> Result<EventDetail, ResolutionError> {
    let direction = direction_from_target(target);
    let agent = agent_mut(ctx.agents, actor)?;
    let from = agent.position;
    let to = offset(from, direction)
        .filter(|c| ctx.grid.contains(*c))
        .unwrap_or(from);
    agent.position = to;
    Ok(EventDetail::Move(MoveDetail { from, to }))
}

fn resolve_gather(
    ctx: &mut ResolutionContext<'_>,
    actor: usize,
) -> Result<EventDetail, ResolutionError> {
    let position = agent_ref(ctx.agents, actor)?.position;
    let (resource, amount) = ctx.grid.harvest(position, ctx.rules.gather_cap)?;
    let vitals = ctx.rules.vitals();

    let agent = agent_mut(ctx.agents, actor)?;
    let agent_id = agent.id;
    add_resource(&mut agent.inventory, resource, amount)
        .map_err(|source| ResolutionError::Agent { agent_id, source })?;
    if resource == ResourceType::Energy && amount > 0 {
        hive_agents::restore_energy(agent, amount, &vitals)
            .map_err(|source| ResolutionError::Agent { agent_id, source })?;
    }
    Ok(EventDetail::Gather(GatherDetail { resource, amount }))
}

fn resolve_trade(
    ctx: &mut ResolutionContext<'_>,
    actor: usize,
    target: Option<&str>,
) -> Result<EventDetail, ResolutionError> {
    let Some(partner) = find_target(ctx.agents, actor, target, ctx.rules.interaction_radius)
    else {
        return Ok(EventDetail::Trade(TradeDetail {
            success: false,
            with: None,
            reason: Some(NO_TRADE_PARTNER.to_owned()),
            amount: 0,
        }));
    };

    let (me, them) =
        pair_mut(ctx.agents, actor, partner).ok_or(ResolutionError::AgentNotFound {
            index: partner,
        })?;
    let (offered, mine) = top_resource(&me.inventory);
    let (wanted, theirs) = top_resource(&them.inventory);
    let amount = mine.min(theirs).min(ctx.rules.trade_cap);

    if amount > 0 {
        swap_goods(me, offered, wanted, amount)?;
        swap_goods(them, wanted, offered, amount)?;
        award(me, ctx.rules.trade_reputation)?;
        award(them, ctx.rules.trade_reputation)?;
    }

    Ok(EventDetail::Trade(TradeDetail {
        success: true,
        with: Some(them.name.clone()),
        reason: None,
        amount,
    }))
}

fn resolve_chat(
    ctx: &mut ResolutionContext<'_>,
    actor: usize,
    target: Option<&str>,
    detail: Option<&str>,
) -> Result<EventDetail, ResolutionError> {
    let with = find_target(ctx.agents, actor, target, ctx.rules.interaction_radius)
        .and_then(|i| ctx.agents.get(i))
        .map_or_else(|| TALKING_TO_SELF.to_owned(), |a| a.name.clone());
    let message = non_empty(detail).unwrap_or(DEFAULT_CHAT_MESSAGE).to_owned();

    let agent = agent_mut(ctx.agents, actor)?;
    award(agent, ctx.rules.chat_reputation)?;
    Ok(EventDetail::Chat(ChatDetail { with, message }))
}

fn resolve_ally(
    ctx: &mut ResolutionContext<'_>,
    actor: usize,
    target: Option<&str>,
) -> Result<EventDetail, ResolutionError> {
    let Some(partner) = find_target(ctx.agents, actor, target, ctx.rules.interaction_radius)
    else {
        return Ok(EventDetail::Ally(AllyDetail {
            success: false,
            alliance_name: None,
            outcome: None,
            reason: Some(NO_ALLY_PARTNER.to_owned()),
        }));
    };

    let (me, them) =
        pair_mut(ctx.agents, actor, partner).ok_or(ResolutionError::AgentNotFound {
            index: partner,
        })?;

    let (alliance_name, outcome) = match plan_alliance(me.alliance_id, them.alliance_id) {
        AllyPlan::Found => {
            let alliance = found_alliance(me, them);
            me.alliance_id = Some(alliance.id);
            them.alliance_id = Some(alliance.id);
            award(me, ctx.rules.ally_initiator_reputation)?;
            award(them, ctx.rules.ally_target_reputation)?;
            let name = alliance.name.clone();
            ctx.alliances.push(alliance);
            (name, AllyOutcome::Created)
        }
        AllyPlan::InitiatorJoins(id) => {
            let name = enlist(ctx.alliances, id, me, them.id)?;
            (name, AllyOutcome::Joined)
        }
        AllyPlan::TargetJoins(id) => {
            let name = enlist(ctx.alliances, id, them, me.id)?;
            (name, AllyOutcome::Joined)
        }
        AllyPlan::AlreadyAffiliated(id) => {
            let alliance = ctx.alliances.iter().find(|a| a.id == id).ok_or(
                ResolutionError::DanglingAlliance {
                    agent_id: me.id,
                    alliance_id: id,
                },
            )?;
            (alliance.name.clone(), AllyOutcome::Joined)
        }
    };

    Ok(EventDetail::Ally(AllyDetail {
        success: true,
        alliance_name: Some(alliance_name),
        outcome: Some(outcome),
        reason: None,
    }))
}

fn resolve_vote(detail: Option<&str>) -> EventDetail {
    EventDetail::Vote(VoteDetail {
        proposal: non_empty(detail).unwrap_or(DEFAULT_PROPOSAL).to_owned(),
        vote: APPROVE.to_owned(),
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn agent_ref(agents: &[Agent], index: usize) -> Result<&Agent, ResolutionError> {
    agents
        .get(index)
        .ok_or(ResolutionError::AgentNotFound { index })
}

fn agent_mut(agents: &mut [Agent], index: usize) -> Result<&mut Agent, ResolutionError> {
    agents
        .get_mut(index)
        .ok_or(ResolutionError::AgentNotFound { index })
}

/// Two distinct agents borrowed mutably at once, in argument order.
fn pair_mut(agents: &mut [Agent], first: usize, second: usize) -> Option<(&mut Agent, &mut Agent)> {
    if first == second {
        return None;
    }
    let low = first.min(second);
    let high = first.max(second);
    let (head, tail) = agents.split_at_mut_checked(high)?;
    let low_ref = head.get_mut(low)?;
    let high_ref = tail.first_mut()?;
    if first < second {
        Some((low_ref, high_ref))
    } else {
        Some((high_ref, low_ref))
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}

fn award(agent: &mut Agent, points: u32) -> Result<(), ResolutionError> {
    let agent_id = agent.id;
    reputation::award(agent, points)
        .map(|_| ())
        .map_err(|source| ResolutionError::Agent { agent_id, source })
}

fn swap_goods(
    agent: &mut Agent,
    give: ResourceType,
    receive: ResourceType,
    amount: u32,
) -> Result<(), ResolutionError> {
    let agent_id = agent.id;
    remove_resource(&mut agent.inventory, give, amount)
        .and_then(|()| add_resource(&mut agent.inventory, receive, amount))
        .map_err(|source| ResolutionError::Agent { agent_id, source })
}

/// Add `joiner` to alliance `id` and return the alliance's name.
fn enlist(
    alliances: &mut [Alliance],
    id: AllianceId,
    joiner: &mut Agent,
    sponsor: AgentId,
) -> Result<String, ResolutionError> {
    let alliance = alliances.iter_mut().find(|a| a.id == id).ok_or(
        ResolutionError::DanglingAlliance {
            agent_id: sponsor,
            alliance_id: id,
        },
    )?;
    admit(alliance, joiner.id).map_err(|source| ResolutionError::Agent {
        agent_id: joiner.id,
        source,
    })?;
    joiner.alliance_id = Some(id);
    Ok(alliance.name.clone())
}

#[cfg(test)]
#[allow(
    clippy::indexing_slicing,
    clippy::panic,
    clippy::unreachable,
    clippy::arithmetic_side_effects
)]
mod tests {
    use hive_agents::{NewAgent, VitalsConfig, create_agent};
    use hive_types::{AgentStatus, HexCell};

    use super::*;

    struct Fixture {
        grid: HexGrid,
        agents: Vec<Agent>,
        alliances: Vec<Alliance>,
        rules: RulesConfig,
    }

    impl Fixture {
        /// A full grid where every cell holds 5 food, except an energy cell
        /// at (1, 0).
        fn new() -> Self {
            let mut cells = Vec::new();
            for q in -3_i32..=3 {
                for r in -3_i32..=3 {
                    if (q + r).abs() <= 3 {
                        let resource = if (q, r) == (1, 0) {
                            ResourceType::Energy
                        } else {
                            ResourceType::Food
                        };
                        cells.push(HexCell {
                            q,
                            r,
                            resource,
                            amount: 5,
                        });
                    }
                }
            }
            Self {
                grid: HexGrid::from_cells(cells).unwrap_or_else(|_| unreachable!()),
                agents: Vec::new(),
                alliances: Vec::new(),
                rules: RulesConfig::default(),
            }
        }

        fn add(&mut self, name: &str, q: i32, r: i32) -> usize {
            let mut agent = create_agent(
                NewAgent {
                    name: name.to_owned(),
                    ..NewAgent::default()
                },
                &VitalsConfig::default(),
            );
            agent.position = HexCoord::new(q, r);
            self.agents.push(agent);
            self.agents.len() - 1
        }

        fn resolve(&mut self, actor: usize, action: &AgentAction) -> Option<WorldEvent> {
            let mut ctx = ResolutionContext {
                tick: 1,
                grid: &mut self.grid,
                agents: &mut self.agents,
                alliances: &mut self.alliances,
                rules: &self.rules,
            };
            resolve_action(&mut ctx, actor, action).ok().flatten()
        }

        fn agent(&self, index: usize) -> &Agent {
            &self.agents[index]
        }
    }

    #[test]
    fn move_steps_along_direction() {
        let mut fx = Fixture::new();
        let a = fx.add("Ada", 0, 0);
        let event = fx.resolve(a, &AgentAction::step(5));
        assert_eq!(fx.agent(a).position, HexCoord::new(0, 1));
        let Some(EventDetail::Move(detail)) = event.map(|e| e.detail) else {
            panic!("expected a move event");
        };
        assert_eq!(detail.from, HexCoord::new(0, 0));
        assert_eq!(detail.to, HexCoord::new(0, 1));
    }

    #[test]
    fn move_off_grid_stays_put() {
        let mut fx = Fixture::new();
        let a = fx.add("Ada", 3, 0);
        let event = fx.resolve(a, &AgentAction::step(0));
        assert_eq!(fx.agent(a).position, HexCoord::new(3, 0));
        let Some(EventDetail::Move(detail)) = event.map(|e| e.detail) else {
            panic!("expected a move event");
        };
        assert_eq!(detail.from, detail.to);
    }

    #[test]
    fn move_with_garbage_target_uses_direction_zero() {
        let mut fx = Fixture::new();
        let a = fx.add("Ada", 0, 0);
        let action = AgentAction::bare(ActionType::Move).with_target("east-ish");
        fx.resolve(a, &action);
        assert_eq!(fx.agent(a).position, HexCoord::new(1, 0));
    }

    #[test]
    fn gather_takes_at_most_three() {
        let mut fx = Fixture::new();
        let a = fx.add("Ada", 0, 0);
        fx.resolve(a, &AgentAction::gather());
        assert_eq!(fx.agent(a).holding(ResourceType::Food), 3);
        assert_eq!(fx.grid.cell(HexCoord::new(0, 0)).map(|c| c.amount), Some(2));
        fx.resolve(a, &AgentAction::gather());
        assert_eq!(fx.agent(a).holding(ResourceType::Food), 5);
        let event = fx.resolve(a, &AgentAction::gather());
        let Some(EventDetail::Gather(detail)) = event.map(|e| e.detail) else {
            panic!("expected a gather event");
        };
        assert_eq!(detail.amount, 0);
    }

    #[test]
    fn gathering_energy_restores_energy() {
        let mut fx = Fixture::new();
        let a = fx.add("Ada", 1, 0);
        fx.agents[a].energy = 50;
        fx.resolve(a, &AgentAction::gather());
        assert_eq!(fx.agent(a).energy, 65);
        assert_eq!(fx.agent(a).holding(ResourceType::Energy), 3);
    }

    #[test]
    fn trade_without_partner_fails() {
        let mut fx = Fixture::new();
        let a = fx.add("Ada", -3, 0);
        let b = fx.add("Bo", 3, 0);
        let target = fx.agent(b).id.to_string();
        let event = fx.resolve(a, &AgentAction::bare(ActionType::Trade).with_target(target));
        let Some(EventDetail::Trade(detail)) = event.map(|e| e.detail) else {
            panic!("expected a trade event");
        };
        assert!(!detail.success);
        assert_eq!(detail.reason.as_deref(), Some(NO_TRADE_PARTNER));
    }

    #[test]
    fn trade_with_empty_inventories_succeeds_without_transfer() {
        let mut fx = Fixture::new();
        let a = fx.add("Ada", 0, 0);
        let b = fx.add("Bo", 1, 0);
        let target = fx.agent(b).id.to_string();
        let event = fx.resolve(a, &AgentAction::bare(ActionType::Trade).with_target(target));
        let Some(EventDetail::Trade(detail)) = event.map(|e| e.detail) else {
            panic!("expected a trade event");
        };
        assert!(detail.success);
        assert_eq!(detail.with.as_deref(), Some("Bo"));
        assert_eq!(detail.amount, 0);
        assert_eq!(fx.agent(a).reputation, 0);
        assert_eq!(fx.agent(b).reputation, 0);
        assert!(fx.agent(a).inventory.values().all(|n| *n == 0));
    }

    #[test]
    fn trade_swaps_top_resources() {
        let mut fx = Fixture::new();
        let a = fx.add("Ada", 0, 0);
        let b = fx.add("Bo", 0, 2);
        fx.agents[a].inventory.insert(ResourceType::Food, 5);
        fx.agents[b].inventory.insert(ResourceType::Knowledge, 1);
        let action = AgentAction::bare(ActionType::Trade).with_target("Bo");
        fx.resolve(a, &action);

        assert_eq!(fx.agent(a).holding(ResourceType::Food), 4);
        assert_eq!(fx.agent(a).holding(ResourceType::Knowledge), 1);
        assert_eq!(fx.agent(b).holding(ResourceType::Food), 1);
        assert_eq!(fx.agent(b).holding(ResourceType::Knowledge), 0);
        assert_eq!(fx.agent(a).reputation, 1);
        assert_eq!(fx.agent(b).reputation, 1);
    }

    #[test]
    fn chat_without_addressee_talks_to_self() {
        let mut fx = Fixture::new();
        let a = fx.add("Ada", 0, 0);
        let event = fx.resolve(a, &AgentAction::bare(ActionType::Chat));
        let Some(EventDetail::Chat(detail)) = event.map(|e| e.detail) else {
            panic!("expected a chat event");
        };
        assert_eq!(detail.with, TALKING_TO_SELF);
        assert_eq!(detail.message, DEFAULT_CHAT_MESSAGE);
        assert_eq!(fx.agent(a).reputation, 1);
    }

    #[test]
    fn chat_with_dead_agent_talks_to_self() {
        let mut fx = Fixture::new();
        let a = fx.add("Ada", 0, 0);
        let b = fx.add("Bo", 1, 0);
        fx.agents[b].status = AgentStatus::Dead;
        let target = fx.agent(b).id.to_string();
        let action = AgentAction::bare(ActionType::Chat)
            .with_target(target)
            .with_detail("hello");
        let event = fx.resolve(a, &action);
        let Some(EventDetail::Chat(detail)) = event.map(|e| e.detail) else {
            panic!("expected a chat event");
        };
        assert_eq!(detail.with, TALKING_TO_SELF);
        assert_eq!(detail.message, "hello");
    }

    #[test]
    fn ally_founds_then_grows() {
        let mut fx = Fixture::new();
        let a = fx.add("Ada", 0, 0);
        let b = fx.add("Bo", 1, 0);
        let c = fx.add("Cy", 0, 1);

        let event = fx.resolve(a, &AgentAction::bare(ActionType::Ally).with_target("Bo"));
        let Some(EventDetail::Ally(detail)) = event.map(|e| e.detail) else {
            panic!("expected an ally event");
        };
        assert_eq!(detail.outcome, Some(AllyOutcome::Created));
        assert_eq!(detail.alliance_name.as_deref(), Some("Alliance of Ada and Bo"));
        assert_eq!(fx.alliances.len(), 1);
        assert_eq!(fx.agent(a).reputation, 3);
        assert_eq!(fx.agent(b).reputation, 2);
        assert_eq!(fx.alliances[0].leader_id, fx.agent(a).id);

        let event = fx.resolve(c, &AgentAction::bare(ActionType::Ally).with_target("Ada"));
        let Some(EventDetail::Ally(detail)) = event.map(|e| e.detail) else {
            panic!("expected an ally event");
        };
        assert_eq!(detail.outcome, Some(AllyOutcome::Joined));
        assert_eq!(fx.alliances[0].size(), 3);
        assert_eq!(fx.agent(c).alliance_id, Some(fx.alliances[0].id));
        assert_eq!(fx.agent(c).reputation, 0);
    }

    #[test]
    fn ally_between_members_changes_nothing() {
        let mut fx = Fixture::new();
        let a = fx.add("Ada", 0, 0);
        let _b = fx.add("Bo", 1, 0);
        fx.resolve(a, &AgentAction::bare(ActionType::Ally).with_target("Bo"));
        let event = fx.resolve(a, &AgentAction::bare(ActionType::Ally).with_target("Bo"));
        let Some(EventDetail::Ally(detail)) = event.map(|e| e.detail) else {
            panic!("expected an ally event");
        };
        assert!(detail.success);
        assert_eq!(detail.outcome, Some(AllyOutcome::Joined));
        assert_eq!(fx.alliances.len(), 1);
        assert_eq!(fx.alliances[0].size(), 2);
    }

    #[test]
    fn ally_with_self_fails() {
        let mut fx = Fixture::new();
        let a = fx.add("Ada", 0, 0);
        let event = fx.resolve(a, &AgentAction::bare(ActionType::Ally).with_target("Ada"));
        let Some(EventDetail::Ally(detail)) = event.map(|e| e.detail) else {
            panic!("expected an ally event");
        };
        assert!(!detail.success);
        assert!(fx.alliances.is_empty());
    }

    #[test]
    fn vote_records_approval() {
        let mut fx = Fixture::new();
        let a = fx.add("Ada", 0, 0);
        let event = fx.resolve(a, &AgentAction::bare(ActionType::Vote));
        let Some(EventDetail::Vote(detail)) = event.map(|e| e.detail) else {
            panic!("expected a vote event");
        };
        assert_eq!(detail.proposal, DEFAULT_PROPOSAL);
        assert_eq!(detail.vote, APPROVE);
        assert!(fx.alliances.is_empty());
    }

    #[test]
    fn idle_emits_nothing() {
        let mut fx = Fixture::new();
        let a = fx.add("Ada", 0, 0);
        assert!(fx.resolve(a, &AgentAction::idle()).is_none());
    }

    #[test]
    fn off_grid_agent_is_a_structural_error() {
        let mut fx = Fixture::new();
        let a = fx.add("Ada", 7, 7);
        let mut ctx = ResolutionContext {
            tick: 1,
            grid: &mut fx.grid,
            agents: &mut fx.agents,
            alliances: &mut fx.alliances,
            rules: &fx.rules,
        };
        let result = resolve_action(&mut ctx, a, &AgentAction::gather());
        assert!(matches!(result, Err(ResolutionError::AgentOffGrid { .. })));
    }

    #[test]
    fn pair_mut_preserves_argument_order() {
        let mut fx = Fixture::new();
        let a = fx.add("Ada", 0, 0);
        let b = fx.add("Bo", 0, 0);
        let pair = pair_mut(&mut fx.agents, b, a);
        assert_eq!(
            pair.map(|(x, y)| (x.name.clone(), y.name.clone())),
            Some((String::from("Bo"), String::from("Ada")))
        );
        assert!(pair_mut(&mut fx.agents, a, a).is_none());
        assert!(pair_mut(&mut fx.agents, a, 9).is_none());
    }
}

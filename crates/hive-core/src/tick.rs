//! Tick cycle: the engine loop that advances the Hive world by one step.
//!
//! Each tick runs through these phases:
//!
//! 1. **Clock** -- advance the tick counter.
//! 2. **Regeneration** -- every cell below the cap grows by the regen rate.
//! 3. **Agent phase** -- for each agent alive when the phase begins, in
//!    roster order: deduct upkeep; if that exhausts the agent, record an
//!    exhaustion event and move on. Otherwise assemble its perception, ask
//!    the [`DecisionProvider`] (under the decision deadline, if any), fall
//!    back to the local policy on failure, and resolve the action
//!    immediately. Later agents see the effects of earlier ones.
//! 4. **Emergence** -- scan the updated world for large alliances and a
//!    dominant leader.
//! 5. **History** -- append this tick's events to the world history.
//!
//! Given the same initial state, seed, and provider answers, a tick is
//! deterministic. A tick that fails leaves the world exactly as it was
//! before the tick began.

use hive_agents::apply_upkeep;
use hive_types::{Agent, AgentAction, AgentId, Alliance, EventDetail, ExhaustedDetail, WorldEvent};
use hive_world::HexGrid;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::decision::{DecisionError, DecisionProvider, DecisionRequest, fallback_action};
use crate::emergence::detect_emergence;
use crate::perception::{PerceptionContext, assemble_perception};
use crate::resolution::{ResolutionContext, ResolutionError, resolve_action};
use crate::world::WorldState;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// The tick counter overflowed.
    #[error("tick counter overflow")]
    ClockOverflow,

    /// Action resolution or emergence detection met an inconsistent world.
    #[error("resolution error: {source}")]
    Resolution {
        /// The underlying resolution error.
        #[from]
        source: ResolutionError,
    },

    /// A world operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: hive_world::WorldError,
    },
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Events produced this tick, in order.
    pub events: Vec<WorldEvent>,
    /// Number of living agents at end of tick.
    pub agents_alive: u32,
    /// Agents who died of exhaustion this tick.
    pub deaths: Vec<AgentId>,
    /// How many decisions were replaced by the fallback policy.
    pub fallbacks: u32,
    /// Total units added to cells by regeneration this tick.
    pub cells_regenerated: u32,
}

/// Execute one complete tick of the simulation.
///
/// # Errors
///
/// Returns [`TickError`] if the world is structurally inconsistent (an agent
/// off the grid, an alliance pointing at a missing agent) or the tick
/// counter overflows. The world is rolled back to its pre-tick state first.
/// Provider failures never surface here; they are absorbed by the fallback
/// policy.
pub async fn run_tick<P: DecisionProvider>(
    world: &mut WorldState,
    provider: &mut P,
) -> Result<TickSummary, TickError> {
    let checkpoint = Checkpoint::capture(world);
    let result = advance(world, provider).await;
    if let Err(error) = &result {
        warn!(tick = checkpoint.tick, %error, "Tick failed, world rolled back");
        checkpoint.restore(world);
    }
    result
}

/// The parts of the world a tick mutates, captured before it starts.
struct Checkpoint {
    tick: u64,
    grid: HexGrid,
    agents: Vec<Agent>,
    alliances: Vec<Alliance>,
    events_len: usize,
    rng: StdRng,
}

impl Checkpoint {
    fn capture(world: &WorldState) -> Self {
        Self {
            tick: world.tick,
            grid: world.grid.clone(),
            agents: world.agents.clone(),
            alliances: world.alliances.clone(),
            events_len: world.events.len(),
            rng: world.rng.clone(),
        }
    }

    fn restore(self, world: &mut WorldState) {
        world.tick = self.tick;
        world.grid = self.grid;
        world.agents = self.agents;
        world.alliances = self.alliances;
        world.events.truncate(self.events_len);
        world.rng = self.rng;
    }
}

async fn advance<P: DecisionProvider>(
    world: &mut WorldState,
    provider: &mut P,
) -> Result<TickSummary, TickError> {
    // --- Phase 1: Clock ---
    world.tick = world.tick.checked_add(1).ok_or(TickError::ClockOverflow)?;
    let tick = world.tick;
    info!(tick, agents_alive = world.agents_alive(), "Tick started");

    // --- Phase 2: Regeneration ---
    let cells_regenerated = world.grid.regenerate_all(world.rules.regen_per_tick)?;
    debug!(tick, cells_regenerated, "Regeneration complete");

    // --- Phase 3: Agent phase ---
    let phase = phase_agents(world, provider, tick).await?;

    // --- Phase 4: Emergence ---
    let mut events = phase.events;
    let emergent = detect_emergence(
        tick,
        &world.agents,
        &world.alliances,
        &world.events,
        &world.rules,
    )?;
    events.extend(emergent);

    // --- Phase 5: History ---
    world.events.extend(events.iter().cloned());

    let agents_alive = u32::try_from(world.agents_alive()).unwrap_or(u32::MAX);
    info!(
        tick,
        events = events.len(),
        agents_alive,
        deaths = phase.deaths.len(),
        fallbacks = phase.fallbacks,
        "Tick completed"
    );

    Ok(TickSummary {
        tick,
        events,
        agents_alive,
        deaths: phase.deaths,
        fallbacks: phase.fallbacks,
        cells_regenerated,
    })
}

/// Result of the agent phase.
struct AgentPhase {
    events: Vec<WorldEvent>,
    deaths: Vec<AgentId>,
    fallbacks: u32,
}

async fn phase_agents<P: DecisionProvider>(
    world: &mut WorldState,
    provider: &mut P,
    tick: u64,
) -> Result<AgentPhase, TickError> {
    let roster: Vec<usize> = world
        .agents
        .iter()
        .enumerate()
        .filter(|(_, a)| a.is_alive())
        .map(|(i, _)| i)
        .collect();
    let vitals = world.rules.vitals();

    let mut phase = AgentPhase {
        events: Vec::new(),
        deaths: Vec::new(),
        fallbacks: 0,
    };

    for index in roster {
        let Some(agent) = world.agents.get_mut(index) else {
            continue;
        };

        let upkeep = apply_upkeep(agent, &vitals);
        if upkeep.exhausted {
            phase.deaths.push(agent.id);
            phase.events.push(WorldEvent::new(
                agent.id,
                &agent.name,
                tick,
                EventDetail::Exhausted(ExhaustedDetail {
                    message: format!("{} ran out of energy and left the world", agent.name),
                }),
            ));
            continue;
        }

        let (action, fell_back) = decide(world, provider, index, tick).await;
        if fell_back {
            phase.fallbacks = phase.fallbacks.saturating_add(1);
        }

        let mut ctx = ResolutionContext {
            tick,
            grid: &mut world.grid,
            agents: &mut world.agents,
            alliances: &mut world.alliances,
            rules: &world.rules,
        };
        if let Some(event) = resolve_action(&mut ctx, index, &action)? {
            phase.events.push(event);
        }
    }

    Ok(phase)
}

/// Ask the provider for one agent's action. Returns the action and whether
/// it came from the fallback policy.
async fn decide<P: DecisionProvider>(
    world: &mut WorldState,
    provider: &mut P,
    index: usize,
    tick: u64,
) -> (AgentAction, bool) {
    let Some(agent) = world.agents.get(index) else {
        return (AgentAction::idle(), false);
    };
    let ctx = PerceptionContext {
        tick,
        grid: &world.grid,
        agents: &world.agents,
        alliances: &world.alliances,
        rules: &world.rules,
    };
    let request = DecisionRequest {
        perception: assemble_perception(agent, &ctx),
        credentials: agent.credentials.clone(),
    };
    let agent_id = agent.id;

    let outcome = match world.decision_timeout {
        Some(deadline) => tokio::time::timeout(deadline, provider.decide(&request))
            .await
            .unwrap_or_else(|_| {
                Err(DecisionError::Timeout {
                    agent_id,
                    deadline_ms: u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
                })
            }),
        None => provider.decide(&request).await,
    };

    match outcome {
        Ok(action) => {
            debug!(tick, %agent_id, action = ?action.action, "Decision received");
            (action, false)
        }
        Err(error) => {
            warn!(tick, %agent_id, %error, "Decision failed, using fallback");
            let action = fallback_action(&request.perception, &world.rules, &mut world.rng);
            (action, true)
        }
    }
}

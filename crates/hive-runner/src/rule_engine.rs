//! Rule-based offline decision provider.
//!
//! Lets the hive run without the Act API (`llm.enabled: false`), for local
//! development and demos. Each agent's personality picks between a handful
//! of fixed rules, evaluated in priority order:
//!
//! 1. Tired and standing on stock: gather.
//! 2. Tired and next to an energy cell: step onto it.
//! 3. Cooperative, unaffiliated, someone nearby: propose an alliance.
//! 4. Generous, carrying goods, someone nearby: trade.
//! 5. Social and someone nearby: chat.
//! 6. Adventurous: wander in a random direction.
//! 7. Otherwise forage: step to a richer neighbor, gather here, or wander.

use hive_core::decision::{DecisionError, DecisionProvider, DecisionRequest};
use hive_types::{ActionType, AgentAction, NeighborCell, Perception, ResourceType, VisibleAgent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Personality traits above this value switch a rule on.
const TRAIT_THRESHOLD: u8 = 50;

/// Greeting used by the chat rule.
const GREETING: &str = "Hello, neighbour. How is your harvest?";

/// The rule that produced a decision, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Gather the current cell while below the comfort threshold.
    RestoreHere,
    /// Step onto an adjacent energy cell.
    SeekEnergy,
    /// Propose an alliance to the nearest agent.
    Befriend,
    /// Trade with the nearest agent.
    Barter,
    /// Chat with the nearest agent.
    Greet,
    /// Step in a random direction.
    Wander,
    /// Move toward or gather the richest stock around.
    Forage,
}

impl Rule {
    /// Label for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RestoreHere => "restore_here",
            Self::SeekEnergy => "seek_energy",
            Self::Befriend => "befriend",
            Self::Barter => "barter",
            Self::Greet => "greet",
            Self::Wander => "wander",
            Self::Forage => "forage",
        }
    }
}

/// Pick an action for `perception`.
///
/// Deterministic except for wandering, which draws a direction from `rng`.
pub fn choose_action<R: Rng + ?Sized>(
    perception: &Perception,
    comfort_threshold: u32,
    rng: &mut R,
) -> (AgentAction, Rule) {
    let tired = perception.energy < comfort_threshold;
    let here = perception.current_cell.as_ref().map_or(0, |cell| cell.amount);
    let values = perception.values;

    if tired && here > 0 {
        return (AgentAction::gather(), Rule::RestoreHere);
    }

    if tired
        && let Some(cell) = perception
            .neighbors
            .iter()
            .filter(|n| n.resource == ResourceType::Energy && n.amount > 0)
            .max_by_key(|n| n.amount)
    {
        return (AgentAction::step(usize::from(cell.direction)), Rule::SeekEnergy);
    }

    if let Some(nearest) = nearest(&perception.nearby_agents) {
        let target = nearest.id.to_string();
        if values.cooperation > TRAIT_THRESHOLD && perception.alliance.is_none() {
            return (
                AgentAction::bare(ActionType::Ally).with_target(target),
                Rule::Befriend,
            );
        }
        if values.generosity > TRAIT_THRESHOLD && perception.inventory.values().any(|n| *n > 0) {
            return (
                AgentAction::bare(ActionType::Trade).with_target(target),
                Rule::Barter,
            );
        }
        if values.social > TRAIT_THRESHOLD {
            return (
                AgentAction::bare(ActionType::Chat)
                    .with_target(target)
                    .with_detail(GREETING),
                Rule::Greet,
            );
        }
    }

    if values.adventure > TRAIT_THRESHOLD {
        return (AgentAction::step(rng.random_range(0..6)), Rule::Wander);
    }

    let richest = perception
        .neighbors
        .iter()
        .filter(|n| n.amount > here)
        .fold(None, |best: Option<&NeighborCell>, n| match best {
            Some(b) if b.amount >= n.amount => Some(b),
            _ => Some(n),
        });
    let action = match richest {
        Some(cell) => AgentAction::step(usize::from(cell.direction)),
        None if here > 0 => AgentAction::gather(),
        None => AgentAction::step(rng.random_range(0..6)),
    };
    (action, Rule::Forage)
}

/// The closest visible agent; ties go to roster order.
fn nearest(agents: &[VisibleAgent]) -> Option<&VisibleAgent> {
    agents.iter().min_by_key(|a| a.distance)
}

/// Offline provider driven by [`choose_action`].
#[derive(Debug, Clone)]
pub struct RuleEngineProvider {
    rng: StdRng,
    comfort_threshold: u32,
}

impl RuleEngineProvider {
    /// Create a provider with its own seeded RNG.
    pub fn new(seed: u64, comfort_threshold: u32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            comfort_threshold,
        }
    }
}

impl DecisionProvider for RuleEngineProvider {
    async fn decide(&mut self, request: &DecisionRequest) -> Result<AgentAction, DecisionError> {
        let perception = &request.perception;
        let (action, rule) = choose_action(perception, self.comfort_threshold, &mut self.rng);
        debug!(
            tick = perception.tick,
            agent_id = %perception.agent_id,
            rule = rule.as_str(),
            action = %action.action,
            "rule engine decision"
        );
        Ok(action)
    }
}

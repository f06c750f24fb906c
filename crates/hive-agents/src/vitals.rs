//! Energy mechanics applied to agents each tick.
//!
//! Every living agent pays [`VitalsConfig::upkeep_per_tick`] energy at the
//! start of its turn. Energy saturates at zero, and an agent whose energy
//! reaches zero is marked dead on the spot. Dead agents are never touched
//! again.
//!
//! All arithmetic is checked or saturating.

use hive_types::{Agent, AgentStatus};
use tracing::info;

use crate::config::VitalsConfig;
use crate::error::AgentError;

/// Outcome of one tick of upkeep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpkeepResult {
    /// Energy after the deduction.
    pub energy: u32,
    /// Whether the agent died of exhaustion this tick.
    pub exhausted: bool,
}

/// Deduct per-tick upkeep from a living agent.
///
/// Agents that are not alive are left unchanged and reported as not
/// exhausted.
pub fn apply_upkeep(agent: &mut Agent, config: &VitalsConfig) -> UpkeepResult {
    if !agent.is_alive() {
        return UpkeepResult {
            energy: agent.energy,
            exhausted: false,
        };
    }
    agent.energy = agent.energy.saturating_sub(config.upkeep_per_tick);
    let exhausted = agent.energy == 0;
    if exhausted {
        agent.status = AgentStatus::Dead;
        info!(agent_id = %agent.id, name = %agent.name, "agent died of exhaustion");
    }
    UpkeepResult {
        energy: agent.energy,
        exhausted,
    }
}

/// Restore energy for `units` gathered units of the energy resource.
///
/// Energy is capped at [`VitalsConfig::max_energy`]. Returns the energy
/// actually gained.
///
/// # Errors
///
/// Returns [`AgentError::ArithmeticOverflow`] if the restoration amount
/// overflows.
pub fn restore_energy(
    agent: &mut Agent,
    units: u32,
    config: &VitalsConfig,
) -> Result<u32, AgentError> {
    let bonus = units
        .checked_mul(config.energy_per_unit)
        .ok_or_else(|| AgentError::ArithmeticOverflow {
            context: String::from("energy restoration overflow"),
        })?;
    let before = agent.energy;
    agent.energy = before.saturating_add(bonus).min(config.max_energy);
    Ok(agent.energy.saturating_sub(before))
}

/// Whether the agent's energy is below the comfort threshold.
pub const fn needs_energy(agent: &Agent, config: &VitalsConfig) -> bool {
    agent.energy < config.comfort_threshold
}

//! Reputation awards and population statistics.
//!
//! Reputation only ever grows. Actions award fixed amounts; the emergence
//! detector compares individuals against the population mean.

use hive_types::Agent;

use crate::error::AgentError;

/// Add `points` to the agent's reputation. Returns the new reputation.
///
/// # Errors
///
/// Returns [`AgentError::ArithmeticOverflow`] if reputation would overflow.
pub fn award(agent: &mut Agent, points: u32) -> Result<u32, AgentError> {
    agent.reputation = agent
        .reputation
        .checked_add(points)
        .ok_or_else(|| AgentError::ArithmeticOverflow {
            context: format!("reputation award for {}", agent.name),
        })?;
    Ok(agent.reputation)
}

/// Sum and count of reputation across living agents.
///
/// # Errors
///
/// Returns [`AgentError::ArithmeticOverflow`] if the sum overflows.
pub fn living_totals<'a>(
    agents: impl IntoIterator<Item = &'a Agent>,
) -> Result<(u64, u64), AgentError> {
    let mut sum: u64 = 0;
    let mut count: u64 = 0;
    for agent in agents.into_iter().filter(|a| a.is_alive()) {
        sum = sum
            .checked_add(u64::from(agent.reputation))
            .ok_or_else(|| AgentError::ArithmeticOverflow {
                context: String::from("reputation sum"),
            })?;
        count = count
            .checked_add(1)
            .ok_or_else(|| AgentError::ArithmeticOverflow {
                context: String::from("living agent count"),
            })?;
    }
    Ok((sum, count))
}

/// Integer mean rounded half up. Returns 0 for an empty population.
pub fn rounded_mean(sum: u64, count: u64) -> u64 {
    sum.saturating_add(count / 2).checked_div(count).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use hive_types::AgentStatus;

    use super::*;
    use crate::agent::{NewAgent, create_agent};
    use crate::config::VitalsConfig;

    fn agent_with_reputation(reputation: u32) -> Agent {
        let mut agent = create_agent(NewAgent::default(), &VitalsConfig::default());
        agent.reputation = reputation;
        agent
    }

    #[test]
    fn award_accumulates() {
        let mut agent = agent_with_reputation(0);
        assert_eq!(award(&mut agent, 3).ok(), Some(3));
        assert_eq!(award(&mut agent, 1).ok(), Some(4));
    }

    #[test]
    fn award_overflow_is_an_error() {
        let mut agent = agent_with_reputation(u32::MAX);
        assert!(award(&mut agent, 1).is_err());
        assert_eq!(agent.reputation, u32::MAX);
    }

    #[test]
    fn totals_ignore_the_dead() {
        let mut dead = agent_with_reputation(100);
        dead.status = AgentStatus::Dead;
        let agents = [agent_with_reputation(4), agent_with_reputation(6), dead];
        assert_eq!(living_totals(&agents).ok(), Some((10, 2)));
    }

    #[test]
    fn mean_rounds_half_up() {
        assert_eq!(rounded_mean(10, 4), 3);
        assert_eq!(rounded_mean(9, 4), 2);
        assert_eq!(rounded_mean(7, 2), 4);
        assert_eq!(rounded_mean(5, 0), 0);
    }
}

//! Emergence detection: spotting aggregate patterns after the agent phase.
//!
//! Two patterns are recognized:
//!
//! - **Large alliance**: an alliance reaches the configured size. Reported
//!   once per alliance id, ever; the event history is the record of what
//!   has already been reported.
//! - **Leader**: with enough agents alive, the single most reputable agent
//!   holds more than twice the mean reputation and more than the floor.
//!   Reported every tick the condition holds.

use hive_agents::reputation::{living_totals, rounded_mean};
use hive_types::{
    Agent, Alliance, EventDetail, LargeAllianceDetail, LeaderDetail, WorldEvent,
};
use tracing::info;

use crate::config::RulesConfig;
use crate::resolution::ResolutionError;

/// Run every detector and return the emergence events for this tick, large
/// alliances first (in alliance roster order), then the leader.
///
/// # Errors
///
/// Returns [`ResolutionError::MissingLeader`] if an alliance's leader is
/// missing from the roster.
pub fn detect_emergence(
    tick: u64,
    agents: &[Agent],
    alliances: &[Alliance],
    history: &[WorldEvent],
    rules: &RulesConfig,
) -> Result<Vec<WorldEvent>, ResolutionError> {
    let mut events = detect_large_alliances(tick, agents, alliances, history, rules)?;
    events.extend(detect_leader(tick, agents, rules));
    Ok(events)
}

/// Large-alliance events for alliances not yet reported in `history`.
///
/// # Errors
///
/// Returns [`ResolutionError::MissingLeader`] if an alliance's leader is
/// missing from the roster.
pub fn detect_large_alliances(
    tick: u64,
    agents: &[Agent],
    alliances: &[Alliance],
    history: &[WorldEvent],
    rules: &RulesConfig,
) -> Result<Vec<WorldEvent>, ResolutionError> {
    let threshold = usize::try_from(rules.large_alliance_size).unwrap_or(usize::MAX);
    let mut events = Vec::new();

    for alliance in alliances.iter().filter(|a| a.size() >= threshold) {
        if already_reported(history, alliance) {
            continue;
        }
        let leader = agents
            .iter()
            .find(|a| a.id == alliance.leader_id)
            .ok_or(ResolutionError::MissingLeader {
                alliance_id: alliance.id,
                leader_id: alliance.leader_id,
            })?;
        let size = u32::try_from(alliance.size()).unwrap_or(u32::MAX);
        info!(
            tick,
            alliance_id = %alliance.id,
            alliance = %alliance.name,
            size,
            "large alliance emerged"
        );
        events.push(WorldEvent::new(
            leader.id,
            &leader.name,
            tick,
            EventDetail::LargeAlliance(LargeAllianceDetail {
                alliance_id: alliance.id,
                alliance_name: alliance.name.clone(),
                size,
            }),
        ));
    }
    Ok(events)
}

/// A leader event, if one agent's reputation towers over the living
/// population this tick.
///
/// The leader is the first living agent in roster order holding the top
/// reputation. The comparison against twice the mean is done in integers:
/// `reputation * count > 2 * sum`.
pub fn detect_leader(tick: u64, agents: &[Agent], rules: &RulesConfig) -> Option<WorldEvent> {
    let (sum, count) = living_totals(agents).ok()?;
    if count <= u64::from(rules.leader_min_population) {
        return None;
    }

    let mut leader: Option<&Agent> = None;
    for agent in agents.iter().filter(|a| a.is_alive()) {
        if leader.is_none_or(|best| agent.reputation > best.reputation) {
            leader = Some(agent);
        }
    }
    let leader = leader?;

    let scaled = u64::from(leader.reputation).checked_mul(count)?;
    let doubled_sum = sum.checked_mul(2)?;
    if scaled <= doubled_sum || leader.reputation <= rules.leader_reputation_floor {
        return None;
    }

    let avg = u32::try_from(rounded_mean(sum, count)).unwrap_or(u32::MAX);
    info!(
        tick,
        agent_id = %leader.id,
        reputation = leader.reputation,
        avg_reputation = avg,
        "leader emerged"
    );
    Some(WorldEvent::new(
        leader.id,
        &leader.name,
        tick,
        EventDetail::LeaderEmergence(LeaderDetail {
            reputation: leader.reputation,
            avg_reputation: avg,
        }),
    ))
}

fn already_reported(history: &[WorldEvent], alliance: &Alliance) -> bool {
    history.iter().any(|event| {
        matches!(
            &event.detail,
            EventDetail::LargeAlliance(detail) if detail.alliance_id == alliance.id
        )
    })
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::panic)]
mod tests {
    use hive_agents::{NewAgent, VitalsConfig, admit, create_agent, found_alliance};
    use hive_types::{AgentStatus, EmergenceKind};

    use super::*;

    fn roster(reputations: &[u32]) -> Vec<Agent> {
        reputations
            .iter()
            .enumerate()
            .map(|(i, rep)| {
                let mut agent = create_agent(
                    NewAgent {
                        name: format!("Agent{i}"),
                        ..NewAgent::default()
                    },
                    &VitalsConfig::default(),
                );
                agent.reputation = *rep;
                agent
            })
            .collect()
    }

    #[test]
    fn large_alliance_reported_once() {
        let rules = RulesConfig::default();
        let agents = roster(&[0, 0, 0]);
        let mut alliance = found_alliance(&agents[0], &agents[1]);
        assert!(admit(&mut alliance, agents[2].id).is_ok());
        let alliances = vec![alliance];

        let first = detect_large_alliances(1, &agents, &alliances, &[], &rules);
        let first = first.unwrap_or_default();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].emergence(), Some(EmergenceKind::LargeAlliance));
        assert_eq!(first[0].agent_id, alliances[0].leader_id);

        let second = detect_large_alliances(2, &agents, &alliances, &first, &rules);
        assert_eq!(second.map(|e| e.len()).ok(), Some(0));
    }

    #[test]
    fn small_alliance_is_not_reported() {
        let rules = RulesConfig::default();
        let agents = roster(&[0, 0]);
        let alliances = vec![found_alliance(&agents[0], &agents[1])];
        let events = detect_large_alliances(1, &agents, &alliances, &[], &rules);
        assert_eq!(events.map(|e| e.len()).ok(), Some(0));
    }

    #[test]
    fn leader_emerges_when_far_above_average() {
        let rules = RulesConfig::default();
        let agents = roster(&[30, 2, 1, 0]);
        let event = detect_leader(5, &agents, &rules);
        let Some(EventDetail::LeaderEmergence(detail)) = event.map(|e| e.detail) else {
            panic!("expected a leader event");
        };
        assert_eq!(detail.reputation, 30);
        assert_eq!(detail.avg_reputation, 8);
    }

    #[test]
    fn leader_needs_more_than_two_alive() {
        let rules = RulesConfig::default();
        let mut agents = roster(&[30, 0, 0]);
        agents[2].status = AgentStatus::Dead;
        assert!(detect_leader(1, &agents, &rules).is_none());
    }

    #[test]
    fn leader_needs_reputation_above_floor() {
        let rules = RulesConfig::default();
        let agents = roster(&[10, 0, 0, 0]);
        assert!(detect_leader(1, &agents, &rules).is_none());
    }

    #[test]
    fn leader_needs_more_than_double_mean() {
        let rules = RulesConfig::default();
        // mean 15, leader 30: exactly double is not enough
        let agents = roster(&[30, 15, 0]);
        assert!(detect_leader(1, &agents, &rules).is_none());
    }

    #[test]
    fn leader_ties_go_to_roster_order() {
        let rules = RulesConfig::default();
        let agents = roster(&[0, 40, 40, 0, 0, 0, 0, 0, 0, 0]);
        let event = detect_leader(1, &agents, &rules);
        assert_eq!(event.map(|e| e.agent_id), Some(agents[1].id));
    }
}

//! Alliance membership rules.
//!
//! An ally action between two agents does one of three things depending on
//! their current affiliations (see [`plan_alliance`]): found a new
//! two-member alliance, add the unaffiliated party to the other's
//! alliance, or nothing at all. Alliances never merge or shrink.

use hive_types::{Agent, AgentId, Alliance, AllianceId};

use crate::error::AgentError;

/// What an ally action between two agents should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllyPlan {
    /// Neither is affiliated: found a new alliance.
    Found,
    /// Only the target is affiliated: the initiator joins.
    InitiatorJoins(AllianceId),
    /// Only the initiator is affiliated: the target joins.
    TargetJoins(AllianceId),
    /// Both are affiliated already. No membership change.
    AlreadyAffiliated(AllianceId),
}

/// Decide the membership change for an ally action.
pub const fn plan_alliance(initiator: Option<AllianceId>, target: Option<AllianceId>) -> AllyPlan {
    match (initiator, target) {
        (None, None) => AllyPlan::Found,
        (None, Some(id)) => AllyPlan::InitiatorJoins(id),
        (Some(id), None) => AllyPlan::TargetJoins(id),
        (Some(id), Some(_)) => AllyPlan::AlreadyAffiliated(id),
    }
}

/// Display name of an alliance founded by two agents.
pub fn alliance_name(initiator: &str, target: &str) -> String {
    format!("Alliance of {initiator} and {target}")
}

/// The founder with the higher reputation leads. Ties go to the initiator.
pub const fn choose_leader(initiator: &Agent, target: &Agent) -> AgentId {
    if initiator.reputation >= target.reputation {
        initiator.id
    } else {
        target.id
    }
}

/// Build a new alliance of exactly the two founders, initiator first.
///
/// The caller is responsible for pointing both agents' `alliance_id` at
/// the returned alliance.
pub fn found_alliance(initiator: &Agent, target: &Agent) -> Alliance {
    Alliance {
        id: AllianceId::new(),
        name: alliance_name(&initiator.name, &target.name),
        leader_id: choose_leader(initiator, target),
        member_ids: vec![initiator.id, target.id],
        rules: Vec::new(),
    }
}

/// Append `agent` to the alliance's member list.
///
/// # Errors
///
/// Returns [`AgentError::AlreadyMember`] if the agent is already listed.
pub fn admit(alliance: &mut Alliance, agent: AgentId) -> Result<(), AgentError> {
    if alliance.has_member(agent) {
        return Err(AgentError::AlreadyMember(agent));
    }
    alliance.member_ids.push(agent);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{NewAgent, create_agent};
    use crate::config::VitalsConfig;

    fn named(name: &str, reputation: u32) -> Agent {
        let mut agent = create_agent(
            NewAgent {
                name: name.to_owned(),
                ..NewAgent::default()
            },
            &VitalsConfig::default(),
        );
        agent.reputation = reputation;
        agent
    }

    #[test]
    fn plan_covers_all_affiliation_cases() {
        let id = AllianceId::new();
        let other = AllianceId::new();
        assert_eq!(plan_alliance(None, None), AllyPlan::Found);
        assert_eq!(plan_alliance(None, Some(id)), AllyPlan::InitiatorJoins(id));
        assert_eq!(plan_alliance(Some(id), None), AllyPlan::TargetJoins(id));
        assert_eq!(
            plan_alliance(Some(id), Some(other)),
            AllyPlan::AlreadyAffiliated(id)
        );
    }

    #[test]
    fn founding_names_both_and_orders_members() {
        let a = named("Ada", 0);
        let b = named("Bo", 0);
        let alliance = found_alliance(&a, &b);
        assert_eq!(alliance.name, "Alliance of Ada and Bo");
        assert_eq!(alliance.member_ids, vec![a.id, b.id]);
        assert!(alliance.rules.is_empty());
    }

    #[test]
    fn leader_ties_go_to_initiator() {
        let a = named("Ada", 5);
        let b = named("Bo", 5);
        assert_eq!(choose_leader(&a, &b), a.id);
        let c = named("Cy", 6);
        assert_eq!(choose_leader(&a, &c), c.id);
    }

    #[test]
    fn admit_rejects_duplicates() {
        let a = named("Ada", 0);
        let b = named("Bo", 0);
        let c = named("Cy", 0);
        let mut alliance = found_alliance(&a, &b);
        assert!(admit(&mut alliance, c.id).is_ok());
        assert_eq!(alliance.size(), 3);
        assert!(matches!(
            admit(&mut alliance, a.id),
            Err(AgentError::AlreadyMember(_))
        ));
        assert_eq!(alliance.size(), 3);
    }
}

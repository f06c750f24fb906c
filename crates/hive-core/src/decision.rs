//! Decision provider contract and the local fallback policy.
//!
//! During a tick the orchestrator presents each living agent's
//! [`Perception`] to a [`DecisionProvider`] and awaits an [`AgentAction`].
//! The provider could be an LLM behind HTTP, a rule engine, or a scripted
//! test double. Whatever it is, failures come back as [`DecisionError`] and
//! the orchestrator replaces them with [`fallback_action`].

use std::collections::{BTreeMap, VecDeque};
use std::future::Future;

use hive_types::{ActionType, AgentAction, AgentId, Perception, ProviderCredentials};
use rand::Rng;

use crate::config::RulesConfig;

/// Errors a decision provider can report.
#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    /// The provider did not answer within the deadline.
    #[error("agent {agent_id} timed out (deadline: {deadline_ms}ms)")]
    Timeout {
        /// The agent whose decision timed out.
        agent_id: AgentId,
        /// The deadline in milliseconds.
        deadline_ms: u64,
    },

    /// The provider could not be reached or answered with an error status.
    #[error("decision transport error: {message}")]
    Transport {
        /// Description of the failure.
        message: String,
    },

    /// The provider answered, but the body could not be understood.
    #[error("unparseable decision: {message}")]
    Malformed {
        /// Description of the failure.
        message: String,
    },

    /// An internal error in the decision provider.
    #[error("decision provider error: {message}")]
    Internal {
        /// Description of the error.
        message: String,
    },
}

/// Everything a provider gets to decide one agent's action.
#[derive(Debug, Clone)]
pub struct DecisionRequest {
    /// What the agent perceives this tick.
    pub perception: Perception,
    /// Credentials to act on the agent's behalf.
    pub credentials: ProviderCredentials,
}

/// A source of agent decisions.
///
/// Called once per living agent per tick, sequentially. Implementations
/// never retry; a failure is final for that agent and tick.
pub trait DecisionProvider: Send {
    /// Decide the action for the agent described by `request`.
    fn decide(
        &mut self,
        request: &DecisionRequest,
    ) -> impl Future<Output = Result<AgentAction, DecisionError>> + Send;
}

/// The local policy used when the provider fails.
///
/// Gathers when the current cell has something to take and the agent is
/// below the comfort threshold; otherwise steps in a uniformly random
/// direction.
pub fn fallback_action<R: Rng + ?Sized>(
    perception: &Perception,
    rules: &RulesConfig,
    rng: &mut R,
) -> AgentAction {
    let cell_has_stock = perception
        .current_cell
        .as_ref()
        .is_some_and(|cell| cell.amount > 0);
    if cell_has_stock && perception.energy < rules.comfort_threshold {
        AgentAction::gather()
    } else {
        AgentAction::step(rng.random_range(0..6))
    }
}

/// A provider that replays pre-recorded actions per agent.
///
/// Each agent has its own queue. When an agent's queue is empty the
/// provider answers with the default action, or fails if none is set.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisionProvider {
    scripts: BTreeMap<AgentId, VecDeque<AgentAction>>,
    default_action: Option<AgentAction>,
    calls: u64,
}

impl ScriptedDecisionProvider {
    /// Create a provider with no scripts and no default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider that answers every request with `action`.
    pub fn always(action: AgentAction) -> Self {
        Self {
            default_action: Some(action),
            ..Self::default()
        }
    }

    /// Queue `action` as the next answer for `agent`.
    #[must_use]
    pub fn then(mut self, agent: AgentId, action: AgentAction) -> Self {
        self.push(agent, action);
        self
    }

    /// Queue `action` as the next answer for `agent`.
    pub fn push(&mut self, agent: AgentId, action: AgentAction) {
        self.scripts.entry(agent).or_default().push_back(action);
    }

    /// How many decisions have been requested so far.
    pub const fn calls(&self) -> u64 {
        self.calls
    }
}

impl DecisionProvider for ScriptedDecisionProvider {
    async fn decide(&mut self, request: &DecisionRequest) -> Result<AgentAction, DecisionError> {
        self.calls = self.calls.saturating_add(1);
        let agent_id = request.perception.agent_id;
        self.scripts
            .get_mut(&agent_id)
            .and_then(VecDeque::pop_front)
            .or_else(|| self.default_action.clone())
            .ok_or_else(|| DecisionError::Internal {
                message: format!("no scripted action left for {agent_id}"),
            })
    }
}

/// A provider that always fails, forcing the fallback policy.
#[derive(Debug, Clone, Default)]
pub struct FailingDecisionProvider;

impl DecisionProvider for FailingDecisionProvider {
    async fn decide(&mut self, _request: &DecisionRequest) -> Result<AgentAction, DecisionError> {
        Err(DecisionError::Transport {
            message: String::from("provider unavailable"),
        })
    }
}

/// A provider that never answers, for exercising decision deadlines.
#[derive(Debug, Clone, Default)]
pub struct StalledDecisionProvider;

impl DecisionProvider for StalledDecisionProvider {
    async fn decide(&mut self, _request: &DecisionRequest) -> Result<AgentAction, DecisionError> {
        std::future::pending::<()>().await;
        Ok(AgentAction::bare(ActionType::Idle))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use hive_types::{AgentValues, CellView, HexCoord, ResourceType};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn perception(energy: u32, cell_amount: Option<u32>) -> Perception {
        Perception {
            tick: 1,
            agent_id: AgentId::new(),
            name: String::from("Test Agent"),
            values: AgentValues::NEUTRAL,
            position: HexCoord::new(0, 0),
            energy,
            max_energy: 100,
            reputation: 0,
            inventory: BTreeMap::new(),
            current_cell: cell_amount.map(|amount| CellView {
                resource: ResourceType::Food,
                amount,
            }),
            alliance: None,
            neighbors: Vec::new(),
            nearby_agents: Vec::new(),
        }
    }

    fn request(perception: Perception) -> DecisionRequest {
        DecisionRequest {
            perception,
            credentials: ProviderCredentials::default(),
        }
    }

    #[test]
    fn fallback_gathers_when_tired_and_stocked() {
        let mut rng = SmallRng::seed_from_u64(1);
        let action = fallback_action(&perception(60, Some(4)), &RulesConfig::default(), &mut rng);
        assert_eq!(action, AgentAction::gather());
    }

    #[test]
    fn fallback_moves_when_comfortable() {
        let mut rng = SmallRng::seed_from_u64(1);
        let action = fallback_action(&perception(80, Some(4)), &RulesConfig::default(), &mut rng);
        assert_eq!(action.action, ActionType::Move);
        let dir: Option<usize> = action.target.as_deref().and_then(|t| t.parse().ok());
        assert!(dir.is_some_and(|d| d < 6));
    }

    #[test]
    fn fallback_moves_off_empty_cell() {
        let mut rng = SmallRng::seed_from_u64(9);
        let action = fallback_action(&perception(10, Some(0)), &RulesConfig::default(), &mut rng);
        assert_eq!(action.action, ActionType::Move);
    }

    #[tokio::test]
    async fn scripted_provider_replays_then_defaults() {
        let p = perception(50, None);
        let agent = p.agent_id;
        let mut provider = ScriptedDecisionProvider::always(AgentAction::idle())
            .then(agent, AgentAction::gather());

        let first = provider.decide(&request(p.clone())).await;
        assert_eq!(first.ok(), Some(AgentAction::gather()));
        let second = provider.decide(&request(p)).await;
        assert_eq!(second.ok(), Some(AgentAction::idle()));
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn scripted_provider_without_default_fails_when_empty() {
        let mut provider = ScriptedDecisionProvider::new();
        let result = provider.decide(&request(perception(50, None))).await;
        assert!(matches!(result, Err(DecisionError::Internal { .. })));
    }

    #[tokio::test]
    async fn failing_provider_always_fails() {
        let mut provider = FailingDecisionProvider;
        let result = provider.decide(&request(perception(50, None))).await;
        assert!(matches!(result, Err(DecisionError::Transport { .. })));
    }
}

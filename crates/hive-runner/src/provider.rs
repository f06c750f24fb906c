//! Decision providers the engine can plug into the tick loop.
//!
//! [`LlmDecisionProvider`] asks the Act API on each agent's behalf:
//! render the prompt, post it with the agent's credentials, parse the reply.
//! [`AgentDecider`] picks between it and the offline [`RuleEngineProvider`]
//! from configuration.

use hive_core::config::HiveConfig;
use hive_core::decision::{DecisionError, DecisionProvider, DecisionRequest};
use hive_types::AgentAction;
use tracing::{debug, info};

use crate::client::{ActApiClient, ActRequest};
use crate::config::ActApiConfig;
use crate::error::ProviderError;
use crate::parse::parse_reply;
use crate::prompt::{PromptEngine, action_control};
use crate::rule_engine::RuleEngineProvider;

/// Provider backed by the Act API.
pub struct LlmDecisionProvider {
    client: ActApiClient,
    prompts: PromptEngine,
    control: serde_json::Value,
}

impl LlmDecisionProvider {
    /// Assemble a provider from its parts.
    pub fn new(client: ActApiClient, prompts: PromptEngine) -> Self {
        Self {
            client,
            prompts,
            control: action_control(),
        }
    }

    /// Build the client and prompt engine from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Config`] for an unusable API base and
    /// [`ProviderError::Template`] if a template override is broken.
    pub fn from_config(config: &ActApiConfig) -> Result<Self, ProviderError> {
        let client = ActApiClient::new(config)?;
        let prompts = PromptEngine::new(config.templates_dir.as_deref())?;
        Ok(Self::new(client, prompts))
    }

    async fn request_action(&self, request: &DecisionRequest) -> Result<AgentAction, ProviderError> {
        let credentials = &request.credentials;
        if credentials.token.is_empty() {
            return Err(ProviderError::Config(format!(
                "agent {} has no provider token",
                request.perception.agent_id
            )));
        }

        let prompt = self.prompts.render(&request.perception)?;
        let body = ActRequest {
            secondme_id: &credentials.persona_id,
            system_prompt: &prompt.system,
            message: &prompt.message,
            action_control: &self.control,
        };
        let reply = self.client.act(credentials, &body).await?;
        let action = parse_reply(&reply)?;

        debug!(
            tick = request.perception.tick,
            agent_id = %request.perception.agent_id,
            action = %action.action,
            target = action.target.as_deref().unwrap_or(""),
            "Act API decision"
        );
        Ok(action)
    }
}

impl DecisionProvider for LlmDecisionProvider {
    async fn decide(&mut self, request: &DecisionRequest) -> Result<AgentAction, DecisionError> {
        self.request_action(request).await.map_err(DecisionError::from)
    }
}

/// The provider the engine runs with.
///
/// Enum dispatch keeps the tick loop generic over a single concrete type
/// without boxing async trait objects.
pub enum AgentDecider {
    /// Remote decisions through the Act API.
    Llm(LlmDecisionProvider),
    /// Local rule engine, no network.
    Offline(RuleEngineProvider),
}

impl AgentDecider {
    /// Choose the provider `config.llm.enabled` asks for.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the Act API provider cannot be built.
    pub fn from_config(config: &HiveConfig) -> Result<Self, ProviderError> {
        if !config.llm.enabled {
            info!("Act API disabled, using the offline rule engine");
            return Ok(Self::Offline(RuleEngineProvider::new(
                config.world.seed,
                config.rules.comfort_threshold,
            )));
        }

        let api = ActApiConfig::from_llm(&config.llm)?;
        info!(url = %api.act_url(), "Using the Act API");
        Ok(Self::Llm(LlmDecisionProvider::from_config(&api)?))
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::Llm(_) => "act-api",
            Self::Offline(_) => "rule-engine",
        }
    }
}

impl DecisionProvider for AgentDecider {
    async fn decide(&mut self, request: &DecisionRequest) -> Result<AgentAction, DecisionError> {
        match self {
            Self::Llm(provider) => provider.decide(request).await,
            Self::Offline(provider) => provider.decide(request).await,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::BTreeMap;

    use hive_types::{AgentId, AgentValues, HexCoord, Perception, ProviderCredentials};

    use super::*;

    fn request(token: &str) -> DecisionRequest {
        DecisionRequest {
            perception: Perception {
                tick: 1,
                agent_id: AgentId::new(),
                name: String::from("Nova"),
                values: AgentValues::NEUTRAL,
                position: HexCoord::new(0, 0),
                energy: 100,
                max_energy: 100,
                reputation: 0,
                inventory: BTreeMap::new(),
                current_cell: None,
                alliance: None,
                neighbors: Vec::new(),
                nearby_agents: Vec::new(),
            },
            credentials: ProviderCredentials {
                persona_id: String::from("persona"),
                token: token.to_owned(),
            },
        }
    }

    #[test]
    fn disabled_llm_selects_rule_engine() {
        let mut config = HiveConfig::default();
        config.llm.enabled = false;
        let decider = AgentDecider::from_config(&config);
        assert_eq!(decider.ok().map(|d| d.name().to_owned()), Some(String::from("rule-engine")));
    }

    #[test]
    fn enabled_llm_selects_act_api() {
        let mut config = HiveConfig::default();
        config.llm.api_base = String::from("http://127.0.0.1:9");
        let decider = AgentDecider::from_config(&config);
        assert_eq!(decider.ok().map(|d| d.name().to_owned()), Some(String::from("act-api")));
    }

    #[test]
    fn bad_api_base_is_a_config_error() {
        let mut config = HiveConfig::default();
        config.llm.api_base = String::from("localhost:8080");
        assert!(matches!(
            AgentDecider::from_config(&config),
            Err(ProviderError::Config(_))
        ));
    }

    #[tokio::test]
    async fn missing_token_fails_without_network() {
        let api = ActApiConfig::from_llm(&hive_core::config::LlmConfig {
            api_base: String::from("http://127.0.0.1:9"),
            ..hive_core::config::LlmConfig::default()
        });
        let Ok(api) = api else {
            panic!("valid base URL");
        };
        let Ok(mut provider) = LlmDecisionProvider::from_config(&api) else {
            panic!("provider should build");
        };
        let result = provider.decide(&request("")).await;
        assert!(matches!(result, Err(DecisionError::Internal { .. })));
    }

    #[tokio::test]
    async fn unreachable_api_is_a_transport_error() {
        // port 9 (discard) is closed on test hosts
        let api = ActApiConfig::from_llm(&hive_core::config::LlmConfig {
            api_base: String::from("http://127.0.0.1:9"),
            request_timeout_ms: 2_000,
            ..hive_core::config::LlmConfig::default()
        });
        let Ok(api) = api else {
            panic!("valid base URL");
        };
        let Ok(mut provider) = LlmDecisionProvider::from_config(&api) else {
            panic!("provider should build");
        };
        let result = provider.decide(&request("token")).await;
        assert!(matches!(result, Err(DecisionError::Transport { .. })));
    }
}

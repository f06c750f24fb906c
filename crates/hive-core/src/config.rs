//! Configuration loading and typed config structures for the Hive simulation.
//!
//! The canonical configuration lives in `hive-config.yaml` at the project
//! root. Every field has a default, so an empty file (or no file at all)
//! yields a working simulation. Environment variables override the `llm`
//! section; see [`LlmConfig::apply_env_overrides`].

use std::path::Path;
use std::time::Duration;

use hive_agents::VitalsConfig;
use serde::Deserialize;

/// Default base URL of the Act API.
pub const DEFAULT_ACT_API_BASE: &str = "https://app.mindos.com/gate/lab";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration, mirroring `hive-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HiveConfig {
    /// World-level settings (seed, timing, bounds).
    #[serde(default)]
    pub world: WorldConfig,

    /// Numeric rules of the simulation.
    #[serde(default)]
    pub rules: RulesConfig,

    /// Seed population.
    #[serde(default)]
    pub agents: AgentsConfig,

    /// Decision provider settings.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HiveConfig {
    /// Load configuration from a YAML file, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse_yaml(&contents)?;
        config.llm.apply_env_overrides();
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults. Environment
    /// overrides apply either way.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        let mut config = Self::default();
        config.llm.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string, without environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse_yaml(yaml)
    }

    fn parse_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Seed for grid generation, placement and fallback moves.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Real-time milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Milliseconds an agent's decision may take before the fallback
    /// applies. `0` disables the deadline.
    #[serde(default = "default_decision_timeout_ms")]
    pub decision_timeout_ms: u64,

    /// Stop after this many ticks. Runs until interrupted when absent.
    #[serde(default)]
    pub max_ticks: Option<u64>,
}

impl WorldConfig {
    /// The per-decision deadline, if one is configured.
    pub const fn decision_timeout(&self) -> Option<Duration> {
        if self.decision_timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.decision_timeout_ms))
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            tick_interval_ms: default_tick_interval_ms(),
            decision_timeout_ms: default_decision_timeout_ms(),
            max_ticks: None,
        }
    }
}

/// Every numeric rule of the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RulesConfig {
    /// Energy lost per living agent per tick.
    #[serde(default = "default_upkeep_per_tick")]
    pub upkeep_per_tick: u32,

    /// Energy ceiling.
    #[serde(default = "default_max_energy")]
    pub max_energy: u32,

    /// Energy of a freshly created agent.
    #[serde(default = "default_max_energy")]
    pub starting_energy: u32,

    /// The fallback policy gathers below this energy.
    #[serde(default = "default_comfort_threshold")]
    pub comfort_threshold: u32,

    /// Most units a single gather can take.
    #[serde(default = "default_gather_cap")]
    pub gather_cap: u32,

    /// Energy restored per gathered unit of the energy resource.
    #[serde(default = "default_energy_per_unit")]
    pub energy_per_unit: u32,

    /// Units added to every cell per tick.
    #[serde(default = "default_regen_per_tick")]
    pub regen_per_tick: u32,

    /// Hex distance within which agents can trade, chat and ally.
    #[serde(default = "default_interaction_radius")]
    pub interaction_radius: u32,

    /// Most units swapped each way in a trade.
    #[serde(default = "default_trade_cap")]
    pub trade_cap: u32,

    /// Reputation each party gains from a trade that moves goods.
    #[serde(default = "default_one")]
    pub trade_reputation: u32,

    /// Reputation a speaker gains per chat.
    #[serde(default = "default_one")]
    pub chat_reputation: u32,

    /// Reputation the initiator gains for founding an alliance.
    #[serde(default = "default_ally_initiator_reputation")]
    pub ally_initiator_reputation: u32,

    /// Reputation the target gains for co-founding an alliance.
    #[serde(default = "default_ally_target_reputation")]
    pub ally_target_reputation: u32,

    /// A leader must have strictly more reputation than this.
    #[serde(default = "default_leader_reputation_floor")]
    pub leader_reputation_floor: u32,

    /// Leader detection needs strictly more living agents than this.
    #[serde(default = "default_leader_min_population")]
    pub leader_min_population: u32,

    /// Member count at which an alliance counts as large.
    #[serde(default = "default_large_alliance_size")]
    pub large_alliance_size: u32,
}

impl RulesConfig {
    /// The energy subset of the rules, as consumed by `hive-agents`.
    pub const fn vitals(&self) -> VitalsConfig {
        VitalsConfig {
            upkeep_per_tick: self.upkeep_per_tick,
            max_energy: self.max_energy,
            starting_energy: self.starting_energy,
            energy_per_unit: self.energy_per_unit,
            comfort_threshold: self.comfort_threshold,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            upkeep_per_tick: default_upkeep_per_tick(),
            max_energy: default_max_energy(),
            starting_energy: default_max_energy(),
            comfort_threshold: default_comfort_threshold(),
            gather_cap: default_gather_cap(),
            energy_per_unit: default_energy_per_unit(),
            regen_per_tick: default_regen_per_tick(),
            interaction_radius: default_interaction_radius(),
            trade_cap: default_trade_cap(),
            trade_reputation: default_one(),
            chat_reputation: default_one(),
            ally_initiator_reputation: default_ally_initiator_reputation(),
            ally_target_reputation: default_ally_target_reputation(),
            leader_reputation_floor: default_leader_reputation_floor(),
            leader_min_population: default_leader_min_population(),
            large_alliance_size: default_large_alliance_size(),
        }
    }
}

/// Seed population configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgentsConfig {
    /// Number of agents the engine creates at start.
    #[serde(default = "default_initial_count")]
    pub initial_count: u32,

    /// Owning user recorded on seed agents.
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            initial_count: default_initial_count(),
            user_id: default_user_id(),
        }
    }
}

/// Decision provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LlmConfig {
    /// Use the remote Act API. When `false` the engine decides locally.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Base URL of the Act API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Directory with prompt template overrides.
    #[serde(default)]
    pub templates_dir: Option<String>,

    /// Bearer token used for seed agents.
    #[serde(default)]
    pub token: Option<String>,

    /// Persona the seed agents speak as.
    #[serde(default)]
    pub persona_id: Option<String>,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl LlmConfig {
    /// Override fields from the environment:
    /// - `HIVE_ACT_API_BASE` overrides `api_base`
    /// - `HIVE_TEMPLATES_DIR` overrides `templates_dir`
    /// - `HIVE_AGENT_TOKEN` overrides `token`
    /// - `HIVE_AGENT_PERSONA_ID` overrides `persona_id`
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HIVE_ACT_API_BASE") {
            self.api_base = val;
        }
        if let Ok(val) = std::env::var("HIVE_TEMPLATES_DIR") {
            self.templates_dir = Some(val);
        }
        if let Ok(val) = std::env::var("HIVE_AGENT_TOKEN") {
            self.token = Some(val);
        }
        if let Ok(val) = std::env::var("HIVE_AGENT_PERSONA_ID") {
            self.persona_id = Some(val);
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_base: default_api_base(),
            templates_dir: None,
            token: None,
            persona_id: None,
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive (trace, debug, info, warn, error).
    /// `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    String::from("Hive")
}

const fn default_seed() -> u64 {
    42
}

const fn default_tick_interval_ms() -> u64 {
    5000
}

const fn default_decision_timeout_ms() -> u64 {
    30_000
}

const fn default_upkeep_per_tick() -> u32 {
    2
}

const fn default_max_energy() -> u32 {
    100
}

const fn default_comfort_threshold() -> u32 {
    80
}

const fn default_gather_cap() -> u32 {
    3
}

const fn default_energy_per_unit() -> u32 {
    5
}

const fn default_regen_per_tick() -> u32 {
    1
}

const fn default_interaction_radius() -> u32 {
    2
}

const fn default_trade_cap() -> u32 {
    2
}

const fn default_one() -> u32 {
    1
}

const fn default_ally_initiator_reputation() -> u32 {
    3
}

const fn default_ally_target_reputation() -> u32 {
    2
}

const fn default_leader_reputation_floor() -> u32 {
    10
}

const fn default_leader_min_population() -> u32 {
    2
}

const fn default_large_alliance_size() -> u32 {
    3
}

const fn default_initial_count() -> u32 {
    5
}

fn default_user_id() -> String {
    String::from("local")
}

fn default_api_base() -> String {
    String::from(DEFAULT_ACT_API_BASE)
}

const fn default_request_timeout_ms() -> u64 {
    20_000
}

fn default_log_level() -> String {
    String::from("info")
}

const fn default_true() -> bool {
    true
}

//! Seed agents for a fresh hive.
//!
//! At startup the engine creates `agents.initial_count` agents with unique
//! names from a built-in pool, random personality values, full starting
//! energy and an empty inventory. Every seed agent acts with the token and
//! persona configured in the `llm` section. The world picks their cells.

use hive_agents::{NewAgent, create_agent, random_values};
use hive_core::config::HiveConfig;
use hive_core::host::WorldHost;
use hive_types::{Agent, AgentId, ProviderCredentials};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{info, warn};

use crate::error::EngineError;

/// Built-in pool of agent names. Seed agents draw from it without
/// replacement.
const NAME_POOL: &[&str] = &[
    "Luna", "Sol", "Nova", "Orion", "Vega", "Lyra", "Atlas", "Iris", "Juno", "Kai",
    "Mira", "Nyx", "Pax", "Rhea", "Sage", "Tara", "Echo", "Wren", "Zara", "Faye",
];

/// Pick `count` distinct names from the pool.
///
/// # Errors
///
/// Returns [`EngineError::Spawner`] if the pool has fewer than `count`
/// names.
pub fn pick_unique_names<R: Rng + ?Sized>(
    rng: &mut R,
    count: u32,
) -> Result<Vec<String>, EngineError> {
    let pool_len = NAME_POOL.len();
    let wanted = usize::try_from(count).map_err(|_conversion_err| EngineError::Spawner {
        message: format!("seed count {count} exceeds usize range"),
    })?;
    if wanted > pool_len {
        return Err(EngineError::Spawner {
            message: format!("requested {count} agents but name pool only has {pool_len} entries"),
        });
    }
    Ok(NAME_POOL
        .choose_multiple(rng, wanted)
        .map(|name| String::from(*name))
        .collect())
}

/// Build the seed agents described by `config`, not yet placed.
///
/// # Errors
///
/// Returns [`EngineError::Spawner`] if `agents.initial_count` exceeds the
/// name pool.
pub fn build_seed_agents<R: Rng + ?Sized>(
    config: &HiveConfig,
    rng: &mut R,
) -> Result<Vec<Agent>, EngineError> {
    let credentials = ProviderCredentials {
        persona_id: config.llm.persona_id.clone().unwrap_or_default(),
        token: config.llm.token.clone().unwrap_or_default(),
    };
    if config.llm.enabled && credentials.token.is_empty() {
        warn!("No agent token configured (HIVE_AGENT_TOKEN); every decision will fall back");
    }

    let vitals = config.rules.vitals();
    let names = pick_unique_names(rng, config.agents.initial_count)?;
    Ok(names
        .into_iter()
        .map(|name| {
            create_agent(
                NewAgent {
                    name,
                    user_id: config.agents.user_id.clone(),
                    credentials: credentials.clone(),
                    values: random_values(rng),
                },
                &vitals,
            )
        })
        .collect())
}

/// Create the seed agents and add them to the world.
///
/// # Errors
///
/// Returns [`EngineError`] if the agents cannot be built or placed.
pub async fn spawn_seed_agents(
    host: &WorldHost,
    config: &HiveConfig,
) -> Result<Vec<AgentId>, EngineError> {
    let agents = build_seed_agents(config, &mut rand::rng())?;

    let mut spawned = Vec::with_capacity(agents.len());
    for agent in agents {
        let agent_id = agent.id;
        let name = agent.name.clone();
        let values = agent.values;
        let position = host.add_agent(agent).await?;
        info!(
            agent_id = %agent_id,
            name = %name,
            position = %position,
            cooperation = values.cooperation,
            adventure = values.adventure,
            social = values.social,
            generosity = values.generosity,
            "Spawned seed agent"
        );
        spawned.push(agent_id);
    }
    Ok(spawned)
}

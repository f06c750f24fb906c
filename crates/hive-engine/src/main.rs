//! Engine binary for the Hive simulation.
//!
//! Wires the world host, seed agents, decision provider and tick loop
//! together, then runs until a termination condition is met.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `hive-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Create the world host (seeded grid)
//! 4. Spawn seed agents
//! 5. Build the decision provider (Act API or offline rule engine)
//! 6. Install the Ctrl-C shutdown signal
//! 7. Run the simulation loop
//! 8. Log the result

mod error;
mod spawner;
mod tick_logger;

use std::path::Path;

use hive_core::config::{HiveConfig, LoggingConfig};
use hive_core::host::WorldHost;
use hive_core::runner::{self, RunOptions};
use hive_runner::provider::AgentDecider;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::tick_logger::TickLogger;

/// Configuration file looked up in the working directory.
const CONFIG_PATH: &str = "hive-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any initialization step or the simulation fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration.
    let config = HiveConfig::load_or_default(Path::new(CONFIG_PATH)).map_err(EngineError::from)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("hive-engine starting");
    info!(
        world_name = %config.world.name,
        seed = config.world.seed,
        tick_interval_ms = config.world.tick_interval_ms,
        decision_timeout_ms = config.world.decision_timeout_ms,
        max_ticks = ?config.world.max_ticks,
        "Configuration loaded"
    );

    // 3. Create the world.
    let host = WorldHost::new(config.clone());
    info!(cells = host.get().await.grid().len(), "World grid generated");

    // 4. Spawn seed agents.
    let spawned = spawner::spawn_seed_agents(&host, &config).await?;
    info!(agents_spawned = spawned.len(), "Seed agents spawned");

    // 5. Decision provider.
    let mut provider = AgentDecider::from_config(&config).map_err(EngineError::from)?;
    info!(provider = provider.name(), "Decision provider ready");

    // 6. Shutdown on Ctrl-C.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, stopping after the current tick");
                let _ = shutdown_tx.send(true);
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for Ctrl-C, run until max_ticks");
            }
        }
    });

    // 7. Run the simulation.
    let mut callback = TickLogger::new();
    let result = runner::run_simulation(
        &host,
        &mut provider,
        RunOptions::from_config(&config),
        shutdown_rx,
        &mut callback,
    )
    .await
    .map_err(EngineError::from)?;

    // 8. Log results.
    runner::log_simulation_end(&result);
    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        total_events = callback.total_events(),
        total_fallbacks = callback.total_fallbacks(),
        "hive-engine shutdown complete"
    );

    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over `logging.level`.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

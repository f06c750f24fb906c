//! Simulation loop runner.
//!
//! [`run_simulation`] drives [`WorldHost::advance`] on a fixed interval
//! until one of these happens:
//!
//! - **Tick limit**: `max_ticks` ticks have completed.
//! - **Extinction**: nobody is left alive (when enabled).
//! - **Shutdown**: the shutdown signal flips to `true`, checked before each
//!   tick and during the sleep between ticks.
//!
//! [`WorldHost::advance`]: crate::host::WorldHost::advance

use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::config::HiveConfig;
use crate::decision::DecisionProvider;
use crate::host::{HostError, WorldHost};
use crate::tick::TickSummary;

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick could not be executed.
    #[error("host error: {source}")]
    Host {
        /// The underlying host error.
        #[from]
        source: HostError,
    },
}

/// Why the simulation loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEndReason {
    /// The configured number of ticks completed.
    MaxTicksReached,
    /// Every agent died.
    Extinction,
    /// The shutdown signal fired.
    Shutdown,
}

/// Loop parameters.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Pause between ticks.
    pub tick_interval: Duration,
    /// Stop after this many ticks. `None` runs until shutdown.
    pub max_ticks: Option<u64>,
    /// Stop once nobody is alive.
    pub stop_on_extinction: bool,
}

impl RunOptions {
    /// Options taken from the `world` section of `config`.
    pub const fn from_config(config: &HiveConfig) -> Self {
        Self {
            tick_interval: Duration::from_millis(config.world.tick_interval_ms),
            max_ticks: config.world.max_ticks,
            stop_on_extinction: true,
        }
    }
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed by this run.
    pub total_ticks: u64,
}

/// Callback invoked after each tick completes.
pub trait TickCallback: Send {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary);
}

/// A no-op tick callback.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary) {}
}

/// Run the simulation loop until a termination condition is met.
///
/// # Errors
///
/// Returns [`RunnerError`] if a tick fails, including
/// [`HostError::NoAgents`] when the roster is empty.
pub async fn run_simulation<P: DecisionProvider>(
    host: &WorldHost,
    provider: &mut P,
    options: RunOptions,
    mut shutdown: watch::Receiver<bool>,
    callback: &mut dyn TickCallback,
) -> Result<SimulationResult, RunnerError> {
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    info!(
        max_ticks = options.max_ticks,
        tick_interval_ms = u64::try_from(options.tick_interval.as_millis()).unwrap_or(u64::MAX),
        "Simulation starting"
    );

    loop {
        // --- Check shutdown (before tick) ---
        if *shutdown.borrow() {
            info!("Shutdown requested");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::Shutdown,
                final_summary: last_summary,
                total_ticks,
            });
        }

        // --- Execute tick ---
        let summary = host.advance(provider).await?;
        total_ticks = total_ticks.saturating_add(1);
        callback.on_tick(&summary);

        // --- Check extinction ---
        if options.stop_on_extinction && summary.agents_alive == 0 {
            info!(tick = summary.tick, "All agents dead -- extinction");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::Extinction,
                final_summary: Some(summary),
                total_ticks,
            });
        }

        // --- Check tick limit (after tick) ---
        if options.max_ticks.is_some_and(|max| total_ticks >= max) {
            info!(tick = summary.tick, max_ticks = options.max_ticks, "Tick limit reached");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::MaxTicksReached,
                final_summary: Some(summary),
                total_ticks,
            });
        }

        last_summary = Some(summary);

        // --- Sleep for tick interval, waking early on shutdown ---
        if !options.tick_interval.is_zero() {
            tokio::select! {
                () = tokio::time::sleep(options.tick_interval) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        // sender dropped, finish the pause without listening
                        tokio::time::sleep(options.tick_interval).await;
                    }
                }
            }
        }
    }
}

/// Log the simulation end sequence.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        final_agents_alive = result.final_summary.as_ref().map(|s| s.agents_alive),
        "Simulation ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            tick = summary.tick,
            agents_alive = summary.agents_alive,
            events = summary.events.len(),
            "Final tick summary"
        );
    } else {
        warn!("Simulation ended with no ticks executed");
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use hive_agents::{NewAgent, VitalsConfig, create_agent};
    use hive_types::{Agent, AgentAction};

    use super::*;
    use crate::decision::ScriptedDecisionProvider;

    fn agent(name: &str, energy: u32) -> Agent {
        let mut agent = create_agent(
            NewAgent {
                name: name.to_owned(),
                ..NewAgent::default()
            },
            &VitalsConfig::default(),
        );
        agent.energy = energy;
        agent
    }

    fn options(max_ticks: Option<u64>) -> RunOptions {
        RunOptions {
            tick_interval: Duration::ZERO,
            max_ticks,
            stop_on_extinction: true,
        }
    }

    struct Counter(u64);

    impl TickCallback for Counter {
        fn on_tick(&mut self, _summary: &TickSummary) {
            self.0 = self.0.saturating_add(1);
        }
    }

    #[tokio::test]
    async fn bounded_by_max_ticks() {
        let host = WorldHost::new(HiveConfig::default());
        assert!(host.add_agent(agent("Ada", 100)).await.is_ok());
        let mut provider = ScriptedDecisionProvider::always(AgentAction::idle());
        let (_tx, rx) = watch::channel(false);
        let mut counter = Counter(0);

        let result = run_simulation(&host, &mut provider, options(Some(5)), rx, &mut counter).await;
        let Ok(result) = result else {
            panic!("run failed");
        };
        assert_eq!(result.end_reason, SimulationEndReason::MaxTicksReached);
        assert_eq!(result.total_ticks, 5);
        assert_eq!(counter.0, 5);
        assert_eq!(host.get().await.tick(), 5);
    }

    #[tokio::test]
    async fn shutdown_before_first_tick() {
        let host = WorldHost::new(HiveConfig::default());
        assert!(host.add_agent(agent("Ada", 100)).await.is_ok());
        let mut provider = ScriptedDecisionProvider::always(AgentAction::idle());
        let (tx, rx) = watch::channel(false);
        assert!(tx.send(true).is_ok());

        let result = run_simulation(&host, &mut provider, options(None), rx, &mut NoOpCallback).await;
        assert_eq!(result.as_ref().ok().map(|r| r.end_reason), Some(SimulationEndReason::Shutdown));
        assert_eq!(result.ok().map(|r| r.total_ticks), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_interrupts_the_pause() {
        let host = WorldHost::new(HiveConfig::default());
        assert!(host.add_agent(agent("Ada", 100)).await.is_ok());
        let (tx, rx) = watch::channel(false);
        let run_host = host.clone();
        let handle = tokio::spawn(async move {
            let mut provider = ScriptedDecisionProvider::always(AgentAction::idle());
            let opts = RunOptions {
                tick_interval: Duration::from_secs(60),
                max_ticks: None,
                stop_on_extinction: true,
            };
            run_simulation(&run_host, &mut provider, opts, rx, &mut NoOpCallback).await
        });

        tokio::time::sleep(Duration::from_secs(90)).await;
        assert!(tx.send(true).is_ok());
        let result = handle.await.ok().and_then(Result::ok);
        assert_eq!(result.as_ref().map(|r| r.end_reason), Some(SimulationEndReason::Shutdown));
        assert_eq!(result.map(|r| r.total_ticks), Some(2));
    }

    #[tokio::test]
    async fn extinction_stops_simulation() {
        let host = WorldHost::new(HiveConfig::default());
        assert!(host.add_agent(agent("Faint", 3)).await.is_ok());
        let mut provider = ScriptedDecisionProvider::always(AgentAction::idle());
        let (_tx, rx) = watch::channel(false);

        let result = run_simulation(&host, &mut provider, options(None), rx, &mut NoOpCallback).await;
        let Ok(result) = result else {
            panic!("run failed");
        };
        assert_eq!(result.end_reason, SimulationEndReason::Extinction);
        assert_eq!(result.total_ticks, 2);
    }

    #[tokio::test]
    async fn empty_roster_is_an_error() {
        let host = WorldHost::new(HiveConfig::default());
        let mut provider = ScriptedDecisionProvider::always(AgentAction::idle());
        let (_tx, rx) = watch::channel(false);
        let result = run_simulation(&host, &mut provider, options(Some(1)), rx, &mut NoOpCallback).await;
        assert!(matches!(
            result,
            Err(RunnerError::Host {
                source: HostError::NoAgents
            })
        ));
    }
}

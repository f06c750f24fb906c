//! The offline rule engine driving a full simulation run.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use hive_agents::{NewAgent, create_agent, random_values};
use hive_core::config::HiveConfig;
use hive_core::host::WorldHost;
use hive_core::runner::{RunOptions, SimulationEndReason, TickCallback, run_simulation};
use hive_core::tick::TickSummary;
use hive_runner::provider::AgentDecider;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::sync::watch;

#[derive(Default)]
struct Collect {
    fallbacks: u32,
    events: usize,
    ticks: Vec<u64>,
}

impl TickCallback for Collect {
    fn on_tick(&mut self, summary: &TickSummary) {
        self.fallbacks = self.fallbacks.saturating_add(summary.fallbacks);
        self.events = self.events.saturating_add(summary.events.len());
        self.ticks.push(summary.tick);
    }
}

fn offline_config() -> HiveConfig {
    let mut config = HiveConfig::default();
    config.llm.enabled = false;
    config.world.seed = 7;
    config
}

async fn populated_host(config: &HiveConfig, count: usize) -> WorldHost {
    let host = WorldHost::new(config.clone());
    let mut rng = SmallRng::seed_from_u64(99);
    for i in 0..count {
        let agent = create_agent(
            NewAgent {
                name: format!("Agent {i}"),
                user_id: String::from("local"),
                values: random_values(&mut rng),
                ..NewAgent::default()
            },
            &config.rules.vitals(),
        );
        host.add_agent(agent).await.unwrap();
    }
    host
}

#[tokio::test]
async fn rule_engine_never_falls_back() {
    let config = offline_config();
    let host = populated_host(&config, 5).await;
    let mut provider = AgentDecider::from_config(&config).unwrap();
    assert_eq!(provider.name(), "rule-engine");

    let options = RunOptions {
        tick_interval: Duration::ZERO,
        max_ticks: Some(10),
        stop_on_extinction: true,
    };
    let (_tx, rx) = watch::channel(false);
    let mut collect = Collect::default();
    let result = run_simulation(&host, &mut provider, options, rx, &mut collect)
        .await
        .unwrap();

    assert_eq!(result.end_reason, SimulationEndReason::MaxTicksReached);
    assert_eq!(result.total_ticks, 10);
    assert_eq!(collect.ticks, (1..=10).collect::<Vec<u64>>());
    assert_eq!(collect.fallbacks, 0);
    // five living agents act every tick
    assert!(collect.events >= 50);

    let snapshot = host.snapshot().await;
    assert_eq!(snapshot.tick, 10);
    assert_eq!(snapshot.events.len(), collect.events);
}

//! Tick callback that reports each tick to the log.
//!
//! One `info!` line per tick with the headline numbers, one per death and
//! emergence event, and the rest of the events at `debug!`.

use hive_core::runner::TickCallback;
use hive_core::tick::TickSummary;
use hive_types::EventDetail;
use tracing::{debug, info, warn};

/// Callback that writes tick summaries to the log.
#[derive(Debug, Default)]
pub struct TickLogger {
    total_events: u64,
    total_fallbacks: u64,
}

impl TickLogger {
    /// Create a logger with zeroed running totals.
    pub const fn new() -> Self {
        Self {
            total_events: 0,
            total_fallbacks: 0,
        }
    }

    /// Events seen across all ticks so far.
    pub const fn total_events(&self) -> u64 {
        self.total_events
    }

    /// Fallback decisions across all ticks so far.
    pub const fn total_fallbacks(&self) -> u64 {
        self.total_fallbacks
    }
}

impl TickCallback for TickLogger {
    fn on_tick(&mut self, summary: &TickSummary) {
        let events = u64::try_from(summary.events.len()).unwrap_or(u64::MAX);
        self.total_events = self.total_events.saturating_add(events);
        self.total_fallbacks = self
            .total_fallbacks
            .saturating_add(u64::from(summary.fallbacks));

        info!(
            tick = summary.tick,
            agents_alive = summary.agents_alive,
            events = events,
            deaths = summary.deaths.len(),
            fallbacks = summary.fallbacks,
            cells_regenerated = summary.cells_regenerated,
            "Tick summary"
        );

        for event in &summary.events {
            match &event.detail {
                EventDetail::Exhausted(detail) => {
                    info!(tick = event.tick, agent = %event.agent_name, "{}", detail.message);
                }
                EventDetail::LargeAlliance(detail) => {
                    info!(
                        tick = event.tick,
                        alliance = %detail.alliance_name,
                        size = detail.size,
                        "Large alliance formed"
                    );
                }
                EventDetail::LeaderEmergence(detail) => {
                    info!(
                        tick = event.tick,
                        leader = %event.agent_name,
                        reputation = detail.reputation,
                        avg_reputation = detail.avg_reputation,
                        "Leader emerged"
                    );
                }
                _ => {
                    debug!(
                        tick = event.tick,
                        agent = %event.agent_name,
                        event_type = %event.event_type,
                        "Event"
                    );
                }
            }
        }

        if summary.fallbacks > 0 && summary.fallbacks == summary.agents_alive {
            warn!(
                tick = summary.tick,
                "Every living agent used the fallback policy this tick"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use hive_types::{AgentId, ExhaustedDetail, WorldEvent};

    use super::*;

    fn summary(tick: u64, events: usize, fallbacks: u32) -> TickSummary {
        let id = AgentId::new();
        TickSummary {
            tick,
            events: (0..events)
                .map(|_| {
                    WorldEvent::new(
                        id,
                        "Kai",
                        tick,
                        EventDetail::Exhausted(ExhaustedDetail {
                            message: String::from("Kai ran out of energy and left the world"),
                        }),
                    )
                })
                .collect(),
            agents_alive: 2,
            deaths: vec![id],
            fallbacks,
            cells_regenerated: 10,
        }
    }

    #[test]
    fn accumulates_totals() {
        let mut logger = TickLogger::new();
        logger.on_tick(&summary(1, 2, 1));
        logger.on_tick(&summary(2, 3, 2));
        assert_eq!(logger.total_events(), 5);
        assert_eq!(logger.total_fallbacks(), 3);
    }
}

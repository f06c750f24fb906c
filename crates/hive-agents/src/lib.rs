//! Agent state rules for the Hive simulation.
//!
//! This crate holds the pure logic that operates on agent records: building
//! new agents, per-tick energy upkeep, inventory bookkeeping, reputation
//! awards and alliance membership. It performs no I/O and knows nothing
//! about ticks or decision providers; `hive-core` orchestrates it.
//!
//! # Modules
//!
//! - [`agent`] -- Agent construction and random trait vectors
//! - [`alliance`] -- Founding, joining and naming alliances
//! - [`config`] -- Tunable vital parameters ([`VitalsConfig`])
//! - [`error`] -- Error types for agent operations ([`AgentError`])
//! - [`inventory`] -- Checked inventory operations and top-resource choice
//! - [`reputation`] -- Reputation awards and population averages
//! - [`vitals`] -- Energy upkeep, exhaustion and restoration

pub mod agent;
pub mod alliance;
pub mod config;
pub mod error;
pub mod inventory;
pub mod reputation;
pub mod vitals;

// Re-export primary types at crate root for convenience.
pub use agent::{NewAgent, create_agent, empty_inventory, random_values};
pub use alliance::{AllyPlan, admit, alliance_name, choose_leader, found_alliance, plan_alliance};
pub use config::VitalsConfig;
pub use error::AgentError;
pub use vitals::{UpkeepResult, apply_upkeep, needs_energy, restore_energy};

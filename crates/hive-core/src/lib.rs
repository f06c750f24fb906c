//! World state, tick cycle, and orchestration for the Hive simulation.
//!
//! This crate owns the tick that drives the simulation: regeneration, the
//! sequential agent phase (upkeep, perception, decision, resolution), and
//! emergence detection.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `hive-config.yaml` into
//!   strongly-typed structs.
//! - [`decision`] -- [`DecisionProvider`] trait, the fallback policy, and
//!   scripted providers for tests.
//! - [`perception`] -- Per-agent perception assembly from world state.
//! - [`resolution`] -- Action resolution against the world.
//! - [`emergence`] -- Large-alliance and leader detection.
//! - [`world`] -- [`WorldState`]: grid, roster, alliances, history.
//! - [`tick`] -- The tick cycle.
//! - [`host`] -- [`WorldHost`], the single-writer handle and world factory.
//! - [`runner`] -- The bounded simulation loop.
//!
//! [`DecisionProvider`]: decision::DecisionProvider
//! [`WorldState`]: world::WorldState
//! [`WorldHost`]: host::WorldHost

pub mod config;
pub mod decision;
pub mod emergence;
pub mod host;
pub mod perception;
pub mod resolution;
pub mod runner;
pub mod tick;
pub mod world;

//! Decision providers for Hive agents.
//!
//! Turns an agent's perception into an action, either remotely through the
//! Act API or locally with a rule engine.
//!
//! # Architecture
//!
//! ```text
//! Perception --> Prompt Engine --> Act API (SSE) --> Parser --> AgentAction
//! ```
//!
//! Every provider error surfaces to the tick loop as a
//! [`DecisionError`](hive_core::decision::DecisionError), which then applies
//! its fallback, so an agent never misses a tick.
//!
//! # Modules
//!
//! - [`config`] -- Act API settings derived from the `llm` section.
//! - [`prompt`] -- `minijinja` templates for the system framing and the
//!   environment message.
//! - [`client`] -- The `POST /act/stream` call.
//! - [`sse`] -- Server-sent event decoding.
//! - [`parse`] -- Reply text to [`AgentAction`](hive_types::AgentAction).
//! - [`rule_engine`] -- Offline personality-driven rules.
//! - [`provider`] -- The providers the engine plugs in.

pub mod client;
pub mod config;
pub mod error;
pub mod parse;
pub mod prompt;
pub mod provider;
pub mod rule_engine;
pub mod sse;

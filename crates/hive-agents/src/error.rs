//! Error types for the hive-agents crate.
//!
//! Agent operations return typed errors rather than panicking.

use hive_types::{AgentId, ResourceType};

/// Errors that can occur during agent state operations.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Attempted to remove more of a resource than the agent holds.
    #[error("insufficient resource: wanted {requested} of {resource} but only have {available}")]
    InsufficientResource {
        /// The resource type being removed.
        resource: ResourceType,
        /// The quantity the caller attempted to remove.
        requested: u32,
        /// The quantity the agent actually holds.
        available: u32,
    },

    /// An arithmetic overflow occurred.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },

    /// The agent is already a member of the alliance.
    #[error("agent {0} is already a member of this alliance")]
    AlreadyMember(AgentId),
}

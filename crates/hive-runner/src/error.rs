//! Error types for the decision providers.
//!
//! Every failure surfaced while asking the Act API for a decision: prompt
//! rendering, transport, HTTP status, and reply parsing. The tick
//! orchestrator sees them as [`DecisionError`] and applies its fallback.

use hive_core::decision::DecisionError;

/// Errors that can occur while producing a decision.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Failed to load or render a prompt template.
    #[error("template error: {0}")]
    Template(String),

    /// The Act API could not be reached or the body could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The Act API answered with a non-success status.
    #[error("Act API returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The reply could not be parsed into a JSON object.
    #[error("response parse error: {0}")]
    Parse(String),

    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Serialization or deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<ProviderError> for DecisionError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Transport(_) | ProviderError::Status { .. } => Self::Transport {
                message: err.to_string(),
            },
            ProviderError::Parse(_) => Self::Malformed {
                message: err.to_string(),
            },
            ProviderError::Template(_) | ProviderError::Config(_) | ProviderError::Serde(_) => {
                Self::Internal {
                    message: err.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_to_transport() {
        let err = ProviderError::Status {
            status: 503,
            body: String::from("busy"),
        };
        let mapped = DecisionError::from(err);
        assert!(matches!(mapped, DecisionError::Transport { ref message } if message.contains("503")));
    }

    #[test]
    fn parse_maps_to_malformed() {
        let mapped = DecisionError::from(ProviderError::Parse(String::from("garbage")));
        assert!(matches!(mapped, DecisionError::Malformed { .. }));
    }
}

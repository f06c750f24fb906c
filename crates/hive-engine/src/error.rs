//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup and the simulation
//! run so `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: hive_core::config::ConfigError,
    },

    /// The decision provider could not be built.
    #[error("provider error: {source}")]
    Provider {
        /// The underlying provider error.
        #[from]
        source: hive_runner::error::ProviderError,
    },

    /// Adding an agent to the world failed.
    #[error("host error: {source}")]
    Host {
        /// The underlying host error.
        #[from]
        source: hive_core::host::HostError,
    },

    /// Simulation runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: hive_core::runner::RunnerError,
    },

    /// Agent spawning failed.
    #[error("spawner error: {message}")]
    Spawner {
        /// Description of the spawner failure.
        message: String,
    },
}

//! Act API client configuration.
//!
//! Built from the `llm` section of `hive-config.yaml` (environment
//! overrides are already applied by [`HiveConfig::from_file`]). Credentials
//! are not part of it: every agent carries its own.
//!
//! [`HiveConfig::from_file`]: hive_core::config::HiveConfig::from_file

use std::path::PathBuf;
use std::time::Duration;

use hive_core::config::LlmConfig;

use crate::error::ProviderError;

/// Everything the Act API client needs besides per-agent credentials.
#[derive(Debug, Clone)]
pub struct ActApiConfig {
    /// Base URL, without a trailing slash (e.g. `https://app.mindos.com/gate/lab`).
    pub api_base: String,
    /// Directory with prompt template overrides.
    pub templates_dir: Option<PathBuf>,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
}

impl ActApiConfig {
    /// Derive the client configuration from the `llm` section.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Config`] if the base URL is empty or not
    /// an HTTP(S) URL.
    pub fn from_llm(llm: &LlmConfig) -> Result<Self, ProviderError> {
        let api_base = llm.api_base.trim().trim_end_matches('/').to_owned();
        if api_base.is_empty() {
            return Err(ProviderError::Config(String::from("llm.api_base is empty")));
        }
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(ProviderError::Config(format!(
                "llm.api_base must be an http(s) URL, got {api_base}"
            )));
        }

        Ok(Self {
            api_base,
            templates_dir: llm.templates_dir.as_ref().map(PathBuf::from),
            request_timeout: Duration::from_millis(llm.request_timeout_ms),
        })
    }

    /// The streaming act endpoint.
    pub fn act_url(&self) -> String {
        format!("{}/act/stream", self.api_base)
    }
}

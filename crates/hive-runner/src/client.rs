//! HTTP client for the Act API.
//!
//! One POST per decision to `{api_base}/act/stream`, authenticated with the
//! agent's own bearer token. The streamed body is decoded from SSE into the
//! reply text. No retries: a failed call is final for that agent and tick.

use hive_types::ProviderCredentials;
use serde::Serialize;
use tracing::debug;

use crate::config::ActApiConfig;
use crate::error::ProviderError;
use crate::sse::decode_sse;

/// Request body of `POST /act/stream`.
#[derive(Debug, Serialize)]
pub struct ActRequest<'a> {
    /// The persona the reply is written as.
    pub secondme_id: &'a str,
    /// System framing for the decision.
    pub system_prompt: &'a str,
    /// The environment description.
    pub message: &'a str,
    /// Structured-output contract.
    pub action_control: &'a serde_json::Value,
}

/// Client for the Act API.
#[derive(Debug, Clone)]
pub struct ActApiClient {
    client: reqwest::Client,
    url: String,
}

impl ActApiClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &ActApiConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ProviderError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: config.act_url(),
        })
    }

    /// The endpoint this client posts to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one act request and return the decoded reply text.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Transport`] if the request fails or the body
    /// cannot be read, and [`ProviderError::Status`] on a non-success
    /// status.
    pub async fn act(
        &self,
        credentials: &ProviderCredentials,
        request: &ActRequest<'_>,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&credentials.token)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("Act request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(format!("failed to read Act stream: {e}")))?;
        let reply = decode_sse(&body);
        debug!(bytes = body.len(), reply_len = reply.len(), "Act stream decoded");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use hive_core::config::LlmConfig;

    use super::*;

    #[test]
    fn request_body_shape() {
        let control = serde_json::json!({"type": "json"});
        let request = ActRequest {
            secondme_id: "persona-1",
            system_prompt: "be brave",
            message: "you see a tree",
            action_control: &control,
        };
        let json = serde_json::to_value(&request).unwrap_or_default();
        assert_eq!(json.get("secondme_id").and_then(|v| v.as_str()), Some("persona-1"));
        assert_eq!(json.get("system_prompt").and_then(|v| v.as_str()), Some("be brave"));
        assert_eq!(json.get("message").and_then(|v| v.as_str()), Some("you see a tree"));
        assert_eq!(json.get("action_control"), Some(&control));
    }

    #[test]
    fn client_targets_stream_endpoint() {
        let llm = LlmConfig {
            api_base: String::from("http://127.0.0.1:9/lab"),
            ..LlmConfig::default()
        };
        let client = ActApiConfig::from_llm(&llm).and_then(|c| ActApiClient::new(&c));
        assert_eq!(
            client.ok().map(|c| c.url().to_owned()),
            Some(String::from("http://127.0.0.1:9/lab/act/stream"))
        );
    }
}

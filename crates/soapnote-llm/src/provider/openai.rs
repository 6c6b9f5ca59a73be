//! OpenAI-compatible provider implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::Provider;
use crate::error::LlmError;
use crate::protocol::openai::{OpenAiRequest, OpenAiResponse};
use crate::types::{CompletionRequest, CompletionResponse};

/// OpenAI-compatible chat completion provider
pub struct OpenAiProvider {
    client: Client,
    base_url: Url,
    api_key: SecretString,
    timeout: Duration,
}

impl OpenAiProvider {
    /// Create a provider bound to one credential and API root
    #[must_use]
    pub fn new(api_key: SecretString, base_url: &Url, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.clone(),
            api_key,
            timeout,
        }
    }

    /// Build the chat completions URL
    fn completions_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/chat/completions")
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let wire_request = OpenAiRequest::from(request);

        tracing::debug!(
            model = %wire_request.model,
            messages = wire_request.messages.len(),
            temperature = wire_request.temperature,
            "chat completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.api_key.expose_secret())
            .timeout(self.timeout)
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, timeout = e.is_timeout(), "upstream request failed");
                LlmError::Connection(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("failed to read error body: {e}"));
            tracing::warn!(%status, "upstream returned error");
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let wire_response: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let completion = CompletionResponse::try_from(wire_response)?;

        tracing::debug!(
            model = completion.model.as_deref().unwrap_or_default(),
            finish_reason = completion.finish_reason.as_deref().unwrap_or_default(),
            prompt_tokens = completion.usage.map(|u| u.prompt_tokens),
            completion_tokens = completion.usage.map(|u| u.completion_tokens),
            "chat completion finished"
        );

        Ok(completion)
    }
}

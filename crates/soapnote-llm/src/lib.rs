//! Chat completion client
//!
//! Sends a rendered prompt to an OpenAI-compatible chat completion endpoint
//! and extracts the text of the first choice.

pub mod error;
pub mod protocol;
pub mod provider;
pub mod types;

use std::sync::Arc;

pub use error::LlmError;
pub use provider::{Provider, openai::OpenAiProvider};
pub use types::{CompletionRequest, CompletionResponse, Message, Role, Usage};

/// Build the completion provider from configuration
///
/// # Errors
///
/// Returns `LlmError::Config` if no credential is configured
pub fn build_provider(config: &soapnote_config::Config) -> Result<Arc<dyn Provider>, LlmError> {
    let api_key = config
        .openai
        .api_key
        .clone()
        .ok_or_else(|| LlmError::Config("API key required for chat completion".to_owned()))?;

    let provider = OpenAiProvider::new(api_key, &config.openai.base_url, config.completion.timeout);

    tracing::debug!(
        model = %config.completion.model,
        timeout = ?config.completion.timeout,
        "completion provider initialized"
    );

    Ok(Arc::new(provider))
}

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

//! Speech-to-text client
//!
//! Sends an uploaded recording to an OpenAI-compatible transcription
//! endpoint and returns the plain-text transcript.

mod error;
mod http_client;
mod provider;
mod types;

use std::sync::Arc;

use secrecy::SecretString;

pub use error::{Result, SttError};
pub use provider::{SttProvider, whisper::WhisperProvider};
pub use types::{Transcript, TranscriptionRequest, UploadedAudio};

/// Build the transcription provider from configuration
///
/// The credential is resolved once here and owned by the provider for the
/// life of the process.
pub fn build_provider(config: &soapnote_config::Config) -> Result<Arc<dyn SttProvider>> {
    let api_key: SecretString = config
        .openai
        .api_key
        .clone()
        .ok_or_else(|| SttError::ConfigError("API key required for transcription".to_string()))?;

    let provider = WhisperProvider::new(api_key, &config.openai.base_url, config.transcription.timeout);

    tracing::debug!(
        model = %config.transcription.model,
        timeout = ?config.transcription.timeout,
        "transcription provider initialized"
    );

    Ok(Arc::new(provider))
}

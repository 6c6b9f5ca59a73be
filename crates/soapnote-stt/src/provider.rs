pub(crate) mod whisper;

use async_trait::async_trait;

use crate::types::{Transcript, TranscriptionRequest};

/// Trait for speech-to-text backends
#[async_trait]
pub trait SttProvider: Send + Sync {
    /// Transcribe audio to text
    ///
    /// Takes the request by value: the audio buffer is released as soon as
    /// the call returns, whatever the outcome.
    async fn transcribe(&self, request: TranscriptionRequest) -> crate::error::Result<Transcript>;

    /// Get the provider name
    fn name(&self) -> &str;
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{
    error::SttError,
    http_client::http_client,
    types::{Transcript, TranscriptionRequest},
};

use super::SttProvider;

/// `OpenAI` Whisper STT provider
pub struct WhisperProvider {
    client: Client,
    url: String,
    api_key: SecretString,
    timeout: Duration,
}

impl WhisperProvider {
    pub fn new(api_key: SecretString, base_url: &Url, timeout: Duration) -> Self {
        let base = base_url.as_str().trim_end_matches('/');

        Self {
            client: http_client(),
            url: format!("{base}/audio/transcriptions"),
            api_key,
            timeout,
        }
    }
}

#[derive(serde::Deserialize)]
struct WhisperResponse {
    text: String,
}

#[async_trait]
impl SttProvider for WhisperProvider {
    async fn transcribe(&self, request: TranscriptionRequest) -> crate::error::Result<Transcript> {
        let TranscriptionRequest { audio, model } = request;

        tracing::debug!(
            bytes = audio.bytes.len(),
            filename = %audio.filename,
            content_type = %audio.content_type,
            %model,
            "whisper transcription request"
        );

        let file = reqwest::multipart::Part::bytes(audio.bytes)
            .file_name(audio.filename)
            .mime_str(&audio.content_type)
            .map_err(|e| SttError::InvalidRequest(format!("invalid content type: {e}")))?;

        let form = reqwest::multipart::Form::new().part("file", file).text("model", model);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(self.api_key.expose_secret())
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, timeout = e.is_timeout(), "whisper request failed");
                SttError::ConnectionError(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("failed to read error body: {e}"));

            tracing::warn!(%status, "whisper returned error");

            return Err(SttError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let result: WhisperResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse whisper response");
            SttError::InvalidResponse(e.to_string())
        })?;

        tracing::debug!(chars = result.text.len(), "whisper transcription complete");

        Ok(Transcript { text: result.text })
    }

    fn name(&self) -> &'static str {
        "whisper"
    }
}

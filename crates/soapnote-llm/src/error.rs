use thiserror::Error;

/// Errors that can occur while requesting a completion
#[derive(Debug, Error)]
pub enum LlmError {
    /// Upstream provider answered with a non-success status
    #[error("provider returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Provider could not be reached or did not answer in time
    #[error("failed to reach provider: {0}")]
    Connection(String),

    /// Success status, but the body was not a chat completion
    #[error("failed to parse response: {0}")]
    InvalidResponse(String),

    /// Success status, but no choice carried any text
    #[error("completion returned no usable text")]
    EmptyCompletion,

    /// Provider could not be built from configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl LlmError {
    /// Text to show a caller
    ///
    /// Upstream failures surface the provider's body unchanged.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        match self {
            Self::Upstream { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

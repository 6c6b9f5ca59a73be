use thiserror::Error;

pub type Result<T> = std::result::Result<T, SttError>;

/// Transcription client errors
#[derive(Debug, Error)]
pub enum SttError {
    /// The service answered with a non-success status
    #[error("transcription service returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The service could not be reached or did not answer in time
    #[error("failed to reach transcription service: {0}")]
    ConnectionError(String),

    /// The request could not be built from the upload
    #[error("invalid transcription request: {0}")]
    InvalidRequest(String),

    /// The service answered with success but the body was not a transcript
    #[error("unreadable transcription response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl SttError {
    /// Text to show a caller
    ///
    /// For service failures this is the raw response body, unchanged.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::Api { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

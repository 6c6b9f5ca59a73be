use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use soapnote_core::{HttpError, Stage};
use soapnote_llm::LlmError;
use soapnote_stt::SttError;
use thiserror::Error;

/// Every way a note request can fail
///
/// Each variant ends the run; nothing is retried or recovered.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Request used a verb other than `POST`
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// The multipart body had no part under the expected field name
    #[error("No '{field}' field in upload")]
    MissingFile { field: String },

    /// Transcription failed; carries the service's own error text
    #[error("Whisper error: {}", .0.diagnostic())]
    TranscriptionService(#[source] SttError),

    /// Completion failed; carries the service's own error text
    #[error("Chat error: {}", .0.diagnostic())]
    CompletionService(#[source] LlmError),

    /// Completion succeeded but produced no usable text
    #[error("Chat error: completion returned no usable text")]
    EmptyCompletion,

    /// Anything else, such as a malformed multipart body
    #[error("{0}")]
    Unexpected(String),
}

impl PipelineError {
    /// Stage the run was in when it failed
    pub const fn stage(&self) -> Stage {
        match self {
            Self::MethodNotAllowed => Stage::Idle,
            Self::MissingFile { .. } | Self::Unexpected(_) => Stage::Receiving,
            Self::TranscriptionService(_) => Stage::Transcribing,
            Self::CompletionService(_) | Self::EmptyCompletion => Stage::Completing,
        }
    }
}

impl From<SttError> for PipelineError {
    fn from(error: SttError) -> Self {
        Self::TranscriptionService(error)
    }
}

impl From<LlmError> for PipelineError {
    fn from(error: LlmError) -> Self {
        match error {
            LlmError::EmptyCompletion => Self::EmptyCompletion,
            other => Self::CompletionService(other),
        }
    }
}

impl HttpError for PipelineError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingFile { .. } => StatusCode::BAD_REQUEST,
            Self::TranscriptionService(_) | Self::CompletionService(_) | Self::EmptyCompletion | Self::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::MethodNotAllowed => "method_not_allowed",
            Self::MissingFile { .. } => "missing_file_error",
            Self::TranscriptionService(_) => "transcription_service_error",
            Self::CompletionService(_) => "completion_service_error",
            Self::EmptyCompletion => "empty_completion_error",
            Self::Unexpected(_) => "unexpected_error",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

/// A failed run bound to the endpoint that served it
///
/// Rendered as a single plain-text line, `Error in <endpoint>: <message>`.
/// A wrong method gets the bare status text instead.
#[derive(Debug)]
pub struct NoteFailure {
    pub endpoint: Arc<str>,
    pub error: PipelineError,
}

impl NoteFailure {
    /// Text of the response body
    pub fn body(&self) -> String {
        match self.error {
            PipelineError::MethodNotAllowed => self.error.client_message(),
            _ => format!("Error in {}: {}", self.endpoint, self.error.client_message()),
        }
    }
}

impl IntoResponse for NoteFailure {
    fn into_response(self) -> Response {
        (self.error.status_code(), self.body()).into_response()
    }
}

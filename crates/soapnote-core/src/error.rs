use http::StatusCode;

/// Trait for domain errors that can be converted to HTTP responses
///
/// The server layer turns these into plain-text responses, which keeps the
/// client crates free of any axum dependency.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error kind (e.g. `transcription_service_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

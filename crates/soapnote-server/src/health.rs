use http::StatusCode;

/// Liveness probe; does not touch either upstream service
#[allow(clippy::unused_async)]
pub async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

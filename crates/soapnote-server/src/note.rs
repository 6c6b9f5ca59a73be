use std::sync::Arc;

use axum::{
    extract::{Multipart, State, multipart::MultipartRejection},
    routing::{MethodRouter, post},
};
use soapnote_core::Stage;

use crate::{
    error::{NoteFailure, PipelineError},
    pipeline::NotePipeline,
    upload,
};

/// One mounted note endpoint
pub struct NoteEndpoint {
    /// Route path, also used as the context in error messages
    pub path: Arc<str>,
    /// Multipart field carrying the audio
    pub field: String,
    pub pipeline: NotePipeline,
}

impl NoteEndpoint {
    fn fail(&self, error: PipelineError) -> NoteFailure {
        NoteFailure {
            endpoint: Arc::clone(&self.path),
            error,
        }
    }
}

/// Routes for a note endpoint: `POST` runs the pipeline, every other verb is refused
pub fn method_router(endpoint: Arc<NoteEndpoint>) -> MethodRouter {
    post(generate_note).fallback(method_not_allowed).with_state(endpoint)
}

#[tracing::instrument(skip_all, fields(endpoint = %endpoint.path))]
async fn generate_note(
    State(endpoint): State<Arc<NoteEndpoint>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<String, NoteFailure> {
    tracing::debug!(stage = %Stage::Receiving, "pipeline stage");

    let audio = upload::receive(multipart, &endpoint.field).await.map_err(|e| {
        tracing::warn!(stage = %e.stage(), error = %e, "upload rejected");
        endpoint.fail(e)
    })?;

    endpoint.pipeline.run(audio).await.map_err(|e| endpoint.fail(e))
}

#[allow(clippy::unused_async)]
async fn method_not_allowed(State(endpoint): State<Arc<NoteEndpoint>>, method: http::Method) -> NoteFailure {
    tracing::debug!(%method, endpoint = %endpoint.path, "method not allowed");
    endpoint.fail(PipelineError::MethodNotAllowed)
}

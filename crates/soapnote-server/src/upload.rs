use axum::extract::{Multipart, multipart::MultipartRejection};
use soapnote_stt::UploadedAudio;

use crate::error::PipelineError;

const DEFAULT_FILENAME: &str = "audio";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Pull the single audio file out of a multipart body
///
/// Parts other than `field` are drained and ignored. If `field` appears
/// more than once the first occurrence wins.
pub async fn receive(
    multipart: Result<Multipart, MultipartRejection>,
    field: &str,
) -> Result<UploadedAudio, PipelineError> {
    let mut multipart = multipart.map_err(|e| PipelineError::Unexpected(format!("Invalid upload: {}", e.body_text())))?;

    let mut audio = None;

    loop {
        let part = multipart
            .next_field()
            .await
            .map_err(|e| PipelineError::Unexpected(format!("Failed to parse upload: {}", e.body_text())))?;

        let Some(part) = part else {
            break;
        };

        if audio.is_some() || part.name() != Some(field) {
            continue;
        }

        let filename = part
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILENAME)
            .to_string();
        let content_type = part.content_type().unwrap_or(DEFAULT_CONTENT_TYPE).to_string();

        let bytes = part
            .bytes()
            .await
            .map_err(|e| PipelineError::Unexpected(format!("Failed to read '{field}': {}", e.body_text())))?;

        tracing::debug!(%filename, %content_type, bytes = bytes.len(), "upload received");

        audio = Some(UploadedAudio {
            bytes: bytes.to_vec(),
            filename,
            content_type,
        });
    }

    audio.ok_or_else(|| PipelineError::MissingFile {
        field: field.to_string(),
    })
}

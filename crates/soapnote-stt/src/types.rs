use serde::{Deserialize, Serialize};

/// A single audio file received from a caller
///
/// Held in memory for the duration of one request and consumed by the
/// transcription call.
pub struct UploadedAudio {
    /// Raw audio data
    pub bytes: Vec<u8>,
    /// Original filename as sent by the caller
    pub filename: String,
    /// MIME type of the file
    pub content_type: String,
}

impl std::fmt::Debug for UploadedAudio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedAudio")
            .field("bytes", &self.bytes.len())
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// Transcription request following the `OpenAI` audio API format
#[derive(Debug)]
pub struct TranscriptionRequest {
    pub audio: UploadedAudio,
    /// Model identifier (e.g. "whisper-1")
    pub model: String,
}

/// Text produced by the transcription service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
}

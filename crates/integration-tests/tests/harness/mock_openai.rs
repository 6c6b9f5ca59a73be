//! Mock OpenAI backend for integration tests
//!
//! Serves the transcription and chat completion routes with canned replies,
//! counting calls and recording every prompt it receives.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// Canned transcription outcome
#[derive(Clone)]
pub enum TranscriptionReply {
    Text(String),
    Error(StatusCode, String),
}

/// Canned completion outcome
#[derive(Clone)]
pub enum CompletionReply {
    Text(String),
    Error(StatusCode, String),
    NoChoices,
}

/// Mock backend standing in for the OpenAI API
pub struct MockOpenAi {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    transcription: TranscriptionReply,
    completion: CompletionReply,
    transcription_count: AtomicU32,
    completion_count: AtomicU32,
    prompts: Mutex<Vec<String>>,
    uploads: Mutex<Vec<Upload>>,
}

/// What the transcription route saw
#[derive(Debug, Clone)]
pub struct Upload {
    pub authorization: Option<String>,
    pub model: Option<String>,
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

impl MockOpenAi {
    /// Transcribe to `transcript` and complete with `note`
    pub async fn start(transcript: &str, note: &str) -> anyhow::Result<Self> {
        Self::start_with(
            TranscriptionReply::Text(transcript.to_owned()),
            CompletionReply::Text(note.to_owned()),
        )
        .await
    }

    pub async fn start_with(transcription: TranscriptionReply, completion: CompletionReply) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            transcription,
            completion,
            transcription_count: AtomicU32::new(0),
            completion_count: AtomicU32::new(0),
            prompts: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/audio/transcriptions", routing::post(handle_transcription))
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL including `/v1`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn transcription_count(&self) -> u32 {
        self.state.transcription_count.load(Ordering::SeqCst)
    }

    pub fn completion_count(&self) -> u32 {
        self.state.completion_count.load(Ordering::SeqCst)
    }

    /// Every prompt sent to the completion route, in order
    pub fn prompts(&self) -> Vec<String> {
        self.state.prompts.lock().unwrap().clone()
    }

    /// Every upload sent to the transcription route, in order
    pub fn uploads(&self) -> Vec<Upload> {
        self.state.uploads.lock().unwrap().clone()
    }
}

impl Drop for MockOpenAi {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_transcription(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    state.transcription_count.fetch_add(1, Ordering::SeqCst);

    let mut upload = Upload {
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        model: None,
        filename: None,
        bytes: Vec::new(),
    };

    while let Some(field) = multipart.next_field().await.unwrap() {
        match field.name() {
            Some("model") => upload.model = Some(field.text().await.unwrap()),
            Some("file") => {
                upload.filename = field.file_name().map(str::to_owned);
                upload.bytes = field.bytes().await.unwrap().to_vec();
            }
            _ => {}
        }
    }

    state.uploads.lock().unwrap().push(upload);

    match &state.transcription {
        TranscriptionReply::Text(text) => Json(serde_json::json!({ "text": text })).into_response(),
        TranscriptionReply::Error(status, body) => (*status, body.clone()).into_response(),
    }
}

#[derive(Deserialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

async fn handle_chat_completions(State(state): State<Arc<MockState>>, Json(request): Json<ChatRequest>) -> Response {
    state.completion_count.fetch_add(1, Ordering::SeqCst);

    let prompt = request
        .messages
        .into_iter()
        .map(|m| m.content)
        .collect::<Vec<_>>()
        .join("\n");
    state.prompts.lock().unwrap().push(prompt);

    match &state.completion {
        CompletionReply::Text(text) => Json(serde_json::json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "model": "gpt-4",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": text },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
        }))
        .into_response(),
        CompletionReply::Error(status, body) => (*status, body.clone()).into_response(),
        CompletionReply::NoChoices => Json(serde_json::json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "model": "gpt-4",
            "choices": []
        }))
        .into_response(),
    }
}

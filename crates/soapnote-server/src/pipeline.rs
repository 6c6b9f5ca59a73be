use std::sync::Arc;

use soapnote_config::{CompletionConfig, TranscriptionConfig};
use soapnote_core::{HttpError, Stage};
use soapnote_llm::{CompletionRequest, Message, Provider};
use soapnote_prompt::NoteTemplate;
use soapnote_stt::{SttProvider, TranscriptionRequest, UploadedAudio};

use crate::error::PipelineError;

/// Transcribe, render, complete
///
/// Immutable once built and shared by every request on an endpoint. A run
/// moves strictly forward through the stages and stops at the first failure.
pub struct NotePipeline {
    transcriber: Arc<dyn SttProvider>,
    completer: Arc<dyn Provider>,
    template: NoteTemplate,
    transcription_model: String,
    completion_model: String,
    temperature: f64,
}

impl NotePipeline {
    pub fn new(
        transcriber: Arc<dyn SttProvider>,
        completer: Arc<dyn Provider>,
        template: NoteTemplate,
        transcription: &TranscriptionConfig,
        completion: &CompletionConfig,
    ) -> Self {
        Self {
            transcriber,
            completer,
            template,
            transcription_model: transcription.model.clone(),
            completion_model: completion.model.clone(),
            temperature: completion.temperature,
        }
    }

    /// Turn a received recording into a note
    ///
    /// The audio buffer is handed to the transcription call and dropped
    /// when it returns, before the completion call starts.
    pub async fn run(&self, audio: UploadedAudio) -> Result<String, PipelineError> {
        let mut stage = Stage::Receiving;

        let result = self.advance(&mut stage, audio).await;

        match result {
            Ok(ref note) => tracing::debug!(%stage, chars = note.len(), "note generated"),
            Err(ref e) => tracing::warn!(
                %stage,
                kind = e.error_type(),
                transcriber = self.transcriber.name(),
                completer = self.completer.name(),
                error = %e,
                "note pipeline failed"
            ),
        }

        result
    }

    async fn advance(&self, stage: &mut Stage, audio: UploadedAudio) -> Result<String, PipelineError> {
        enter(stage, Stage::Transcribing);
        let transcript = self
            .transcriber
            .transcribe(TranscriptionRequest {
                audio,
                model: self.transcription_model.clone(),
            })
            .await?;

        enter(stage, Stage::Prompting);
        let prompt = self.template.render(&transcript.text);

        enter(stage, Stage::Completing);
        let request = CompletionRequest {
            model: self.completion_model.clone(),
            messages: vec![Message::user(prompt.into_string())],
            temperature: self.temperature,
        };
        let completion = self.completer.complete(&request).await?;

        enter(stage, Stage::Done);
        Ok(completion.text)
    }
}

fn enter(stage: &mut Stage, next: Stage) {
    debug_assert_eq!(stage.next(), Some(next));
    *stage = next;
    tracing::debug!(stage = %next, "pipeline stage");
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use soapnote_llm::{CompletionResponse, LlmError, Role};
    use soapnote_stt::{SttError, Transcript};

    use super::*;

    /// Transcriber returning a canned result
    struct StubTranscriber {
        result: Result<String, (u16, String)>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SttProvider for StubTranscriber {
        async fn transcribe(&self, request: TranscriptionRequest) -> soapnote_stt::Result<Transcript> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(request.model, "whisper-1");
            assert_eq!(request.audio.bytes, b"AUDIO");

            match &self.result {
                Ok(text) => Ok(Transcript { text: text.clone() }),
                Err((status, body)) => Err(SttError::Api {
                    status: *status,
                    body: body.clone(),
                }),
            }
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    enum Reply {
        Note(&'static str),
        Fail(u16, &'static str),
        Empty,
    }

    /// Completer recording every request it sees
    struct StubCompleter {
        reply: Reply,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    #[async_trait]
    impl Provider for StubCompleter {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
            self.requests.lock().unwrap().push(request.clone());

            match self.reply {
                Reply::Note(text) => Ok(CompletionResponse {
                    text: text.to_owned(),
                    model: None,
                    finish_reason: None,
                    usage: None,
                }),
                Reply::Fail(status, body) => Err(LlmError::Upstream {
                    status,
                    body: body.to_owned(),
                }),
                Reply::Empty => Err(LlmError::EmptyCompletion),
            }
        }
    }

    struct Harness {
        transcriber: Arc<StubTranscriber>,
        completer: Arc<StubCompleter>,
        pipeline: NotePipeline,
    }

    fn harness(transcript: Result<String, (u16, String)>, reply: Reply) -> Harness {
        let transcriber = Arc::new(StubTranscriber {
            result: transcript,
            calls: AtomicUsize::new(0),
        });
        let completer = Arc::new(StubCompleter {
            reply,
            requests: Mutex::new(Vec::new()),
        });

        let pipeline = NotePipeline::new(
            Arc::clone(&transcriber) as Arc<dyn SttProvider>,
            Arc::clone(&completer) as Arc<dyn Provider>,
            NoteTemplate::soap_note(),
            &TranscriptionConfig::default(),
            &CompletionConfig::default(),
        );

        Harness {
            transcriber,
            completer,
            pipeline,
        }
    }

    fn audio() -> UploadedAudio {
        UploadedAudio {
            bytes: b"AUDIO".to_vec(),
            filename: "visit.wav".to_string(),
            content_type: "audio/wav".to_string(),
        }
    }

    const TRANSCRIPT: &str = "Patient reports headache for 3 days";

    #[tokio::test]
    async fn note_is_returned_verbatim() {
        let h = harness(Ok(TRANSCRIPT.to_string()), Reply::Note("SUBJECTIVE: ..."));

        let note = h.pipeline.run(audio()).await.unwrap();

        assert_eq!(note, "SUBJECTIVE: ...");
        assert_eq!(h.transcriber.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn completion_request_carries_one_user_message() {
        let h = harness(Ok(TRANSCRIPT.to_string()), Reply::Note("SUBJECTIVE: ..."));

        h.pipeline.run(audio()).await.unwrap();

        let requests = h.completer.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);

        let request = &requests[0];
        assert_eq!(request.model, "gpt-4");
        assert!(request.temperature.abs() < f64::EPSILON);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, Role::User);
        assert_eq!(request.messages[0].content.matches(TRANSCRIPT).count(), 1);
        assert!(request.messages[0].content.starts_with("You are a board-certified"));
    }

    #[tokio::test]
    async fn identical_inputs_give_identical_prompts() {
        let h = harness(Ok(TRANSCRIPT.to_string()), Reply::Note("SUBJECTIVE: ..."));

        h.pipeline.run(audio()).await.unwrap();
        h.pipeline.run(audio()).await.unwrap();

        let requests = h.completer.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].messages, requests[1].messages);
    }

    #[tokio::test]
    async fn transcription_failure_skips_completion() {
        let h = harness(Err((400, "bad audio".to_string())), Reply::Note("unused"));

        let err = h.pipeline.run(audio()).await.unwrap_err();

        assert!(matches!(err, PipelineError::TranscriptionService(_)));
        assert!(err.to_string().contains("bad audio"));
        assert!(h.completer.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn completion_failure_carries_body() {
        let h = harness(Ok(TRANSCRIPT.to_string()), Reply::Fail(500, "model overloaded"));

        let err = h.pipeline.run(audio()).await.unwrap_err();

        assert!(matches!(err, PipelineError::CompletionService(_)));
        assert_eq!(err.to_string(), "Chat error: model overloaded");
    }

    #[tokio::test]
    async fn empty_completion_is_its_own_error() {
        let h = harness(Ok(TRANSCRIPT.to_string()), Reply::Empty);

        let err = h.pipeline.run(audio()).await.unwrap_err();

        assert!(matches!(err, PipelineError::EmptyCompletion));
    }
}

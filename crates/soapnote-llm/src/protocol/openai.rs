//! `OpenAI` chat completion API wire format types

use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::types::{CompletionRequest, CompletionResponse, Message, Role, Usage};

// -- Request types --

/// `OpenAI` chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<OpenAiMessage>,
    /// Sampling temperature
    pub temperature: f64,
}

/// `OpenAI` message within a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiMessage {
    /// Message role
    pub role: String,
    /// Message text
    pub content: String,
}

// -- Response types --

/// `OpenAI` chat completion response
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiResponse {
    /// Model that produced the completion
    #[serde(default)]
    pub model: Option<String>,
    /// Generated choices
    #[serde(default)]
    pub choices: Vec<OpenAiChoice>,
    /// Token usage
    #[serde(default)]
    pub usage: Option<OpenAiUsage>,
}

/// A single generated choice
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiChoice {
    pub message: OpenAiResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Assistant message within a choice
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiResponseMessage {
    /// Null when the model answered with tool calls or was filtered
    #[serde(default)]
    pub content: Option<String>,
}

/// `OpenAI` token usage
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OpenAiUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

// -- Conversions --

const fn role_str(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

impl From<&Message> for OpenAiMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: role_str(message.role).to_owned(),
            content: message.content.clone(),
        }
    }
}

impl From<&CompletionRequest> for OpenAiRequest {
    fn from(request: &CompletionRequest) -> Self {
        Self {
            model: request.model.clone(),
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            temperature: request.temperature,
        }
    }
}

impl From<OpenAiUsage> for Usage {
    fn from(usage: OpenAiUsage) -> Self {
        Self {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

impl TryFrom<OpenAiResponse> for CompletionResponse {
    type Error = LlmError;

    /// Take the first choice; an absent or empty one is `EmptyCompletion`
    fn try_from(response: OpenAiResponse) -> Result<Self, Self::Error> {
        let OpenAiResponse { model, choices, usage } = response;

        let choice = choices.into_iter().next().ok_or(LlmError::EmptyCompletion)?;

        let text = choice
            .message
            .content
            .filter(|content| !content.is_empty())
            .ok_or(LlmError::EmptyCompletion)?;

        Ok(Self {
            text,
            model,
            finish_reason: choice.finish_reason,
            usage: usage.map(Usage::from),
        })
    }
}

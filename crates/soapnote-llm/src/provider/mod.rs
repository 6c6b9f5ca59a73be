//! Completion provider abstraction

pub mod openai;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::types::{CompletionRequest, CompletionResponse};

/// Core provider trait for chat completion backends
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider name used in logs
    fn name(&self) -> &str;

    /// Send a completion request and return the first choice's text
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

#![allow(clippy::must_use_candidate)]

pub mod completion;
mod duration;
mod env;
pub mod health;
mod loader;
pub mod notes;
pub mod openai;
pub mod server;
pub mod telemetry;
pub mod transcription;

use indexmap::IndexMap;
use serde::Deserialize;

pub use completion::*;
pub use health::*;
pub use notes::*;
pub use openai::*;
pub use server::*;
pub use telemetry::TelemetryConfig;
pub use transcription::*;

/// Top-level soapnote configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Credential and endpoint shared by both outbound services
    #[serde(default)]
    pub openai: OpenAiConfig,
    /// Speech-to-text stage settings
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    /// Chat completion stage settings
    #[serde(default)]
    pub completion: CompletionConfig,
    /// Note endpoints keyed by name
    #[serde(default = "notes::default_notes")]
    pub notes: IndexMap<String, NoteConfig>,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            openai: OpenAiConfig::default(),
            transcription: TranscriptionConfig::default(),
            completion: CompletionConfig::default(),
            notes: notes::default_notes(),
            telemetry: None,
        }
    }
}

use std::time::Duration;

use serde::Deserialize;

/// Speech-to-text stage settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranscriptionConfig {
    /// Model identifier sent in the `model` form field
    #[serde(default = "default_model")]
    pub model: String,
    /// Bound on a single transcription call
    #[serde(default = "default_timeout", deserialize_with = "crate::duration::deserialize")]
    pub timeout: Duration,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            timeout: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "whisper-1".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout() -> Duration {
    Duration::from_secs(120)
}

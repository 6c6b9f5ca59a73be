use std::time::Duration;

use serde::Deserialize;

/// Chat completion stage settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompletionConfig {
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature, zero keeps note phrasing reproducible
    #[serde(default)]
    pub temperature: f64,
    /// Bound on a single completion call
    #[serde(default = "default_timeout", deserialize_with = "crate::duration::deserialize")]
    pub timeout: Duration,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: 0.0,
            timeout: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gpt-4".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout() -> Duration {
    Duration::from_secs(120)
}

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Credential and API root shared by the transcription and completion clients
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// Bearer token sent with every outbound call
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// API root; `/audio/transcriptions` and `/chat/completions` are appended
    #[serde(default = "default_base_url")]
    pub base_url: Url,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
        }
    }
}

#[allow(clippy::missing_panics_doc)]
pub fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("valid default URL")
}

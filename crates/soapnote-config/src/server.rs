use std::net::SocketAddr;

use serde::Deserialize;

use crate::health::HealthConfig;

/// Largest file the transcription API accepts
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 << 20;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    /// Upper bound on the multipart request body
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default)]
    pub health: HealthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            health: HealthConfig::default(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

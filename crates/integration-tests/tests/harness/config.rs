//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use secrecy::SecretString;
use soapnote_config::{Config, NoteConfig, ServerConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Defaults pointed at a mock backend
    pub fn new(base_url: &str) -> Self {
        let mut config = Config {
            server: ServerConfig {
                listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                ..ServerConfig::default()
            },
            ..Config::default()
        };
        config.openai.api_key = Some(SecretString::from("test-key"));
        config.openai.base_url = base_url.parse().expect("valid URL");

        Self { config }
    }

    /// Add another note endpoint with an inline template
    pub fn with_note(mut self, name: &str, path: &str, template: &str) -> Self {
        let mut note = NoteConfig::new(path);
        note.template = Some(template.to_owned());
        self.config.notes.insert(name.to_owned(), note);
        self
    }

    /// Change the multipart field read by the default endpoint
    pub fn with_field(mut self, field: &str) -> Self {
        if let Some(note) = self.config.notes.get_mut("soapnote") {
            note.field = field.to_owned();
        }
        self
    }

    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.config.server.max_upload_bytes = limit;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config, validated the same way the binary does
    pub fn build(self) -> Config {
        self.config.validate().expect("test config is valid");
        self.config
    }
}

use std::collections::HashSet;
use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes the result. Validation is left to the caller so that
    /// command-line overrides can be applied first.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, or TOML parsing fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable expansion or TOML parsing fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the credential is missing, a note endpoint is
    /// malformed, or a completion parameter is out of range
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_credential()?;
        self.validate_server()?;
        self.validate_notes()?;
        self.validate_completion()?;
        Ok(())
    }

    fn validate_credential(&self) -> anyhow::Result<()> {
        match self.openai.api_key {
            Some(ref key) if !key.expose_secret().trim().is_empty() => Ok(()),
            Some(_) => anyhow::bail!("openai.api_key must not be empty"),
            None => anyhow::bail!("openai.api_key is required (set it in the config file or via OPENAI_API_KEY)"),
        }
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        let health = &self.server.health;

        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/': {}", health.path);
        }

        Ok(())
    }

    fn validate_notes(&self) -> anyhow::Result<()> {
        if self.notes.is_empty() {
            anyhow::bail!("at least one note endpoint must be configured");
        }

        let mut seen = HashSet::new();

        for (name, note) in &self.notes {
            if !note.path.starts_with('/') {
                anyhow::bail!("note '{name}' path must start with '/': {}", note.path);
            }

            if self.server.health.enabled && note.path == self.server.health.path {
                anyhow::bail!("note '{name}' path collides with the health endpoint: {}", note.path);
            }

            if !seen.insert(note.path.as_str()) {
                anyhow::bail!("note '{name}' reuses path {}", note.path);
            }

            if note.field.is_empty() {
                anyhow::bail!("note '{name}' field must not be empty");
            }

            if note.template.is_some() && note.template_path.is_some() {
                anyhow::bail!("note '{name}' cannot set both template and template_path");
            }
        }

        Ok(())
    }

    fn validate_completion(&self) -> anyhow::Result<()> {
        let temperature = self.completion.temperature;

        if !(0.0..=2.0).contains(&temperature) {
            anyhow::bail!("completion.temperature must be between 0 and 2, got {temperature}");
        }

        Ok(())
    }
}

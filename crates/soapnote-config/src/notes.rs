use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;

/// A single note-generation endpoint
///
/// Each endpoint runs the same pipeline; only the route and the prompt
/// template differ. With neither `template` nor `template_path` set the
/// built-in SOAP note template is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoteConfig {
    /// Route the endpoint is mounted on
    pub path: String,
    /// Multipart field carrying the audio file
    #[serde(default = "default_field")]
    pub field: String,
    /// Inline prompt template
    #[serde(default)]
    pub template: Option<String>,
    /// Prompt template read from disk at startup
    #[serde(default)]
    pub template_path: Option<PathBuf>,
}

impl NoteConfig {
    /// Endpoint on `path` using the built-in template
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            field: default_field(),
            template: None,
            template_path: None,
        }
    }
}

fn default_field() -> String {
    "file".to_string()
}

pub(crate) fn default_notes() -> IndexMap<String, NoteConfig> {
    let mut notes = IndexMap::new();
    notes.insert("soapnote".to_string(), NoteConfig::new("/api/soapnote"));
    notes
}

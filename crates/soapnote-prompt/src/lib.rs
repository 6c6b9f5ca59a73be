//! Clinical note prompt rendering
//!
//! A [`NoteTemplate`] is a fixed block of instructions with exactly one
//! `{transcript}` slot. Rendering is a pure function of the template and the
//! transcript, so the same inputs always produce the same bytes.
//!
//! The transcript is inserted as-is. Nothing delimits or escapes it, which
//! means instructions spoken in the recording reach the model with the same
//! standing as the template text.

use std::path::{Path, PathBuf};

use indoc::indoc;
use thiserror::Error;

/// Marker replaced by the transcript
pub const TRANSCRIPT_PLACEHOLDER: &str = "{transcript}";

/// Built-in SOAP note instructions
pub const SOAP_NOTE_TEMPLATE: &str = indoc! {"
    You are a board-certified family medicine physician.
    Convert this transcript into a properly formatted SOAP note with:
    - Subjective
    - Objective
    - Assessment
    - Plan

    Also list tests, medications, referrals.
    Then provide a brief clinical analysis, a broad differential diagnosis, and next steps.

    {transcript}
"};

/// Template loading errors
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template has no {{transcript}} placeholder")]
    MissingPlaceholder,

    #[error("template has {0} {{transcript}} placeholders, expected exactly one")]
    RepeatedPlaceholder(usize),

    #[error("failed to read template {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A parsed prompt template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteTemplate {
    before: String,
    after: String,
}

impl NoteTemplate {
    /// Parse a template containing exactly one `{transcript}` placeholder
    ///
    /// # Errors
    ///
    /// Returns an error if the placeholder is absent or repeated
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        match source.matches(TRANSCRIPT_PLACEHOLDER).count() {
            0 => Err(TemplateError::MissingPlaceholder),
            1 => {
                let (before, after) = source
                    .split_once(TRANSCRIPT_PLACEHOLDER)
                    .ok_or(TemplateError::MissingPlaceholder)?;

                Ok(Self {
                    before: before.to_owned(),
                    after: after.to_owned(),
                })
            }
            n => Err(TemplateError::RepeatedPlaceholder(n)),
        }
    }

    /// Read and parse a template file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let source = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_owned(),
            source,
        })?;

        Self::parse(&source)
    }

    /// The built-in SOAP note template
    #[must_use]
    pub fn soap_note() -> Self {
        let (before, after) = SOAP_NOTE_TEMPLATE
            .split_once(TRANSCRIPT_PLACEHOLDER)
            .unwrap_or((SOAP_NOTE_TEMPLATE, ""));

        Self {
            before: before.to_owned(),
            after: after.to_owned(),
        }
    }

    /// Render the prompt for a transcript
    #[must_use]
    pub fn render(&self, transcript: &str) -> Prompt {
        let rendered = format!("{}{}{}", self.before, transcript.trim(), self.after);
        Prompt(rendered.trim().to_owned())
    }
}

impl Default for NoteTemplate {
    fn default() -> Self {
        Self::soap_note()
    }
}

/// Fully rendered instructions sent to the completion model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//! Parsed YAML manifests with checked key access.

use serde_yaml::{Mapping, Sequence, Value};
use std::path::Path;

/// Errors that can occur while loading a manifest.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The content is not valid UTF-8.
    #[error("invalid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// The content is not valid YAML.
    #[error("invalid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The content is valid YAML but the top level is not a mapping.
    #[error("document is not a mapping")]
    NotAMapping,
}

impl DocumentError {
    /// Returns true for failures caused by the file's content rather than
    /// by reading it.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Encoding(_) | Self::Parse(_) | Self::NotAMapping)
    }
}

/// A single YAML document whose top level is a mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Mapping,
}

impl Document {
    /// Parses a document from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Parse`] for malformed YAML (including
    /// multi-document streams) and [`DocumentError::NotAMapping`] when the
    /// top level is a scalar, a sequence, or empty.
    pub fn parse(content: &str) -> Result<Self, DocumentError> {
        match serde_yaml::from_str::<Value>(content)? {
            Value::Mapping(root) => Ok(Self { root }),
            _ => Err(DocumentError::NotAMapping),
        }
    }

    /// Reads and parses a document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Io`] if the file cannot be read and
    /// [`DocumentError::Encoding`] if it is not UTF-8, otherwise the errors
    /// of [`Document::parse`].
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let bytes = std::fs::read(path)?;
        Self::parse(std::str::from_utf8(&bytes)?)
    }

    /// Returns the value stored under a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// The `kind` value, if present.
    #[must_use]
    pub fn kind(&self) -> Option<&Value> {
        self.get("kind")
    }

    /// The `metadata.name` value. A missing or non-mapping `metadata`
    /// counts as having no name.
    #[must_use]
    pub fn metadata_name(&self) -> Option<&Value> {
        self.get("metadata")?.as_mapping()?.get("name")
    }

    /// The sequence stored under a top-level key, if it is one.
    #[must_use]
    pub fn sequence(&self, key: &str) -> Option<&Sequence> {
        self.get(key)?.as_sequence()
    }

    /// String items of the sequence under `key`. Absent keys, non-sequence
    /// values and non-string items all contribute nothing.
    #[must_use]
    pub fn string_list(&self, key: &str) -> Vec<&str> {
        self.sequence(key)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Renders a YAML value for use in a report message.
///
/// Strings are printed without quotes; other scalars use their YAML form.
#[must_use]
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map_or_else(|_| format!("{other:?}"), |s| s.trim_end().to_string()),
    }
}

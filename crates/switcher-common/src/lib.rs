use serde::{Deserialize, Serialize};

/// An (identifier, name) pair as held by the style index and the library snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRecord {
    pub id: String,
    pub name: String,
}

impl StyleRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A live paint style as the host hands it out.
///
/// `id` is only meaningful inside the current document session, `key` is the
/// portable handle a team library style can be imported by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintStyle {
    pub id: String,
    pub key: String,
    pub name: String,
}

impl PaintStyle {
    pub fn record(&self) -> StyleRecord {
        StyleRecord::new(self.id.clone(), self.name.clone())
    }
}

impl From<&PaintStyle> for StyleRecord {
    fn from(style: &PaintStyle) -> Self {
        style.record()
    }
}

/// Common error types
#[derive(thiserror::Error, Debug)]
pub enum SwitchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not import style '{key}': {reason}")]
    Import { key: String, reason: String },

    #[error("Cannot write to read-only node {node_id}")]
    ReadOnlyNode { node_id: String },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SwitchError>;

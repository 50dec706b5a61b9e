//! Error types for the field model and settings.
//!
//! Field errors are local usage errors: nothing here is transient, so
//! nothing is retried.

use crate::types::FieldId;
use thiserror::Error;

/// Errors raised by field model and selection operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// Non-positive dimensions, non-finite geometry or a value that does not
    /// fit the field type
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    /// Operation referenced an id the field manager does not hold
    #[error("field not found: {0}")]
    NotFound(FieldId),
}

impl EditorError {
    pub fn validation(reason: impl Into<String>) -> Self {
        EditorError::Validation {
            reason: reason.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, EditorError::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, EditorError::NotFound(_))
    }
}

/// Result type alias for field and selection operations
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur while loading or saving editor settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no configuration directory on this platform")]
    NoConfigDir,

    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),
}

/// Result type alias for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

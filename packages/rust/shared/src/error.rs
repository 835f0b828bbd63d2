//! Error types for resumemd.
//!
//! Library crates use [`ResumeError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all resumemd operations.
#[derive(Debug, thiserror::Error)]
pub enum ResumeError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A file declared a template no strategy is registered for.
    #[error("unknown template: {template}")]
    UnknownTemplate { template: String },

    /// An experience file name lacks the `<digits>_` order prefix.
    #[error("invalid experience file name '{name}': expected a numeric order prefix like '01_'")]
    InvalidFileName { name: String },

    /// Required inputs (contact file, experience files) are absent.
    #[error("missing required inputs: {}", missing.join(", "))]
    MissingInputs { missing: Vec<String> },

    /// JSON encoding or decoding of the output document failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ResumeError>;

impl ResumeError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an unknown-template error naming the offending template.
    pub fn unknown_template(template: impl Into<String>) -> Self {
        Self::UnknownTemplate {
            template: template.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is an I/O "not found" for some path.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

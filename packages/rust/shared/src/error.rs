//! Error types for todoexport.
//!
//! Library crates use [`TodoExportError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all todoexport operations.
#[derive(Debug, thiserror::Error)]
pub enum TodoExportError {
    /// The input file passed on the command line does not exist.
    #[error("missing required file {}", path.display())]
    MissingFile { path: PathBuf },

    /// The input could not be read as comma-delimited rows.
    #[error("csv error: {message}")]
    Csv { message: String },

    /// A note row appeared before any task row.
    #[error("note in data row {record} has no preceding task")]
    OrphanNote { record: usize },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Serialization error (TOML/JSON).
    #[error("serialization error: {0}")]
    Serialize(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TodoExportError>;

impl TodoExportError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a csv error from any displayable message.
    pub fn csv(msg: impl Into<String>) -> Self {
        Self::Csv {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

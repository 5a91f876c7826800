//! Error types for the typing pipeline.

use std::path::PathBuf;

use crate::dialect::Dialect;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating typed declarations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A style-sheet engine rejected its input.
    #[error("Failed to compile {dialect} source: {message}")]
    Compile { dialect: Dialect, message: String },

    /// Declaration generation failed.
    #[error("Failed to generate declarations: {message}")]
    Generation { message: String },

    /// File I/O error.
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed settings file.
    #[error("Invalid settings file '{path}': {message}")]
    Settings { path: PathBuf, message: String },

    /// Save-watcher error.
    #[cfg(feature = "watch")]
    #[error("Watch error: {0}")]
    Watch(String),
}

impl Error {
    /// Create a compile error.
    pub fn compile(dialect: Dialect, message: impl Into<String>) -> Self {
        Self::Compile {
            dialect,
            message: message.into(),
        }
    }

    /// Create a generation error.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a settings error.
    pub fn settings(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Settings {
            path: path.into(),
            message: message.into(),
        }
    }
}

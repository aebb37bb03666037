//! Error types for the glossary generator.
//!
//! Library crates use [`GlossaryError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all glossary operations.
#[derive(Debug, thiserror::Error)]
pub enum GlossaryError {
    /// Filesystem I/O error (input unreadable, output unwritable).
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A required argument (glossary or entry) was not supplied.
    #[error("required argument `{argument}` is absent")]
    NullArgument { argument: &'static str },

    /// A term could not be compiled into a whole-word matcher.
    #[error("cannot build matcher for term {term:?}: {message}")]
    Pattern { term: String, message: String },

    /// Configuration loading or parsing error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Invalid user input (paths, flags).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, GlossaryError>;

impl GlossaryError {
    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Report a missing required argument by name.
    pub fn null_argument(argument: &'static str) -> Self {
        Self::NullArgument { argument }
    }

    /// Create a pattern error for a term that failed to compile.
    pub fn pattern(term: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Pattern {
            term: term.into(),
            message: message.to_string(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }
}

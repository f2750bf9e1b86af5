//! Error types for cascade-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading a task file or expanding its files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure, with the path that was being read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load: includes file path and line context from serde_yaml.
    #[error("failed to parse task file at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A target entry could not be read as a target declaration.
    #[error("invalid target '{name}' in {path}: {source}")]
    InvalidTarget {
        name: String,
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A `files` mapping entry was not `dest: src` with string keys.
    #[error("invalid files entry in target: {message}")]
    InvalidFiles { message: String },

    /// The requested target is not declared in the task file.
    #[error("target '{name}' not found (available: {available})")]
    TargetNotFound { name: String, available: String },

    /// A source pattern is not a valid glob.
    #[error("invalid source pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Convenience constructor for [`ConfigError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}

//! Error types for cascade-pipeline.

use std::path::PathBuf;

use thiserror::Error;

use cascade_core::ConfigError;
use cascade_processor::{BuildError, ProcessError};

/// Errors that abort a run. Everything else is reported and counted.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The processor rejected a source file.
    #[error("failed to process {path}")]
    Process {
        path: PathBuf,
        #[source]
        source: ProcessError,
    },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Task file or file declaration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A processor declaration could not be built.
    #[error("processor error: {0}")]
    Build(#[from] BuildError),
}

impl PipelineError {
    /// The processor's syntax error, when that is what stopped the run.
    pub fn syntax(&self) -> Option<&ProcessError> {
        match self {
            PipelineError::Process { source, .. } if source.is_syntax() => Some(source),
            _ => None,
        }
    }
}

/// Convenience constructor for [`PipelineError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> PipelineError {
    PipelineError::Io {
        path: path.into(),
        source,
    }
}

//! Error types for cascade-processor.

use thiserror::Error;

/// Why a stylesheet could not be processed.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The input is not valid CSS. `excerpt` shows the offending line.
    #[error("{file}:{line}:{column}: {message}\n\n{excerpt}")]
    Syntax {
        file: String,
        line: u32,
        column: u32,
        message: String,
        excerpt: String,
    },

    /// Any other failure inside the processor chain.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl ProcessError {
    pub fn other(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        ProcessError::Other(cause.into())
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, ProcessError::Syntax { .. })
    }
}

/// A processor declaration that cannot be turned into a processor.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("unknown processor '{name}' (known: {known})")]
    Unknown { name: String, known: String },

    #[error("invalid options for processor '{name}': {message}")]
    Options { name: String, message: String },
}

//! The processor contract seen by the pipeline.

use std::fmt;
use std::path::PathBuf;

use crate::error::ProcessError;

/// Turns one stylesheet into its processed form.
///
/// Implementations are called once per source file, strictly one at a time.
pub trait Transform {
    fn transform(
        &self,
        input: &str,
        options: &TransformOptions,
    ) -> Result<ProcessingResult, ProcessError>;
}

/// Per-file processing options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Logical input path, used in maps, warnings and errors.
    pub from: PathBuf,
    /// Logical output path, used for the map `file` and default annotation.
    pub to: PathBuf,
    /// `None` disables source maps.
    pub map: Option<MapRequest>,
    /// Recover from invalid rules instead of failing.
    pub safe: bool,
}

impl TransformOptions {
    pub fn new(from: PathBuf, to: PathBuf) -> Self {
        Self {
            from,
            to,
            map: None,
            safe: false,
        }
    }
}

/// What the annotation comment at the end of the stylesheet says.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnnotationComment {
    /// `<basename(to)>.map`
    #[default]
    Default,
    Suppressed,
    /// Literal URL, already relative to the stylesheet.
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapRequest {
    /// Embed the map as a data URI instead of returning it.
    pub inline: bool,
    pub sources_content: bool,
    pub annotation: AnnotationComment,
    /// Directory the map's `sources` are made relative to (where the map lives).
    pub sources_root: PathBuf,
    /// Previous map to chain from.
    pub prev: Option<PreviousMap>,
}

/// Map JSON produced by an earlier build step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviousMap {
    pub json: String,
    /// Directory the map was read from; its `sources` resolve against it.
    pub dir: PathBuf,
}

/// Output of one [`Transform::transform`] call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessingResult {
    pub css: String,
    /// Map JSON; only set for non-inline maps.
    pub map: Option<String>,
    pub warnings: Vec<Warning>,
}

/// A non-fatal issue reported while processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub plugin: Option<String>,
    pub file: Option<PathBuf>,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub text: String,
}

impl Warning {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            plugin: None,
            file: None,
            line: None,
            column: None,
            text: text.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(plugin) = &self.plugin {
            write!(f, "{plugin}: ")?;
        }
        if let Some(file) = &self.file {
            write!(f, "{}", file.display())?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
                if let Some(column) = self.column {
                    write!(f, ":{column}")?;
                }
            }
            f.write_str(": ")?;
        }
        f.write_str(&self.text)
    }
}

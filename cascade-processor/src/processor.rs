//! The [`Processor`] plugin trait and the per-run [`Context`] it writes to.

use std::path::PathBuf;

use lightningcss::stylesheet::StyleSheet;
use lightningcss::targets::Targets;

use crate::error::ProcessError;
use crate::transform::Warning;

/// One composable CSS-to-CSS step of a [`crate::Chain`].
pub trait Processor: Send + Sync {
    /// Registry name, also used as the plugin label of warnings.
    fn name(&self) -> &str;

    fn process(&self, sheet: &mut StyleSheet<'_, '_>, ctx: &mut Context)
        -> Result<(), ProcessError>;
}

/// State shared by the processors of one chain run.
#[derive(Debug, Default)]
pub struct Context {
    /// Input path, attached to warnings.
    pub from: PathBuf,
    /// Browser targets used for prefixing and when printing.
    pub targets: Targets,
    /// Print compact output.
    pub minify: bool,
    warnings: Vec<Warning>,
}

impl Context {
    pub fn new(from: PathBuf) -> Self {
        Self {
            from,
            ..Self::default()
        }
    }

    /// Record a warning located in the input file.
    pub fn warn(&mut self, plugin: &str, text: impl Into<String>, line: u32, column: u32) {
        self.warnings.push(Warning {
            plugin: Some(plugin.to_string()),
            file: Some(self.from.clone()),
            line: Some(line),
            column: Some(column),
            text: text.into(),
        });
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

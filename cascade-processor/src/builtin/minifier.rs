use lightningcss::stylesheet::{MinifyOptions, StyleSheet};

use crate::error::ProcessError;
use crate::processor::{Context, Processor};

/// Merges and shortens rules, then asks the printer for compact output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Minifier;

impl Processor for Minifier {
    fn name(&self) -> &str {
        "minifier"
    }

    fn process(&self, sheet: &mut StyleSheet<'_, '_>, ctx: &mut Context) -> Result<(), ProcessError> {
        sheet
            .minify(MinifyOptions {
                targets: ctx.targets,
                ..MinifyOptions::default()
            })
            .map_err(|e| ProcessError::other(format!("{}: {e}", self.name())))?;
        ctx.minify = true;
        Ok(())
    }
}

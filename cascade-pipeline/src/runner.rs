//! [`Runner`]: processes file sets one source file at a time.
//!
//! Per source file:
//!
//! 1. Read the source.
//! 2. Resolve its outputs and build the map request.
//! 3. Transform.
//! 4. Report warnings (each one counts as an issue).
//! 5. Write the stylesheet (unless `writeDest` is off), then the map and
//!    the diff.
//!
//! A processor error or an I/O failure stops the run; files already written
//! stay on disk.

use std::path::{Path, PathBuf};

use cascade_core::FileSet;
use cascade_processor::{Transform, TransformOptions};

use crate::config::ProcessingConfig;
use crate::diff::create_patch;
use crate::error::{io_err, PipelineError};
use crate::outputs::{map_request, OutputPaths};
use crate::report::Reporter;
use crate::tally::{RunSummary, Tally};
use crate::writer::write_output;

pub struct Runner<'a> {
    config: &'a ProcessingConfig,
    transform: &'a dyn Transform,
    reporter: &'a dyn Reporter,
}

impl<'a> Runner<'a> {
    /// Runner using the configuration's own processor chain.
    pub fn new(config: &'a ProcessingConfig, reporter: &'a dyn Reporter) -> Self {
        Self {
            config,
            transform: &config.processors,
            reporter,
        }
    }

    /// Replace the processor chain with another [`Transform`].
    pub fn with_transform(mut self, transform: &'a dyn Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn run(&self, file_sets: &[FileSet]) -> Result<RunSummary, PipelineError> {
        let mut tally = Tally::default();
        for set in file_sets {
            self.run_set(set, &mut tally)?;
        }
        Ok(RunSummary {
            tally,
            write_dest: self.config.write_dest,
            fail_on_warning: self.config.fail_on_warning,
        })
    }

    fn run_set(&self, set: &FileSet, tally: &mut Tally) -> Result<(), PipelineError> {
        let sources: Vec<&PathBuf> = set
            .sources
            .iter()
            .filter(|path| {
                let found = path.is_file();
                if !found {
                    self.reporter
                        .warn(&format!("Source file {} not found.", path.display()));
                }
                found
            })
            .collect();

        if sources.is_empty() {
            self.reporter.error("No source files were found.");
            return Ok(());
        }

        if let (Some(dest), true) = (&set.dest, sources.len() > 1) {
            self.reporter.warn(&format!(
                "{} source files share the destination {}; each one overwrites the last.",
                sources.len(),
                dest.display()
            ));
        }

        for source in sources {
            self.process_file(source, set.dest.as_deref(), tally)?;
        }
        Ok(())
    }

    fn process_file(
        &self,
        source: &Path,
        dest: Option<&Path>,
        tally: &mut Tally,
    ) -> Result<(), PipelineError> {
        let input = std::fs::read_to_string(source).map_err(|e| io_err(source, e))?;
        let outputs = OutputPaths::resolve(source, dest, &self.config.map, &self.config.diff);

        let options = TransformOptions {
            from: source.to_path_buf(),
            to: outputs.dest.clone(),
            map: map_request(&self.config.map, source, &outputs)?,
            safe: self.config.safe,
        };

        tracing::debug!(
            "processing {} -> {}",
            source.display(),
            outputs.dest.display()
        );
        let result = self
            .transform
            .transform(&input, &options)
            .map_err(|err| PipelineError::Process {
                path: source.to_path_buf(),
                source: err,
            })?;

        for warning in &result.warnings {
            self.reporter.error(&warning.to_string());
        }
        tally.issues += result.warnings.len();

        if self.config.write_dest {
            write_output(&outputs.dest, &result.css)?;
            self.info(&format!("File {} created.", outputs.dest.display()));
        }
        tally.sheets += 1;

        if let Some(map) = &result.map {
            write_output(&outputs.map, map)?;
            self.info(&format!("File {} created (source map).", outputs.map.display()));
            tally.maps += 1;
        }

        if let Some(diff_path) = &outputs.diff {
            let patch = create_patch(&outputs.dest.to_string_lossy(), &input, &result.css);
            write_output(diff_path, &patch)?;
            self.info(&format!("File {} created (diff).", diff_path.display()));
            tally.diffs += 1;
        }

        Ok(())
    }

    fn info(&self, message: &str) {
        if !self.config.silent {
            self.reporter.info(message);
        }
    }
}

//! Task-file entrypoint used by the CLI.

use cascade_core::{files, TargetName, TaskFile};

use crate::config::ProcessingConfig;
use crate::error::PipelineError;
use crate::report::Reporter;
use crate::runner::Runner;
use crate::tally::RunSummary;

/// Outcome of one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRun {
    pub target: TargetName,
    pub summary: RunSummary,
}

/// Run the named targets (all of them when `names` is empty) in order.
///
/// File globs are resolved against the current directory. A target that
/// fails its warning check is returned last; later targets are not run.
pub fn run_targets(
    task: &TaskFile,
    names: &[String],
    reporter: &dyn Reporter,
) -> Result<Vec<TargetRun>, PipelineError> {
    let mut runs = Vec::new();
    for (name, target) in task.select(names)? {
        tracing::debug!("running target {name}");
        let config = ProcessingConfig::from_raw(&task.options_for(target))?;
        let file_sets = files::expand_all(&target.file_specs()?)?;
        let summary = Runner::new(&config, reporter).run(&file_sets)?;

        let passed = summary.passed();
        runs.push(TargetRun {
            target: name.clone(),
            summary,
        });
        if !passed {
            break;
        }
    }
    Ok(runs)
}

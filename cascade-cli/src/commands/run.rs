//! `cascade run`: process targets and print their summaries.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use cascade_core::TaskFile;
use cascade_pipeline::pipeline::{self, TargetRun};
use cascade_pipeline::TracingReporter;

/// Arguments for `cascade run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Targets to run, in order. Runs every target when omitted.
    pub targets: Vec<String>,
}

impl RunArgs {
    pub fn run(self, task: &TaskFile) -> Result<()> {
        let runs = pipeline::run_targets(task, &self.targets, &TracingReporter)
            .context("cascade run failed")?;

        if runs.is_empty() {
            println!("No targets defined.");
            return Ok(());
        }
        for run in &runs {
            print_run(run);
        }

        if let Some(failed) = runs.iter().find(|r| !r.summary.passed()) {
            bail!(
                "target '{}' reported {} issue(s) and failOnWarning is set",
                failed.target,
                failed.summary.tally.issues
            );
        }
        Ok(())
    }
}

fn print_run(run: &TargetRun) {
    let mark = if run.summary.passed() {
        "✓".green()
    } else {
        "✗".red()
    };
    println!("{mark} '{}'", run.target);
    for line in run.summary.lines() {
        println!("  {line}");
    }
}

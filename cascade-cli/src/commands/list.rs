//! `cascade list`: show the targets of the task file.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use cascade_core::{MapMode, TaskFile};

/// Arguments for `cascade list`.
#[derive(Args, Debug)]
pub struct ListArgs {}

impl ListArgs {
    pub fn run(self, task: &TaskFile) -> Result<()> {
        if task.targets.is_empty() {
            println!("No targets defined.");
            return Ok(());
        }

        for (name, target) in &task.targets {
            let options = task.options_for(target).resolve();
            let processors: Vec<&str> = options.processors.iter().map(|p| p.name()).collect();
            let processors = if processors.is_empty() {
                "(none)".to_string()
            } else {
                processors.join(", ")
            };
            let map = match options.map {
                MapMode::Disabled => "off",
                MapMode::Inline(_) => "inline",
                MapMode::SeparateFile(_) => "file",
            };

            println!("{}", name.to_string().bold());
            println!("  processors: {processors}");
            println!("  map: {map}");
            for spec in target.file_specs()? {
                let dest = spec
                    .dest
                    .as_ref()
                    .map(|d| d.display().to_string())
                    .unwrap_or_else(|| "(in place)".to_string());
                println!("  {} -> {dest}", spec.src.patterns().join(", "));
            }
        }
        Ok(())
    }
}

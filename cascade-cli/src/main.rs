//! Cascade: run stylesheets through configured CSS processors.
//!
//! # Usage
//!
//! ```text
//! cascade [-c cascade.yaml] [-v] run [TARGET...]
//! cascade [-c cascade.yaml] list
//! ```
//!
//! Paths in the task file are resolved from the task file's directory.

mod commands;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use cascade_core::config::DEFAULT_TASK_FILE;
use cascade_core::TaskFile;
use commands::{list::ListArgs, run::RunArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "cascade",
    version,
    about = "Process stylesheets with configurable CSS processors",
    long_about = None,
)]
struct Cli {
    /// Task file to load.
    #[arg(short, long, global = true, default_value = DEFAULT_TASK_FILE)]
    config: PathBuf,

    /// Log debug output (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Process the named targets, or every target.
    Run(RunArgs),

    /// List targets with their processors and file declarations.
    List(ListArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let task = load_task_file(&cli.config)?;
    match cli.command {
        Commands::Run(args) => args.run(&task),
        Commands::List(args) => args.run(&task),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Load the task file and move into its directory.
fn load_task_file(path: &Path) -> Result<TaskFile> {
    let task = TaskFile::load(path)
        .with_context(|| format!("could not load task file {}", path.display()))?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::env::set_current_dir(dir)
            .with_context(|| format!("could not enter {}", dir.display()))?;
    }
    Ok(task)
}

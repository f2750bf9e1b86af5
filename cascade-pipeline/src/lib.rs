//! # cascade-pipeline
//!
//! Runs stylesheets through a processor and writes the results.
//!
//! [`Runner`] processes expanded [`cascade_core::FileSet`]s one file at a time
//! and returns a [`RunSummary`]; [`pipeline::run_targets`] does the same for
//! targets of a task file, resolving their options and files first.

pub mod config;
pub mod diff;
pub mod error;
pub mod outputs;
pub mod pipeline;
pub mod report;
pub mod runner;
pub mod tally;
pub mod writer;

pub use config::{ProcessingConfig, ProcessorSource};
pub use error::PipelineError;
pub use report::{Level, MemoryReporter, Reporter, TracingReporter};
pub use runner::Runner;
pub use tally::{RunSummary, Tally};

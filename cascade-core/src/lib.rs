//! Cascade core library: the task-file model and everything resolved from it.
//!
//! Public API surface:
//! - [`types`]: target names, file declarations and [`FileSet`]
//! - [`options`]: raw options as written in `cascade.yaml` and their resolution
//! - [`config`]: loading a [`TaskFile`]
//! - [`files`]: glob expansion of file declarations into file sets
//! - [`error`]: [`ConfigError`]

pub mod config;
pub mod error;
pub mod files;
pub mod options;
pub mod types;

pub use config::TaskFile;
pub use error::ConfigError;
pub use options::{
    AnnotationSpec, DiffMode, MapMode, MapSettings, ProcessorSpec, RawOptions, ResolvedOptions,
};
pub use types::{FileSet, FileSpec, FilesSpec, OneOrMany, Target, TargetName};

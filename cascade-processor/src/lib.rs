//! # cascade-processor
//!
//! The stylesheet processor behind cascade: a [`Chain`] of [`Processor`]s
//! running on top of `lightningcss`, exposed to the pipeline through the
//! [`Transform`] trait.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use cascade_processor::{builtin::Minifier, Chain, Transform, TransformOptions};
//!
//! fn minify(css: &str) -> Option<String> {
//!     let chain = Chain::new(vec![Box::new(Minifier)]);
//!     let options = TransformOptions::new(PathBuf::from("a.css"), PathBuf::from("a.min.css"));
//!     chain.transform(css, &options).ok().map(|result| result.css)
//! }
//! ```

pub mod builtin;
pub mod chain;
pub mod error;
pub mod excerpt;
pub mod paths;
pub mod processor;
pub mod registry;
pub mod source_map;
pub mod transform;

pub use chain::Chain;
pub use error::{BuildError, ProcessError};
pub use processor::{Context, Processor};
pub use transform::{
    AnnotationComment, MapRequest, PreviousMap, ProcessingResult, Transform, TransformOptions,
    Warning,
};

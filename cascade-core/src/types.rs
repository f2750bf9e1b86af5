//! Domain types for cascade task files.
//!
//! All path fields use `PathBuf`. File declarations are kept exactly as they
//! were written (patterns, not paths) until [`crate::files`] expands them.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::options::RawOptions;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a target declared in the task file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetName(pub String);

impl fmt::Display for TargetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TargetName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TargetName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// File declarations
// ---------------------------------------------------------------------------

/// `src: a.css` or `src: [a.css, "lib/*.css"]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// The patterns in declaration order.
    pub fn patterns(&self) -> &[String] {
        match self {
            OneOrMany::One(pattern) => std::slice::from_ref(pattern),
            OneOrMany::Many(patterns) => patterns,
        }
    }
}

impl From<&str> for OneOrMany {
    fn from(s: &str) -> Self {
        OneOrMany::One(s.to_owned())
    }
}

/// A single `{ src, dest }` declaration, before glob expansion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileSpec {
    pub src: OneOrMany,
    #[serde(default)]
    pub dest: Option<PathBuf>,
}

/// The `files:` key of a target: an array of `{ src, dest }` entries or a
/// `dest: src` mapping.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FilesSpec {
    List(Vec<FileSpec>),
    Map(serde_yaml::Mapping),
}

impl FilesSpec {
    /// Normalise both forms into `FileSpec`s, keeping declaration order.
    pub fn to_specs(&self) -> Result<Vec<FileSpec>, ConfigError> {
        match self {
            FilesSpec::List(specs) => Ok(specs.clone()),
            FilesSpec::Map(mapping) => mapping
                .iter()
                .map(|(dest, src)| {
                    let dest = dest.as_str().ok_or_else(|| ConfigError::InvalidFiles {
                        message: format!("destination {dest:?} is not a string"),
                    })?;
                    let src: OneOrMany =
                        serde_yaml::from_value(src.clone()).map_err(|e| {
                            ConfigError::InvalidFiles {
                                message: format!("sources for '{dest}': {e}"),
                            }
                        })?;
                    Ok(FileSpec {
                        src,
                        dest: Some(PathBuf::from(dest)),
                    })
                })
                .collect(),
        }
    }
}

/// One named target of the task.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Target {
    #[serde(default)]
    pub options: RawOptions,
    /// Compact form: target-level `src` ...
    #[serde(default)]
    pub src: Option<OneOrMany>,
    /// ... with an optional target-level `dest`.
    #[serde(default)]
    pub dest: Option<PathBuf>,
    #[serde(default)]
    pub files: Option<FilesSpec>,
}

impl Target {
    /// Every file declaration of this target: the compact `src`/`dest` pair
    /// first, then the `files` entries.
    pub fn file_specs(&self) -> Result<Vec<FileSpec>, ConfigError> {
        let mut specs = Vec::new();
        if let Some(src) = &self.src {
            specs.push(FileSpec {
                src: src.clone(),
                dest: self.dest.clone(),
            });
        }
        if let Some(files) = &self.files {
            specs.extend(files.to_specs()?);
        }
        Ok(specs)
    }
}

// ---------------------------------------------------------------------------
// Expanded file sets
// ---------------------------------------------------------------------------

/// Sources (already expanded, possibly missing on disk) and their shared
/// destination. Without a destination every source is rewritten in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileSet {
    pub sources: Vec<PathBuf>,
    pub dest: Option<PathBuf>,
}

impl FileSet {
    pub fn new<I, P>(sources: I, dest: Option<PathBuf>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            dest,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

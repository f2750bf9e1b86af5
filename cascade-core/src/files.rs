//! Expansion of file declarations into [`FileSet`]s.
//!
//! Patterns are applied in order:
//! - a plain path (no `*`, `?` or `[`) is kept as written, even when missing,
//!   so the pipeline can report it;
//! - a glob adds its matching files in sorted order;
//! - `!pattern` removes every earlier source it matches.
//!
//! Duplicates keep their first position.

use std::path::PathBuf;

use glob::Pattern;

use crate::error::ConfigError;
use crate::types::{FileSet, FileSpec};

/// Expand one declaration.
pub fn expand(spec: &FileSpec) -> Result<FileSet, ConfigError> {
    let mut sources: Vec<PathBuf> = Vec::new();

    for pattern in spec.src.patterns() {
        if let Some(negated) = pattern.strip_prefix('!') {
            let matcher = Pattern::new(negated).map_err(|source| ConfigError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
            sources.retain(|path| !matcher.matches_path(path));
            continue;
        }

        if !is_glob(pattern) {
            push_unique(&mut sources, PathBuf::from(pattern));
            continue;
        }

        let entries = glob::glob(pattern).map_err(|source| ConfigError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        let mut matched = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => matched.push(path),
                Ok(_) => {}
                Err(err) => tracing::debug!("skipping unreadable match for {pattern}: {err}"),
            }
        }
        matched.sort();
        for path in matched {
            push_unique(&mut sources, path);
        }
    }

    Ok(FileSet {
        sources,
        dest: spec.dest.clone(),
    })
}

/// Expand every declaration, keeping their order.
pub fn expand_all(specs: &[FileSpec]) -> Result<Vec<FileSet>, ConfigError> {
    specs.iter().map(expand).collect()
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn push_unique(sources: &mut Vec<PathBuf>, path: PathBuf) {
    if !sources.contains(&path) {
        sources.push(path);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

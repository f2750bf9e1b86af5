//! Task file loading.
//!
//! # Layout
//!
//! ```text
//! options:            # task-level options, shared by every target
//!   map: true
//! targets:
//!   dist:             # one entry per target, run in declaration order
//!     options: { ... }
//!     src: styles/a.css
//!     dest: build/a.css
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{io_err, ConfigError};
use crate::options::RawOptions;
use crate::types::{Target, TargetName};

/// File name looked up when no task file is given.
pub const DEFAULT_TASK_FILE: &str = "cascade.yaml";

#[derive(Debug, Deserialize)]
struct RawTaskFile {
    #[serde(default)]
    options: RawOptions,
    #[serde(default)]
    targets: serde_yaml::Mapping,
}

/// A parsed task file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFile {
    pub options: RawOptions,
    /// Targets in declaration order.
    pub targets: Vec<(TargetName, Target)>,
}

impl TaskFile {
    /// Read and parse the task file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        Self::parse(&contents, path)
    }

    /// Parse task file contents; `path` is only used for error messages.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let raw: RawTaskFile = serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut targets = Vec::with_capacity(raw.targets.len());
        for (key, value) in raw.targets {
            let name = match &key {
                serde_yaml::Value::String(s) => s.clone(),
                other => serde_yaml::to_string(other)
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default(),
            };
            let target = if value.is_null() {
                Target::default()
            } else {
                serde_yaml::from_value(value).map_err(|e| ConfigError::InvalidTarget {
                    name: name.clone(),
                    path: path.to_path_buf(),
                    source: e,
                })?
            };
            targets.push((TargetName::from(name), target));
        }

        Ok(Self {
            options: raw.options,
            targets,
        })
    }

    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets
            .iter()
            .find(|(n, _)| n.0 == name)
            .map(|(_, target)| target)
    }

    /// Targets to run: the named ones in the order given, or every target when
    /// `names` is empty.
    pub fn select(&self, names: &[String]) -> Result<Vec<(&TargetName, &Target)>, ConfigError> {
        if names.is_empty() {
            return Ok(self.targets.iter().map(|(n, t)| (n, t)).collect());
        }

        names
            .iter()
            .map(|wanted| {
                self.targets
                    .iter()
                    .find(|(n, _)| &n.0 == wanted)
                    .map(|(n, t)| (n, t))
                    .ok_or_else(|| ConfigError::TargetNotFound {
                        name: wanted.clone(),
                        available: self.target_names().join(", "),
                    })
            })
            .collect()
    }

    /// Target options layered over the task-level options.
    pub fn options_for(&self, target: &Target) -> RawOptions {
        target.options.merged_over(&self.options)
    }

    pub fn target_names(&self) -> Vec<String> {
        self.targets.iter().map(|(n, _)| n.0.clone()).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::MapMode;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
options:
  silent: true
targets:
  dist:
    options:
      map:
        inline: false
    src: test/fixtures/a.css
    dest: tmp/a.css
  lint:
    options:
      silent: false
      failOnWarning: true
    files:
      - src: ["styles/*.css"]
  empty:
"#;

    #[test]
    fn targets_keep_declaration_order() {
        let file = TaskFile::parse(SAMPLE, Path::new("cascade.yaml")).expect("parse");
        assert_eq!(file.target_names(), ["dist", "lint", "empty"]);
    }

    #[test]
    fn empty_target_is_default() {
        let file = TaskFile::parse(SAMPLE, Path::new("cascade.yaml")).expect("parse");
        assert_eq!(file.target("empty"), Some(&Target::default()));
    }

    #[test]
    fn target_options_layer_over_task_options() {
        let file = TaskFile::parse(SAMPLE, Path::new("cascade.yaml")).expect("parse");

        let dist = file.options_for(file.target("dist").expect("dist")).resolve();
        assert!(dist.silent);
        assert!(matches!(dist.map, MapMode::SeparateFile(_)));

        let lint = file.options_for(file.target("lint").expect("lint")).resolve();
        assert!(!lint.silent);
        assert!(lint.fail_on_warning);
    }

    #[test]
    fn select_all_when_no_names_given() {
        let file = TaskFile::parse(SAMPLE, Path::new("cascade.yaml")).expect("parse");
        assert_eq!(file.select(&[]).expect("select").len(), 3);
    }

    #[test]
    fn select_follows_requested_order() {
        let file = TaskFile::parse(SAMPLE, Path::new("cascade.yaml")).expect("parse");
        let picked = file
            .select(&["lint".to_string(), "dist".to_string()])
            .expect("select");
        assert_eq!(picked[0].0 .0, "lint");
        assert_eq!(picked[1].0 .0, "dist");
    }

    #[test]
    fn unknown_target_lists_available_ones() {
        let file = TaskFile::parse(SAMPLE, Path::new("cascade.yaml")).expect("parse");
        let err = file.select(&["nope".to_string()]).expect_err("missing");
        let message = err.to_string();
        assert!(message.contains("nope"));
        assert!(message.contains("dist, lint, empty"));
    }

    #[test]
    fn malformed_yaml_reports_path() {
        let err = TaskFile::parse("targets: [", Path::new("broken.yaml")).expect_err("parse");
        assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == &PathBuf::from("broken.yaml")));
    }

    #[test]
    fn invalid_target_is_named() {
        let err = TaskFile::parse("targets:\n  bad: 42\n", Path::new("cascade.yaml"))
            .expect_err("invalid");
        assert!(matches!(err, ConfigError::InvalidTarget { ref name, .. } if name == "bad"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = TempDir::new().expect("tmp");
        let err = TaskFile::load(&dir.path().join(DEFAULT_TASK_FILE)).expect_err("missing");
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = TempDir::new().expect("tmp");
        let path = dir.path().join(DEFAULT_TASK_FILE);
        std::fs::write(&path, SAMPLE).expect("write");
        let file = TaskFile::load(&path).expect("load");
        assert_eq!(file.targets.len(), 3);
    }
}

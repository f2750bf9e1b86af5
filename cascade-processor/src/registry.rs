//! Builds processors from their task-file declarations.

use cascade_core::ProcessorSpec;
use serde_yaml::Value;

use crate::builtin::{ImportantLint, Minifier, Prefixer};
use crate::error::BuildError;
use crate::processor::Processor;

/// Registry names, in documentation order.
pub const KNOWN: &[&str] = &["prefixer", "minifier", "important-lint"];

/// Build one processor.
pub fn build(spec: &ProcessorSpec) -> Result<Box<dyn Processor>, BuildError> {
    let name = spec.name();
    match name {
        "prefixer" => {
            let queries = browser_queries(spec.options()).map_err(|message| {
                BuildError::Options {
                    name: name.to_string(),
                    message,
                }
            })?;
            let prefixer = Prefixer::from_queries(&queries).map_err(|message| {
                BuildError::Options {
                    name: name.to_string(),
                    message,
                }
            })?;
            Ok(Box::new(prefixer))
        }
        "minifier" => Ok(Box::new(Minifier)),
        "important-lint" => Ok(Box::new(ImportantLint)),
        other => Err(BuildError::Unknown {
            name: other.to_string(),
            known: KNOWN.join(", "),
        }),
    }
}

/// Build every processor, keeping declaration order.
pub fn build_all(specs: &[ProcessorSpec]) -> Result<Vec<Box<dyn Processor>>, BuildError> {
    specs.iter().map(build).collect()
}

/// `browsers: "safari 8"` or `browsers: [safari 8, chrome 49]`.
fn browser_queries(options: &Value) -> Result<Vec<String>, String> {
    match options.get("browsers") {
        Some(Value::String(query)) => Ok(vec![query.clone()]),
        Some(Value::Sequence(items)) if !items.is_empty() => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| format!("browser entries must be strings, got {item:?}"))
            })
            .collect(),
        _ => Err("expected `browsers` with at least one \"<browser> <version>\" entry".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(yaml: &str) -> ProcessorSpec {
        serde_yaml::from_str(yaml).expect("spec")
    }

    #[test]
    fn builds_known_processors_in_order() {
        let processors = build_all(&[
            spec("minifier"),
            spec("important-lint"),
            spec("{name: prefixer, options: {browsers: [safari 8]}}"),
        ])
        .expect("build");
        let names: Vec<&str> = processors.iter().map(|p| p.name()).collect();
        assert_eq!(names, ["minifier", "important-lint", "prefixer"]);
    }

    #[test]
    fn prefixer_accepts_single_query() {
        assert!(build(&spec("{name: prefixer, options: {browsers: chrome 49}}")).is_ok());
    }

    #[test]
    fn prefixer_requires_browsers() {
        let err = build(&spec("prefixer")).err().expect("missing browsers");
        assert!(matches!(err, BuildError::Options { .. }));
    }

    #[test]
    fn prefixer_rejects_non_string_entries() {
        let err = build(&spec("{name: prefixer, options: {browsers: [8]}}"))
            .err()
            .expect("bad entry");
        assert!(err.to_string().contains("must be strings"));
    }

    #[test]
    fn unknown_processor_lists_known_names() {
        let err = build(&spec("autoprefixer")).err().expect("unknown");
        let message = err.to_string();
        assert!(message.contains("autoprefixer"));
        assert!(message.contains("prefixer, minifier, important-lint"));
    }
}

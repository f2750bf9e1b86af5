//! Raw task options and their resolution.
//!
//! Options are kept untyped ([`serde_yaml::Value`]) until [`RawOptions::resolve`]
//! runs, so a value of the wrong shape falls back to its default instead of
//! failing the whole task file. Resolution never errors.
//!
//! | key             | default | accepted shapes                               |
//! |-----------------|---------|-----------------------------------------------|
//! | `processors`    | `[]`    | list of names or `{ name, options }`          |
//! | `map`           | `false` | bool, or `{ inline, annotation, sourcesContent, prev }` |
//! | `diff`          | `false` | bool, or explicit diff path                   |
//! | `writeDest`     | `true`  | bool                                          |
//! | `failOnWarning` | `false` | bool                                          |
//! | `silent`        | `false` | bool                                          |
//! | `safe`          | `false` | bool                                          |

use std::path::PathBuf;

use serde::Deserialize;
use serde_yaml::Value;

// ---------------------------------------------------------------------------
// Raw options
// ---------------------------------------------------------------------------

/// A processor declaration: `- minifier` or `- { name: prefixer, options: {...} }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProcessorSpec {
    Name(String),
    Configured {
        name: String,
        #[serde(default)]
        options: Value,
    },
}

impl ProcessorSpec {
    pub fn name(&self) -> &str {
        match self {
            ProcessorSpec::Name(name) | ProcessorSpec::Configured { name, .. } => name,
        }
    }

    /// Processor options; `Null` when none were given.
    pub fn options(&self) -> &Value {
        const NONE: &Value = &Value::Null;
        match self {
            ProcessorSpec::Name(_) => NONE,
            ProcessorSpec::Configured { options, .. } => options,
        }
    }
}

/// Options exactly as written in the task file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOptions {
    pub processors: Option<Vec<ProcessorSpec>>,
    pub map: Option<Value>,
    pub diff: Option<Value>,
    pub write_dest: Option<Value>,
    pub fail_on_warning: Option<Value>,
    pub silent: Option<Value>,
    pub safe: Option<Value>,
}

impl RawOptions {
    /// Layer `self` over `base`: every key set here wins, the rest come from
    /// `base`. Nested values are replaced, not merged.
    pub fn merged_over(&self, base: &RawOptions) -> RawOptions {
        RawOptions {
            processors: self.processors.clone().or_else(|| base.processors.clone()),
            map: self.map.clone().or_else(|| base.map.clone()),
            diff: self.diff.clone().or_else(|| base.diff.clone()),
            write_dest: self.write_dest.clone().or_else(|| base.write_dest.clone()),
            fail_on_warning: self
                .fail_on_warning
                .clone()
                .or_else(|| base.fail_on_warning.clone()),
            silent: self.silent.clone().or_else(|| base.silent.clone()),
            safe: self.safe.clone().or_else(|| base.safe.clone()),
        }
    }

    /// Default every option.
    pub fn resolve(&self) -> ResolvedOptions {
        ResolvedOptions {
            processors: self.processors.clone().unwrap_or_default(),
            map: resolve_map(self.map.as_ref()),
            diff: resolve_diff(self.diff.as_ref()),
            write_dest: flag(self.write_dest.as_ref(), true),
            fail_on_warning: flag(self.fail_on_warning.as_ref(), false),
            silent: flag(self.silent.as_ref(), false),
            safe: flag(self.safe.as_ref(), false),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolved options
// ---------------------------------------------------------------------------

/// Where the source-map annotation comment points.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnnotationSpec {
    /// `<basename(dest)>.map`, next to the stylesheet.
    #[default]
    Default,
    /// No annotation comment.
    Suppressed,
    /// Directory (or explicit `.map` file) the map is written to.
    Path(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapSettings {
    pub sources_content: bool,
    pub annotation: AnnotationSpec,
    /// Directory holding `<basename(source)>.map` maps to chain from.
    pub prev: Option<PathBuf>,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            sources_content: true,
            annotation: AnnotationSpec::Default,
            prev: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MapMode {
    #[default]
    Disabled,
    /// Embedded in the stylesheet as a data URI.
    Inline(MapSettings),
    /// Written next to (or under the annotation directory of) the stylesheet.
    SeparateFile(MapSettings),
}

impl MapMode {
    pub fn settings(&self) -> Option<&MapSettings> {
        match self {
            MapMode::Disabled => None,
            MapMode::Inline(settings) | MapMode::SeparateFile(settings) => Some(settings),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, MapMode::Inline(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DiffMode {
    #[default]
    Disabled,
    /// `<dest>.diff`
    DefaultPath,
    ExplicitPath(PathBuf),
}

/// Fully defaulted options (processors still as declarations).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub processors: Vec<ProcessorSpec>,
    pub map: MapMode,
    pub diff: DiffMode,
    pub write_dest: bool,
    pub fail_on_warning: bool,
    pub silent: bool,
    pub safe: bool,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        RawOptions::default().resolve()
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// `false`/absent disables maps, `true` enables library defaults, anything
/// else is read as a map options object.
pub fn resolve_map(value: Option<&Value>) -> MapMode {
    let value = match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => return MapMode::Disabled,
        Some(Value::Bool(true)) => return MapMode::Inline(MapSettings::default()),
        Some(value) => value,
    };

    let settings = MapSettings {
        sources_content: flag(value.get("sourcesContent"), true),
        annotation: resolve_annotation(value.get("annotation")),
        prev: match value.get("prev") {
            Some(Value::String(dir)) if !dir.is_empty() => Some(PathBuf::from(dir)),
            _ => None,
        },
    };

    if flag(value.get("inline"), true) {
        MapMode::Inline(settings)
    } else {
        MapMode::SeparateFile(settings)
    }
}

fn resolve_annotation(value: Option<&Value>) -> AnnotationSpec {
    match value {
        Some(Value::Bool(false)) => AnnotationSpec::Suppressed,
        Some(Value::String(path)) if !path.is_empty() => AnnotationSpec::Path(path.clone()),
        _ => AnnotationSpec::Default,
    }
}

/// A non-empty string names the diff file; any other truthy value means
/// `<dest>.diff`.
pub fn resolve_diff(value: Option<&Value>) -> DiffMode {
    match value {
        Some(Value::String(path)) if !path.is_empty() => DiffMode::ExplicitPath(PathBuf::from(path)),
        Some(value) if truthy(value) => DiffMode::DefaultPath,
        _ => DiffMode::Disabled,
    }
}

fn flag(value: Option<&Value>, default: bool) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        _ => default,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(_) | Value::Mapping(_) => true,
        Value::Tagged(tagged) => truthy(&tagged.value),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).expect("yaml")
    }

    #[test]
    fn empty_options_resolve_to_defaults() {
        let resolved = RawOptions::default().resolve();
        assert!(resolved.processors.is_empty());
        assert_eq!(resolved.map, MapMode::Disabled);
        assert_eq!(resolved.diff, DiffMode::Disabled);
        assert!(resolved.write_dest);
        assert!(!resolved.fail_on_warning);
        assert!(!resolved.silent);
        assert!(!resolved.safe);
    }

    #[rstest]
    #[case("false", MapMode::Disabled)]
    #[case("~", MapMode::Disabled)]
    #[case("true", MapMode::Inline(MapSettings::default()))]
    #[case("{}", MapMode::Inline(MapSettings::default()))]
    #[case("{inline: false}", MapMode::SeparateFile(MapSettings::default()))]
    #[case("{inline: 'no'}", MapMode::Inline(MapSettings::default()))]
    #[case("maps", MapMode::Inline(MapSettings::default()))]
    fn map_shapes(#[case] raw: &str, #[case] expected: MapMode) {
        assert_eq!(resolve_map(Some(&yaml(raw))), expected);
    }

    #[test]
    fn map_sub_fields_resolve_independently() {
        let mode = resolve_map(Some(&yaml(
            "{inline: false, sourcesContent: false, annotation: maps/, prev: old/}",
        )));
        assert_eq!(
            mode,
            MapMode::SeparateFile(MapSettings {
                sources_content: false,
                annotation: AnnotationSpec::Path("maps/".to_string()),
                prev: Some(PathBuf::from("old/")),
            })
        );
    }

    #[rstest]
    #[case("true", AnnotationSpec::Default)]
    #[case("false", AnnotationSpec::Suppressed)]
    #[case("3", AnnotationSpec::Default)]
    #[case("''", AnnotationSpec::Default)]
    #[case("dist/maps", AnnotationSpec::Path("dist/maps".to_string()))]
    fn annotation_shapes(#[case] raw: &str, #[case] expected: AnnotationSpec) {
        assert_eq!(resolve_annotation(Some(&yaml(raw))), expected);
    }

    #[test]
    fn prev_is_only_used_when_a_string() {
        let mode = resolve_map(Some(&yaml("{prev: true}")));
        assert_eq!(mode.settings().and_then(|s| s.prev.clone()), None);
    }

    #[rstest]
    #[case("false", DiffMode::Disabled)]
    #[case("0", DiffMode::Disabled)]
    #[case("''", DiffMode::Disabled)]
    #[case("true", DiffMode::DefaultPath)]
    #[case("1", DiffMode::DefaultPath)]
    #[case("[]", DiffMode::DefaultPath)]
    #[case("out/changes.diff", DiffMode::ExplicitPath(PathBuf::from("out/changes.diff")))]
    fn diff_shapes(#[case] raw: &str, #[case] expected: DiffMode) {
        assert_eq!(resolve_diff(Some(&yaml(raw))), expected);
    }

    #[test]
    fn non_boolean_flags_fall_back_to_defaults() {
        let raw: RawOptions =
            serde_yaml::from_str("writeDest: 'no'\nfailOnWarning: 1\nsilent: [true]\n")
                .expect("parse");
        let resolved = raw.resolve();
        assert!(resolved.write_dest);
        assert!(!resolved.fail_on_warning);
        assert!(!resolved.silent);
    }

    #[test]
    fn target_options_override_task_options_key_by_key() {
        let task: RawOptions =
            serde_yaml::from_str("map: true\nsilent: true\nprocessors: [minifier]\n")
                .expect("task");
        let target: RawOptions =
            serde_yaml::from_str("map: {inline: false}\nprocessors: []\n").expect("target");

        let merged = target.merged_over(&task).resolve();
        assert!(matches!(merged.map, MapMode::SeparateFile(_)));
        assert!(merged.silent);
        assert!(merged.processors.is_empty());
    }

    #[test]
    fn processor_specs_accept_names_and_objects() {
        let raw: RawOptions = serde_yaml::from_str(
            "processors:\n  - minifier\n  - name: prefixer\n    options:\n      browsers: [safari 8]\n",
        )
        .expect("parse");
        let specs = raw.resolve().processors;
        assert_eq!(specs[0].name(), "minifier");
        assert!(specs[0].options().is_null());
        assert_eq!(specs[1].name(), "prefixer");
        assert!(specs[1].options().get("browsers").is_some());
    }
}

//! Source-map serialisation and annotation.
//!
//! `lightningcss` records mappings into a [`SourceMap`]; this module turns it
//! into map JSON (version 3) and attaches it to the printed stylesheet, either
//! inline as a data URI or through an annotation comment.

use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use parcel_sourcemap::{OriginalLocation, SourceMap};
use serde::Serialize;
use serde_json::Value;

use crate::error::ProcessError;
use crate::paths::relative_slash_path;
use crate::transform::{AnnotationComment, MapRequest, PreviousMap};

/// Project root handed to [`SourceMap::new`]. Every source added here is
/// already relative to the map directory, so the root never applies.
pub(crate) const MAP_ROOT: &str = "/";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SourceMapJson<'a> {
    version: u8,
    file: String,
    sources: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    sources_content: Option<Vec<Option<String>>>,
    names: &'a [String],
    mappings: String,
}

/// A previous map whose `sources` now resolve from the new map directory.
struct Rebased {
    json: String,
    /// Rebased source and its content, when the previous map carried it.
    contents: Vec<(String, Option<String>)>,
}

/// Create the map the printer writes mappings into, with `from` registered as
/// source 0.
pub(crate) fn start(from: &Path, request: &MapRequest) -> SourceMap {
    let mut map = SourceMap::new(MAP_ROOT);
    map.add_source(&relative_slash_path(&request.sources_root, from));
    map
}

/// Serialise `map` for the stylesheet at `to`, chaining `request.prev` first
/// when given.
pub(crate) fn finish(
    map: SourceMap,
    from: &Path,
    to: &Path,
    input: &str,
    request: &MapRequest,
) -> Result<String, ProcessError> {
    let mut contents = vec![(
        relative_slash_path(&request.sources_root, from),
        Some(input.to_string()),
    )];

    let mut map = match &request.prev {
        Some(prev) => {
            let rebased = rebase(prev, &request.sources_root)?;
            let mut original = SourceMap::from_json(MAP_ROOT, &rebased.json).map_err(prev_err)?;
            let mut chained = map;
            chained.extends(&mut original).map_err(prev_err)?;
            contents.extend(rebased.contents);
            referenced_only(&chained)?
        }
        None => map,
    };

    let mut vlq = Vec::new();
    map.write_vlq(&mut vlq).map_err(map_err)?;
    let mappings = String::from_utf8(vlq).map_err(ProcessError::other)?;

    let sources = map.get_sources();
    let sources_content = if request.sources_content {
        let found: Vec<Option<String>> = sources
            .iter()
            .map(|source| {
                contents
                    .iter()
                    .find(|(name, _)| name == source)
                    .and_then(|(_, content)| content.clone())
            })
            .collect();
        found.iter().any(Option::is_some).then_some(found)
    } else {
        None
    };

    let json = SourceMapJson {
        version: 3,
        file: to
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        sources,
        sources_content,
        names: map.get_names(),
        mappings,
    };
    serde_json::to_string(&json).map_err(ProcessError::other)
}

/// Rewrite the previous map's sources (resolved against the directory it was
/// read from and its `sourceRoot`) relative to `sources_root`.
fn rebase(prev: &PreviousMap, sources_root: &Path) -> Result<Rebased, ProcessError> {
    let mut value: Value = serde_json::from_str(&prev.json).map_err(prev_err)?;
    let Some(fields) = value.as_object_mut() else {
        return Err(prev_err("expected a JSON object"));
    };

    let base: PathBuf = match fields.remove("sourceRoot") {
        Some(Value::String(root)) => prev.dir.join(root),
        _ => prev.dir.clone(),
    };
    let sources: Vec<String> = match fields.get("sources") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| rebase_source(&base, item.as_str().unwrap_or_default(), sources_root))
            .collect(),
        _ => Vec::new(),
    };
    let mut embedded: Vec<Option<String>> = match fields.remove("sourcesContent") {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(content) => Some(content),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    embedded.resize(sources.len(), None);

    fields.insert("sources".to_string(), Value::from(sources.clone()));
    fields
        .entry("names")
        .or_insert_with(|| Value::Array(Vec::new()));

    Ok(Rebased {
        json: value.to_string(),
        contents: sources.into_iter().zip(embedded).collect(),
    })
}

/// URLs (`webpack://`, `data:`) are kept as they are.
fn rebase_source(base: &Path, source: &str, sources_root: &Path) -> String {
    if source.contains(':') {
        return source.to_string();
    }
    relative_slash_path(sources_root, &base.join(source))
}

/// Copy of `map` keeping only sources that some mapping still points to.
fn referenced_only(map: &SourceMap) -> Result<SourceMap, ProcessError> {
    let mappings = map.get_mappings();
    let mut used: Vec<u32> = mappings
        .iter()
        .filter_map(|mapping| mapping.original.map(|original| original.source))
        .collect();
    used.sort_unstable();
    used.dedup();

    let mut compact = SourceMap::new(MAP_ROOT);
    let mut index = HashMap::with_capacity(used.len());
    for old in used {
        let source = map.get_source(old).map_err(map_err)?;
        index.insert(old, compact.add_source(source));
    }

    for mapping in mappings {
        let original = match mapping.original {
            Some(original) => match index.get(&original.source) {
                Some(&source) => {
                    let name = match original.name {
                        Some(name) => Some(compact.add_name(map.get_name(name).map_err(map_err)?)),
                        None => None,
                    };
                    Some(OriginalLocation::new(
                        original.original_line,
                        original.original_column,
                        source,
                        name,
                    ))
                }
                None => None,
            },
            None => None,
        };
        compact.add_mapping(mapping.generated_line, mapping.generated_column, original);
    }
    Ok(compact)
}

fn map_err(e: impl Display) -> ProcessError {
    ProcessError::other(format!("source map: {e}"))
}

fn prev_err(e: impl Display) -> ProcessError {
    ProcessError::other(format!("previous source map: {e}"))
}

/// Attach `json` to `css` as `request` asks. Returns the final stylesheet and
/// the map to write separately, if any.
pub(crate) fn attach(
    mut css: String,
    json: String,
    to: &Path,
    request: &MapRequest,
) -> (String, Option<String>) {
    if request.inline {
        if request.annotation != AnnotationComment::Suppressed {
            let url = format!("data:application/json;base64,{}", STANDARD.encode(&json));
            push_annotation(&mut css, &url);
        }
        return (css, None);
    }

    match &request.annotation {
        AnnotationComment::Default => {
            let name = to
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            push_annotation(&mut css, &format!("{name}.map"));
        }
        AnnotationComment::Url(url) => push_annotation(&mut css, url),
        AnnotationComment::Suppressed => {}
    }
    (css, Some(json))
}

fn push_annotation(css: &mut String, url: &str) {
    if !css.is_empty() && !css.ends_with('\n') {
        css.push('\n');
    }
    css.push_str("/*# sourceMappingURL=");
    css.push_str(url);
    css.push_str(" */");
}

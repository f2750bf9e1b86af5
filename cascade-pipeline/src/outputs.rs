//! Output locations for one source file, and the map request handed to the
//! processor.
//!
//! | output     | default             | override                                  |
//! |------------|---------------------|-------------------------------------------|
//! | stylesheet | the source itself   | file set `dest`                           |
//! | map        | `<dest>.map`        | `map.annotation` directory or `.map` file |
//! | diff       | `<dest>.diff`       | `diff: <path>`                            |

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use cascade_core::{AnnotationSpec, DiffMode, MapMode};
use cascade_processor::paths::{dir_of, relative_slash_path};
use cascade_processor::{AnnotationComment, MapRequest, PreviousMap};

use crate::error::{io_err, PipelineError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub dest: PathBuf,
    /// Where a separate map file goes. Always computed; only written when
    /// the processor returns a map.
    pub map: PathBuf,
    pub diff: Option<PathBuf>,
}

impl OutputPaths {
    pub fn resolve(source: &Path, dest: Option<&Path>, map: &MapMode, diff: &DiffMode) -> Self {
        let dest = dest.unwrap_or(source).to_path_buf();

        let map = match map.settings().map(|s| &s.annotation) {
            Some(AnnotationSpec::Path(location)) if !map.is_inline() => {
                map_location(location, &dest)
            }
            _ => with_suffix(&dest, ".map"),
        };

        let diff = match diff {
            DiffMode::Disabled => None,
            DiffMode::DefaultPath => Some(with_suffix(&dest, ".diff")),
            DiffMode::ExplicitPath(path) => Some(path.clone()),
        };

        Self { dest, map, diff }
    }
}

/// A location ending in `.map` names the file; anything else is a directory
/// that receives `<basename(dest)>.map`.
pub fn map_location(location: &str, dest: &Path) -> PathBuf {
    let is_dir = location.ends_with(['/', '\\']) || !location.ends_with(".map");
    if is_dir {
        Path::new(location).join(with_suffix(Path::new(file_name(dest)), ".map"))
    } else {
        PathBuf::from(location)
    }
}

/// Build the map request for `source`, reading its previous map if one is
/// configured and present.
pub fn map_request(
    map: &MapMode,
    source: &Path,
    outputs: &OutputPaths,
) -> Result<Option<MapRequest>, PipelineError> {
    let Some(settings) = map.settings() else {
        return Ok(None);
    };

    let inline = map.is_inline();
    let annotation = match &settings.annotation {
        AnnotationSpec::Suppressed => AnnotationComment::Suppressed,
        AnnotationSpec::Path(_) if !inline => {
            AnnotationComment::Url(relative_slash_path(dir_of(&outputs.dest), &outputs.map))
        }
        _ => AnnotationComment::Default,
    };

    let sources_root = if inline {
        dir_of(&outputs.dest).to_path_buf()
    } else {
        dir_of(&outputs.map).to_path_buf()
    };

    let prev = match &settings.prev {
        Some(dir) => read_prev(dir, source)?,
        None => None,
    };

    Ok(Some(MapRequest {
        inline,
        sources_content: settings.sources_content,
        annotation,
        sources_root,
        prev,
    }))
}

/// `<dir>/<basename(source)>.map`, when it exists.
fn read_prev(dir: &Path, source: &Path) -> Result<Option<PreviousMap>, PipelineError> {
    let path = dir.join(with_suffix(Path::new(file_name(source)), ".map"));
    if !path.is_file() {
        tracing::debug!("no previous map at {}", path.display());
        return Ok(None);
    }
    let json = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    tracing::debug!("chaining previous map {}", path.display());
    Ok(Some(PreviousMap {
        json,
        dir: dir.to_path_buf(),
    }))
}

fn file_name(path: &Path) -> &std::ffi::OsStr {
    path.file_name().unwrap_or(path.as_os_str())
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use cascade_core::MapSettings;

    use super::*;

    fn separate(annotation: AnnotationSpec) -> MapMode {
        MapMode::SeparateFile(MapSettings {
            annotation,
            ..MapSettings::default()
        })
    }

    #[test]
    fn dest_defaults_to_source() {
        let out = OutputPaths::resolve(
            Path::new("css/a.css"),
            None,
            &MapMode::Disabled,
            &DiffMode::Disabled,
        );
        assert_eq!(out.dest, PathBuf::from("css/a.css"));
        assert_eq!(out.map, PathBuf::from("css/a.css.map"));
        assert_eq!(out.diff, None);
    }

    #[test]
    fn diff_paths() {
        let dest = Some(Path::new("dist/a.css"));
        let default = OutputPaths::resolve(
            Path::new("a.css"),
            dest,
            &MapMode::Disabled,
            &DiffMode::DefaultPath,
        );
        assert_eq!(default.diff, Some(PathBuf::from("dist/a.css.diff")));

        let explicit = OutputPaths::resolve(
            Path::new("a.css"),
            dest,
            &MapMode::Disabled,
            &DiffMode::ExplicitPath(PathBuf::from("changes.patch")),
        );
        assert_eq!(explicit.diff, Some(PathBuf::from("changes.patch")));
    }

    #[test]
    fn annotation_directory_holds_the_map() {
        let out = OutputPaths::resolve(
            Path::new("src/a.css"),
            Some(Path::new("dist/a.css")),
            &separate(AnnotationSpec::Path("dist/maps/".to_string())),
            &DiffMode::Disabled,
        );
        assert_eq!(out.map, PathBuf::from("dist/maps/a.css.map"));
    }

    #[test]
    fn map_location_forms() {
        let dest = Path::new("dist/a.css");
        assert_eq!(map_location("maps", dest), PathBuf::from("maps/a.css.map"));
        assert_eq!(map_location("maps/", dest), PathBuf::from("maps/a.css.map"));
        assert_eq!(map_location("out/site.map", dest), PathBuf::from("out/site.map"));
    }

    #[test]
    fn inline_maps_ignore_annotation_location() {
        let mode = MapMode::Inline(MapSettings {
            annotation: AnnotationSpec::Path("maps/".to_string()),
            ..MapSettings::default()
        });
        let out = OutputPaths::resolve(Path::new("a.css"), None, &mode, &DiffMode::Disabled);
        assert_eq!(out.map, PathBuf::from("a.css.map"));

        let request = map_request(&mode, Path::new("a.css"), &out)
            .unwrap()
            .expect("request");
        assert!(request.inline);
        assert_eq!(request.annotation, AnnotationComment::Default);
    }

    #[test]
    fn request_points_annotation_at_map_directory() {
        let mode = separate(AnnotationSpec::Path("dist/maps/".to_string()));
        let out = OutputPaths::resolve(
            Path::new("src/a.css"),
            Some(Path::new("dist/a.css")),
            &mode,
            &DiffMode::Disabled,
        );
        let request = map_request(&mode, Path::new("src/a.css"), &out)
            .unwrap()
            .expect("request");
        assert!(!request.inline);
        assert_eq!(
            request.annotation,
            AnnotationComment::Url("maps/a.css.map".to_string())
        );
        assert_eq!(request.sources_root, PathBuf::from("dist/maps"));
        assert_eq!(request.prev, None);
    }

    #[test]
    fn disabled_maps_have_no_request() {
        let out = OutputPaths::resolve(
            Path::new("a.css"),
            None,
            &MapMode::Disabled,
            &DiffMode::Disabled,
        );
        assert_eq!(map_request(&MapMode::Disabled, Path::new("a.css"), &out).unwrap(), None);
    }

    #[test]
    fn previous_map_is_read_when_present() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.css.map"), r#"{"version":3}"#).unwrap();

        let mode = MapMode::SeparateFile(MapSettings {
            prev: Some(tmp.path().to_path_buf()),
            ..MapSettings::default()
        });
        let out = OutputPaths::resolve(Path::new("src/a.css"), None, &mode, &DiffMode::Disabled);
        let request = map_request(&mode, Path::new("src/a.css"), &out)
            .unwrap()
            .expect("request");
        let prev = request.prev.expect("previous map");
        assert_eq!(prev.json, r#"{"version":3}"#);
        assert_eq!(prev.dir, tmp.path());

        let missing = map_request(&mode, Path::new("src/b.css"), &out)
            .unwrap()
            .expect("request");
        assert_eq!(missing.prev, None);
    }
}

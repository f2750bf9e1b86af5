//! Atomic output writes.
//!
//! Every stylesheet, map and diff goes through [`write_output`]:
//!
//! 1. Create missing parent directories.
//! 2. Write to `<path>.cascade.tmp`.
//! 3. Rename to the final path (atomic on POSIX).
//!
//! A failed rename removes the temp file and leaves the previous output intact.

use std::path::{Path, PathBuf};

use crate::error::{io_err, PipelineError};

pub fn write_output(path: &Path, content: &str) -> Result<(), PipelineError> {
    let tmp = PathBuf::from(format!("{}.cascade.tmp", path.display()));
    write_with_tmp(path, content, &tmp)
}

fn write_with_tmp(path: &Path, content: &str, tmp: &Path) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    if let Some(tmp_parent) = tmp.parent() {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::debug!("wrote: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn first_write_creates_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.css");
        write_output(&path, ".a{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), ".a{}");
    }

    #[test]
    fn existing_file_is_replaced() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.css");
        write_output(&path, "v1").unwrap();
        write_output(&path, "v2").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "v2");
    }

    #[test]
    fn tmp_file_removed_after_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clean.css");
        write_output(&path, "data").unwrap();
        let tmp_path = PathBuf::from(format!("{}.cascade.tmp", path.display()));
        assert!(!tmp_path.exists(), ".cascade.tmp must be cleaned up");
    }

    #[test]
    fn creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("dist").join("maps").join("a.css.map");
        write_output(&path, "{}").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn rename_failure_cleans_tmp() {
        let root = TempDir::new().unwrap();
        // A non-empty directory cannot be replaced by a file.
        let path = root.path().join("occupied");
        fs::create_dir_all(path.join("child")).unwrap();

        let tmp_path = root.path().join("occupied.cascade.tmp");
        let err = write_with_tmp(&path, "new content", &tmp_path)
            .expect_err("rename onto a directory should fail");
        assert!(matches!(err, PipelineError::Io { .. }));
        assert!(path.join("child").is_dir(), "existing entry should be intact");
        assert!(!tmp_path.exists(), ".cascade.tmp should be cleaned up");
    }
}

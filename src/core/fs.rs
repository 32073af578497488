//! Filesystem access used by the migration.
//!
//! Everything the core reads or writes goes through [`SourceFs`], so a dry run
//! can record the artifacts it would produce without touching the project.

use std::{
    cell::RefCell,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

pub trait SourceFs {
    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn read_text(&self, path: &Path) -> Result<String>;

    fn write_text(&self, path: &Path, content: &str) -> Result<()>;
}

/// Real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFs;

impl SourceFs for OsFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
    }
}

/// Reads from disk, records writes instead of performing them.
///
/// Files "written" earlier in the run are visible to later reads so that the
/// run behaves as it would for real.
#[derive(Debug, Default)]
pub struct DryRunFs {
    writes: RefCell<Vec<(PathBuf, String)>>,
}

impl DryRunFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded writes, in order.
    pub fn writes(&self) -> Vec<(PathBuf, String)> {
        self.writes.borrow().clone()
    }

    fn pending(&self, path: &Path) -> Option<String> {
        self.writes
            .borrow()
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, content)| content.clone())
    }
}

impl SourceFs for DryRunFs {
    fn exists(&self, path: &Path) -> bool {
        self.pending(path).is_some() || path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        self.pending(path).is_some() || path.is_file()
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        match self.pending(path) {
            Some(content) => Ok(content),
            None => OsFs.read_text(path),
        }
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        self.writes
            .borrow_mut()
            .push((path.to_path_buf(), content.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_os_fs_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        OsFs.write_text(&path, "hello").unwrap();
        assert!(OsFs.exists(&path));
        assert!(OsFs.is_file(&path));
        assert!(!OsFs.is_file(dir.path()));
        assert_eq!(OsFs.read_text(&path).unwrap(), "hello");
    }

    #[test]
    fn test_os_fs_read_missing_has_context() {
        let dir = tempdir().unwrap();
        let err = OsFs.read_text(&dir.path().join("nope.ts")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_dry_run_does_not_touch_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.config.js");
        let fs = DryRunFs::new();

        fs.write_text(&path, "export default {}").unwrap();

        assert!(!path.exists());
        assert!(fs.exists(&path));
        assert_eq!(fs.read_text(&path).unwrap(), "export default {}");
        assert_eq!(fs.writes(), vec![(path, "export default {}".to_string())]);
    }
}

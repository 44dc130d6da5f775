use super::backend::{BackendProvider, SnapshotBackend};
use super::StoreKind;
use crate::error::{Result, RolodexError};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const CONFIG_FILENAME: &str = "config.json";

/// A snapshot kept in a single JSON file.
#[derive(Debug, Clone)]
pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        if !parent.exists() {
            fs::create_dir_all(&parent).map_err(RolodexError::Io)?;
        }
        Ok(parent)
    }
}

impl SnapshotBackend for FsBackend {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&self.path).map_err(RolodexError::Io)?;
        let text = String::from_utf8(bytes).map_err(|e| RolodexError::CorruptState {
            location: self.location(),
            reason: format!("not valid UTF-8: {}", e),
        })?;
        Ok(Some(text))
    }

    fn save(&self, contents: &str) -> Result<()> {
        let dir = self.ensure_parent()?;
        let stem = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("snapshot");

        // Atomic write
        let tmp_path = dir.join(format!(".{}-{}.tmp", stem, Uuid::new_v4()));
        fs::write(&tmp_path, contents).map_err(RolodexError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(RolodexError::Io(e));
        }

        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// The on-disk layout: one data directory, one file per store kind.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub data_dir: PathBuf,
}

impl StorePaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn snapshot_file(&self, kind: StoreKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILENAME)
    }
}

impl BackendProvider for StorePaths {
    type Backend = FsBackend;

    fn backend(&self, kind: StoreKind) -> Result<FsBackend> {
        Ok(FsBackend::new(self.snapshot_file(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let backend = FsBackend::new(dir.path().join("contacts.json"));
        assert_eq!(backend.load().unwrap(), None);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("tasks.json");
        let backend = FsBackend::new(&path);

        backend.save("[]").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert_eq!(backend.load().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("contacts.json");
        // A non-empty directory in the way makes the final rename fail.
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let backend = FsBackend::new(path.clone());
        assert!(matches!(backend.save("{}"), Err(RolodexError::Io(_))));

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["contacts.json".to_string()]);
    }

    #[test]
    fn provider_maps_kinds_to_files() {
        let paths = StorePaths::new("/data/rolodex");
        assert_eq!(
            paths.backend(StoreKind::Contacts).unwrap().path(),
            Path::new("/data/rolodex/contacts.json")
        );
        assert_eq!(
            paths.snapshot_file(StoreKind::Tasks),
            PathBuf::from("/data/rolodex/tasks.json")
        );
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/data/rolodex/config.json")
        );
    }
}

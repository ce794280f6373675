use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{Storage, StorageError};

/// File-backed storage: each key is stored as one file under a directory.
///
/// The default location is `~/.local/share/promptdeck` (platform equivalent).
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open storage at the default location, creating the directory if needed.
    pub fn open() -> Result<Self, StorageError> {
        Self::open_at(Self::default_dir())
    }

    /// Open storage at a specific directory, creating it if needed.
    pub fn open_at(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StorageError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Get the default storage directory.
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("promptdeck")
    }

    /// Return the backing directory path.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::write(self.path_for(key), value).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

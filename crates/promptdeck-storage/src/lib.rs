//! Persistent key-value storage for promptdeck.
//!
//! The stores persist their state through the [`Storage`] trait: a synchronous
//! string-keyed get/set/remove interface. Two implementations are provided:
//!
//! - [`FileStorage`] - one file per key under a data directory
//! - [`MemoryStorage`] - in-memory map, useful for testing

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failure for key {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create storage directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A synchronous string-keyed persistent store.
///
/// Absent keys are `Ok(None)`, never errors. Removing an absent key is a
/// successful no-op.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

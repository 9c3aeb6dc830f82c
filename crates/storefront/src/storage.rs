//! Durable key-value storage adapter.
//!
//! The storefront's analogue of browser local storage: each namespace is
//! one JSON document under the configured data directory, written on every
//! store mutation and read back once at process start.
//!
//! The load path is fail-safe by contract: a namespace that was never
//! written, or whose document no longer deserializes, reads as absent. A
//! corrupt document is deleted on the spot so the next load starts clean -
//! a parse error never propagates to the caller.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when writing to the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem error.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be serialized.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// File-backed JSON key-value store.
///
/// Cheaply cloneable; clones share the same data directory.
#[derive(Debug, Clone)]
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    /// Create a store rooted at `dir`.
    ///
    /// The directory is created lazily on the first write, so construction
    /// never fails.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The data directory this store writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Serialize `value` to JSON under `namespace`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the data directory cannot be created, the
    /// value cannot be serialized, or the write fails. No retry logic;
    /// storage is treated as synchronous and available.
    pub fn save<T: Serialize>(&self, namespace: &str, value: &T) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let bytes = serde_json::to_vec(value)?;
        fs::write(self.path(namespace), bytes)?;
        Ok(())
    }

    /// Load the value previously saved under `namespace`.
    ///
    /// Returns `None` if the namespace was never written. On
    /// deserialization failure the corrupt entry is removed and `None` is
    /// returned; the failure is logged, never propagated.
    #[must_use]
    pub fn load<T: DeserializeOwned>(&self, namespace: &str) -> Option<T> {
        let path = self.path(namespace);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read {namespace} from storage: {e}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Discarding corrupt {namespace} entry: {e}");
                self.remove(namespace);
                None
            }
        }
    }

    /// Delete the entry under `namespace`. Absent entries are not an error.
    pub fn remove(&self, namespace: &str) {
        if let Err(e) = fs::remove_file(self.path(namespace)) {
            if e.kind() != ErrorKind::NotFound {
                tracing::error!("Failed to remove {namespace} from storage: {e}");
            }
        }
    }

    fn path(&self, namespace: &str) -> PathBuf {
        self.dir.join(format!("{namespace}.json"))
    }
}

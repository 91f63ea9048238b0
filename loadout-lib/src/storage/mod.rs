//! The key-value byte substrate that builds and preferences are persisted to.
//!
//! Two backends exist: [`FileStore`] keeps one file per key on disk and
//! [`MemoryStore`] keeps everything in a map, optionally capped by a byte
//! quota so rejected writes can be exercised.

use std::{fmt::Debug, io, path::PathBuf, sync::Arc};

use parking_lot::RwLock;
use thiserror::Error;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to create storage directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error on storage key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("Storage quota exceeded writing '{key}' ({needed} of {quota} bytes)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

pub trait KeyValueStore: Debug + Send + Sync {
    /// Read the bytes stored under `key`, or `None` if nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Overwrite the bytes stored under `key`.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;
}

/// Shared handle to a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct Storage {
    inner: Arc<RwLock<Box<dyn KeyValueStore>>>,
}

impl Storage {
    pub fn new<S>(store: S) -> Self
    where
        S: KeyValueStore + 'static,
    {
        Self {
            inner: Arc::new(RwLock::new(Box::new(store))),
        }
    }

    /// A fresh, unbounded in-memory substrate.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.inner.read().get(key)
    }

    pub fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.inner.write().set(key, value)
    }
}

/// Keys end up as file names, so only a conservative character set is allowed.
pub(crate) fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidKey(key.to_string()))
    }
}

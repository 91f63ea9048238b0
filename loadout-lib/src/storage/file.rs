use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::storage::{Error, KeyValueStore, Result, check_key};

/// A [`KeyValueStore`] that keeps one file per key inside a directory.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();

        fs::create_dir_all(&dir).map_err(|source| Error::CreateDir {
            path: dir.clone(),
            source,
        })?;

        debug!("Opened file store at {}", dir.display());

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        check_key(key)?;

        match fs::read(self.path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        check_key(key)?;

        let path = self.path(key);
        let temp_path = self.dir.join(format!("{key}.tmp"));
        let io_err = |source| Error::Io {
            key: key.to_string(),
            source,
        };

        fs::write(&temp_path, value).map_err(io_err)?;
        fs::rename(&temp_path, &path).map_err(io_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_open_creates_dir() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("nested").join("storage");

        let store = FileStore::open(&dir).unwrap();

        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_round_trip() {
        let tmp = tempdir().unwrap();
        let mut store = FileStore::open(tmp.path()).unwrap();

        assert_eq!(store.get("builds").unwrap(), None);

        store.set("builds", b"[]").unwrap();

        assert_eq!(store.get("builds").unwrap(), Some(b"[]".to_vec()));
        assert!(!tmp.path().join("builds.tmp").exists());
    }

    #[test]
    fn test_survives_reopen() {
        let tmp = tempdir().unwrap();
        FileStore::open(tmp.path())
            .unwrap()
            .set("theme", b"light")
            .unwrap();

        let store = FileStore::open(tmp.path()).unwrap();

        assert_eq!(store.get("theme").unwrap(), Some(b"light".to_vec()));
    }

    #[test]
    fn test_rejects_path_keys() {
        let tmp = tempdir().unwrap();
        let mut store = FileStore::open(tmp.path()).unwrap();

        assert!(matches!(
            store.set("../escape", b"x"),
            Err(Error::InvalidKey(_))
        ));
    }
}

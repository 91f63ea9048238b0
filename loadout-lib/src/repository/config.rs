use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::fs::{config_dir, data_dir};

const FILE_NAME: &str = "core.toml";

/// Handle to the core configuration
pub type Cfg = Arc<RwLock<CoreConfig>>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to access configuration file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The core configuration, serialized to TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Where builds and preferences are persisted. Defaults to a directory
    /// under the XDG data home.
    pub storage_dir: Option<PathBuf>,
    /// Directory holding `weapons.json`, `armor.json` and `mods.json`
    pub catalog_dir: Option<PathBuf>,
    /// Seed the sample builds when the store starts out empty
    pub seed_samples: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            catalog_dir: None,
            seed_samples: true,
        }
    }
}

impl CoreConfig {
    /// Load the configuration from the Loadout config directory, writing out
    /// the defaults if there is no file yet.
    pub fn load() -> Result<Self, Error> {
        Self::load_from(&config_dir()?.join(FILE_NAME))
    }

    pub fn load_from(path: &Path) -> Result<Self, Error> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            Ok(toml::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring unreadable config {}: {err}", path.display());
                Self::default()
            }))
        } else {
            let cfg = Self::default();
            cfg.save_to(path)?;
            Ok(cfg)
        }
    }

    pub fn save(&self) -> Result<(), Error> {
        self.save_to(&config_dir()?.join(FILE_NAME))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Error> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, contents)?;

        Ok(())
    }

    /// The configured storage directory, or the default one.
    pub fn storage_dir(&self) -> io::Result<PathBuf> {
        match &self.storage_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(data_dir()?.join("storage")),
        }
    }

    #[cfg(test)]
    /// A configuration that never touches the user's directories.
    pub(crate) fn mock() -> Self {
        Self {
            storage_dir: Some(PathBuf::from("/nonexistent/loadout-test")),
            catalog_dir: None,
            seed_samples: false,
        }
    }
}

#[cfg(test)]
mod test {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_writes_defaults() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("loadout").join(FILE_NAME);

        let cfg = CoreConfig::load_from(&path).unwrap();

        assert_eq!(cfg, CoreConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_save_and_reload() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(FILE_NAME);
        let cfg = CoreConfig {
            storage_dir: Some(tmp.path().join("data")),
            catalog_dir: Some(tmp.path().join("catalog")),
            seed_samples: false,
        };

        cfg.save_to(&path).unwrap();

        assert_eq!(CoreConfig::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(FILE_NAME);
        fs::write(&path, "catalog_dir = \"/srv/catalog\"\n").unwrap();

        let cfg = CoreConfig::load_from(&path).unwrap();

        assert_eq!(cfg.catalog_dir, Some(PathBuf::from("/srv/catalog")));
        assert!(cfg.seed_samples);
        assert_eq!(cfg.storage_dir, None);
    }

    #[test]
    fn test_unreadable_file_falls_back() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(FILE_NAME);
        fs::write(&path, "seed_samples = [[[").unwrap();

        assert_eq!(
            CoreConfig::load_from(&path).unwrap(),
            CoreConfig::default()
        );
    }

    #[test]
    fn test_explicit_storage_dir() {
        let cfg = CoreConfig::mock();

        assert_eq!(
            cfg.storage_dir().unwrap(),
            PathBuf::from("/nonexistent/loadout-test")
        );
    }
}

//! Display preferences stored next to the builds.

use std::str::FromStr;

use strum::{AsRefStr, Display, EnumIter, EnumString};
use tracing::{error, warn};

use crate::storage::Storage;

const THEME_KEY: &str = "theme";
const LANGUAGE_KEY: &str = "table_language";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Language of the catalog tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr, EnumIter)]
pub enum Language {
    #[default]
    #[strum(serialize = "en")]
    English,
    #[strum(serialize = "th")]
    Thai,
}

#[derive(Debug, Clone)]
pub struct Preferences {
    storage: Storage,
}

impl Preferences {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn theme(&self) -> Theme {
        self.read(THEME_KEY)
    }

    pub fn set_theme(&self, theme: Theme) {
        self.write(THEME_KEY, theme.as_ref());
    }

    /// Flip between dark and light, returning the new theme.
    pub fn toggle_theme(&self) -> Theme {
        let theme = self.theme().toggled();
        self.set_theme(theme);
        theme
    }

    pub fn language(&self) -> Language {
        self.read(LANGUAGE_KEY)
    }

    pub fn set_language(&self, language: Language) {
        self.write(LANGUAGE_KEY, language.as_ref());
    }

    /// Anything missing or unrecognised reads as the default.
    fn read<T>(&self, key: &str) -> T
    where
        T: FromStr + Default,
    {
        match self.storage.get(key) {
            Ok(Some(bytes)) => String::from_utf8(bytes)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(|| {
                    warn!("Ignoring unrecognised value for preference '{key}'");
                    T::default()
                }),
            Ok(None) => T::default(),
            Err(err) => {
                warn!("Failed to read preference '{key}': {err}");
                T::default()
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(err) = self.storage.set(key, value.as_bytes()) {
            error!("Failed to save preference '{key}': {err}");
        }
    }
}

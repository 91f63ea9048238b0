//! Reference data that front ends offer as slot choices.
//!
//! Builds never depend on the catalog; it only fills pickers. Loading is
//! best-effort: if the JSON files can't be read the provider is
//! [`CatalogProvider::Unavailable`] and the built-in dataset is used instead.

use std::{borrow::Cow, fs, io, path::Path};

use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, warn};

use crate::repository::Slot;

mod fallback;

const WEAPONS_FILE: &str = "weapons.json";
const ARMOR_FILE: &str = "armor.json";
const MODS_FILE: &str = "mods.json";

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read {file}: {source}")]
    Io {
        file: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse {file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeaponRecord {
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArmorRecord {
    pub name: String,
    /// Slot key this piece fits (`helmet`, `mask`, ...)
    #[serde(default)]
    pub geartype: Option<String>,
    #[serde(default)]
    pub gearset: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModRecord {
    #[serde(alias = "name")]
    pub mod_name: String,
    /// What the mod attaches to: `all`, `Weapon`, or an armor kind like `Masks`
    #[serde(default)]
    pub mod_for: String,
    #[serde(default)]
    pub img: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WeaponsFile {
    #[serde(default)]
    weapons: Vec<WeaponRecord>,
}

#[derive(Debug, Deserialize)]
struct ArmorFile {
    #[serde(default)]
    armor: Vec<ArmorRecord>,
}

#[derive(Debug, Deserialize)]
struct ModsFile {
    #[serde(default)]
    weapon_mods: Vec<ModRecord>,
    #[serde(default)]
    armor_mods: Vec<ModRecord>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub weapons: Vec<WeaponRecord>,
    pub armor: Vec<ArmorRecord>,
    pub mods: Vec<ModRecord>,
}

impl Catalog {
    /// Read the three catalog files from `dir`.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        let weapons: WeaponsFile = read_json(dir, WEAPONS_FILE)?;
        let armor: ArmorFile = read_json(dir, ARMOR_FILE)?;
        let mods: ModsFile = read_json(dir, MODS_FILE)?;

        Ok(Self {
            weapons: weapons.weapons,
            armor: armor.armor,
            mods: mods.weapon_mods.into_iter().chain(mods.armor_mods).collect(),
        })
    }

    /// The dataset used when no catalog files are available.
    pub fn fallback() -> Self {
        fallback::catalog()
    }

    /// Names of the items that can go into `slot`.
    pub fn items_for(&self, slot: Slot) -> Vec<&str> {
        match slot {
            Slot::Weapon(_) => self.weapons.iter().map(|w| w.name.as_str()).collect(),
            Slot::Equipment(_) => self
                .armor
                .iter()
                .filter(|a| {
                    a.geartype
                        .as_deref()
                        .is_some_and(|g| g.eq_ignore_ascii_case(slot.key()))
                })
                .map(|a| a.name.as_str())
                .collect(),
        }
    }

    /// Mods that fit `slot`.
    ///
    /// `all` fits everything and `weapon` fits weapon slots, both compared
    /// without case. Anything else must equal [`Slot::mod_target`] exactly.
    pub fn mods_for(&self, slot: Slot) -> Vec<&ModRecord> {
        self.mods
            .iter()
            .filter(|m| mod_fits(&m.mod_for, slot))
            .collect()
    }
}

fn mod_fits(mod_for: &str, slot: Slot) -> bool {
    if mod_for.eq_ignore_ascii_case("all") {
        return true;
    }

    if matches!(slot, Slot::Weapon(_)) && mod_for.eq_ignore_ascii_case("weapon") {
        return true;
    }

    mod_for == slot.mod_target()
}

fn read_json<T>(dir: &Path, file: &'static str) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    let contents = fs::read(dir.join(file)).map_err(|source| Error::Io { file, source })?;

    serde_json::from_slice(&contents).map_err(|source| Error::Parse { file, source })
}

/// Catalog data as far as it could be loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogProvider {
    Loaded(Catalog),
    Unavailable,
}

impl CatalogProvider {
    pub fn load(dir: &Path) -> Self {
        match Catalog::load(dir) {
            Ok(catalog) => {
                debug!("Loaded catalog from {}", dir.display());
                CatalogProvider::Loaded(catalog)
            }
            Err(err) => {
                warn!("Catalog unavailable, using built-in data: {err}");
                CatalogProvider::Unavailable
            }
        }
    }

    /// Load from `dir` if one is configured.
    pub fn from_dir(dir: Option<&Path>) -> Self {
        dir.map_or(CatalogProvider::Unavailable, Self::load)
    }

    /// The loaded catalog, or the built-in one.
    pub fn catalog(&self) -> Cow<'_, Catalog> {
        match self {
            CatalogProvider::Loaded(catalog) => Cow::Borrowed(catalog),
            CatalogProvider::Unavailable => Cow::Owned(Catalog::fallback()),
        }
    }
}

#[cfg(test)]
mod test {
    use tempfile::tempdir;

    use super::*;
    use crate::repository::{EquipmentSlot, WeaponSlot};

    const HELMET: Slot = Slot::Equipment(EquipmentSlot::Helmet);
    const MASK: Slot = Slot::Equipment(EquipmentSlot::Mask);
    const WEAPON: Slot = Slot::Weapon(WeaponSlot::Weapon1);

    fn mod_names(catalog: &Catalog, slot: Slot) -> Vec<&str> {
        catalog
            .mods_for(slot)
            .into_iter()
            .map(|m| m.mod_name.as_str())
            .collect()
    }

    fn write_catalog(dir: &Path) {
        fs::write(
            dir.join(WEAPONS_FILE),
            r#"{"weapons":[{"name":"DE.50","type":"Pistol","img":"de50.png"},{"name":"KVD Boom"}]}"#,
        )
        .unwrap();
        fs::write(
            dir.join(ARMOR_FILE),
            r#"{"armor":[
                {"name":"Lonewolf Hood","geartype":"Helmet","gearset":"Lonewolf"},
                {"name":"Lonewolf Mask","geartype":"mask"},
                {"name":"Loose Item"}
            ]}"#,
        )
        .unwrap();
        fs::write(
            dir.join(MODS_FILE),
            r#"{
                "weapon_mods":[{"mod_name":"Shrapnel Souvenir","mod_for":"weapon"}],
                "armor_mods":[
                    {"mod_name":"Deviation Expert","mod_for":"Masks"},
                    {"mod_name":"Singular Mask Mod","mod_for":"Mask"},
                    {"name":"Fateful Strike","mod_for":"All"}
                ]
            }"#,
        )
        .unwrap();
    }

    #[test]
    fn test_load() {
        let tmp = tempdir().unwrap();
        write_catalog(tmp.path());

        let provider = CatalogProvider::load(tmp.path());

        let CatalogProvider::Loaded(catalog) = &provider else {
            panic!("catalog should have loaded");
        };
        assert_eq!(catalog.weapons.len(), 2);
        assert_eq!(catalog.mods.len(), 4);
        assert_eq!(
            catalog.weapons.first().unwrap().kind.as_deref(),
            Some("Pistol")
        );
    }

    #[test]
    fn test_items_for_matches_geartype_without_case() {
        let tmp = tempdir().unwrap();
        write_catalog(tmp.path());
        let catalog = Catalog::load(tmp.path()).unwrap();

        assert_eq!(catalog.items_for(HELMET), ["Lonewolf Hood"]);
        assert_eq!(catalog.items_for(MASK), ["Lonewolf Mask"]);
        assert_eq!(catalog.items_for(WEAPON), ["DE.50", "KVD Boom"]);
    }

    #[test]
    fn test_mods_for_uses_literal_table() {
        let tmp = tempdir().unwrap();
        write_catalog(tmp.path());
        let catalog = Catalog::load(tmp.path()).unwrap();

        // "Mask" does not match the table's "Masks"
        assert_eq!(
            mod_names(&catalog, MASK),
            ["Deviation Expert", "Fateful Strike"]
        );
        assert_eq!(
            mod_names(&catalog, WEAPON),
            ["Shrapnel Souvenir", "Fateful Strike"]
        );
        assert_eq!(mod_names(&catalog, HELMET), ["Fateful Strike"]);
    }

    #[test]
    fn test_missing_files_are_unavailable() {
        let tmp = tempdir().unwrap();

        let provider = CatalogProvider::load(tmp.path());

        assert_eq!(provider, CatalogProvider::Unavailable);
        assert_eq!(*provider.catalog(), Catalog::fallback());
    }

    #[test]
    fn test_bad_json_is_unavailable() {
        let tmp = tempdir().unwrap();
        write_catalog(tmp.path());
        fs::write(tmp.path().join(MODS_FILE), "[not json").unwrap();

        assert!(matches!(
            Catalog::load(tmp.path()),
            Err(Error::Parse { file: MODS_FILE, .. })
        ));
        assert_eq!(
            CatalogProvider::load(tmp.path()),
            CatalogProvider::Unavailable
        );
    }

    #[test]
    fn test_no_dir_configured() {
        assert_eq!(CatalogProvider::from_dir(None), CatalogProvider::Unavailable);
    }
}

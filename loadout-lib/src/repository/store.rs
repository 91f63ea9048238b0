use chrono::{DateTime, Utc};
use tracing::{debug, error, warn};

use crate::{
    repository::models::{Build, BuildId, Equipment, GearSlot, Weapons},
    storage::Storage,
};

pub(crate) const BUILDS_KEY: &str = "builds";

/// The collection of builds, mirrored to the storage substrate.
///
/// The in-memory collection is authoritative for the running session. Every
/// mutation rewrites the persisted copy; if that write fails the failure is
/// logged and the session carries on with what it has.
#[derive(Debug)]
pub struct BuildStore {
    storage: Storage,
    builds: Vec<Build>,
}

impl BuildStore {
    /// Load the persisted builds, seeding the sample builds if there are none and `seed` is set.
    pub fn open(storage: Storage, seed: bool, now: DateTime<Utc>) -> Self {
        let mut store = Self {
            storage,
            builds: Vec::new(),
        };
        store.builds = store.load_all();

        if store.builds.is_empty() && seed {
            debug!("No builds found, seeding samples");
            store.builds = sample_builds(now);
            store.save_all();
        }

        store
    }

    /// Read the persisted collection.
    ///
    /// Missing or corrupt data reads as an empty collection.
    pub fn load_all(&self) -> Vec<Build> {
        let bytes = match self.storage.get(BUILDS_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("Failed to read builds, starting fresh: {err}");
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<Build>>(&bytes) {
            Ok(builds) => builds.into_iter().map(Build::clamped).collect(),
            Err(err) => {
                warn!("Persisted builds are corrupt, starting fresh: {err}");
                Vec::new()
            }
        }
    }

    /// Overwrite the persisted collection with the in-memory one.
    pub fn save_all(&self) {
        let bytes = match serde_json::to_vec(&self.builds) {
            Ok(bytes) => bytes,
            Err(err) => {
                error!("Failed to serialize builds: {err}");
                return;
            }
        };

        if let Err(err) = self.storage.set(BUILDS_KEY, &bytes) {
            error!("Failed to save builds: {err}");
        }
    }

    pub fn builds(&self) -> &[Build] {
        &self.builds
    }

    pub fn get(&self, id: &BuildId) -> Option<&Build> {
        self.builds.iter().find(|b| b.id() == id)
    }

    pub fn contains(&self, id: &BuildId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.builds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }

    pub fn append(&mut self, build: Build) {
        self.builds.push(build);
        self.save_all();
    }

    /// Remove the build with the given id. Returns whether one was there.
    pub fn remove(&mut self, id: &BuildId) -> bool {
        let before = self.builds.len();
        self.builds.retain(|b| b.id() != id);
        let removed = self.builds.len() != before;

        if removed {
            self.save_all();
        }

        removed
    }

    /// Swap in `build` for the build with the given id. Returns whether one was there.
    pub fn replace(&mut self, id: &BuildId, build: Build) -> bool {
        let Some(slot) = self.builds.iter_mut().find(|b| b.id() == id) else {
            return false;
        };

        *slot = build;
        self.save_all();

        true
    }
}

/// The two builds every fresh install starts with.
pub(crate) fn sample_builds(now: DateTime<Utc>) -> Vec<Build> {
    let slot = |item: &str, mod_: &str| GearSlot::new(Some(item), Some(mod_));

    let assault = Build::from_parts(
        "sample1".into(),
        "Assault Rifle Build".into(),
        Equipment {
            helmet: slot("Combat Helmet", "Durability Boost"),
            mask: slot("Gas Mask", "Filter Enhancement"),
            top: slot("Tactical Vest", "Extra Pockets"),
            bottom: slot("Combat Pants", "Knee Pads"),
            gloves: slot("Tactical Gloves", "Grip Enhancement"),
            shoes: slot("Combat Boots", "Silent Step"),
        },
        Weapons {
            weapon1: slot("AR-15", "Red Dot Sight"),
            weapon2: slot("Combat Knife", "Serrated Edge"),
            weapon3: GearSlot::default(),
        },
        now,
        now,
    );

    let sniper = Build::from_parts(
        "sample2".into(),
        "Sniper Build".into(),
        Equipment {
            helmet: slot("Sniper Hood", "Camouflage"),
            mask: GearSlot::default(),
            top: slot("Ghillie Suit", "Stealth Enhancement"),
            bottom: slot("Camo Pants", "Movement Reduction"),
            gloves: slot("Precision Gloves", "Steady Aim"),
            shoes: slot("Stealth Boots", "Noise Reduction"),
        },
        Weapons {
            weapon1: slot("Sniper Rifle", "8x Scope"),
            weapon2: slot("Pistol", "Silencer"),
            weapon3: GearSlot::default(),
        },
        now,
        now,
    );

    vec![assault, sniper]
}

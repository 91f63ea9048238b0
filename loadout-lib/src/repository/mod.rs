use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::debug;

use crate::{
    clock::{Clock, SystemClock},
    codec::{self, DecodeError, EncodeError, Token, ValidationError},
    preferences::Preferences,
    repository::config::{Cfg, CoreConfig},
    storage::{FileStore, Storage},
};

mod models;
mod store;

pub mod config;

pub use models::{
    Build, BuildId, Equipment, EquipmentSlot, GearSlot, Slot, Summary, WeaponSlot, Weapons,
};
pub use store::BuildStore;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid build string")]
    BadToken(#[source] DecodeError),
    #[error("Invalid build string")]
    InvalidShape(#[source] ValidationError),
    #[error("No build with id '{0}'")]
    NotFound(BuildId),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Central access point for builds.
///
/// The [`Repository`] is the one interface front ends use to create, import,
/// export, edit and delete builds. It owns the [`BuildStore`] and runs tokens
/// through the [`codec`] on the way in and out.
#[derive(Debug)]
pub struct Repository {
    store: BuildStore,
    preferences: Preferences,
    clock: Box<dyn Clock>,
    cfg: Cfg,
}

impl Repository {
    /// Open the repository described by the user's configuration file.
    pub fn new() -> crate::Result<Self> {
        let cfg = CoreConfig::load()?;
        let storage = Storage::new(FileStore::open(cfg.storage_dir()?)?);

        Ok(Self::with_storage(
            storage,
            Arc::new(RwLock::new(cfg)),
            Box::new(SystemClock),
        ))
    }

    /// Build a repository over an explicit substrate and clock.
    pub fn with_storage(storage: Storage, cfg: Cfg, clock: Box<dyn Clock>) -> Self {
        let seed = cfg.read().seed_samples;
        let store = BuildStore::open(storage.clone(), seed, clock.now());

        Self {
            store,
            preferences: Preferences::new(storage),
            clock,
            cfg,
        }
    }

    pub fn builds(&self) -> &[Build] {
        self.store.builds()
    }

    pub fn get(&self, id: &BuildId) -> Option<&Build> {
        self.store.get(id)
    }

    /// Create an empty build named "New Build" and add it to the store.
    pub fn create_new(&mut self) -> Build {
        let build = Build::empty(self.next_id(), self.clock.now());

        self.store.append(build.clone());

        debug!("Created new build: {}", build.id());

        build
    }

    /// Add the build encoded in `token` as a new entity.
    ///
    /// Whatever id the token carries is discarded, so importing never
    /// overwrites or merges with an existing build.
    pub fn import_token(&mut self, token: &str) -> Result<Build> {
        let payload = codec::decode_payload(token).map_err(Error::BadToken)?;

        let now = self.clock.now();
        let id = self.next_id();
        let mut build = payload
            .narrow(id.clone(), now)
            .map_err(Error::InvalidShape)?;
        build.mark_imported(id, now);

        self.store.append(build.clone());

        debug!("Imported build: {} ({})", build.name(), build.id());

        Ok(build)
    }

    pub fn export_token(&self, id: &BuildId) -> Result<Token> {
        let build = self
            .store
            .get(id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;

        Ok(codec::encode(build)?)
    }

    /// Replace the name and every slot of a build, as the editor does on save.
    pub fn save(
        &mut self,
        id: &BuildId,
        name: &str,
        equipment: Equipment,
        weapons: Weapons,
    ) -> Result<Build> {
        let mut build = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.clone()))?;

        build.apply_edit(name, equipment, weapons, self.clock.now());
        self.store.replace(id, build.clone());

        debug!("Saved build: {} ({})", build.name(), build.id());

        Ok(build)
    }

    /// Delete a build. Deleting an id that isn't there does nothing.
    pub fn delete(&mut self, id: &BuildId) {
        if self.store.remove(id) {
            debug!("Deleted build: {id}");
        }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn config(&self) -> Cfg {
        self.cfg.clone()
    }

    /// A millisecond timestamp id, bumped until it is unused.
    fn next_id(&self) -> BuildId {
        let mut millis = self.clock.now().timestamp_millis();
        loop {
            let id = BuildId::from(millis.to_string());
            if !self.store.contains(&id) {
                return id;
            }
            millis = millis.saturating_add(1);
        }
    }

    #[cfg(test)]
    /// Return a mock [`Repository`] over in-memory storage and a manual clock.
    pub(crate) fn mock() -> (Self, crate::clock::ManualClock) {
        use chrono::TimeZone;

        let clock = crate::clock::ManualClock::new(
            chrono::Utc
                .with_ymd_and_hms(2025, 5, 17, 18, 30, 0)
                .unwrap(),
        );
        let repo = Self::with_storage(
            Storage::in_memory(),
            Arc::new(RwLock::new(CoreConfig::mock())),
            Box::new(clock.clone()),
        );

        (repo, clock)
    }
}

#[cfg(test)]
mod test {
    use chrono::TimeDelta;

    use super::*;
    use crate::storage::MemoryStore;

    fn token_for(build: &Build) -> String {
        codec::encode(build).unwrap().into_string()
    }

    #[test]
    fn test_create_new() {
        let (mut repo, clock) = Repository::mock();

        let build = repo.create_new();

        assert_eq!(build.name(), "New Build");
        assert_eq!(build.id().as_str(), clock.now().timestamp_millis().to_string());
        assert_eq!(build.created(), clock.now());
        assert_eq!(build.imported(), None);
        assert_eq!(repo.builds(), [build]);
    }

    #[test]
    fn test_create_new_same_instant_gets_distinct_ids() {
        let (mut repo, _clock) = Repository::mock();

        let a = repo.create_new();
        let b = repo.create_new();
        let c = repo.create_new();

        assert_ne!(a.id(), b.id());
        assert_ne!(b.id(), c.id());
        assert_ne!(a.id(), c.id());
        assert_eq!(repo.builds().len(), 3);
    }

    #[test]
    fn test_import_forks_new_id() {
        let (mut repo, clock) = Repository::mock();
        let existing = Build::empty("abc".into(), clock.now());
        repo.store.append(existing.clone());

        clock.advance(TimeDelta::seconds(1));
        let imported = repo.import_token(&token_for(&existing)).unwrap();

        assert_ne!(imported.id().as_str(), "abc");
        assert_eq!(imported.imported(), Some(clock.now()));
        assert_eq!(repo.builds().len(), 2);
        assert!(repo.get(&"abc".into()).is_some());
        assert!(repo.get(imported.id()).is_some());
    }

    #[test]
    fn test_import_overwrites_payload_imported() {
        let (mut repo, clock) = Repository::mock();
        let mut source = Build::empty("abc".into(), clock.now());
        source.mark_imported("abc".into(), clock.now() - TimeDelta::days(30));

        clock.advance(TimeDelta::minutes(1));
        let imported = repo.import_token(&token_for(&source)).unwrap();

        assert_eq!(imported.imported(), Some(clock.now()));
        assert_eq!(imported.created(), source.created());
    }

    #[test]
    fn test_import_bad_token() {
        let (mut repo, _clock) = Repository::mock();

        assert!(matches!(
            repo.import_token("not-a-valid-token!!"),
            Err(Error::BadToken(DecodeError::InvalidFormat(_)))
        ));
        assert!(repo.builds().is_empty());
    }

    #[test]
    fn test_import_invalid_shape() {
        use base64::{Engine, engine::general_purpose::STANDARD};
        let (mut repo, _clock) = Repository::mock();
        let token = STANDARD.encode(r#"{"name":"","equipment":{},"weapons":{}}"#);

        assert!(matches!(
            repo.import_token(&token),
            Err(Error::InvalidShape(ValidationError::MissingName))
        ));
        assert!(repo.builds().is_empty());
    }

    #[test]
    fn test_export_round_trips() {
        let (mut repo, _clock) = Repository::mock();
        let build = repo.create_new();

        let token = repo.export_token(build.id()).unwrap();

        assert_eq!(codec::decode(&token).unwrap(), build);
    }

    #[test]
    fn test_export_missing() {
        let (repo, _clock) = Repository::mock();

        assert!(matches!(
            repo.export_token(&"nope".into()),
            Err(Error::NotFound(id)) if id.as_str() == "nope"
        ));
    }

    #[test]
    fn test_save_updates_modified_not_created() {
        let (mut repo, clock) = Repository::mock();
        let build = repo.create_new();

        clock.advance(TimeDelta::minutes(10));
        let equipment = Equipment {
            top: GearSlot::new(Some("Plate Carrier"), Some("Armor Plating")),
            ..Default::default()
        };
        let saved = repo
            .save(build.id(), "Tanky", equipment.clone(), Weapons::default())
            .unwrap();

        assert_eq!(saved.created(), build.created());
        assert!(saved.modified() >= build.modified());
        assert_eq!(saved.modified(), clock.now());
        assert_eq!(saved.name(), "Tanky");
        assert_eq!(saved.equipment(), &equipment);
        assert_eq!(repo.get(build.id()), Some(&saved));
    }

    #[test]
    fn test_save_blank_name() {
        let (mut repo, _clock) = Repository::mock();
        let build = repo.create_new();

        let saved = repo
            .save(build.id(), "  ", Equipment::default(), Weapons::default())
            .unwrap();

        assert_eq!(saved.name(), "Unnamed Build");
    }

    #[test]
    fn test_save_missing() {
        let (mut repo, _clock) = Repository::mock();

        assert!(matches!(
            repo.save(
                &"ghost".into(),
                "x",
                Equipment::default(),
                Weapons::default()
            ),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_idempotent() {
        let (mut repo, _clock) = Repository::mock();
        let build = repo.create_new();
        repo.create_new();

        repo.delete(&"missing-id".into());
        assert_eq!(repo.builds().len(), 2);

        repo.delete(build.id());
        repo.delete(build.id());
        assert_eq!(repo.builds().len(), 1);
    }

    #[test]
    fn test_persistence_failure_is_not_an_error() {
        let clock = crate::clock::ManualClock::new(chrono::Utc::now());
        let mut repo = Repository::with_storage(
            Storage::new(MemoryStore::with_quota(0)),
            Arc::new(RwLock::new(CoreConfig::default())),
            Box::new(clock),
        );

        // Seeding failed to persist but the samples are still there
        assert_eq!(repo.builds().len(), 2);

        let build = repo.create_new();
        repo.save(build.id(), "Still works", Equipment::default(), Weapons::default())
            .unwrap();

        assert_eq!(repo.builds().len(), 3);
    }

    #[test]
    fn test_mutations_are_persisted() {
        let storage = Storage::in_memory();
        let clock = crate::clock::ManualClock::new(chrono::Utc::now());
        let cfg = Arc::new(RwLock::new(CoreConfig::mock()));

        let mut repo = Repository::with_storage(storage.clone(), cfg.clone(), Box::new(clock.clone()));
        let build = repo.create_new();
        repo.save(build.id(), "Kept", Equipment::default(), Weapons::default())
            .unwrap();

        let reopened = Repository::with_storage(storage, cfg, Box::new(clock));

        assert_eq!(reopened.builds().len(), 1);
        assert_eq!(reopened.get(build.id()).unwrap().name(), "Kept");
    }
}

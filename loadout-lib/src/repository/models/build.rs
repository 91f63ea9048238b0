use chrono::{DateTime, Utc};
use derive_more::{Display, From};
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

use crate::repository::models::{Equipment, GearSlot, Weapons};

pub(crate) const NEW_BUILD_NAME: &str = "New Build";
pub(crate) const UNNAMED_BUILD_NAME: &str = "Unnamed Build";

/// Unique identifier of a [`Build`] within a store.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[serde(transparent)]
pub struct BuildId(String);

impl BuildId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BuildId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A named selection of equipment and weapons.
///
/// Only the [`Repository`](crate::Repository) creates and edits builds, so the
/// identity and timestamp invariants (`id` never changes, `created <=
/// modified`) hold for every value handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, CopyGetters)]
pub struct Build {
    #[getset(get = "pub")]
    id: BuildId,
    #[getset(get = "pub")]
    name: String,
    #[getset(get = "pub")]
    equipment: Equipment,
    #[getset(get = "pub")]
    weapons: Weapons,
    #[getset(get_copy = "pub")]
    created: DateTime<Utc>,
    #[getset(get_copy = "pub")]
    modified: DateTime<Utc>,
    /// Set only when the build arrived through an import
    #[getset(get_copy = "pub")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    imported: Option<DateTime<Utc>>,
}

/// Comma separated item names of a build, for list views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub equipment: String,
    pub weapons: String,
}

impl Build {
    /// A build with every slot empty.
    pub(crate) fn empty(id: BuildId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: NEW_BUILD_NAME.to_string(),
            equipment: Equipment::default(),
            weapons: Weapons::default(),
            created: now,
            modified: now,
            imported: None,
        }
    }

    pub(crate) fn from_parts(
        id: BuildId,
        name: String,
        equipment: Equipment,
        weapons: Weapons,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            equipment,
            weapons,
            created,
            modified: modified.max(created),
            imported: None,
        }
    }

    /// Raise `modified` to `created` if it lies earlier.
    pub(crate) fn clamped(mut self) -> Self {
        self.modified = self.modified.max(self.created);
        self
    }

    /// Replace the user editable parts of this build wholesale.
    ///
    /// A blank name becomes "Unnamed Build". `modified` never moves backwards,
    /// even if the clock does.
    pub(crate) fn apply_edit(
        &mut self,
        name: &str,
        equipment: Equipment,
        weapons: Weapons,
        now: DateTime<Utc>,
    ) {
        let name = name.trim();
        self.name = if name.is_empty() {
            UNNAMED_BUILD_NAME.to_string()
        } else {
            name.to_string()
        };
        self.equipment = equipment;
        self.weapons = weapons;
        self.modified = now.max(self.modified);
    }

    /// Give this build a new identity as a freshly imported entity.
    pub(crate) fn mark_imported(&mut self, id: BuildId, now: DateTime<Utc>) {
        self.id = id;
        self.imported = Some(now);
    }

    pub fn summary(&self) -> Summary {
        let equipment = join_items(self.equipment.iter().map(|(_, slot)| slot));
        let weapons = join_items(self.weapons.iter().map(|(_, slot)| slot));

        Summary {
            equipment: equipment.unwrap_or_else(|| "No items equipped".to_string()),
            weapons: weapons.unwrap_or_else(|| "No weapons equipped".to_string()),
        }
    }
}

fn join_items<'a>(slots: impl Iterator<Item = &'a GearSlot>) -> Option<String> {
    let items: Vec<&str> = slots.filter_map(|slot| slot.item.as_deref()).collect();

    if items.is_empty() {
        None
    } else {
        Some(items.join(", "))
    }
}

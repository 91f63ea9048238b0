use chrono::{DateTime, Utc};
use serde_json::Value;
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::repository::{
    Build, BuildId, Equipment, EquipmentSlot, GearSlot, WeaponSlot, Weapons,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Build data is not an object")]
    NotAnObject,
    #[error("Build data has no name")]
    MissingName,
    #[error("Build data has no equipment")]
    MissingEquipment,
    #[error("Build data has no weapons")]
    MissingWeapons,
}

/// Build data of unknown shape, as it came out of a token.
///
/// The only way to turn one into a [`Build`] is [`UntrustedBuild::narrow`],
/// which runs [`validate`] first.
#[derive(Debug, Clone, PartialEq)]
pub struct UntrustedBuild(Value);

impl UntrustedBuild {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Validate and convert into a [`Build`] with the given id.
    ///
    /// Anything past the three validated fields is read leniently: slots that
    /// are missing or malformed come out empty, and timestamps that are
    /// missing or unparseable are replaced by `now`.
    pub fn narrow(self, id: BuildId, now: DateTime<Utc>) -> Result<Build, ValidationError> {
        validate(&self)?;

        let value = self.0;
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let equipment = value.get("equipment").map(equipment).unwrap_or_default();
        let weapons = value.get("weapons").map(weapons).unwrap_or_default();

        let created = timestamp(&value, "created").unwrap_or(now);
        let modified = timestamp(&value, "modified").unwrap_or(now);

        Ok(Build::from_parts(
            id, name, equipment, weapons, created, modified,
        ))
    }
}

/// Check that `data` looks enough like a build to accept.
///
/// Requires an object with a non-empty string `name` and with `equipment`
/// and `weapons` that are objects (arrays pass too). Slot keys and gear names
/// are not looked at.
pub fn validate(data: &UntrustedBuild) -> Result<(), ValidationError> {
    let Value::Object(map) = &data.0 else {
        return Err(ValidationError::NotAnObject);
    };

    match map.get("name") {
        Some(Value::String(name)) if !name.is_empty() => {}
        _ => return Err(ValidationError::MissingName),
    }

    if !map.get("equipment").is_some_and(is_container) {
        return Err(ValidationError::MissingEquipment);
    }

    if !map.get("weapons").is_some_and(is_container) {
        return Err(ValidationError::MissingWeapons);
    }

    Ok(())
}

fn is_container(value: &Value) -> bool {
    value.is_object() || value.is_array()
}

fn equipment(value: &Value) -> Equipment {
    let mut equipment = Equipment::default();
    for slot in EquipmentSlot::iter() {
        *equipment.slot_mut(slot) = gear_slot(value, slot.as_ref());
    }
    equipment
}

fn weapons(value: &Value) -> Weapons {
    let mut weapons = Weapons::default();
    for slot in WeaponSlot::iter() {
        *weapons.slot_mut(slot) = gear_slot(value, slot.as_ref());
    }
    weapons
}

fn gear_slot(container: &Value, key: &str) -> GearSlot {
    let Some(slot) = container.get(key) else {
        return GearSlot::default();
    };

    GearSlot {
        item: text(slot, "item"),
        mod_: text(slot, "mod"),
    }
}

/// Empty strings count as unset, as the editor never stores them.
fn text(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn timestamp(value: &Value, key: &str) -> Option<DateTime<Utc>> {
    value
        .get(key)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
}

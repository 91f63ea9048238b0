use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// One equipment or weapon position: an optional item and an optional mod.
///
/// A mod without an item is representable; nothing rejects it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearSlot {
    pub item: Option<String>,
    #[serde(rename = "mod")]
    pub mod_: Option<String>,
}

impl GearSlot {
    pub fn new(item: Option<&str>, mod_: Option<&str>) -> Self {
        Self {
            item: item.map(str::to_string),
            mod_: mod_.map(str::to_string),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none() && self.mod_.is_none()
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, IntoStaticStr, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum EquipmentSlot {
    Helmet,
    Mask,
    Top,
    Bottom,
    Gloves,
    Shoes,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, IntoStaticStr, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum WeaponSlot {
    Weapon1,
    Weapon2,
    Weapon3,
}

/// Any slot of a build, addressed by its key (`helmet`, `weapon2`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Equipment(EquipmentSlot),
    Weapon(WeaponSlot),
}

impl Slot {
    pub fn key(&self) -> &'static str {
        match *self {
            Slot::Equipment(slot) => slot.into(),
            Slot::Weapon(slot) => slot.into(),
        }
    }

    /// The `mod_for` value a catalog mod must carry to fit this slot.
    ///
    /// Note the plural for masks: that is how the mod data spells it.
    pub fn mod_target(&self) -> &'static str {
        match self {
            Slot::Equipment(EquipmentSlot::Helmet) => "Helmet",
            Slot::Equipment(EquipmentSlot::Mask) => "Masks",
            Slot::Equipment(EquipmentSlot::Top) => "Chest",
            Slot::Equipment(EquipmentSlot::Bottom) => "Legs",
            Slot::Equipment(EquipmentSlot::Gloves) => "Gloves",
            Slot::Equipment(EquipmentSlot::Shoes) => "Boots",
            Slot::Weapon(_) => "Weapon",
        }
    }

    pub fn all() -> impl Iterator<Item = Slot> {
        EquipmentSlot::iter()
            .map(Slot::Equipment)
            .chain(WeaponSlot::iter().map(Slot::Weapon))
    }
}

impl FromStr for Slot {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EquipmentSlot::from_str(s)
            .map(Slot::Equipment)
            .or_else(|_| WeaponSlot::from_str(s).map(Slot::Weapon))
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// The six armor slots of a build. Every slot is always present, empty or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipment {
    pub helmet: GearSlot,
    pub mask: GearSlot,
    pub top: GearSlot,
    pub bottom: GearSlot,
    pub gloves: GearSlot,
    pub shoes: GearSlot,
}

impl Equipment {
    pub fn slot(&self, slot: EquipmentSlot) -> &GearSlot {
        match slot {
            EquipmentSlot::Helmet => &self.helmet,
            EquipmentSlot::Mask => &self.mask,
            EquipmentSlot::Top => &self.top,
            EquipmentSlot::Bottom => &self.bottom,
            EquipmentSlot::Gloves => &self.gloves,
            EquipmentSlot::Shoes => &self.shoes,
        }
    }

    pub fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut GearSlot {
        match slot {
            EquipmentSlot::Helmet => &mut self.helmet,
            EquipmentSlot::Mask => &mut self.mask,
            EquipmentSlot::Top => &mut self.top,
            EquipmentSlot::Bottom => &mut self.bottom,
            EquipmentSlot::Gloves => &mut self.gloves,
            EquipmentSlot::Shoes => &mut self.shoes,
        }
    }

    /// Slots in display order.
    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, &GearSlot)> {
        EquipmentSlot::iter().map(move |slot| (slot, self.slot(slot)))
    }
}

/// The three weapon slots of a build. Every slot is always present, empty or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weapons {
    pub weapon1: GearSlot,
    pub weapon2: GearSlot,
    pub weapon3: GearSlot,
}

impl Weapons {
    pub fn slot(&self, slot: WeaponSlot) -> &GearSlot {
        match slot {
            WeaponSlot::Weapon1 => &self.weapon1,
            WeaponSlot::Weapon2 => &self.weapon2,
            WeaponSlot::Weapon3 => &self.weapon3,
        }
    }

    pub fn slot_mut(&mut self, slot: WeaponSlot) -> &mut GearSlot {
        match slot {
            WeaponSlot::Weapon1 => &mut self.weapon1,
            WeaponSlot::Weapon2 => &mut self.weapon2,
            WeaponSlot::Weapon3 => &mut self.weapon3,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (WeaponSlot, &GearSlot)> {
        WeaponSlot::iter().map(move |slot| (slot, self.slot(slot)))
    }
}

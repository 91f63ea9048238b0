mod build;
mod gear;

pub use build::{Build, BuildId, Summary};
pub use gear::{Equipment, EquipmentSlot, GearSlot, Slot, WeaponSlot, Weapons};

//! Core library for Loadout.
//!
//! Builds are named selections of equipment and weapons, each slot holding an
//! optional item and an optional mod. This crate owns everything that touches
//! them: the shareable token codec, the lenient validator for imported data,
//! the persisted build store and the [`Repository`] façade that front ends
//! call into.

use thiserror::Error;

pub mod catalog;
pub mod clock;
pub mod codec;
pub mod fs;
pub mod preferences;
pub mod repository;
pub mod storage;

pub use repository::{Build, BuildId, Equipment, GearSlot, Repository, Weapons};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Storage(#[from] storage::Error),
    #[error(transparent)]
    Config(#[from] repository::config::Error),
    #[error("Could not resolve a base directory: {0}")]
    Dirs(#[from] std::io::Error),
}

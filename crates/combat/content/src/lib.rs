//! Reference-data catalog and loaders for the combat engine.
//!
//! This crate houses the static content the resolver runs on and provides
//! loaders for RON/TOML data files:
//! - Enemy type templates (RON)
//! - Difficulty tiers (RON)
//! - Weapon dial specs (RON)
//! - Loot tables (RON)
//! - Spawn pools (RON)
//! - Balance configuration (TOML)
//!
//! Content is consumed through the core's `ContentOracle` seam and never
//! appears in session state. Every sum and cross-reference invariant is
//! checked when a [`Catalog`] is assembled, so a malformed data file fails at
//! startup rather than mid-encounter.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::Catalog;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, EnemyLoader, LootLoader, SpawnLoader, TierLoader, WeaponLoader, load_catalog,
};

//! Reference-data types and the content-oracle seam.
//!
//! Enemy templates, tiers, weapons, loot tables, and spawn pools are
//! immutable reference data owned by the content subsystem. The resolution
//! logic reads them through [`ContentOracle`] so the runtime can swap in a
//! loaded catalog while tests hand-build small fixtures.

use crate::ids::{EnemyTypeId, ItemId, MaterialId, StyleId, TierId};
use crate::stats::StatDistribution;
use crate::zone::ZoneBands;

/// Enemy template. Immutable reference data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyType {
    pub name: String,
    /// Normalized four-way strength split; sums to 1.0 (load-time invariant).
    pub distribution: StatDistribution,
    /// Absolute base HP before tier scaling.
    pub base_hp: f64,
    pub tier: TierId,
    /// Non-default cosmetic style; inherited by dropped materials.
    #[cfg_attr(feature = "serde", serde(default))]
    pub style: Option<StyleId>,
}

/// Difficulty classification multiplying stats and reward yields.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tier {
    pub label: String,
    pub difficulty_multiplier: f64,
    pub gold_multiplier: f64,
    pub xp_multiplier: f64,
}

/// Per-weapon timing configuration.
///
/// `rotation_speed` is carried for the client renderer only; the engine never
/// reads it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponSpec {
    pub name: String,
    pub bands: ZoneBands,
    pub rotation_speed: f64,
}

/// What a loot entry grants.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lootable {
    Material(MaterialId),
    Item(ItemId),
}

/// Per-enemy-type loot association.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootEntry {
    pub lootable: Lootable,
    pub weight: u32,
    /// Forces the drop, bypassing the weighted roll. Used for styled enemies.
    #[cfg_attr(feature = "serde", serde(default))]
    pub guaranteed: bool,
}

/// Which locations a spawn entry applies to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolScope {
    /// Applies everywhere.
    Global,
    /// Applies to locations in the named country.
    Country(String),
    /// Applies to locations in the named state or region.
    State(String),
    /// Applies to locations of the named kind (park, museum, ...).
    LocationType(String),
}

impl PoolScope {
    /// Whether this scope covers the given location.
    pub fn matches(&self, profile: &LocationProfile) -> bool {
        match self {
            PoolScope::Global => true,
            PoolScope::Country(country) => profile.country.as_deref() == Some(country.as_str()),
            PoolScope::State(state) => profile.state.as_deref() == Some(state.as_str()),
            PoolScope::LocationType(kind) => {
                profile.location_type.as_deref() == Some(kind.as_str())
            }
        }
    }
}

/// Enemy-pool membership with a spawn weight and level window.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnEntry {
    pub enemy_type: EnemyTypeId,
    pub scope: PoolScope,
    pub min_level: u32,
    pub max_level: u32,
    pub weight: u32,
}

impl SpawnEntry {
    pub fn covers_level(&self, combat_level: u32) -> bool {
        (self.min_level..=self.max_level).contains(&combat_level)
    }
}

/// Filter attributes of the location an encounter starts at, supplied by the
/// location subsystem.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationProfile {
    pub location_type: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// Read-only access to reference data.
///
/// Implemented by the content crate's loaded catalog; tests implement it over
/// hand-built maps.
pub trait ContentOracle: Send + Sync {
    fn enemy_type(&self, id: &EnemyTypeId) -> Option<&EnemyType>;

    fn tier(&self, id: &TierId) -> Option<&Tier>;

    /// Loot entries for one enemy type. Empty slice when none are defined.
    fn loot_entries(&self, enemy_type: &EnemyTypeId) -> &[LootEntry];

    /// Every spawn-pool membership, across all scopes.
    fn spawn_entries(&self) -> &[SpawnEntry];
}

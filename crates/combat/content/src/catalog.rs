//! Assembled, validated reference data.

use std::collections::HashMap;

use combat_core::{
    ContentOracle, DataError, EnemyType, EnemyTypeId, LootEntry, Lootable, SpawnEntry, Tier,
    TierId, WeaponSpec,
};

/// Immutable reference-data catalog backing the content oracle.
///
/// Assemble with [`Catalog::from_parts`], which runs the full invariant
/// sweep; a catalog that exists is a catalog that validated.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    enemies: HashMap<EnemyTypeId, EnemyType>,
    tiers: HashMap<TierId, Tier>,
    weapons: HashMap<String, WeaponSpec>,
    loot: HashMap<EnemyTypeId, Vec<LootEntry>>,
    spawns: Vec<SpawnEntry>,
}

impl Catalog {
    /// Assemble and validate a catalog from loaded parts.
    pub fn from_parts(
        enemies: HashMap<EnemyTypeId, EnemyType>,
        tiers: HashMap<TierId, Tier>,
        weapons: HashMap<String, WeaponSpec>,
        loot: HashMap<EnemyTypeId, Vec<LootEntry>>,
        spawns: Vec<SpawnEntry>,
    ) -> Result<Self, DataError> {
        let catalog = Self {
            enemies,
            tiers,
            weapons,
            loot,
            spawns,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Full invariant sweep over the loaded data.
    ///
    /// - every enemy distribution sums to 1.0
    /// - every weapon dial sums to 360°
    /// - every enemy references a known tier
    /// - every loot table and spawn entry references a known enemy
    /// - every spawnable enemy has at least one material loot entry
    fn validate(&self) -> Result<(), DataError> {
        for (id, enemy) in &self.enemies {
            enemy.distribution.validate(id.as_str())?;
            if !self.tiers.contains_key(&enemy.tier) {
                return Err(DataError::UnknownTier(enemy.tier.clone()));
            }
        }

        for (name, weapon) in &self.weapons {
            weapon.bands.validate(name)?;
        }

        for id in self.loot.keys() {
            if !self.enemies.contains_key(id) {
                return Err(DataError::UnknownEnemyType(id.clone()));
            }
        }

        for spawn in &self.spawns {
            if !self.enemies.contains_key(&spawn.enemy_type) {
                return Err(DataError::UnknownEnemyType(spawn.enemy_type.clone()));
            }
            let has_material = self
                .loot
                .get(&spawn.enemy_type)
                .is_some_and(|entries| {
                    entries
                        .iter()
                        .any(|entry| matches!(entry.lootable, Lootable::Material(_)))
                });
            if !has_material {
                return Err(DataError::NoMaterialEntries(spawn.enemy_type.clone()));
            }
        }

        Ok(())
    }

    pub fn weapon(&self, name: &str) -> Option<&WeaponSpec> {
        self.weapons.get(name)
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }
}

impl ContentOracle for Catalog {
    fn enemy_type(&self, id: &EnemyTypeId) -> Option<&EnemyType> {
        self.enemies.get(id)
    }

    fn tier(&self, id: &TierId) -> Option<&Tier> {
        self.tiers.get(id)
    }

    fn loot_entries(&self, enemy_type: &EnemyTypeId) -> &[LootEntry] {
        self.loot
            .get(enemy_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn spawn_entries(&self) -> &[SpawnEntry] {
        &self.spawns
    }
}

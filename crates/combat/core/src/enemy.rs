//! Enemy selection and stat realization.
//!
//! At session creation the resolver draws one enemy type from the weighted
//! union of every spawn pool covering the location and level, then realizes
//! its absolute stats and HP.

use crate::catalog::{ContentOracle, LocationProfile};
use crate::config::BalanceConfig;
use crate::error::DataError;
use crate::ids::{EnemyTypeId, StyleId, TierId};
use crate::rng::RngOracle;
use crate::stats::{CombatStats, realize_hp, realize_stats};

/// An enemy realized for one encounter: template reference plus the absolute
/// numbers combat runs on.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedEnemy {
    pub enemy_type: EnemyTypeId,
    pub name: String,
    pub tier: TierId,
    pub difficulty_multiplier: f64,
    pub stats: CombatStats,
    pub max_hp: f64,
    pub style: Option<StyleId>,
}

/// Select and realize an enemy for a location at a combat level.
///
/// Candidates are the spawn entries whose scope matches the location profile
/// and whose level window contains `combat_level`, taken in first-seen order;
/// one weighted draw over their spawn weights picks the winner, so a fixed
/// random draw yields a fixed enemy.
pub fn resolve_enemy(
    oracle: &dyn ContentOracle,
    profile: &LocationProfile,
    combat_level: u32,
    seed: u64,
    rng: &dyn RngOracle,
    cfg: &BalanceConfig,
) -> Result<ResolvedEnemy, DataError> {
    let candidates: Vec<_> = oracle
        .spawn_entries()
        .iter()
        .filter(|entry| entry.scope.matches(profile) && entry.covers_level(combat_level))
        .collect();

    let weights: Vec<u32> = candidates.iter().map(|entry| entry.weight).collect();
    let index = rng
        .pick_weighted(seed, &weights)
        .ok_or(DataError::EmptySpawnPool { combat_level })?;
    let chosen = &candidates[index];

    let enemy_type = oracle
        .enemy_type(&chosen.enemy_type)
        .ok_or_else(|| DataError::UnknownEnemyType(chosen.enemy_type.clone()))?;
    let tier = oracle
        .tier(&enemy_type.tier)
        .ok_or_else(|| DataError::UnknownTier(enemy_type.tier.clone()))?;

    let stats = realize_stats(
        &enemy_type.distribution,
        combat_level,
        tier.difficulty_multiplier,
        cfg,
    );

    Ok(ResolvedEnemy {
        enemy_type: chosen.enemy_type.clone(),
        name: enemy_type.name.clone(),
        tier: enemy_type.tier.clone(),
        difficulty_multiplier: tier.difficulty_multiplier,
        stats,
        max_hp: realize_hp(enemy_type.base_hp, tier.difficulty_multiplier),
        style: enemy_type.style.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EnemyType, LootEntry, PoolScope, SpawnEntry, Tier};
    use crate::rng::PcgRng;
    use crate::stats::StatDistribution;
    use std::collections::HashMap;

    struct FixtureOracle {
        enemies: HashMap<EnemyTypeId, EnemyType>,
        tiers: HashMap<TierId, Tier>,
        spawns: Vec<SpawnEntry>,
    }

    impl ContentOracle for FixtureOracle {
        fn enemy_type(&self, id: &EnemyTypeId) -> Option<&EnemyType> {
            self.enemies.get(id)
        }

        fn tier(&self, id: &TierId) -> Option<&Tier> {
            self.tiers.get(id)
        }

        fn loot_entries(&self, _enemy_type: &EnemyTypeId) -> &[LootEntry] {
            &[]
        }

        fn spawn_entries(&self) -> &[SpawnEntry] {
            &self.spawns
        }
    }

    fn fixture() -> FixtureOracle {
        let distribution = StatDistribution {
            atk_power: 0.33,
            atk_accuracy: 0.27,
            def_power: 0.25,
            def_accuracy: 0.15,
        };
        let mut enemies = HashMap::new();
        enemies.insert(
            EnemyTypeId::from("park_rat"),
            EnemyType {
                name: "Park Rat".to_owned(),
                distribution,
                base_hp: 80.0,
                tier: TierId::from("common"),
                style: None,
            },
        );
        enemies.insert(
            EnemyTypeId::from("museum_ghost"),
            EnemyType {
                name: "Museum Ghost".to_owned(),
                distribution,
                base_hp: 120.0,
                tier: TierId::from("common"),
                style: None,
            },
        );
        let mut tiers = HashMap::new();
        tiers.insert(
            TierId::from("common"),
            Tier {
                label: "Common".to_owned(),
                difficulty_multiplier: 1.0,
                gold_multiplier: 1.0,
                xp_multiplier: 1.0,
            },
        );
        let spawns = vec![
            SpawnEntry {
                enemy_type: EnemyTypeId::from("park_rat"),
                scope: PoolScope::LocationType("park".to_owned()),
                min_level: 1,
                max_level: 50,
                weight: 10,
            },
            SpawnEntry {
                enemy_type: EnemyTypeId::from("museum_ghost"),
                scope: PoolScope::LocationType("museum".to_owned()),
                min_level: 1,
                max_level: 50,
                weight: 10,
            },
        ];
        FixtureOracle {
            enemies,
            tiers,
            spawns,
        }
    }

    fn park() -> LocationProfile {
        LocationProfile {
            location_type: Some("park".to_owned()),
            state: None,
            country: None,
        }
    }

    #[test]
    fn only_matching_pools_are_drawn_from() {
        let oracle = fixture();
        let cfg = BalanceConfig::default();
        let rng = PcgRng;
        for seed in 0..50u64 {
            let enemy = resolve_enemy(&oracle, &park(), 10, seed, &rng, &cfg).unwrap();
            assert_eq!(enemy.enemy_type, EnemyTypeId::from("park_rat"));
        }
    }

    #[test]
    fn realized_stats_match_reference_formula() {
        let oracle = fixture();
        let cfg = BalanceConfig::default();
        let enemy = resolve_enemy(&oracle, &park(), 10, 1, &PcgRng, &cfg).unwrap();
        assert!((enemy.stats.atk_power - 264.0).abs() < 1e-9);
        assert_eq!(enemy.max_hp, 80.0);
    }

    #[test]
    fn hp_is_level_independent() {
        let oracle = fixture();
        let cfg = BalanceConfig::default();
        let at_5 = resolve_enemy(&oracle, &park(), 5, 1, &PcgRng, &cfg).unwrap();
        let at_20 = resolve_enemy(&oracle, &park(), 20, 1, &PcgRng, &cfg).unwrap();
        assert_eq!(at_5.max_hp, at_20.max_hp);
        assert!((at_20.stats.atk_power - at_5.stats.atk_power * 4.0).abs() < 1e-9);
    }

    #[test]
    fn empty_pool_is_an_error() {
        let oracle = fixture();
        let cfg = BalanceConfig::default();
        let nowhere = LocationProfile::default();
        let err = resolve_enemy(&oracle, &nowhere, 10, 1, &PcgRng, &cfg).unwrap_err();
        assert!(matches!(err, DataError::EmptySpawnPool { combat_level: 10 }));
    }

    #[test]
    fn fixed_draw_yields_fixed_enemy() {
        let oracle = fixture();
        let cfg = BalanceConfig::default();
        let first = resolve_enemy(&oracle, &park(), 10, 99, &PcgRng, &cfg).unwrap();
        let second = resolve_enemy(&oracle, &park(), 10, 99, &PcgRng, &cfg).unwrap();
        assert_eq!(first, second);
    }
}

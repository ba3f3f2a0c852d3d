//! Post-victory reward generation.
//!
//! Four independent components computed in one pass: exactly one material
//! (weighted draw), at most one item (weighted draw with a failure arm), and
//! flat gold/XP formulas scaled by tier. A styled enemy's material drop
//! inherits its style unconditionally.

use crate::catalog::{LootEntry, Lootable, Tier};
use crate::config::BalanceConfig;
use crate::enemy::ResolvedEnemy;
use crate::error::DataError;
use crate::ids::{ItemId, MaterialId, StyleId};
use crate::rng::{RngOracle, compute_seed};

/// Roll contexts for the two independent loot draws. Turn resolution uses
/// contexts 0 and 1.
const CTX_MATERIAL_DRAW: u32 = 2;
const CTX_ITEM_DRAW: u32 = 3;

/// The guaranteed material component of a victory.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialGrant {
    pub material: MaterialId,
    /// Force-tagged from the defeated enemy's style, when it has one.
    pub style: Option<StyleId>,
}

/// Everything a victory yields, handed to the economy and inventory
/// collaborators for ledger application.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rewards {
    pub material: MaterialGrant,
    pub item: Option<ItemId>,
    pub gold: u64,
    pub xp: u64,
}

/// Generate the full rewards payload for a victorious session.
///
/// `sequence` is the session's event count at completion, which keeps the
/// loot seeds distinct from every turn seed.
pub fn generate_rewards(
    entries: &[LootEntry],
    enemy: &ResolvedEnemy,
    tier: &Tier,
    combat_level: u32,
    session_seed: u64,
    sequence: u64,
    rng: &dyn RngOracle,
    cfg: &BalanceConfig,
) -> Result<Rewards, DataError> {
    let material = draw_material(entries, enemy, session_seed, sequence, rng)?;
    let item = draw_item(entries, session_seed, sequence, rng, cfg);

    let gold = (f64::from(cfg.base_gold_per_level) * f64::from(combat_level)
        * tier.gold_multiplier)
        .floor() as u64;
    let xp = (f64::from(cfg.base_xp_per_level) * f64::from(combat_level) * tier.xp_multiplier)
        .floor() as u64;

    Ok(Rewards {
        material,
        item,
        gold,
        xp,
    })
}

/// Exactly one material per victory.
///
/// A guaranteed material entry wins outright (first-seen), otherwise one
/// weighted draw picks among the material entries. An enemy with no material
/// entries is a data error; this should have been caught at catalog load.
fn draw_material(
    entries: &[LootEntry],
    enemy: &ResolvedEnemy,
    session_seed: u64,
    sequence: u64,
    rng: &dyn RngOracle,
) -> Result<MaterialGrant, DataError> {
    let materials: Vec<(&MaterialId, u32, bool)> = entries
        .iter()
        .filter_map(|entry| match &entry.lootable {
            Lootable::Material(id) => Some((id, entry.weight, entry.guaranteed)),
            Lootable::Item(_) => None,
        })
        .collect();

    if materials.is_empty() {
        return Err(DataError::NoMaterialEntries(enemy.enemy_type.clone()));
    }

    let chosen = if let Some((id, _, _)) = materials.iter().find(|(_, _, guaranteed)| *guaranteed) {
        (*id).clone()
    } else {
        let weights: Vec<u32> = materials.iter().map(|(_, weight, _)| *weight).collect();
        let seed = compute_seed(session_seed, sequence, CTX_MATERIAL_DRAW);
        // All-zero weights degenerate to the first-seen entry.
        let index = rng.pick_weighted(seed, &weights).unwrap_or(0);
        materials[index].0.clone()
    };

    Ok(MaterialGrant {
        material: chosen,
        style: enemy.style.clone(),
    })
}

/// Zero or one item per victory.
///
/// The "no item" arm weighs `item_failure_scale − Σ weights` when positive;
/// a guaranteed item entry bypasses the roll entirely.
fn draw_item(
    entries: &[LootEntry],
    session_seed: u64,
    sequence: u64,
    rng: &dyn RngOracle,
    cfg: &BalanceConfig,
) -> Option<ItemId> {
    let items: Vec<(&ItemId, u32, bool)> = entries
        .iter()
        .filter_map(|entry| match &entry.lootable {
            Lootable::Item(id) => Some((id, entry.weight, entry.guaranteed)),
            Lootable::Material(_) => None,
        })
        .collect();

    if items.is_empty() {
        return None;
    }

    if let Some((id, _, _)) = items.iter().find(|(_, _, guaranteed)| *guaranteed) {
        return Some((*id).clone());
    }

    let mut weights: Vec<u32> = items.iter().map(|(_, weight, _)| *weight).collect();
    let total: u32 = weights.iter().sum();
    let failure_index = weights.len();
    weights.push(cfg.item_failure_scale.saturating_sub(total));

    let seed = compute_seed(session_seed, sequence, CTX_ITEM_DRAW);
    let index = rng.pick_weighted(seed, &weights)?;
    if index == failure_index {
        None
    } else {
        Some(items[index].0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{EnemyTypeId, TierId};
    use crate::rng::PcgRng;
    use crate::stats::CombatStats;

    fn enemy(style: Option<StyleId>) -> ResolvedEnemy {
        ResolvedEnemy {
            enemy_type: EnemyTypeId::from("park_rat"),
            name: "Park Rat".to_owned(),
            tier: TierId::from("common"),
            difficulty_multiplier: 1.0,
            stats: CombatStats {
                atk_power: 100.0,
                atk_accuracy: 50.0,
                def_power: 40.0,
                def_accuracy: 30.0,
            },
            max_hp: 80.0,
            style,
        }
    }

    fn tier() -> Tier {
        Tier {
            label: "Common".to_owned(),
            difficulty_multiplier: 1.0,
            gold_multiplier: 1.5,
            xp_multiplier: 2.0,
        }
    }

    fn table() -> Vec<LootEntry> {
        vec![
            LootEntry {
                lootable: Lootable::Material(MaterialId::from("fur")),
                weight: 70,
                guaranteed: false,
            },
            LootEntry {
                lootable: Lootable::Material(MaterialId::from("bone")),
                weight: 30,
                guaranteed: false,
            },
            LootEntry {
                lootable: Lootable::Item(ItemId::from("rusty_dagger")),
                weight: 10,
                guaranteed: false,
            },
        ]
    }

    #[test]
    fn every_victory_yields_exactly_one_material() {
        let cfg = BalanceConfig::default();
        for seed in 0..100u64 {
            let rewards =
                generate_rewards(&table(), &enemy(None), &tier(), 10, seed, 6, &PcgRng, &cfg)
                    .unwrap();
            let material = rewards.material.material;
            assert!(
                material == MaterialId::from("fur") || material == MaterialId::from("bone"),
                "unexpected material {material}"
            );
        }
    }

    #[test]
    fn item_drop_is_zero_or_one() {
        let cfg = BalanceConfig::default();
        let mut dropped = 0u32;
        let mut skipped = 0u32;
        for seed in 0..200u64 {
            let rewards =
                generate_rewards(&table(), &enemy(None), &tier(), 10, seed, 6, &PcgRng, &cfg)
                    .unwrap();
            match rewards.item {
                Some(item) => {
                    assert_eq!(item, ItemId::from("rusty_dagger"));
                    dropped += 1;
                }
                None => skipped += 1,
            }
        }
        // 10% arm out of a 100 scale: both outcomes must occur over 200 runs.
        assert!(dropped > 0);
        assert!(skipped > 0);
    }

    #[test]
    fn styled_enemy_forces_style_inheritance() {
        let cfg = BalanceConfig::default();
        let rewards = generate_rewards(
            &table(),
            &enemy(Some(StyleId::from("spectral"))),
            &tier(),
            10,
            1,
            6,
            &PcgRng,
            &cfg,
        )
        .unwrap();
        assert_eq!(rewards.material.style, Some(StyleId::from("spectral")));
    }

    #[test]
    fn guaranteed_entries_bypass_the_rolls() {
        let cfg = BalanceConfig::default();
        let entries = vec![
            LootEntry {
                lootable: Lootable::Material(MaterialId::from("essence")),
                weight: 0,
                guaranteed: true,
            },
            LootEntry {
                lootable: Lootable::Material(MaterialId::from("fur")),
                weight: 100,
                guaranteed: false,
            },
            LootEntry {
                lootable: Lootable::Item(ItemId::from("charm")),
                weight: 0,
                guaranteed: true,
            },
        ];
        for seed in 0..20u64 {
            let rewards =
                generate_rewards(&entries, &enemy(None), &tier(), 10, seed, 6, &PcgRng, &cfg)
                    .unwrap();
            assert_eq!(rewards.material.material, MaterialId::from("essence"));
            assert_eq!(rewards.item, Some(ItemId::from("charm")));
        }
    }

    #[test]
    fn gold_and_xp_follow_the_tier_formulas() {
        let cfg = BalanceConfig::default();
        let rewards =
            generate_rewards(&table(), &enemy(None), &tier(), 10, 1, 6, &PcgRng, &cfg).unwrap();
        // floor(10 × 10 × 1.5) and floor(25 × 10 × 2.0)
        assert_eq!(rewards.gold, 150);
        assert_eq!(rewards.xp, 500);
    }

    #[test]
    fn missing_material_entries_are_a_data_error() {
        let cfg = BalanceConfig::default();
        let items_only = vec![LootEntry {
            lootable: Lootable::Item(ItemId::from("charm")),
            weight: 10,
            guaranteed: false,
        }];
        let err = generate_rewards(&items_only, &enemy(None), &tier(), 10, 1, 6, &PcgRng, &cfg)
            .unwrap_err();
        assert!(matches!(err, DataError::NoMaterialEntries(_)));
    }
}

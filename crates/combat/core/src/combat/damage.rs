//! Zone-to-damage conversion.
//!
//! The resolved zone carries a multiplier applied to the attacker's power,
//! reduced by the defender's mitigation. Two hard rules: a miss deals exactly
//! 0, and every other landed effect deals at least 1. The injure zone inverts
//! the attack onto the acting side.

use crate::config::BalanceConfig;
use crate::rng::RngOracle;
use crate::stats::CombatStats;
use crate::zone::Zone;

/// Base damage multiplier per zone.
///
/// The crit value here is only the base; the per-crit uniform bonus is added
/// during [`resolve_attack`].
pub fn attack_multiplier(zone: Zone, cfg: &BalanceConfig) -> f64 {
    match zone {
        Zone::Injure => -0.5,
        Zone::Miss => 0.0,
        Zone::Graze => 0.6,
        Zone::Normal => 1.0,
        Zone::Crit => cfg.crit_multiplier,
    }
}

/// Damage reduction granted by a timed defense, per zone.
pub fn reduction_for(zone: Zone) -> f64 {
    match zone {
        Zone::Injure => 0.0,
        Zone::Miss => 0.2,
        Zone::Graze => 0.5,
        Zone::Normal => 0.75,
        Zone::Crit => 0.9,
    }
}

/// Result of resolving one attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    pub zone: Zone,
    pub damage: u32,
    /// The injure zone turns the attack back on the acting side.
    pub self_inflicted: bool,
}

/// Resolve an attack that landed in `zone`.
///
/// `max(1, atk_power × multiplier − defender.def_power)`, with two
/// exceptions: miss deals exactly 0, and injure deals
/// `max(1, atk_power × 0.5 − attacker.def_power)` to the attacker instead.
/// The crit bonus `U(0, crit_bonus_max)` is sampled once per crit from the
/// injected RNG.
pub fn resolve_attack(
    zone: Zone,
    attacker: &CombatStats,
    defender: &CombatStats,
    seed: u64,
    rng: &dyn RngOracle,
    cfg: &BalanceConfig,
) -> AttackOutcome {
    match zone {
        Zone::Miss => AttackOutcome {
            zone,
            damage: 0,
            self_inflicted: false,
        },
        Zone::Injure => {
            let raw = attacker.atk_power * 0.5 - attacker.def_power;
            AttackOutcome {
                zone,
                damage: floor_to_damage(raw),
                self_inflicted: true,
            }
        }
        _ => {
            let mut multiplier = attack_multiplier(zone, cfg);
            if zone == Zone::Crit {
                multiplier += rng.unit(seed) * cfg.crit_bonus_max;
            }
            let raw = attacker.atk_power * multiplier - defender.def_power;
            AttackOutcome {
                zone,
                damage: floor_to_damage(raw),
                self_inflicted: false,
            }
        }
    }
}

/// Apply a timed defense to incoming damage.
///
/// Returns `(damage_taken, damage_prevented)`. A landed hit is floored at 1
/// even through a crit-zone defense; an incoming 0 (enemy missed) stays 0.
pub fn resolve_defense(defend_zone: Zone, incoming: u32) -> (u32, u32) {
    if incoming == 0 {
        return (0, 0);
    }
    let reduction = reduction_for(defend_zone);
    let taken = floor_to_damage(f64::from(incoming) * (1.0 - reduction));
    (taken, incoming - taken)
}

/// Floor raw damage to a whole value, never below 1.
fn floor_to_damage(raw: f64) -> u32 {
    raw.floor().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PcgRng;

    fn attacker() -> CombatStats {
        CombatStats {
            atk_power: 200.0,
            atk_accuracy: 80.0,
            def_power: 60.0,
            def_accuracy: 40.0,
        }
    }

    fn defender() -> CombatStats {
        CombatStats {
            atk_power: 150.0,
            atk_accuracy: 70.0,
            def_power: 50.0,
            def_accuracy: 30.0,
        }
    }

    #[test]
    fn miss_is_exactly_zero() {
        let cfg = BalanceConfig::default();
        let outcome = resolve_attack(Zone::Miss, &attacker(), &defender(), 1, &PcgRng, &cfg);
        assert_eq!(outcome.damage, 0);
        assert!(!outcome.self_inflicted);
    }

    #[test]
    fn normal_hit_applies_defender_mitigation() {
        let cfg = BalanceConfig::default();
        let outcome = resolve_attack(Zone::Normal, &attacker(), &defender(), 1, &PcgRng, &cfg);
        // 200 × 1.0 − 50 = 150
        assert_eq!(outcome.damage, 150);
    }

    #[test]
    fn graze_scales_down_before_mitigation() {
        let cfg = BalanceConfig::default();
        let outcome = resolve_attack(Zone::Graze, &attacker(), &defender(), 1, &PcgRng, &cfg);
        // 200 × 0.6 − 50 = 70
        assert_eq!(outcome.damage, 70);
    }

    #[test]
    fn landed_hits_never_fall_below_one() {
        let cfg = BalanceConfig::default();
        let feeble = CombatStats {
            atk_power: 10.0,
            atk_accuracy: 5.0,
            def_power: 5.0,
            def_accuracy: 5.0,
        };
        let wall = CombatStats {
            atk_power: 10.0,
            atk_accuracy: 5.0,
            def_power: 500.0,
            def_accuracy: 5.0,
        };
        let outcome = resolve_attack(Zone::Normal, &feeble, &wall, 1, &PcgRng, &cfg);
        assert_eq!(outcome.damage, 1);
    }

    #[test]
    fn crit_bonus_stays_within_the_configured_range() {
        let cfg = BalanceConfig::default();
        for seed in 0..200u64 {
            let outcome = resolve_attack(Zone::Crit, &attacker(), &defender(), seed, &PcgRng, &cfg);
            // 200 × 1.6 − 50 = 270 at no bonus, 200 × 2.6 − 50 = 470 at max.
            assert!(outcome.damage >= 270 && outcome.damage < 470);
        }
    }

    #[test]
    fn injure_turns_on_the_attacker() {
        let cfg = BalanceConfig::default();
        let outcome = resolve_attack(Zone::Injure, &attacker(), &defender(), 1, &PcgRng, &cfg);
        assert!(outcome.self_inflicted);
        // 200 × 0.5 − 60 (attacker's own defense) = 40
        assert_eq!(outcome.damage, 40);
    }

    #[test]
    fn defense_reduction_table() {
        assert_eq!(resolve_defense(Zone::Injure, 100), (100, 0));
        assert_eq!(resolve_defense(Zone::Miss, 100), (80, 20));
        assert_eq!(resolve_defense(Zone::Graze, 100), (50, 50));
        assert_eq!(resolve_defense(Zone::Normal, 100), (25, 75));
        assert_eq!(resolve_defense(Zone::Crit, 100), (10, 90));
    }

    #[test]
    fn defended_hit_still_lands_for_at_least_one() {
        assert_eq!(resolve_defense(Zone::Crit, 5), (1, 4));
    }

    #[test]
    fn defending_a_missed_attack_stays_zero() {
        assert_eq!(resolve_defense(Zone::Normal, 0), (0, 0));
    }
}

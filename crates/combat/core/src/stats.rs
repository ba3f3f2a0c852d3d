//! Stat distributions, realization formulas, and the loadout snapshot.
//!
//! Enemy templates carry a normalized four-way split of their strength;
//! realization turns that split into absolute numbers scaled by level and
//! tier. Player stats arrive pre-aggregated from the equipment subsystem and
//! are frozen into a [`PlayerLoadout`] at session creation.

use crate::config::BalanceConfig;
use crate::error::DataError;
use crate::zone::ZoneBands;

/// Tolerance for the distribution-sum invariant.
const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

/// Normalized four-way split of an enemy's combat strength.
///
/// Invariant: the four shares sum to 1.0, enforced at data-load time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatDistribution {
    pub atk_power: f64,
    pub atk_accuracy: f64,
    pub def_power: f64,
    pub def_accuracy: f64,
}

impl StatDistribution {
    pub fn sum(&self) -> f64 {
        self.atk_power + self.atk_accuracy + self.def_power + self.def_accuracy
    }

    /// Enforce the sum-to-one invariant; violations are fatal configuration
    /// errors, not something to renormalize silently.
    pub fn validate(&self, label: &str) -> Result<(), DataError> {
        let sum = self.sum();
        let shares = [
            self.atk_power,
            self.atk_accuracy,
            self.def_power,
            self.def_accuracy,
        ];
        if (sum - 1.0).abs() > DISTRIBUTION_TOLERANCE || shares.iter().any(|s| *s < 0.0) {
            return Err(DataError::DistributionSum {
                label: label.to_owned(),
                sum,
            });
        }
        Ok(())
    }
}

/// Absolute combat stats for one side of an encounter.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub atk_power: f64,
    pub atk_accuracy: f64,
    pub def_power: f64,
    pub def_accuracy: f64,
}

/// Realize an enemy's absolute stats from its normalized distribution.
///
/// Per stat: `share × slot_count × combat_level × difficulty × stat_unit`.
/// Attack and defense therefore scale linearly with level.
pub fn realize_stats(
    distribution: &StatDistribution,
    combat_level: u32,
    difficulty_multiplier: f64,
    cfg: &BalanceConfig,
) -> CombatStats {
    let scale = cfg.equipment_slot_count as f64
        * combat_level as f64
        * difficulty_multiplier
        * cfg.base_stat_unit;

    CombatStats {
        atk_power: distribution.atk_power * scale,
        atk_accuracy: distribution.atk_accuracy * scale,
        def_power: distribution.def_power * scale,
        def_accuracy: distribution.def_accuracy * scale,
    }
}

/// Realize an enemy's HP: `base_hp × difficulty`.
///
/// Combat level is deliberately absent so fight duration stays roughly flat
/// as players level; only hit power and mitigation grow.
pub fn realize_hp(base_hp: f64, difficulty_multiplier: f64) -> f64 {
    base_hp * difficulty_multiplier
}

/// Recover a normalized accuracy share in `[0, 1]` from an absolute stat.
///
/// Inverse of the realization scale, clamped to `[0, 1]`; the dial adjustment
/// in [`crate::zone`] consumes normalized accuracy regardless of which side
/// is acting.
pub fn accuracy_share(
    stat: f64,
    combat_level: u32,
    difficulty_multiplier: f64,
    cfg: &BalanceConfig,
) -> f64 {
    let scale = cfg.equipment_slot_count as f64
        * combat_level as f64
        * difficulty_multiplier
        * cfg.base_stat_unit;
    if scale <= 0.0 {
        return 0.0;
    }
    (stat / scale).clamp(0.0, 1.0)
}

/// Immutable snapshot of the player's equipped state, captured at session
/// creation.
///
/// The session keeps this copy for its whole lifetime: live equipment changes
/// mid-fight never reach the combat math. This is the anti-cheat guarantee.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerLoadout {
    /// Aggregated equipped combat stats.
    pub stats: CombatStats,
    /// Maximum HP reported by the progression subsystem.
    pub max_hp: f64,
    /// Equipped weapon's base dial.
    pub weapon: ZoneBands,
}

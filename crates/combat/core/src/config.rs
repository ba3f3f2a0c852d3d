//! Balance parameters for the combat resolution engine.
//!
//! Every tunable constant the formulas consume lives here so balancing can
//! adjust numbers through a config file without code changes. Defaults match
//! the reference values; the content crate loads overrides from TOML.

use crate::zone::ZoneBands;

/// Balance parameters consumed by the combat formulas.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BalanceConfig {
    /// Number of equipment slots contributing to realized enemy stats.
    pub equipment_slot_count: u32,

    /// Base unit a normalized stat share is scaled by.
    pub base_stat_unit: f64,

    /// Fallback maximum HP for a loadout that reports none.
    pub player_base_hp: f64,

    /// Gold reward per combat level before tier multipliers.
    pub base_gold_per_level: u32,

    /// XP reward per combat level before tier multipliers.
    pub base_xp_per_level: u32,

    /// Accuracy value at which half of the maximum band adjustment applies.
    pub accuracy_half_point: f64,

    /// Cap on how far accuracy can widen the favorable bands.
    pub accuracy_max_effect: f64,

    /// Base damage multiplier for the crit zone.
    pub crit_multiplier: f64,

    /// Upper bound of the uniform bonus added on top of a crit.
    pub crit_bonus_max: f64,

    /// Weight scale for the item roll: the "no item" arm receives
    /// `item_failure_scale - sum(weights)` when positive.
    pub item_failure_scale: u32,

    /// Defense value at which effective HP gains half its maximum boost.
    pub defense_half_point: f64,

    /// Exponent weighting offense inside the combat rating.
    pub rating_attack_exponent: f64,

    /// Exponent weighting effective survivability inside the combat rating.
    pub rating_survival_exponent: f64,

    /// Rating differential producing a 10:1 win-probability ratio.
    pub win_probability_spread: f64,

    /// Session time-to-live in seconds, enforced lazily on access.
    pub session_ttl_secs: u64,

    /// Timing dial used for enemy auto-attacks (enemies carry no weapon).
    pub enemy_bands: ZoneBands,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            equipment_slot_count: 8,
            base_stat_unit: 10.0,
            player_base_hp: 100.0,
            base_gold_per_level: 10,
            base_xp_per_level: 25,
            accuracy_half_point: 0.5,
            accuracy_max_effect: 0.6,
            crit_multiplier: 1.6,
            crit_bonus_max: 1.0,
            item_failure_scale: 100,
            defense_half_point: 200.0,
            rating_attack_exponent: 0.6,
            rating_survival_exponent: 0.4,
            win_probability_spread: 400.0,
            session_ttl_secs: 15 * 60,
            enemy_bands: ZoneBands::new(20.0, 40.0, 80.0, 160.0, 60.0),
        }
    }
}

impl BalanceConfig {
    /// Session TTL in milliseconds, for comparison against unix-ms stamps.
    pub fn session_ttl_ms(&self) -> i64 {
        self.session_ttl_secs as i64 * 1000
    }
}

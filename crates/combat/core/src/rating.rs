//! Combat rating and win-probability estimation.
//!
//! Telemetry and balancing numbers recorded on every session. None of these
//! values gate whether combat may proceed.

use crate::config::BalanceConfig;
use crate::stats::CombatStats;

/// Rating fields recorded on a session at creation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RatingSummary {
    pub player_rating: f64,
    pub enemy_rating: f64,
    /// Estimated probability that the player wins, in `[0, 1]`.
    pub win_probability: f64,
}

/// HP adjusted by a diminishing-returns transform of defense.
///
/// `hp × (1 + def / (def + half_point))`: defense at the half point adds 50%
/// of its maximum boost, and the boost saturates at double HP, so defense
/// never dominates linearly.
pub fn effective_hp(hp: f64, defense: f64, cfg: &BalanceConfig) -> f64 {
    let defense = defense.max(0.0);
    hp * (1.0 + defense / (defense + cfg.defense_half_point))
}

/// Power-law blend of offense and effective survivability.
pub fn combat_rating(atk: f64, effective_hp: f64, cfg: &BalanceConfig) -> f64 {
    atk.max(0.0).powf(cfg.rating_attack_exponent)
        * effective_hp.max(0.0).powf(cfg.rating_survival_exponent)
}

/// Rate one side from its realized stats and maximum HP.
pub fn rate_combatant(stats: &CombatStats, max_hp: f64, cfg: &BalanceConfig) -> f64 {
    combat_rating(
        stats.atk_power,
        effective_hp(max_hp, stats.def_power, cfg),
        cfg,
    )
}

/// Logistic win-probability estimate from the rating differential.
///
/// A differential of `win_probability_spread` corresponds to 10:1 odds,
/// mirroring the Elo expected-score curve.
pub fn win_probability(player_rating: f64, enemy_rating: f64, cfg: &BalanceConfig) -> f64 {
    1.0 / (1.0 + 10f64.powf((enemy_rating - player_rating) / cfg.win_probability_spread))
}

/// Build the session's rating record from both sides' realized numbers.
pub fn summarize(
    player: &CombatStats,
    player_max_hp: f64,
    enemy: &CombatStats,
    enemy_max_hp: f64,
    cfg: &BalanceConfig,
) -> RatingSummary {
    let player_rating = rate_combatant(player, player_max_hp, cfg);
    let enemy_rating = rate_combatant(enemy, enemy_max_hp, cfg);
    RatingSummary {
        player_rating,
        enemy_rating,
        win_probability: win_probability(player_rating, enemy_rating, cfg),
    }
}

//! Turn alternation and outcome evaluation.
//!
//! A fight alternates between two phases: the player times an attack on their
//! weapon dial, then times a defense against the enemy's automated
//! counter-attack. Each resolution returns the pending log events; the
//! session runtime appends them and re-derives HP.

use crate::combat::damage::{resolve_attack, resolve_defense};
use crate::config::BalanceConfig;
use crate::enemy::ResolvedEnemy;
use crate::error::ActionError;
use crate::rng::{RngOracle, compute_seed};
use crate::session::{Actor, CombatEventKind, Outcome};
use crate::stats::{CombatStats, accuracy_share};
use crate::zone::{Zone, ZoneBands, adjust_bands, resolve_zone};

/// Roll-context constants for [`compute_seed`], one per independent roll in
/// a resolution step.
const CTX_ENEMY_ANGLE: u32 = 0;
const CTX_CRIT_BONUS: u32 = 1;

/// Whose timing the next submitted action drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnPhase {
    /// The player attacks on their weapon dial.
    PlayerAttack,
    /// The enemy attacks; the player times a defense.
    PlayerDefend,
}

/// A log event produced by turn resolution, before sequence and timestamp
/// assignment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingEvent {
    pub actor: Actor,
    pub kind: CombatEventKind,
    pub zone: Option<Zone>,
    pub amount: u32,
}

/// Everything one submitted action resolved to.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnResolution {
    pub events: Vec<PendingEvent>,
    pub next_phase: TurnPhase,
}

/// Uniform enemy auto-attack angle on `[0, 360)`.
pub fn enemy_attack_angle(seed: u64, rng: &dyn RngOracle) -> f64 {
    rng.unit(seed) * 360.0
}

/// Resolve the player's timed attack.
///
/// The weapon dial is adjusted by the player's attack accuracy before the
/// tap angle resolves; damage then follows the zone table against the
/// enemy's mitigation.
pub fn resolve_player_attack(
    player: &CombatStats,
    weapon: &ZoneBands,
    enemy: &ResolvedEnemy,
    combat_level: u32,
    tap_angle: f64,
    session_seed: u64,
    sequence: u64,
    rng: &dyn RngOracle,
    cfg: &BalanceConfig,
) -> Result<TurnResolution, ActionError> {
    // Player stats realize at tier 1: their gear already carries the scaling.
    let accuracy = accuracy_share(player.atk_accuracy, combat_level, 1.0, cfg);
    let dial = adjust_bands(weapon, accuracy, cfg);
    let zone = resolve_zone(&dial, tap_angle)?;

    let crit_seed = compute_seed(session_seed, sequence, CTX_CRIT_BONUS);
    let outcome = resolve_attack(zone, player, &enemy.stats, crit_seed, rng, cfg);

    let event = if outcome.self_inflicted {
        PendingEvent {
            actor: Actor::Player,
            kind: CombatEventKind::SelfInflicted,
            zone: Some(zone),
            amount: outcome.damage,
        }
    } else {
        PendingEvent {
            actor: Actor::Player,
            kind: CombatEventKind::PlayerAttack,
            zone: Some(zone),
            amount: outcome.damage,
        }
    };

    Ok(TurnResolution {
        events: vec![event],
        next_phase: TurnPhase::PlayerDefend,
    })
}

/// Resolve an enemy auto-attack against the player's timed defense.
///
/// The enemy rolls a uniform angle on its own accuracy-adjusted dial, which
/// supplies the attack variance without player timing on that side; the
/// player's defense zone then scales the incoming damage.
pub fn resolve_player_defend(
    player: &CombatStats,
    weapon: &ZoneBands,
    enemy: &ResolvedEnemy,
    combat_level: u32,
    tap_angle: f64,
    session_seed: u64,
    sequence: u64,
    rng: &dyn RngOracle,
    cfg: &BalanceConfig,
) -> Result<TurnResolution, ActionError> {
    let defense_accuracy = accuracy_share(player.def_accuracy, combat_level, 1.0, cfg);
    let defense_dial = adjust_bands(weapon, defense_accuracy, cfg);
    let defend_zone = resolve_zone(&defense_dial, tap_angle)?;

    let enemy_accuracy = accuracy_share(
        enemy.stats.atk_accuracy,
        combat_level,
        enemy.difficulty_multiplier,
        cfg,
    );
    let enemy_dial = adjust_bands(&cfg.enemy_bands, enemy_accuracy, cfg);
    let angle_seed = compute_seed(session_seed, sequence, CTX_ENEMY_ANGLE);
    let enemy_angle = enemy_attack_angle(angle_seed, rng);
    // unit() < 1 keeps the rolled angle inside [0, 360).
    let enemy_zone = resolve_zone(&enemy_dial, enemy_angle).unwrap_or(Zone::Miss);

    let crit_seed = compute_seed(session_seed, sequence, CTX_CRIT_BONUS);
    let outcome = resolve_attack(enemy_zone, &enemy.stats, player, crit_seed, rng, cfg);

    let mut events = Vec::with_capacity(2);
    if outcome.self_inflicted {
        // Enemy fumbled into its own injure band; nothing reaches the player.
        events.push(PendingEvent {
            actor: Actor::Player,
            kind: CombatEventKind::PlayerDefend,
            zone: Some(defend_zone),
            amount: 0,
        });
        events.push(PendingEvent {
            actor: Actor::Enemy,
            kind: CombatEventKind::SelfInflicted,
            zone: Some(enemy_zone),
            amount: outcome.damage,
        });
    } else {
        let (taken, prevented) = resolve_defense(defend_zone, outcome.damage);
        events.push(PendingEvent {
            actor: Actor::Player,
            kind: CombatEventKind::PlayerDefend,
            zone: Some(defend_zone),
            amount: prevented,
        });
        events.push(PendingEvent {
            actor: Actor::Enemy,
            kind: CombatEventKind::EnemyAttack,
            zone: Some(enemy_zone),
            amount: taken,
        });
    }

    Ok(TurnResolution {
        events,
        next_phase: TurnPhase::PlayerAttack,
    })
}

/// Terminal-condition check after a resolution step.
///
/// Explicit tie-break policy: if both sides are at or below zero in the same
/// step, the enemy wins and the outcome is defeat.
pub fn evaluate_outcome(player_hp: f64, enemy_hp: f64) -> Outcome {
    if player_hp <= 0.0 {
        // Covers the simultaneous-zero case: enemy wins ties.
        Outcome::Defeat
    } else if enemy_hp <= 0.0 {
        Outcome::Victory
    } else {
        Outcome::Ongoing
    }
}

//! Per-turn combat resolution.
//!
//! Pure functions only: a turn takes snapshots, a tap angle, and seeded
//! randomness, and returns the log events to append. Nothing here touches
//! persistence.

pub mod damage;
pub mod turn;

pub use damage::{
    AttackOutcome, attack_multiplier, reduction_for, resolve_attack, resolve_defense,
};
pub use turn::{
    PendingEvent, TurnPhase, TurnResolution, enemy_attack_angle, evaluate_outcome,
    resolve_player_attack, resolve_player_defend,
};

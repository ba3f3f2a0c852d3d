//! Deterministic combat resolution rules shared across services.
//!
//! `combat-core` defines the canonical combat math (zone resolution, damage,
//! enemy realization, loot, rating) and exposes pure APIs that can be reused
//! by both the session runtime and offline balancing tools. Nothing in this
//! crate touches a clock, a global RNG, or I/O: timestamps arrive as unix
//! milliseconds and randomness flows through the [`RngOracle`] seam.
pub mod catalog;
pub mod combat;
pub mod config;
pub mod enemy;
pub mod error;
pub mod ids;
pub mod loot;
pub mod rating;
pub mod rng;
pub mod session;
pub mod stats;
pub mod zone;

pub use catalog::{
    ContentOracle, EnemyType, LocationProfile, LootEntry, Lootable, PoolScope, SpawnEntry, Tier,
    WeaponSpec,
};
pub use combat::{
    AttackOutcome, PendingEvent, TurnPhase, TurnResolution, attack_multiplier, enemy_attack_angle,
    evaluate_outcome, reduction_for, resolve_attack, resolve_defense, resolve_player_attack,
    resolve_player_defend,
};
pub use config::BalanceConfig;
pub use enemy::{ResolvedEnemy, resolve_enemy};
pub use error::{ActionError, DataError};
pub use ids::{EnemyTypeId, ItemId, LocationId, MaterialId, PlayerId, SessionId, StyleId, TierId};
pub use loot::{MaterialGrant, Rewards, generate_rewards};
pub use rating::{
    RatingSummary, combat_rating, effective_hp, rate_combatant, summarize, win_probability,
};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use session::{Actor, CombatEventKind, CombatLogEvent, CombatSession, Outcome, replay_hp};
pub use stats::{CombatStats, PlayerLoadout, StatDistribution, accuracy_share, realize_hp, realize_stats};
pub use zone::{Zone, ZoneBands, adjust_bands, resolve_zone};

//! Error types shared by the combat rules.
//!
//! Two classes, following the severity split the engine guarantees:
//!
//! - [`ActionError`]: client errors. Rejected before any state mutation and
//!   safe to surface verbatim to the caller.
//! - [`DataError`]: fatal configuration errors in reference data. Detected at
//!   data-load time by the content crate; the resolution paths re-check the
//!   invariants they rely on and refuse to proceed on violation rather than
//!   guessing at request time.

use crate::ids::{EnemyTypeId, PlayerId, SessionId, TierId};
use crate::session::Outcome;

/// Client-level validation failure. Never mutates state.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("tap angle {angle} outside [0, 360)")]
    InvalidTapAngle { angle: f64 },

    #[error("player {player} does not own session {session}")]
    NotSessionOwner { session: SessionId, player: PlayerId },

    #[error("session {session} is already terminal ({outcome})")]
    SessionTerminal { session: SessionId, outcome: Outcome },

    #[error("outcome cannot move from {from} to {to}")]
    IllegalTransition { from: Outcome, to: Outcome },
}

/// Fatal reference-data error. Load-time territory, never recoverable
/// mid-request.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataError {
    #[error("stat distribution for {label} sums to {sum}, expected 1.0")]
    DistributionSum { label: String, sum: f64 },

    #[error("zone bands for {label} sum to {sum}, expected 360")]
    BandSum { label: String, sum: f64 },

    #[error("unknown enemy type {0}")]
    UnknownEnemyType(EnemyTypeId),

    #[error("unknown tier {0}")]
    UnknownTier(TierId),

    #[error("no spawn entries match the location at combat level {combat_level}")]
    EmptySpawnPool { combat_level: u32 },

    #[error("enemy type {0} has no material loot entries")]
    NoMaterialEntries(EnemyTypeId),
}

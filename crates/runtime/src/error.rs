//! Unified error types surfaced by the session runtime.
//!
//! Three classes reach callers: client errors ([`combat_core::ActionError`],
//! rejected before mutation), retryable conflicts (surfaced through
//! [`RepositoryError::VersionConflict`]), and fatal reference-data errors
//! ([`combat_core::DataError`]). Nothing is silently swallowed.

use combat_core::{ActionError, DataError, Outcome, PlayerId, SessionId};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    #[error("player {0} already has an active session")]
    ActiveSessionExists(PlayerId),

    #[error("session {session} has no terminal condition yet ({player_hp} / {enemy_hp} hp)")]
    FightStillOngoing {
        session: SessionId,
        player_hp: f64,
        enemy_hp: f64,
    },

    #[error("requested outcome {requested} does not match the derived outcome {derived}")]
    OutcomeMismatch {
        requested: Outcome,
        derived: Outcome,
    },

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("reference data error during resolution")]
    Data(#[from] DataError),
}

impl RuntimeError {
    /// Whether the caller should retry against freshly-read state.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RuntimeError::Repository(e) if e.is_retryable())
    }

    /// Whether this is a client error (invalid input, not a system fault).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RuntimeError::Action(_)
                | RuntimeError::SessionNotFound(_)
                | RuntimeError::ActiveSessionExists(_)
                | RuntimeError::OutcomeMismatch { .. }
        )
    }
}

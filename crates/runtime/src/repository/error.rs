//! Session store error types.

use combat_core::{PlayerId, SessionId};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    #[error("session store lock poisoned")]
    LockPoisoned,

    #[error("session {session} was modified concurrently (expected version {expected}, found {found})")]
    VersionConflict {
        session: SessionId,
        expected: u64,
        found: u64,
    },

    #[error("player {0} already has an active session")]
    ActiveSessionExists(PlayerId),

    #[error("session {0} not found")]
    NotFound(SessionId),
}

impl RepositoryError {
    /// Version conflicts are safe to retry against freshly-read state; the
    /// rest are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RepositoryError::VersionConflict { .. })
    }
}

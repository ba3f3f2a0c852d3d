//! Repository contracts for combat session persistence.

mod error;
mod memory;

pub use error::RepositoryError;
pub use memory::InMemorySessionRepo;

use combat_core::{CombatSession, PlayerId, SessionId};

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// A session record paired with its store version.
///
/// Every write must present the version it read; a mismatch is a retryable
/// conflict, never a silent overwrite.
#[derive(Clone, Debug, PartialEq)]
pub struct VersionedSession {
    pub version: u64,
    pub session: CombatSession,
}

/// Durable keyed storage for session records.
///
/// Implementations enforce two store-level rules:
/// - at most one session with outcome `Ongoing` per player (uniqueness on
///   insert)
/// - optimistic versioning on update (read-version must match at write time)
pub trait SessionRepository: Send + Sync {
    /// Persist a new session at version 1.
    ///
    /// Fails with [`RepositoryError::ActiveSessionExists`] if the player
    /// already has an ongoing session.
    fn insert(&self, session: CombatSession) -> Result<VersionedSession>;

    /// Load a session by id.
    fn get(&self, id: &SessionId) -> Result<Option<VersionedSession>>;

    /// Write back a mutated session.
    ///
    /// `expected_version` must match the stored version; on success the
    /// returned record carries the incremented version.
    fn update(&self, expected_version: u64, session: CombatSession) -> Result<VersionedSession>;

    /// Remove a session record entirely.
    fn delete(&self, id: &SessionId) -> Result<()>;

    /// The player's ongoing session, if any.
    fn find_active(&self, player: &PlayerId) -> Result<Option<VersionedSession>>;
}

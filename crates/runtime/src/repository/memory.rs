//! In-memory SessionRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use combat_core::{CombatSession, Outcome, PlayerId, SessionId};

use crate::repository::{RepositoryError, Result, SessionRepository, VersionedSession};

/// In-memory implementation of [`SessionRepository`].
///
/// A `RwLock<HashMap>` keyed by session id, plus an active-player index that
/// backs the one-active-session-per-player uniqueness rule. Every write path
/// holds the write lock across the check-and-set, so version checks and the
/// uniqueness rule are race-free within this process.
pub struct InMemorySessionRepo {
    inner: RwLock<Store>,
}

#[derive(Default)]
struct Store {
    sessions: HashMap<SessionId, VersionedSession>,
    active: HashMap<PlayerId, SessionId>,
}

impl InMemorySessionRepo {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Store::default()),
        }
    }
}

impl Default for InMemorySessionRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRepository for InMemorySessionRepo {
    fn insert(&self, session: CombatSession) -> Result<VersionedSession> {
        let mut store = self
            .inner
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        if store.active.contains_key(&session.player) {
            return Err(RepositoryError::ActiveSessionExists(session.player.clone()));
        }

        let versioned = VersionedSession {
            version: 1,
            session,
        };
        store.active.insert(
            versioned.session.player.clone(),
            versioned.session.id.clone(),
        );
        store
            .sessions
            .insert(versioned.session.id.clone(), versioned.clone());
        Ok(versioned)
    }

    fn get(&self, id: &SessionId) -> Result<Option<VersionedSession>> {
        let store = self
            .inner
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(store.sessions.get(id).cloned())
    }

    fn update(&self, expected_version: u64, session: CombatSession) -> Result<VersionedSession> {
        let mut store = self
            .inner
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let current = store
            .sessions
            .get(&session.id)
            .ok_or_else(|| RepositoryError::NotFound(session.id.clone()))?;
        if current.version != expected_version {
            return Err(RepositoryError::VersionConflict {
                session: session.id.clone(),
                expected: expected_version,
                found: current.version,
            });
        }

        if session.outcome != Outcome::Ongoing {
            store.active.remove(&session.player);
        }

        let versioned = VersionedSession {
            version: expected_version + 1,
            session,
        };
        store
            .sessions
            .insert(versioned.session.id.clone(), versioned.clone());
        Ok(versioned)
    }

    fn delete(&self, id: &SessionId) -> Result<()> {
        let mut store = self
            .inner
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        if let Some(removed) = store.sessions.remove(id) {
            if store.active.get(&removed.session.player) == Some(id) {
                store.active.remove(&removed.session.player);
            }
        }
        Ok(())
    }

    fn find_active(&self, player: &PlayerId) -> Result<Option<VersionedSession>> {
        let store = self
            .inner
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(store
            .active
            .get(player)
            .and_then(|id| store.sessions.get(id))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{
        BalanceConfig, CombatStats, EnemyTypeId, LocationId, PlayerLoadout, RatingSummary,
        ResolvedEnemy, TierId,
    };

    fn sample_session(id: &str, player: &str) -> CombatSession {
        let stats = CombatStats {
            atk_power: 100.0,
            atk_accuracy: 50.0,
            def_power: 40.0,
            def_accuracy: 30.0,
        };
        CombatSession::new(
            SessionId::from(id),
            PlayerId::from(player),
            LocationId::from("loc-1"),
            ResolvedEnemy {
                enemy_type: EnemyTypeId::from("rat"),
                name: "Rat".to_owned(),
                tier: TierId::from("common"),
                difficulty_multiplier: 1.0,
                stats,
                max_hp: 50.0,
                style: None,
            },
            10,
            PlayerLoadout {
                stats,
                max_hp: 120.0,
                weapon: BalanceConfig::default().enemy_bands,
            },
            120.0,
            RatingSummary::default(),
            7,
            1_000,
        )
    }

    #[test]
    fn insert_enforces_one_active_session_per_player() {
        let repo = InMemorySessionRepo::new();
        repo.insert(sample_session("cs-1", "p-1")).unwrap();
        let err = repo.insert(sample_session("cs-2", "p-1")).unwrap_err();
        assert!(matches!(err, RepositoryError::ActiveSessionExists(_)));
        // A different player is unaffected.
        repo.insert(sample_session("cs-3", "p-2")).unwrap();
    }

    #[test]
    fn stale_version_conflicts_instead_of_overwriting() {
        let repo = InMemorySessionRepo::new();
        let versioned = repo.insert(sample_session("cs-1", "p-1")).unwrap();

        let mut first = versioned.session.clone();
        first.combat_level = 11;
        repo.update(versioned.version, first).unwrap();

        // A writer still holding version 1 must conflict, not overwrite.
        let mut second = versioned.session.clone();
        second.combat_level = 12;
        let err = repo.update(versioned.version, second).unwrap_err();
        assert!(err.is_retryable());
        assert!(matches!(
            err,
            RepositoryError::VersionConflict {
                expected: 1,
                found: 2,
                ..
            }
        ));

        let stored = repo.get(&SessionId::from("cs-1")).unwrap().unwrap();
        assert_eq!(stored.session.combat_level, 11);
    }

    #[test]
    fn terminal_update_frees_the_player_slot() {
        let repo = InMemorySessionRepo::new();
        let versioned = repo.insert(sample_session("cs-1", "p-1")).unwrap();

        let mut session = versioned.session.clone();
        session.transition(Outcome::Defeat, 2_000).unwrap();
        repo.update(versioned.version, session).unwrap();

        assert!(repo.find_active(&PlayerId::from("p-1")).unwrap().is_none());
        repo.insert(sample_session("cs-2", "p-1")).unwrap();
    }

    #[test]
    fn delete_clears_session_and_index() {
        let repo = InMemorySessionRepo::new();
        repo.insert(sample_session("cs-1", "p-1")).unwrap();
        repo.delete(&SessionId::from("cs-1")).unwrap();
        assert!(repo.get(&SessionId::from("cs-1")).unwrap().is_none());
        assert!(repo.find_active(&PlayerId::from("p-1")).unwrap().is_none());
    }
}

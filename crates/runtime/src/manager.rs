//! The combat session orchestrator.
//!
//! Every request/response call lands here: create an encounter, submit a
//! timed action, complete or abandon. Each method is one atomic unit against
//! one session record: read, validate, resolve through the pure rules, then
//! write back with the read version. A losing concurrent writer gets a
//! retryable conflict from the repository and never silently overwrites.

use std::sync::Arc;

use combat_core::{
    ActionError, BalanceConfig, CombatLogEvent, CombatSession, ContentOracle, DataError,
    LocationId, LocationProfile, Outcome, PlayerId, PlayerLoadout, RatingSummary, Rewards,
    RngOracle, SessionId, TurnPhase, compute_seed, evaluate_outcome, resolve_enemy,
    resolve_player_attack, resolve_player_defend,
    session::{Actor, CombatEventKind},
    summarize,
};

use crate::clock::Clock;
use crate::error::{RepositoryError, Result, RuntimeError};
use crate::repository::{SessionRepository, VersionedSession};
use crate::seed::SeedSource;

/// Roll context for the enemy draw at creation; turn resolution uses
/// contexts 0 and 1, loot uses 2 and 3.
const CTX_ENEMY_DRAW: u32 = 4;

/// Client-facing view of a session.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SessionDescriptor {
    pub id: SessionId,
    pub player: PlayerId,
    pub location: LocationId,
    pub enemy_name: String,
    pub combat_level: u32,
    pub outcome: Outcome,
    pub phase: TurnPhase,
    pub player_hp: f64,
    pub enemy_hp: f64,
    pub win_probability: f64,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

impl SessionDescriptor {
    fn from_session(session: &CombatSession) -> Self {
        let (player_hp, enemy_hp) = session.hp();
        Self {
            id: session.id.clone(),
            player: session.player.clone(),
            location: session.location.clone(),
            enemy_name: session.enemy.name.clone(),
            combat_level: session.combat_level,
            outcome: session.outcome,
            phase: session.phase,
            player_hp,
            enemy_hp,
            win_probability: session.rating.win_probability,
            created_at_ms: session.created_at_ms,
            updated_at_ms: session.updated_at_ms,
        }
    }
}

/// What one submitted action resolved to.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ActionReport {
    pub descriptor: SessionDescriptor,
    /// Log events appended by this action, in order.
    pub new_events: Vec<CombatLogEvent>,
    /// Populated only when this action ended the fight in victory.
    pub rewards: Option<Rewards>,
    /// True when the TTL had elapsed and the action was redirected to the
    /// defeat-termination path instead of resolving as a turn.
    pub expired: bool,
}

/// Result of an explicit completion call.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CompletionReport {
    pub outcome: Outcome,
    pub rewards: Option<Rewards>,
    pub rating: RatingSummary,
}

/// Orchestrator for the combat session lifecycle.
pub struct CombatSessionManager<R: SessionRepository> {
    repo: R,
    oracle: Arc<dyn ContentOracle>,
    rng: Arc<dyn RngOracle>,
    clock: Arc<dyn Clock>,
    seeds: Arc<dyn SeedSource>,
    config: BalanceConfig,
}

impl<R: SessionRepository> CombatSessionManager<R> {
    pub fn new(
        repo: R,
        oracle: Arc<dyn ContentOracle>,
        rng: Arc<dyn RngOracle>,
        clock: Arc<dyn Clock>,
        seeds: Arc<dyn SeedSource>,
        config: BalanceConfig,
    ) -> Self {
        Self {
            repo,
            oracle,
            rng,
            clock,
            seeds,
            config,
        }
    }

    /// Direct repository access, for tooling and tests.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Start an encounter: resolve an enemy for the location, snapshot the
    /// player's equipped stats by value, and persist the new session.
    ///
    /// A player may hold only one ongoing session; an expired leftover is
    /// closed as a defeat first, anything fresher is a conflict.
    pub fn create(
        &self,
        player: PlayerId,
        location: LocationId,
        profile: &LocationProfile,
        loadout: PlayerLoadout,
        combat_level: u32,
    ) -> Result<SessionDescriptor> {
        let now_ms = self.clock.now_ms();

        if let Some(active) = self.repo.find_active(&player)? {
            if active.session.is_expired(now_ms, self.config.session_ttl_ms()) {
                self.expire(active, now_ms)?;
            } else {
                return Err(RuntimeError::ActiveSessionExists(player));
            }
        }

        let seed = self.seeds.next_seed();
        let enemy = resolve_enemy(
            self.oracle.as_ref(),
            profile,
            combat_level,
            compute_seed(seed, 0, CTX_ENEMY_DRAW),
            self.rng.as_ref(),
            &self.config,
        )?;

        let player_max_hp = if loadout.max_hp > 0.0 {
            loadout.max_hp
        } else {
            self.config.player_base_hp
        };
        let rating = summarize(
            &loadout.stats,
            player_max_hp,
            &enemy.stats,
            enemy.max_hp,
            &self.config,
        );

        let id = SessionId::new(format!("cs-{seed:016x}"));
        let session = CombatSession::new(
            id.clone(),
            player.clone(),
            location,
            enemy,
            combat_level,
            loadout,
            player_max_hp,
            rating,
            seed,
            now_ms,
        );

        let versioned = self.repo.insert(session).map_err(|e| match e {
            RepositoryError::ActiveSessionExists(p) => RuntimeError::ActiveSessionExists(p),
            other => other.into(),
        })?;

        tracing::info!(
            session = %id,
            player = %player,
            enemy = %versioned.session.enemy.enemy_type,
            combat_level,
            win_probability = versioned.session.rating.win_probability,
            "combat session created"
        );

        Ok(SessionDescriptor::from_session(&versioned.session))
    }

    /// Resolve one timed action against the session's current phase.
    ///
    /// Validation (ownership, terminal state, tap angle) happens before any
    /// mutation; an elapsed TTL redirects to the defeat path instead of
    /// resolving a turn. When the action leaves either side at or below
    /// zero HP the session is finalized in the same write, enemy winning
    /// ties.
    pub fn submit_action(
        &self,
        session_id: &SessionId,
        player: &PlayerId,
        tap_angle: f64,
    ) -> Result<ActionReport> {
        let versioned = self.load(session_id)?;
        self.authorize(&versioned.session, player)?;

        let now_ms = self.clock.now_ms();
        if versioned
            .session
            .is_expired(now_ms, self.config.session_ttl_ms())
        {
            let updated = self.expire(versioned, now_ms)?;
            let new_events = updated.session.log.last().cloned().into_iter().collect();
            return Ok(ActionReport {
                descriptor: SessionDescriptor::from_session(&updated.session),
                new_events,
                rewards: None,
                expired: true,
            });
        }

        let VersionedSession {
            version,
            mut session,
        } = versioned;
        let sequence = session.next_sequence();

        let resolution = match session.phase {
            TurnPhase::PlayerAttack => resolve_player_attack(
                &session.loadout.stats,
                &session.loadout.weapon,
                &session.enemy,
                session.combat_level,
                tap_angle,
                session.seed,
                sequence,
                self.rng.as_ref(),
                &self.config,
            )?,
            TurnPhase::PlayerDefend => resolve_player_defend(
                &session.loadout.stats,
                &session.loadout.weapon,
                &session.enemy,
                session.combat_level,
                tap_angle,
                session.seed,
                sequence,
                self.rng.as_ref(),
                &self.config,
            )?,
        };

        for event in &resolution.events {
            session.append(event.actor, event.kind, event.zone, event.amount, now_ms);
        }
        session.phase = resolution.next_phase;

        let (player_hp, enemy_hp) = session.hp();
        let derived = evaluate_outcome(player_hp, enemy_hp);
        let rewards = if derived.is_terminal() {
            self.finalize(&mut session, derived, now_ms)?
        } else {
            None
        };

        let updated = self.repo.update(version, session).map_err(|e| {
            if matches!(e, RepositoryError::VersionConflict { .. }) {
                tracing::warn!(session = %session_id, "write lost an optimistic-version race");
            }
            RuntimeError::from(e)
        })?;
        let new_events = updated.session.log[sequence as usize..].to_vec();

        tracing::debug!(
            session = %session_id,
            sequence,
            player_hp,
            enemy_hp,
            outcome = %updated.session.outcome,
            "action resolved"
        );

        Ok(ActionReport {
            descriptor: SessionDescriptor::from_session(&updated.session),
            new_events,
            rewards,
            expired: false,
        })
    }

    /// Explicitly finalize a session whose terminal condition is already in
    /// the log.
    ///
    /// The requested outcome is validated against the log-derived one, so a
    /// client cannot claim a victory its events do not support.
    pub fn complete(
        &self,
        session_id: &SessionId,
        player: &PlayerId,
        requested: Outcome,
    ) -> Result<CompletionReport> {
        let versioned = self.load(session_id)?;
        self.authorize(&versioned.session, player)?;

        let now_ms = self.clock.now_ms();
        if versioned
            .session
            .is_expired(now_ms, self.config.session_ttl_ms())
        {
            let updated = self.expire(versioned, now_ms)?;
            return Ok(CompletionReport {
                outcome: updated.session.outcome,
                rewards: None,
                rating: updated.session.rating,
            });
        }

        let VersionedSession {
            version,
            mut session,
        } = versioned;
        let (player_hp, enemy_hp) = session.hp();
        let derived = evaluate_outcome(player_hp, enemy_hp);
        if derived == Outcome::Ongoing {
            return Err(RuntimeError::FightStillOngoing {
                session: session_id.clone(),
                player_hp,
                enemy_hp,
            });
        }
        if requested != derived {
            return Err(RuntimeError::OutcomeMismatch { requested, derived });
        }

        let rewards = self.finalize(&mut session, derived, now_ms)?;
        let updated = self.repo.update(version, session)?;

        Ok(CompletionReport {
            outcome: updated.session.outcome,
            rewards,
            rating: updated.session.rating,
        })
    }

    /// Client-initiated exit: terminal, no rewards, no penalty.
    pub fn abandon(&self, session_id: &SessionId, player: &PlayerId) -> Result<SessionDescriptor> {
        let versioned = self.load(session_id)?;
        self.authorize(&versioned.session, player)?;

        let now_ms = self.clock.now_ms();
        if versioned
            .session
            .is_expired(now_ms, self.config.session_ttl_ms())
        {
            let updated = self.expire(versioned, now_ms)?;
            return Ok(SessionDescriptor::from_session(&updated.session));
        }

        let VersionedSession {
            version,
            mut session,
        } = versioned;
        session.transition(Outcome::Abandoned, now_ms)?;
        let updated = self.repo.update(version, session)?;

        tracing::info!(session = %session_id, player = %player, "session abandoned");
        Ok(SessionDescriptor::from_session(&updated.session))
    }

    /// Read a session. Access counts as an expiry trigger: an ongoing
    /// session past its TTL is closed as a defeat before the view is built.
    pub fn get(&self, session_id: &SessionId, player: &PlayerId) -> Result<SessionDescriptor> {
        let versioned = self.load(session_id)?;
        self.authorize_owner(&versioned.session, player)?;

        let now_ms = self.clock.now_ms();
        if versioned.session.outcome == Outcome::Ongoing
            && versioned
                .session
                .is_expired(now_ms, self.config.session_ttl_ms())
        {
            let updated = self.expire(versioned, now_ms)?;
            return Ok(SessionDescriptor::from_session(&updated.session));
        }

        Ok(SessionDescriptor::from_session(&versioned.session))
    }

    fn load(&self, session_id: &SessionId) -> Result<VersionedSession> {
        self.repo
            .get(session_id)?
            .ok_or_else(|| RuntimeError::SessionNotFound(session_id.clone()))
    }

    fn authorize_owner(&self, session: &CombatSession, player: &PlayerId) -> Result<()> {
        if session.player != *player {
            return Err(ActionError::NotSessionOwner {
                session: session.id.clone(),
                player: player.clone(),
            }
            .into());
        }
        Ok(())
    }

    /// Ownership plus liveness check for mutating calls. Reads go through
    /// [`Self::authorize_owner`] alone so a terminal session stays viewable.
    fn authorize(&self, session: &CombatSession, player: &PlayerId) -> Result<()> {
        self.authorize_owner(session, player)?;
        if session.outcome.is_terminal() {
            return Err(ActionError::SessionTerminal {
                session: session.id.clone(),
                outcome: session.outcome,
            }
            .into());
        }
        Ok(())
    }

    /// Close an expired session as a defeat, recording the expiry in the log.
    fn expire(&self, versioned: VersionedSession, now_ms: i64) -> Result<VersionedSession> {
        let VersionedSession {
            version,
            mut session,
        } = versioned;

        session.append(
            Actor::System,
            CombatEventKind::SessionExpired,
            None,
            0,
            now_ms,
        );
        session.transition(Outcome::Defeat, now_ms)?;
        let updated = self.repo.update(version, session)?;

        tracing::info!(
            session = %updated.session.id,
            player = %updated.session.player,
            "expired session closed as defeat"
        );
        Ok(updated)
    }

    /// Apply a terminal outcome: transition, and on victory generate the
    /// rewards payload for the economy/progression collaborators.
    fn finalize(
        &self,
        session: &mut CombatSession,
        outcome: Outcome,
        now_ms: i64,
    ) -> Result<Option<Rewards>> {
        session.transition(outcome, now_ms)?;

        if outcome != Outcome::Victory {
            tracing::info!(session = %session.id, %outcome, "session finalized without rewards");
            return Ok(None);
        }

        let tier = self
            .oracle
            .tier(&session.enemy.tier)
            .ok_or_else(|| DataError::UnknownTier(session.enemy.tier.clone()))?;
        let entries = self.oracle.loot_entries(&session.enemy.enemy_type);
        let rewards = combat_core::generate_rewards(
            entries,
            &session.enemy,
            tier,
            session.combat_level,
            session.seed,
            session.next_sequence(),
            self.rng.as_ref(),
            &self.config,
        )?;

        if let Ok(payload) = serde_json::to_string(&rewards) {
            tracing::info!(session = %session.id, %payload, "victory rewards generated");
        }
        session.rewards = Some(rewards.clone());
        Ok(Some(rewards))
    }
}

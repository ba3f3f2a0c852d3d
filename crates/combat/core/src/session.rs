//! Combat session record and its append-only event log.
//!
//! A session is the persistent state of one encounter. Mutation happens only
//! through appended log events and forward-only outcome transitions; current
//! HP is always derived by replaying the log, never stored as a separately
//! mutable field, so the two can never diverge.

use crate::combat::TurnPhase;
use crate::enemy::ResolvedEnemy;
use crate::error::ActionError;
use crate::ids::{LocationId, PlayerId, SessionId};
use crate::loot::Rewards;
use crate::rating::RatingSummary;
use crate::stats::PlayerLoadout;
use crate::zone::Zone;

/// Which side produced a log event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Actor {
    Player,
    Enemy,
    System,
}

/// Session outcome. Transitions only move forward: `Ongoing` to exactly one
/// terminal state, after which the session accepts no further actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    Ongoing,
    Victory,
    Defeat,
    Abandoned,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }
}

/// Closed set of loggable event kinds.
///
/// The kind determines whose HP an event reduces, which keeps the replay
/// exhaustive: a new kind will not compile until the replay handles it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatEventKind {
    /// Player's timed attack; `amount` is damage dealt to the enemy.
    PlayerAttack,
    /// Player's timed defense; `amount` is damage prevented (informational).
    PlayerDefend,
    /// Enemy auto-attack; `amount` is damage dealt to the player after
    /// mitigation.
    EnemyAttack,
    /// Injure-zone backlash; `amount` is damage the acting side dealt itself.
    SelfInflicted,
    /// TTL expiry recorded by the system before the defeat transition.
    SessionExpired,
}

/// One immutable, strictly ordered log record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLogEvent {
    /// Monotonic per-session sequence number, starting at 0.
    pub sequence: u64,
    pub actor: Actor,
    pub kind: CombatEventKind,
    /// Zone the tap (or the enemy's roll) resolved to, where applicable.
    pub zone: Option<Zone>,
    pub amount: u32,
    pub timestamp_ms: i64,
}

/// Derive both sides' HP by replaying the event log from full health.
pub fn replay_hp(events: &[CombatLogEvent], player_max: f64, enemy_max: f64) -> (f64, f64) {
    let mut player_hp = player_max;
    let mut enemy_hp = enemy_max;
    for event in events {
        let amount = f64::from(event.amount);
        match event.kind {
            CombatEventKind::PlayerAttack => enemy_hp -= amount,
            CombatEventKind::EnemyAttack => player_hp -= amount,
            CombatEventKind::SelfInflicted => match event.actor {
                Actor::Player => player_hp -= amount,
                Actor::Enemy => enemy_hp -= amount,
                Actor::System => {}
            },
            CombatEventKind::PlayerDefend | CombatEventKind::SessionExpired => {}
        }
    }
    (player_hp, enemy_hp)
}

/// Persistent state of one encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSession {
    pub id: SessionId,
    pub player: PlayerId,
    pub location: LocationId,
    pub enemy: ResolvedEnemy,
    /// Player's average item level at creation; frozen with the snapshot.
    pub combat_level: u32,
    /// Equipped-stats snapshot captured at creation. Never updated.
    pub loadout: PlayerLoadout,
    /// Player max HP the fight runs on (loadout HP with the config floor
    /// applied).
    pub player_max_hp: f64,
    /// Append-only event log; the sole source of truth for HP and turns.
    pub log: Vec<CombatLogEvent>,
    pub outcome: Outcome,
    pub phase: TurnPhase,
    /// Populated only when the session completes in victory.
    pub rewards: Option<Rewards>,
    pub rating: RatingSummary,
    /// Seed all of this session's randomness derives from.
    pub seed: u64,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

impl CombatSession {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: SessionId,
        player: PlayerId,
        location: LocationId,
        enemy: ResolvedEnemy,
        combat_level: u32,
        loadout: PlayerLoadout,
        player_max_hp: f64,
        rating: RatingSummary,
        seed: u64,
        now_ms: i64,
    ) -> Self {
        Self {
            id,
            player,
            location,
            enemy,
            combat_level,
            loadout,
            player_max_hp,
            log: Vec::new(),
            outcome: Outcome::Ongoing,
            phase: TurnPhase::PlayerAttack,
            rewards: None,
            rating,
            seed,
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        }
    }

    /// Next event sequence number.
    pub fn next_sequence(&self) -> u64 {
        self.log.len() as u64
    }

    /// Append one event, assigning the next sequence number.
    pub fn append(
        &mut self,
        actor: Actor,
        kind: CombatEventKind,
        zone: Option<Zone>,
        amount: u32,
        now_ms: i64,
    ) {
        let sequence = self.next_sequence();
        self.log.push(CombatLogEvent {
            sequence,
            actor,
            kind,
            zone,
            amount,
            timestamp_ms: now_ms,
        });
        self.updated_at_ms = now_ms;
    }

    /// Current `(player_hp, enemy_hp)` derived from the log.
    pub fn hp(&self) -> (f64, f64) {
        replay_hp(&self.log, self.player_max_hp, self.enemy.max_hp)
    }

    /// Number of submitted turns so far (expiry markers excluded).
    pub fn turn_count(&self) -> usize {
        self.log
            .iter()
            .filter(|event| {
                matches!(
                    event.kind,
                    CombatEventKind::PlayerAttack | CombatEventKind::PlayerDefend
                )
            })
            .count()
    }

    /// Whether the session's TTL elapsed relative to `now_ms`.
    pub fn is_expired(&self, now_ms: i64, ttl_ms: i64) -> bool {
        now_ms.saturating_sub(self.created_at_ms) > ttl_ms
    }

    /// Forward-only outcome transition.
    pub fn transition(&mut self, to: Outcome, now_ms: i64) -> Result<(), ActionError> {
        if self.outcome != Outcome::Ongoing || !to.is_terminal() {
            return Err(ActionError::IllegalTransition {
                from: self.outcome,
                to,
            });
        }
        self.outcome = to;
        self.updated_at_ms = now_ms;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BalanceConfig;
    use crate::ids::{EnemyTypeId, TierId};
    use crate::stats::CombatStats;
    use crate::zone::ZoneBands;

    fn sample_session() -> CombatSession {
        let stats = CombatStats {
            atk_power: 100.0,
            atk_accuracy: 50.0,
            def_power: 40.0,
            def_accuracy: 30.0,
        };
        let enemy = ResolvedEnemy {
            enemy_type: EnemyTypeId::from("rat"),
            name: "Rat".to_owned(),
            tier: TierId::from("common"),
            difficulty_multiplier: 1.0,
            stats,
            max_hp: 50.0,
            style: None,
        };
        let loadout = PlayerLoadout {
            stats,
            max_hp: 120.0,
            weapon: BalanceConfig::default().enemy_bands,
        };
        CombatSession::new(
            SessionId::from("cs-1"),
            PlayerId::from("p-1"),
            LocationId::from("loc-1"),
            enemy,
            10,
            loadout,
            120.0,
            RatingSummary::default(),
            7,
            1_000,
        )
    }

    #[test]
    fn hp_is_derived_from_the_log() {
        let mut session = sample_session();
        session.append(Actor::Player, CombatEventKind::PlayerAttack, None, 12, 2_000);
        session.append(Actor::Enemy, CombatEventKind::EnemyAttack, None, 9, 3_000);
        session.append(Actor::Player, CombatEventKind::SelfInflicted, None, 4, 4_000);
        let (player_hp, enemy_hp) = session.hp();
        assert_eq!(player_hp, 120.0 - 9.0 - 4.0);
        assert_eq!(enemy_hp, 50.0 - 12.0);
    }

    #[test]
    fn sequence_numbers_are_monotonic_from_zero() {
        let mut session = sample_session();
        session.append(Actor::Player, CombatEventKind::PlayerAttack, None, 1, 2_000);
        session.append(Actor::Player, CombatEventKind::PlayerDefend, None, 0, 3_000);
        let sequences: Vec<u64> = session.log.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![0, 1]);
    }

    #[test]
    fn defend_events_do_not_change_hp() {
        let mut session = sample_session();
        session.append(Actor::Player, CombatEventKind::PlayerDefend, None, 30, 2_000);
        assert_eq!(session.hp(), (120.0, 50.0));
    }

    #[test]
    fn transitions_only_move_forward() {
        let mut session = sample_session();
        session.transition(Outcome::Victory, 2_000).unwrap();
        let err = session.transition(Outcome::Defeat, 3_000).unwrap_err();
        assert!(matches!(
            err,
            ActionError::IllegalTransition {
                from: Outcome::Victory,
                to: Outcome::Defeat
            }
        ));
    }

    #[test]
    fn transition_to_ongoing_is_illegal() {
        let mut session = sample_session();
        assert!(session.transition(Outcome::Ongoing, 2_000).is_err());
    }

    #[test]
    fn expiry_is_measured_from_creation() {
        let session = sample_session();
        let ttl_ms = 900_000;
        assert!(!session.is_expired(1_000 + ttl_ms, ttl_ms));
        assert!(session.is_expired(1_000 + ttl_ms + 1, ttl_ms));
    }
}

//! Session layer for the combat resolution engine.
//!
//! Wires the pure rules from `combat-core` to durable session storage:
//! repositories with optimistic versioning, a clock seam for the 15-minute
//! TTL, and the [`CombatSessionManager`] orchestrator every request/response
//! call flows through. Everything here is synchronous; each call is one
//! atomic unit against one session record.

pub mod clock;
pub mod error;
pub mod manager;
pub mod repository;
pub mod seed;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Result, RuntimeError};
pub use manager::{ActionReport, CombatSessionManager, CompletionReport, SessionDescriptor};
pub use repository::{
    InMemorySessionRepo, RepositoryError, SessionRepository, VersionedSession,
};
pub use seed::{FixedSeedSource, RandomSeedSource, SeedSource};

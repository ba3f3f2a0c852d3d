//! Session seed source.
//!
//! Each session stores one seed that all of its randomness derives from;
//! where that seed comes from is injected so tests can script entire fights.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of fresh session seeds.
pub trait SeedSource: Send + Sync {
    fn next_seed(&self) -> u64;
}

/// OS-entropy seeds for production use.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomSeedSource;

impl SeedSource for RandomSeedSource {
    fn next_seed(&self) -> u64 {
        rand::random()
    }
}

/// Deterministic counter seeds for tests.
#[derive(Debug)]
pub struct FixedSeedSource {
    next: AtomicU64,
}

impl FixedSeedSource {
    pub fn new(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl SeedSource for FixedSeedSource {
    fn next_seed(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

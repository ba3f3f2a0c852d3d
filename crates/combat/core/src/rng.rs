//! RNG oracle for deterministic random number generation.
//!
//! Crit bonuses, enemy auto-attack variance, and every weighted draw flow
//! through a trait seam instead of a hidden global generator, so the session
//! runtime can inject a real source while tests supply fixed sequences.
//!
//! # Determinism
//!
//! All implementations must be deterministic: the same seed always yields the
//! same value. Combined with [`compute_seed`], a session's full random
//! history replays from its stored seed and event sequence numbers.

/// RNG oracle for deterministic random number generation.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform draw in `[0, 1)`.
    fn unit(&self, seed: u64) -> f64 {
        self.next_u32(seed) as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Weighted index draw over `weights`.
    ///
    /// Returns `None` when all weights are zero. Ties between equal cumulative
    /// positions resolve to the first-seen entry, so a fixed draw maps to a
    /// fixed index regardless of map iteration quirks upstream.
    fn pick_weighted(&self, seed: u64, weights: &[u32]) -> Option<usize> {
        let total: u64 = weights.iter().map(|w| u64::from(*w)).sum();
        if total == 0 {
            return None;
        }
        let mut roll = u64::from(self.next_u32(seed)) % total;
        for (index, weight) in weights.iter().enumerate() {
            let weight = u64::from(*weight);
            if roll < weight {
                return Some(index);
            }
            roll -= weight;
        }
        None
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output permuted from 64-bit LCG state. Small, fast,
/// and statistically solid, which is all the engine needs from its default
/// source.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the LCG state by one step.
    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation: xorshift high bits, then random rotate.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Mix a session seed, event sequence number, and roll context into a seed.
///
/// Use distinct `context` values when one resolution step needs several
/// independent rolls:
///
/// - `0`: primary roll (e.g. enemy auto-attack angle)
/// - `1`: secondary roll (e.g. crit bonus)
/// - `2`: tertiary roll (e.g. loot draw)
pub fn compute_seed(session_seed: u64, sequence: u64, context: u32) -> u64 {
    // SplitMix64-style combiners keep nearby inputs far apart in seed space.
    let mut hash = session_seed;
    hash ^= sequence.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(context).wrapping_mul(0x517cc1b727220a95);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_value() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_eq!(rng.unit(7).to_bits(), rng.unit(7).to_bits());
    }

    #[test]
    fn unit_stays_in_range() {
        let rng = PcgRng;
        for seed in 0..1000u64 {
            let value = rng.unit(seed);
            assert!((0.0..1.0).contains(&value), "seed {seed} gave {value}");
        }
    }

    #[test]
    fn weighted_pick_skips_zero_weights() {
        let rng = PcgRng;
        for seed in 0..200u64 {
            let index = rng.pick_weighted(seed, &[0, 5, 0, 3]).unwrap();
            assert!(index == 1 || index == 3);
        }
        assert_eq!(rng.pick_weighted(9, &[0, 0]), None);
    }

    #[test]
    fn contexts_decorrelate_rolls() {
        let a = compute_seed(1234, 1, 0);
        let b = compute_seed(1234, 1, 1);
        let c = compute_seed(1234, 2, 0);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}

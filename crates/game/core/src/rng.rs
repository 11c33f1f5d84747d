//! Deterministic random number generation.
//!
//! A draw is a pure function of `(seed, call index)`. The generator keeps no
//! internal state of its own: it reads the battle's fixed seed and its
//! `random_call_count`, derives one value, then bumps the counter. Replaying
//! the same actions against the same seed walks the same counter trajectory
//! and therefore reproduces every draw, independent of platform RNGs.
//!
//! Range mapping uses `|raw| mod span`, which carries a small modulo bias.
//! Fine for gameplay; not suitable for anything security related.

/// PCG-XSH-RR output permutation over a 64-bit LCG step.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// One 32-bit value for a fully mixed seed.
    pub fn next_u32(seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Mixes the match seed with a draw index into a per-draw seed.
///
/// Constants are SplitMix64/Murmur3 finaliser multipliers.
pub fn compute_seed(match_seed: u64, call_index: u64) -> u64 {
    let mut hash = match_seed;
    hash ^= call_index.wrapping_mul(0x9e3779b97f4a7c15);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ceb9fe1a85ec53);
    hash ^= hash >> 33;

    hash
}

/// Raw 32-bit draw at a given index, without touching any counter.
pub fn raw_draw(match_seed: u64, call_index: u64) -> u32 {
    PcgRng::next_u32(compute_seed(match_seed, call_index))
}

/// RNG cursor borrowed from a [`BattleState`](crate::state::BattleState).
#[derive(Debug)]
pub struct DeterministicRng<'a> {
    seed: u64,
    calls: &'a mut u64,
}

impl<'a> DeterministicRng<'a> {
    pub(crate) fn new(seed: u64, calls: &'a mut u64) -> Self {
        Self { seed, calls }
    }

    /// Draws the next raw value and advances the call counter by one.
    fn advance(&mut self) -> u32 {
        let raw = raw_draw(self.seed, *self.calls);
        *self.calls += 1;
        raw
    }

    /// Integer in `[min, max)`. Returns `min` when the range is empty; the
    /// draw is consumed either way so the counter trajectory stays uniform.
    pub fn next(&mut self, min: i64, max: i64) -> i64 {
        let raw = self.advance();
        if min >= max {
            return min;
        }
        let span = max.abs_diff(min);
        let offset = u64::from((raw as i32).unsigned_abs()) % span;
        min.wrapping_add(offset as i64)
    }

    /// Value in `[0, 1)`.
    pub fn next_double(&mut self) -> f64 {
        f64::from(self.advance()) / (f64::from(u32::MAX) + 1.0)
    }

    /// Index in `[0, len)`, or `None` for an empty collection (no draw consumed).
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.next(0, len as i64) as usize)
    }

    pub fn calls(&self) -> u64 {
        *self.calls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_depend_only_on_seed_and_index() {
        let mut calls_a = 0;
        let mut calls_b = 5;
        let mut rng_a = DeterministicRng::new(42, &mut calls_a);
        let skipped: Vec<_> = (0..5).map(|_| rng_a.next(0, 1000)).collect();
        let continued = rng_a.next(0, 1000);

        let mut rng_b = DeterministicRng::new(42, &mut calls_b);
        assert_eq!(rng_b.next(0, 1000), continued);
        assert_eq!(skipped.len(), 5);
        assert_eq!(calls_a, 6);
        assert_eq!(calls_b, 6);
    }

    #[test]
    fn next_stays_in_half_open_range() {
        let mut calls = 0;
        let mut rng = DeterministicRng::new(7, &mut calls);
        for _ in 0..500 {
            let value = rng.next(-3, 4);
            assert!((-3..4).contains(&value));
        }
        for _ in 0..500 {
            let value = rng.next_double();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn empty_range_returns_min_and_still_counts() {
        let mut calls = 0;
        let mut rng = DeterministicRng::new(1, &mut calls);

        assert_eq!(rng.next(5, 5), 5);
        assert_eq!(rng.pick_index(0), None);
        assert_eq!(calls, 1);
    }

    #[test]
    fn different_seeds_diverge() {
        let a: Vec<_> = (0..8).map(|i| raw_draw(1, i)).collect();
        let b: Vec<_> = (0..8).map(|i| raw_draw(2, i)).collect();
        assert_ne!(a, b);
    }
}

//! Seeded RNG helpers shared by the drivers.
//!
//! The engine never touches a process-global generator (Design Note:
//! "Randomness"): every [`crate::scheduler::Scheduler`] owns one
//! [`rand::rngs::StdRng`], explicitly seeded at construction.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Creates a deterministic, seedable RNG.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Shuffles `items` in place using Fisher-Yates.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn rand::RngCore) {
    items.shuffle(rng);
}

/// Returns a random permutation of `0..n`.
pub fn random_permutation(n: usize, rng: &mut dyn rand::RngCore) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    shuffle(&mut perm, rng);
    perm
}

/// Draws `k` distinct indices from `0..n` without replacement.
///
/// `k` is clamped to `n`. Implemented as a partial Fisher-Yates over an
/// index buffer so it stays linear in `n` regardless of `k`.
pub fn choose_distinct(n: usize, k: usize, rng: &mut dyn rand::RngCore) -> Vec<usize> {
    let k = k.min(n);
    let mut pool: Vec<usize> = (0..n).collect();
    for i in 0..k {
        let j = rng.random_range(i..n);
        pool.swap(i, j);
    }
    pool.truncate(k);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_preserves_multiset() {
        let mut rng = create_rng(7);
        let mut v: Vec<i32> = (0..20).collect();
        let original = v.clone();
        shuffle(&mut v, &mut rng);
        let mut sorted = v.clone();
        sorted.sort();
        assert_eq!(sorted, original);
    }

    #[test]
    fn choose_distinct_returns_k_unique_indices() {
        let mut rng = create_rng(11);
        let picked = choose_distinct(10, 4, &mut rng);
        assert_eq!(picked.len(), 4);
        let mut uniq = picked.clone();
        uniq.sort();
        uniq.dedup();
        assert_eq!(uniq.len(), 4);
        for i in picked {
            assert!(i < 10);
        }
    }

    #[test]
    fn choose_distinct_clamps_k_to_n() {
        let mut rng = create_rng(3);
        let picked = choose_distinct(3, 10, &mut rng);
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn deterministic_for_same_seed() {
        let mut r1 = create_rng(42);
        let mut r2 = create_rng(42);
        let mut a: Vec<i32> = (0..50).collect();
        let mut b = a.clone();
        shuffle(&mut a, &mut r1);
        shuffle(&mut b, &mut r2);
        assert_eq!(a, b);
    }
}

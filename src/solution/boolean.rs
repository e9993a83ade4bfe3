//! Boolean-vector solution extension: k-flip neighborhood search and
//! k-random-flip shaking (C2).

use super::VectorSolution;
use rand::{Rng, RngCore};

/// A solution over a fixed-length boolean vector.
///
/// `flip_variable` is the delta-evaluation hook: the default invalidates
/// the cache (full recompute on the next `objective()` call); concrete
/// problems override it with an incremental update for performance
/// (Design Note: "Delta-evaluation hooks").
pub trait BoolVectorSolution: VectorSolution<bool> {
    /// Uniform-random fill, then invalidates the cache.
    fn initialize(&mut self, rng: &mut dyn RngCore) {
        let n = self.sequence().len();
        for i in 0..n {
            self.sequence_mut()[i] = rng.random_bool(0.5);
        }
        self.invalidate();
    }

    /// Flips the bit at `pos`. Default: invalidate. Override for an
    /// incremental delta update; `check()` can then verify the hook stays
    /// consistent with a full recompute.
    fn flip_variable(&mut self, pos: usize) {
        let v = self.sequence()[pos];
        self.sequence_mut()[pos] = !v;
        self.invalidate();
    }

    /// Flips `k` independently chosen positions (shaking), then
    /// invalidates.
    fn k_random_flips(&mut self, k: usize, rng: &mut dyn RngCore) {
        let n = self.sequence().len();
        for pos in crate::random::choose_distinct(n, k, rng) {
            self.flip_variable(pos);
        }
    }

    /// Hamming distance. Concrete problems should delegate
    /// `Solution::dist` to this.
    fn hamming_dist(&self, other: &Self) -> f64
    where
        Self: Sized,
    {
        self.sequence()
            .iter()
            .zip(other.sequence().iter())
            .filter(|(a, b)| a != b)
            .count() as f64
    }

    /// Enumerates all k-subsets of positions (in a random permutation
    /// order), applying [`BoolVectorSolution::flip_variable`] on entry and
    /// reverting on exit unless the subset is kept. Returns whether the
    /// solution improved; under best-improvement the final state reflects
    /// the best neighbor found.
    fn k_flip_neighborhood_search(
        &mut self,
        k: usize,
        best_improvement: bool,
        rng: &mut dyn RngCore,
    ) -> bool
    where
        Self: Sized,
    {
        let n = self.sequence().len();
        if k == 0 || k > n {
            return false;
        }
        let perm = crate::random::random_permutation(n, rng);
        let obj_orig = self.objective();
        let mut improved = false;
        let mut best_obj = obj_orig;
        let mut best_combo: Option<Vec<usize>> = None;

        for combo in k_combinations(&perm, k) {
            for &p in &combo {
                self.flip_variable(p);
            }
            let new_obj = self.objective();
            if self.is_better_obj(new_obj, obj_orig) {
                improved = true;
                if !best_improvement {
                    return true;
                }
                if best_combo.is_none() || self.is_better_obj(new_obj, best_obj) {
                    best_obj = new_obj;
                    best_combo = Some(combo.clone());
                }
            }
            for &p in &combo {
                self.flip_variable(p);
            }
        }

        if best_improvement {
            if let Some(combo) = best_combo {
                for &p in &combo {
                    self.flip_variable(p);
                }
            }
        }
        improved
    }
}

/// All size-`k` subsets of `items`, preserving `items`' order as the
/// enumeration order (so a pre-shuffled `items` gives a randomized scan).
fn k_combinations<T: Copy>(items: &[T], k: usize) -> Vec<Vec<T>> {
    if k == 0 || k > items.len() {
        return Vec::new();
    }
    let mut result = Vec::new();
    let mut combo = Vec::with_capacity(k);
    combine(items, k, 0, &mut combo, &mut result);
    result
}

fn combine<T: Copy>(items: &[T], k: usize, start: usize, combo: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
    if combo.len() == k {
        out.push(combo.clone());
        return;
    }
    for i in start..items.len() {
        combo.push(items[i]);
        combine(items, k, i + 1, combo, out);
        combo.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MhResult;
    use crate::solution::Solution;

    #[derive(Debug, Clone)]
    struct OneMax {
        bits: Vec<bool>,
        obj_val: f64,
        obj_val_valid: bool,
    }

    impl PartialEq for OneMax {
        fn eq(&self, other: &Self) -> bool {
            self.bits == other.bits
        }
    }

    impl OneMax {
        fn new(n: usize) -> Self {
            Self {
                bits: vec![false; n],
                obj_val: 0.0,
                obj_val_valid: false,
            }
        }
    }

    impl Solution for OneMax {
        fn calc_objective(&self) -> f64 {
            self.bits.iter().filter(|&&b| b).count() as f64
        }
        fn obj_val_cache(&self) -> (f64, bool) {
            (self.obj_val, self.obj_val_valid)
        }
        fn set_obj_val_cache(&mut self, val: f64, valid: bool) {
            self.obj_val = val;
            self.obj_val_valid = valid;
        }
        fn to_maximize(&self) -> bool {
            true
        }
        fn dist(&self, other: &Self) -> f64 {
            self.hamming_dist(other)
        }
        fn check(&self) -> MhResult<()> {
            Ok(())
        }
    }

    impl VectorSolution<bool> for OneMax {
        fn sequence(&self) -> &[bool] {
            &self.bits
        }
        fn sequence_mut(&mut self) -> &mut Vec<bool> {
            &mut self.bits
        }
    }

    impl BoolVectorSolution for OneMax {}

    #[test]
    fn k_combinations_counts_binomial() {
        let items = [0, 1, 2, 3, 4];
        assert_eq!(k_combinations(&items, 2).len(), 10);
        assert_eq!(k_combinations(&items, 0).len(), 0);
        assert_eq!(k_combinations(&items, 5).len(), 1);
        assert_eq!(k_combinations(&items, 6).len(), 0);
    }

    #[test]
    fn k_random_flips_changes_exactly_k_bits() {
        let mut rng = crate::random::create_rng(1);
        let mut s = OneMax::new(10);
        s.k_random_flips(3, &mut rng);
        assert_eq!(s.bits.iter().filter(|&&b| b).count(), 3);
    }

    #[test]
    fn k_flip_best_improvement_reaches_all_true_from_all_false() {
        let mut rng = crate::random::create_rng(42);
        let mut s = OneMax::new(6);
        let mut changed_any = true;
        let mut guard = 0;
        while changed_any && guard < 20 {
            changed_any = s.k_flip_neighborhood_search(1, true, &mut rng);
            guard += 1;
        }
        assert_eq!(s.objective(), 6.0);
    }

    #[test]
    fn k_flip_first_improvement_improves_or_is_locally_optimal() {
        let mut rng = crate::random::create_rng(3);
        let mut s = OneMax::new(5);
        s.k_random_flips(2, &mut rng);
        let before = s.objective();
        let improved = s.k_flip_neighborhood_search(1, false, &mut rng);
        if improved {
            assert!(s.objective() > before);
        } else {
            assert_eq!(s.objective(), before);
        }
    }

    #[test]
    fn hamming_distance_counts_differing_bits() {
        let mut a = OneMax::new(4);
        let mut b = OneMax::new(4);
        a.bits = vec![true, true, false, false];
        b.bits = vec![true, false, false, true];
        assert_eq!(a.dist(&b), 2.0);
    }
}

//! Permutation-solution extension: 2-opt local search, random 2-exchange
//! shaking, and destroy/repair via remove/reinsert (C2).

use super::VectorSolution;
use rand::RngCore;

/// A solution whose sequence must always be a permutation of a fixed
/// element set, except transiently between
/// [`PermutationSolution::random_remove_elements`] and
/// [`PermutationSolution::random_reinsert_removed`].
pub trait PermutationSolution: VectorSolution<usize> {
    /// Elements temporarily removed by `random_remove_elements`, awaiting
    /// `random_reinsert_removed`.
    fn destroyed(&self) -> &[usize];
    fn destroyed_mut(&mut self) -> &mut Vec<usize>;

    /// Shuffles the sequence, then invalidates.
    fn initialize(&mut self, rng: &mut dyn RngCore) {
        crate::random::shuffle(self.sequence_mut(), rng);
        self.invalidate();
    }

    /// Reverses the subrange `[p1, p2]` (inclusive, order-independent),
    /// then invalidates. Its own inverse: applying it twice with the same
    /// `(p1, p2)` restores the original sequence.
    fn apply_two_opt_move(&mut self, p1: usize, p2: usize) {
        let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
        self.sequence_mut()[lo..=hi].reverse();
        self.invalidate();
    }

    /// Objective delta of applying `apply_two_opt_move(p1, p2)`. Default:
    /// apply, diff, revert (full recompute both ways); override for an
    /// incremental delta update.
    fn two_opt_move_delta_eval(&mut self, p1: usize, p2: usize) -> f64 {
        let before = self.objective();
        self.apply_two_opt_move(p1, p2);
        let after = self.objective();
        self.apply_two_opt_move(p1, p2);
        after - before
    }

    /// Enumerates unordered position pairs in randomized order; on first
    /// improvement applies and returns, or (under best-improvement) tracks
    /// the best pair and applies it at the end.
    fn two_opt_neighborhood_search(&mut self, best_improvement: bool, rng: &mut dyn RngCore) -> bool
    where
        Self: Sized,
    {
        let n = self.sequence().len();
        if n < 2 {
            return false;
        }
        let mut pairs = Vec::with_capacity(n * (n - 1) / 2);
        for p1 in 0..n {
            for p2 in (p1 + 1)..n {
                pairs.push((p1, p2));
            }
        }
        crate::random::shuffle(&mut pairs, rng);

        let mut improved = false;
        let mut best_delta = 0.0;
        let mut best_pair = None;
        for (p1, p2) in pairs {
            let delta = self.two_opt_move_delta_eval(p1, p2);
            let is_improving = if self.to_maximize() {
                delta > 1e-12
            } else {
                delta < -1e-12
            };
            if is_improving {
                improved = true;
                if !best_improvement {
                    self.apply_two_opt_move(p1, p2);
                    return true;
                }
                let is_new_best = match best_pair {
                    None => true,
                    Some(_) => {
                        if self.to_maximize() {
                            delta > best_delta
                        } else {
                            delta < best_delta
                        }
                    }
                };
                if is_new_best {
                    best_delta = delta;
                    best_pair = Some((p1, p2));
                }
            }
        }
        if best_improvement {
            if let Some((p1, p2)) = best_pair {
                self.apply_two_opt_move(p1, p2);
            }
        }
        improved
    }

    /// Performs `num` random swaps of distinct positions, then invalidates.
    fn random_two_exchange_moves(&mut self, num: usize, rng: &mut dyn RngCore) {
        use rand::Rng;
        let len = self.sequence().len();
        if len < 2 {
            return;
        }
        for _ in 0..num {
            let i = rng.random_range(0..len);
            let mut j = rng.random_range(0..len);
            while j == i {
                j = rng.random_range(0..len);
            }
            self.sequence_mut().swap(i, j);
        }
        self.invalidate();
    }

    /// Moves `n` randomly chosen positions into the destroyed stash and
    /// compacts the remaining sequence.
    fn random_remove_elements(&mut self, n: usize, rng: &mut dyn RngCore) {
        let len = self.sequence().len();
        let n = n.min(len);
        let mut positions = crate::random::choose_distinct(len, n, rng);
        positions.sort_unstable();
        for &p in positions.iter().rev() {
            let val = self.sequence_mut().remove(p);
            self.destroyed_mut().push(val);
        }
        self.invalidate();
    }

    /// Reinserts the stashed elements at random positions, in shuffled
    /// order.
    fn random_reinsert_removed(&mut self, rng: &mut dyn RngCore) {
        use rand::Rng;
        let mut removed = std::mem::take(self.destroyed_mut());
        crate::random::shuffle(&mut removed, rng);
        for val in removed {
            let len = self.sequence().len();
            let pos = if len == 0 { 0 } else { rng.random_range(0..=len) };
            self.sequence_mut().insert(pos, val);
        }
        self.invalidate();
    }
}

//! Subset-vector solution extension: selected-prefix / extension-pool
//! partition with greedy fill, randomized removal, and a two-exchange +
//! greedy-fill neighborhood search (C2).

use super::VectorSolution;
use rand::RngCore;

/// A solution that partitions its sequence into a *selected* prefix of
/// length `sel()` and an extension-pool suffix.
///
/// Invariant: all elements distinct; the extension pool is always
/// `sequence()[sel()..]`. The selected prefix is kept sorted after every
/// change that the trait's own methods make, so it can double as an
/// externally-visible "selected set" view.
pub trait SubsetVectorSolution: VectorSolution<usize> {
    fn sel(&self) -> usize;
    fn set_sel(&mut self, sel: usize);

    fn selected(&self) -> &[usize] {
        let sel = self.sel();
        &self.sequence()[..sel]
    }

    fn pool(&self) -> &[usize] {
        let sel = self.sel();
        &self.sequence()[sel..]
    }

    /// Called after an element is tentatively added to the selection
    /// (already swapped into the prefix, `sel` already incremented).
    /// Updates incidental bookkeeping and returns whether the selection
    /// remains feasible. Default: always feasible, invalidate cache.
    fn element_added_delta_eval(&mut self) -> bool {
        self.invalidate();
        true
    }

    /// Called after an element is removed from the selection (already
    /// swapped out, `sel` already decremented). Default: invalidate.
    fn element_removed_delta_eval(&mut self) {
        self.invalidate();
    }

    /// Extends the selection by scanning pool candidates (optionally in
    /// random order), accepting each one that remains feasible. Keeps the
    /// selected prefix sorted after every accepted change.
    fn fill(&mut self, randomize: bool, rng: &mut dyn RngCore) {
        let mut candidates: Vec<usize> = self.pool().to_vec();
        if randomize {
            crate::random::shuffle(&mut candidates, rng);
        }
        for v in candidates {
            let sel = self.sel();
            let pos = match self.sequence()[sel..].iter().position(|&x| x == v) {
                Some(p) => sel + p,
                None => continue, // already consumed by an earlier acceptance
            };
            self.sequence_mut().swap(sel, pos);
            self.set_sel(sel + 1);
            if self.element_added_delta_eval() {
                self.sequence_mut()[..sel + 1].sort_unstable();
            } else {
                self.sequence_mut().swap(sel, pos);
                self.set_sel(sel);
            }
        }
    }

    /// Removes `min(k, sel())` randomly chosen selected elements into the
    /// pool, allowing temporary infeasibility.
    fn remove_some(&mut self, k: usize, rng: &mut dyn RngCore) {
        let sel = self.sel();
        let k = k.min(sel);
        if k == 0 {
            return;
        }
        let mut positions = crate::random::choose_distinct(sel, k, rng);
        positions.sort_unstable();
        for &p in positions.iter().rev() {
            let last = self.sel() - 1;
            self.sequence_mut().swap(p, last);
            self.set_sel(last);
            self.element_removed_delta_eval();
        }
        let sel_now = self.sel();
        self.sequence_mut()[..sel_now].sort_unstable();
    }

    /// Swaps each selected element with each pool element, applies a
    /// greedy fill after each move, and keeps the best (or first)
    /// improving neighbor. Worst case `O(|selected| * |pool|)`.
    fn two_exchange_random_fill_neighborhood_search(
        &mut self,
        best_improvement: bool,
        rng: &mut dyn RngCore,
    ) -> bool
    where
        Self: Sized,
    {
        let sel = self.sel();
        let len = self.sequence().len();
        if sel == 0 || sel >= len {
            return false;
        }
        let obj_orig = self.objective();
        let mut improved = false;
        let mut best_obj = obj_orig;
        let mut best_state: Option<(Vec<usize>, usize)> = None;

        for sp in 0..sel {
            for pp in sel..len {
                let snapshot = self.sequence().to_vec();
                let snapshot_sel = self.sel();

                self.sequence_mut().swap(sp, pp);
                self.element_removed_delta_eval();
                self.element_added_delta_eval();
                self.fill(true, rng);

                let new_obj = self.objective();
                if self.is_better_obj(new_obj, obj_orig) {
                    improved = true;
                    if !best_improvement {
                        return true;
                    }
                    if best_state.is_none() || self.is_better_obj(new_obj, best_obj) {
                        best_obj = new_obj;
                        best_state = Some((self.sequence().to_vec(), self.sel()));
                    }
                }

                *self.sequence_mut() = snapshot;
                self.set_sel(snapshot_sel);
                self.invalidate();
            }
        }

        if best_improvement {
            if let Some((seq, sel)) = best_state {
                *self.sequence_mut() = seq;
                self.set_sel(sel);
                self.invalidate();
            }
        }
        improved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MhResult;
    use crate::solution::Solution;

    /// Maximize the sum of selected elements, subject to the sum staying
    /// at or below `capacity` (a toy knapsack-like subset problem).
    #[derive(Debug, Clone)]
    struct CapacitySubset {
        seq: Vec<usize>,
        sel: usize,
        capacity: i64,
        selected_sum: i64,
        obj_val: f64,
        obj_val_valid: bool,
    }

    impl PartialEq for CapacitySubset {
        fn eq(&self, other: &Self) -> bool {
            self.seq == other.seq && self.sel == other.sel
        }
    }

    impl CapacitySubset {
        fn new(pool: Vec<usize>, capacity: i64) -> Self {
            Self {
                seq: pool,
                sel: 0,
                capacity,
                selected_sum: 0,
                obj_val: 0.0,
                obj_val_valid: false,
            }
        }
    }

    impl Solution for CapacitySubset {
        fn calc_objective(&self) -> f64 {
            self.seq[..self.sel].iter().sum::<usize>() as f64
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
        fn check(&self) -> MhResult<()> {
            let mut sorted = self.seq[..self.sel].to_vec();
            sorted.sort_unstable();
            if sorted != self.seq[..self.sel] {
                return Err(crate::error::MhError::invariant("selected prefix not sorted"));
            }
            let mut uniq = self.seq.clone();
            uniq.sort_unstable();
            uniq.dedup();
            if uniq.len() != self.seq.len() {
                return Err(crate::error::MhError::invariant("duplicate elements"));
            }
            Ok(())
        }
    }

    impl VectorSolution<usize> for CapacitySubset {
        fn sequence(&self) -> &[usize] {
            &self.seq
        }
        fn sequence_mut(&mut self) -> &mut Vec<usize> {
            &mut self.seq
        }
    }

    impl SubsetVectorSolution for CapacitySubset {
        fn sel(&self) -> usize {
            self.sel
        }
        fn set_sel(&mut self, sel: usize) {
            self.sel = sel;
        }

        fn element_added_delta_eval(&mut self) -> bool {
            let sum: i64 = self.seq[..self.sel].iter().sum::<usize>() as i64;
            self.selected_sum = sum;
            self.invalidate();
            sum <= self.capacity
        }

        fn element_removed_delta_eval(&mut self) {
            self.selected_sum = self.seq[..self.sel].iter().sum::<usize>() as i64;
            self.invalidate();
        }
    }

    #[test]
    fn fill_respects_capacity_and_keeps_selection_sorted() {
        let mut rng = crate::random::create_rng(2);
        let mut s = CapacitySubset::new(vec![5, 1, 9, 3, 2, 8], 15);
        s.fill(true, &mut rng);
        assert!(s.selected_sum <= 15);
        let mut sorted = s.seq[..s.sel].to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, s.seq[..s.sel]);
        assert!(s.check().is_ok());
    }

    #[test]
    fn fill_no_randomize_is_deterministic() {
        let mut rng = crate::random::create_rng(99);
        let mut a = CapacitySubset::new(vec![1, 2, 3, 4, 5], 100);
        let mut b = CapacitySubset::new(vec![1, 2, 3, 4, 5], 100);
        a.fill(false, &mut rng);
        b.fill(false, &mut rng);
        assert_eq!(a.seq, b.seq);
        assert_eq!(a.sel, 5);
    }

    #[test]
    fn remove_some_shrinks_selection_and_stays_distinct() {
        let mut rng = crate::random::create_rng(4);
        let mut s = CapacitySubset::new(vec![1, 2, 3, 4, 5, 6], 100);
        s.fill(true, &mut rng);
        let before = s.sel;
        s.remove_some(2, &mut rng);
        assert_eq!(s.sel, before.saturating_sub(2));
        assert!(s.check().is_ok());
    }

    #[test]
    fn remove_some_caps_k_at_sel() {
        let mut rng = crate::random::create_rng(6);
        let mut s = CapacitySubset::new(vec![1, 2, 3], 0);
        s.fill(true, &mut rng); // capacity 0: nothing gets selected
        assert_eq!(s.sel, 0);
        s.remove_some(5, &mut rng);
        assert_eq!(s.sel, 0);
    }

    #[test]
    fn two_exchange_fill_search_never_worsens_when_best_improvement() {
        let mut rng = crate::random::create_rng(13);
        let mut s = CapacitySubset::new(vec![4, 7, 2, 9, 1, 5, 3], 14);
        s.fill(true, &mut rng);
        let before = s.objective();
        s.two_exchange_random_fill_neighborhood_search(true, &mut rng);
        assert!(s.objective() >= before - 1e-9);
        assert!(s.check().is_ok());
    }
}

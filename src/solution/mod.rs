//! Polymorphic candidate-solution contract (C1) and its vector/boolean/
//! permutation/subset extensions (C2).
//!
//! Concrete problems implement [`Solution`] (and whichever extension trait
//! fits their encoding); the scheduler and drivers consume only the trait.
//! This mirrors the teacher's per-algorithm `XxxProblem` traits
//! (`VnsProblem`, `SaProblem`, `AlnsProblem`) but as a single capability
//! hierarchy, per Design Note "Polymorphism over solutions".

mod boolean;
mod permutation;
mod subset;
mod vector;

pub use boolean::BoolVectorSolution;
pub use permutation::PermutationSolution;
pub use subset::SubsetVectorSolution;
pub use vector::VectorSolution;

use crate::error::MhResult;

/// The candidate-solution contract consumed by the scheduler and drivers.
///
/// Implementors hold enough state for their concrete encoding plus a
/// cached objective value and a validity flag, exposed through
/// [`Solution::obj_val_cache`]/[`Solution::set_obj_val_cache`] so the
/// default methods below can implement the cache-then-recompute protocol
/// once, generically.
pub trait Solution: Clone + PartialEq {
    /// Recomputes the objective from scratch. Never reads the cache.
    fn calc_objective(&self) -> f64;

    /// Returns `(cached_value, is_valid)`.
    fn obj_val_cache(&self) -> (f64, bool);

    /// Updates the cache.
    fn set_obj_val_cache(&mut self, val: f64, valid: bool);

    /// Fixed for a problem type; determines comparison direction.
    fn to_maximize(&self) -> bool;

    /// Returns the cached objective, recomputing and marking valid if the
    /// cache was invalid.
    fn objective(&mut self) -> f64 {
        let (val, valid) = self.obj_val_cache();
        if valid {
            val
        } else {
            let v = self.calc_objective();
            self.set_obj_val_cache(v, true);
            v
        }
    }

    /// Marks the cache invalid. Called after any mutation changing the
    /// objective. Two successive calls leave state equivalent to one call
    /// (idempotent): the first subsequent `objective()` recomputes either
    /// way.
    fn invalidate(&mut self) {
        let (val, _) = self.obj_val_cache();
        self.set_obj_val_cache(val, false);
    }

    /// Directional comparison of two raw objective values.
    fn is_better_obj(&self, v1: f64, v2: f64) -> bool {
        if self.to_maximize() {
            v1 > v2
        } else {
            v1 < v2
        }
    }

    /// Directional comparison of two raw objective values (reversed).
    fn is_worse_obj(&self, v1: f64, v2: f64) -> bool {
        self.is_better_obj(v2, v1)
    }

    /// Whether `self` strictly improves on `other`, consistent with
    /// [`Solution::to_maximize`].
    fn is_better(&mut self, other: &mut Self) -> bool {
        let a = self.objective();
        let b = other.objective();
        self.is_better_obj(a, b)
    }

    /// Whether `self` is strictly worse than `other`.
    fn is_worse(&mut self, other: &mut Self) -> bool {
        let a = self.objective();
        let b = other.objective();
        self.is_worse_obj(a, b)
    }

    /// Structural equality over the solution's domain state. The default
    /// delegates to `PartialEq`; implementors must exclude the objective
    /// cache's validity flag from that comparison (two structurally
    /// identical solutions with different cache states are still equal).
    fn is_equal(&self, other: &Self) -> bool {
        self == other
    }

    /// Semantic distance between two solutions. The base default is
    /// identity-or-1; [`BoolVectorSolution`] overrides with Hamming
    /// distance via [`BoolVectorSolution::hamming_dist`] (concrete
    /// boolean-vector problems should delegate `dist` to it).
    fn dist(&self, other: &Self) -> f64 {
        if self.is_equal(other) {
            0.0
        } else {
            1.0
        }
    }

    /// Validates invariants and re-derives the objective to verify the
    /// cache. Fatal on failure: callers propagate the error and abort the
    /// run rather than continuing with corrupted state.
    fn check(&self) -> MhResult<()> {
        let (cached, valid) = self.obj_val_cache();
        if valid {
            let recomputed = self.calc_objective();
            if (recomputed - cached).abs() > 1e-6 {
                return Err(crate::error::MhError::invariant(format!(
                    "objective cache mismatch: cached={cached}, recomputed={recomputed}"
                )));
            }
        }
        Ok(())
    }

    /// Returns an independent copy.
    fn copy(&self) -> Self {
        self.clone()
    }

    /// Destination-preserving copy: overwrites `self` with `other`'s state.
    fn copy_from(&mut self, other: &Self) {
        self.clone_from(other);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! A minimal concrete `Solution` used across this module's unit tests:
    //! maximize the sum of a fixed-length `f64` vector.

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub struct SumSolution {
        pub values: Vec<f64>,
        pub obj_val: f64,
        pub obj_val_valid: bool,
    }

    impl SumSolution {
        pub fn new(values: Vec<f64>) -> Self {
            Self {
                values,
                obj_val: 0.0,
                obj_val_valid: false,
            }
        }
    }

    impl Solution for SumSolution {
        fn calc_objective(&self) -> f64 {
            self.values.iter().sum()
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
    }
}


#[cfg(test)]
mod laws {
    use super::test_support::SumSolution;
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn copy_round_trip(values in vec(-1000.0f64..1000.0, 0..20)) {
            let mut a = SumSolution::new(values);
            a.objective();
            let mut b = a.copy();
            b.copy_from(&a);
            prop_assert!(a.is_equal(&b));
            prop_assert_eq!(a.objective(), b.objective());
        }

        #[test]
        fn invalidate_idempotence(values in vec(-1000.0f64..1000.0, 1..20)) {
            let mut s = SumSolution::new(values);
            s.objective();
            s.invalidate();
            let once = s.obj_val_cache();
            s.invalidate();
            let twice = s.obj_val_cache();
            prop_assert_eq!(once, twice);
            prop_assert_eq!(s.objective(), s.calc_objective());
        }
    }
}

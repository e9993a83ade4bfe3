//! Uniform-random method selector (C6).

use rand::seq::IndexedRandom;
use rand::RngCore;

use super::types::{MethodSelector, UpdateCase};

/// Picks uniformly at random among the candidates; ignores outcomes.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRandomMethodSelector;

impl UniformRandomMethodSelector {
    pub fn new() -> Self {
        Self
    }
}

impl MethodSelector for UniformRandomMethodSelector {
    fn init_method_selector(&mut self, _iteration: u64) {}

    fn select_method(&mut self, candidates: &[usize], _is_destroy: bool, rng: &mut dyn RngCore) -> usize {
        *candidates.choose(rng).expect("candidates must be non-empty")
    }

    fn update_method_selector(&mut self, _destroy_idx: usize, _repair_idx: usize, _case: UpdateCase, _iteration: u64) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn selects_only_from_candidates() {
        let mut rng = create_rng(1);
        let mut sel = UniformRandomMethodSelector::new();
        let candidates = [2, 5, 7];
        for _ in 0..50 {
            let picked = sel.select_method(&candidates, true, &mut rng);
            assert!(candidates.contains(&picked));
        }
    }
}

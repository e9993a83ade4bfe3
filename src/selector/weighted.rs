//! Fixed-weight random method selector (C6).

use rand::RngCore;

use super::types::{MethodSelector, UpdateCase};

/// Samples candidates proportionally to static weight vectors fixed at
/// construction; never adapts. `w_de` is indexed by destroy-method index,
/// `w_re` by repair-method index.
#[derive(Debug, Clone)]
pub struct WeightedRandomMethodSelector {
    w_de: Vec<f64>,
    w_re: Vec<f64>,
}

impl WeightedRandomMethodSelector {
    pub fn new(w_de: Vec<f64>, w_re: Vec<f64>) -> Self {
        Self { w_de, w_re }
    }
}

fn weighted_pick(candidates: &[usize], weights: &[f64], rng: &mut dyn RngCore) -> usize {
    use rand::Rng;
    let total: f64 = candidates.iter().map(|&c| weights[c].max(0.0)).sum();
    if total <= 0.0 {
        return candidates[rng.random_range(0..candidates.len())];
    }
    let mut pick = rng.random_range(0.0..total);
    for &c in candidates {
        let w = weights[c].max(0.0);
        if pick < w {
            return c;
        }
        pick -= w;
    }
    *candidates.last().unwrap()
}

impl MethodSelector for WeightedRandomMethodSelector {
    fn init_method_selector(&mut self, _iteration: u64) {}

    fn select_method(&mut self, candidates: &[usize], is_destroy: bool, rng: &mut dyn RngCore) -> usize {
        let weights = if is_destroy { &self.w_de } else { &self.w_re };
        weighted_pick(candidates, weights, rng)
    }

    fn update_method_selector(&mut self, _destroy_idx: usize, _repair_idx: usize, _case: UpdateCase, _iteration: u64) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn heavier_weight_is_picked_more_often() {
        let mut rng = create_rng(3);
        let mut sel = WeightedRandomMethodSelector::new(vec![0.0, 10.0, 0.0], vec![1.0]);
        let candidates = [0, 1, 2];
        let mut counts = [0usize; 3];
        for _ in 0..200 {
            let picked = sel.select_method(&candidates, true, &mut rng);
            counts[picked] += 1;
        }
        assert_eq!(counts[0], 0);
        assert_eq!(counts[2], 0);
        assert_eq!(counts[1], 200);
    }
}

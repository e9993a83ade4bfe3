//! Adaptive LNS method selector (C7): segment-based operator reweighting
//! atop the method-selector contract.

use std::collections::HashMap;

use rand::RngCore;

use super::types::{MethodSelector, UpdateCase};

/// Per-method adaptive bookkeeping: current sampling weight, score
/// accumulated in the current segment, and how many times it was applied
/// in the current segment.
#[derive(Debug, Clone, Copy)]
pub struct ScoreData {
    pub weight: f64,
    pub score: f64,
    pub applied: u64,
}

impl Default for ScoreData {
    fn default() -> Self {
        Self {
            weight: 1.0,
            score: 0.0,
            applied: 0,
        }
    }
}

/// Tunables for the ALNS reweighting rule.
#[derive(Debug, Clone, Copy)]
pub struct ALNSParameters {
    /// Iteration span between reweighting events.
    pub segment_size: u64,
    /// Exponential-smoothing factor applied at each reweighting.
    pub gamma: f64,
    /// Score credited to both operators of a `:betterThanIncumbent` pair.
    pub sigma1: f64,
    /// Score credited for `:betterThanCurrent`.
    pub sigma2: f64,
    /// Score credited for `:acceptedAlthoughWorse`.
    pub sigma3: f64,
}

impl Default for ALNSParameters {
    fn default() -> Self {
        Self {
            segment_size: 100,
            gamma: 0.025,
            sigma1: 10.0,
            sigma2: 9.0,
            sigma3: 3.0,
        }
    }
}

/// Segment-based adaptive operator weights (C7). Two parallel
/// [`ScoreData`] arrays, one per destroy method and one per repair method,
/// addressed through `de_pos`/`re_pos`, which map the *absolute* method
/// index the driver and `MethodSelector` contract use (see
/// `src/selector/types.rs`) to a position in the dense arrays. This
/// mirrors `LNSDriver`'s own `destroy_pos`/`repair_pos` maps, since the
/// selector is handed the same absolute indices the driver's compat
/// matrix addresses.
#[derive(Debug, Clone)]
pub struct ALNSMethodSelector {
    de: Vec<ScoreData>,
    re: Vec<ScoreData>,
    de_pos: HashMap<usize, usize>,
    re_pos: HashMap<usize, usize>,
    params: ALNSParameters,
    next_segment: u64,
}

impl ALNSMethodSelector {
    /// `destroy_indices`/`repair_indices` are the absolute method indices
    /// the owning driver will pass to `select_method`/`update_method_selector`
    /// (its own `destroy_methods`/`repair_methods` vectors).
    pub fn new(destroy_indices: &[usize], repair_indices: &[usize], params: ALNSParameters) -> Self {
        let de_pos = destroy_indices.iter().enumerate().map(|(p, &i)| (i, p)).collect();
        let re_pos = repair_indices.iter().enumerate().map(|(p, &i)| (i, p)).collect();
        Self {
            de: vec![ScoreData::default(); destroy_indices.len()],
            re: vec![ScoreData::default(); repair_indices.len()],
            de_pos,
            re_pos,
            params,
            next_segment: 0,
        }
    }

    pub fn destroy_scores(&self) -> &[ScoreData] {
        &self.de
    }

    pub fn repair_scores(&self) -> &[ScoreData] {
        &self.re
    }

    fn case_score(&self, case: UpdateCase) -> f64 {
        match case {
            UpdateCase::BetterThanIncumbent => self.params.sigma1,
            UpdateCase::BetterThanCurrent => self.params.sigma2,
            UpdateCase::AcceptedAlthoughWorse => self.params.sigma3,
            UpdateCase::Rejected => 0.0,
        }
    }

    fn reweight_segment(scores: &mut [ScoreData], gamma: f64) {
        for s in scores.iter_mut() {
            if s.applied > 0 {
                s.weight = s.weight * (1.0 - gamma) + gamma * s.score / s.applied as f64;
            }
            s.score = 0.0;
            s.applied = 0;
        }
    }
}

fn weighted_pick_by_score(
    candidates: &[usize],
    scores: &[ScoreData],
    pos: &HashMap<usize, usize>,
    rng: &mut dyn RngCore,
) -> usize {
    use rand::Rng;
    let total: f64 = candidates.iter().map(|&c| scores[pos[&c]].weight.max(0.0)).sum();
    if total <= 0.0 {
        return candidates[rng.random_range(0..candidates.len())];
    }
    let mut pick = rng.random_range(0.0..total);
    for &c in candidates {
        let w = scores[pos[&c]].weight.max(0.0);
        if pick < w {
            return c;
        }
        pick -= w;
    }
    *candidates.last().unwrap()
}

impl MethodSelector for ALNSMethodSelector {
    fn init_method_selector(&mut self, iteration: u64) {
        self.next_segment = iteration + self.params.segment_size;
    }

    fn select_method(&mut self, candidates: &[usize], is_destroy: bool, rng: &mut dyn RngCore) -> usize {
        if is_destroy {
            weighted_pick_by_score(candidates, &self.de, &self.de_pos, rng)
        } else {
            weighted_pick_by_score(candidates, &self.re, &self.re_pos, rng)
        }
    }

    fn update_method_selector(&mut self, destroy_idx: usize, repair_idx: usize, case: UpdateCase, iteration: u64) {
        let score = self.case_score(case);
        let dp = self.de_pos[&destroy_idx];
        let rp = self.re_pos[&repair_idx];
        self.de[dp].applied += 1;
        self.de[dp].score += score;
        self.re[rp].applied += 1;
        self.re[rp].score += score;

        if iteration >= self.next_segment {
            let gamma = self.params.gamma;
            Self::reweight_segment(&mut self.de, gamma);
            Self::reweight_segment(&mut self.re, gamma);
            self.next_segment += self.params.segment_size;
        }
    }
}

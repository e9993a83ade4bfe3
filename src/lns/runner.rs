//! Large Neighborhood Search driver (C5): destroy+repair loop with a
//! Metropolis acceptance rule and geometric cooling.

use std::collections::HashMap;

use rand::Rng;

use crate::error::{MhError, MhResult};
use crate::method::MHMethod;
use crate::scheduler::{Scheduler, SchedulerParameters};
use crate::selector::{MethodSelector, UpdateCase};
use crate::solution::Solution;

use super::config::LNSParameters;

const TEMPERATURE_EPS: f64 = 1e-9;

/// Draws a destroy size for an instance of `n` elements. Returns a random
/// integer in `[max(min_abs, floor(min_ratio*n)), min(max_abs, floor(max_ratio*n))]`;
/// if that interval is empty, returns `max_abs + 1`.
pub fn get_number_to_destroy(
    n: usize,
    min_abs: usize,
    max_abs: usize,
    min_ratio: f64,
    max_ratio: f64,
    rng: &mut dyn rand::RngCore,
) -> usize {
    let lo = min_abs.max((min_ratio * n as f64).floor() as usize);
    let hi = max_abs.min((max_ratio * n as f64).floor() as usize);
    if lo > hi {
        return max_abs + 1;
    }
    rng.random_range(lo..=hi)
}

/// Destroy+repair loop atop a [`Scheduler`], with a pluggable
/// [`MethodSelector`] choosing operator indices and an optional
/// compatibility matrix restricting which repairs may follow which
/// destroys.
pub struct LNSDriver<S: Solution> {
    scheduler: Scheduler<S>,
    destroy_methods: Vec<usize>,
    repair_methods: Vec<usize>,
    destroy_pos: HashMap<usize, usize>,
    repair_pos: HashMap<usize, usize>,
    compat: Option<Vec<Vec<bool>>>,
    selector: Box<dyn MethodSelector>,
    params: LNSParameters,
    temperature: f64,
}

impl<S: Solution> LNSDriver<S> {
    /// Constructs a driver. Fails if either method list is empty, if the
    /// compatibility matrix has the wrong shape, or if any of its rows is
    /// entirely `false` (a destroy method with no compatible repair).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        initial: S,
        construction_methods: Vec<MHMethod<S>>,
        destroy_methods: Vec<MHMethod<S>>,
        repair_methods: Vec<MHMethod<S>>,
        compat: Option<Vec<Vec<bool>>>,
        consider_initial_sol: bool,
        scheduler_params: SchedulerParameters,
        params: LNSParameters,
        selector: Box<dyn MethodSelector>,
        seed: u64,
    ) -> MhResult<Self> {
        if destroy_methods.is_empty() {
            return Err(MhError::configuration("LNS requires at least one destroy method"));
        }
        if repair_methods.is_empty() {
            return Err(MhError::configuration("LNS requires at least one repair method"));
        }
        if !consider_initial_sol && construction_methods.is_empty() {
            return Err(MhError::configuration(
                "construction-method list is empty and consider_initial_sol is false",
            ));
        }
        if let Some(matrix) = &compat {
            if matrix.len() != destroy_methods.len() {
                return Err(MhError::configuration(
                    "compatibility matrix row count must equal the number of destroy methods",
                ));
            }
            for row in matrix {
                if row.len() != repair_methods.len() {
                    return Err(MhError::configuration(
                        "compatibility matrix column count must equal the number of repair methods",
                    ));
                }
                if !row.iter().any(|&c| c) {
                    return Err(MhError::configuration(
                        "compatibility matrix has a destroy method with no compatible repair",
                    ));
                }
            }
        }

        let mut all_methods = construction_methods;
        let construction_count = all_methods.len();
        all_methods.extend(destroy_methods.iter().copied());
        all_methods.extend(repair_methods.iter().copied());

        let destroy_idx: Vec<usize> = (0..destroy_methods.len()).map(|i| construction_count + i).collect();
        let repair_idx: Vec<usize> = (0..repair_methods.len())
            .map(|i| construction_count + destroy_methods.len() + i)
            .collect();
        let destroy_pos = destroy_idx.iter().enumerate().map(|(p, &i)| (i, p)).collect();
        let repair_pos = repair_idx.iter().enumerate().map(|(p, &i)| (i, p)).collect();

        let mut scheduler = Scheduler::new(initial, consider_initial_sol, all_methods, scheduler_params, seed);

        if !consider_initial_sol {
            let construction_order: Vec<usize> = (0..construction_count).collect();
            let mut sol = scheduler.incumbent().clone();
            scheduler.perform_sequentially(&mut sol, &construction_order);
        }

        let init_obj = scheduler.incumbent().clone().objective();
        let temperature = init_obj.abs() * params.init_temp_factor + TEMPERATURE_EPS;

        Ok(Self {
            scheduler,
            destroy_methods: destroy_idx,
            repair_methods: repair_idx,
            destroy_pos,
            repair_pos,
            compat,
            selector,
            params,
            temperature,
        })
    }

    pub fn scheduler(&self) -> &Scheduler<S> {
        &self.scheduler
    }

    fn repair_candidates_for(&self, destroy_idx: usize) -> Vec<usize> {
        match &self.compat {
            None => self.repair_methods.clone(),
            Some(matrix) => {
                let dp = self.destroy_pos[&destroy_idx];
                self.repair_methods
                    .iter()
                    .copied()
                    .filter(|r| matrix[dp][self.repair_pos[r]])
                    .collect()
            }
        }
    }

    /// Accepts a strictly worse candidate with probability
    /// `exp(-|obj_new - obj_current| / T)`.
    fn metropolis_accept(&mut self, obj_current: f64, obj_new: f64) -> bool {
        let delta = (obj_new - obj_current).abs();
        let t = self.temperature.max(TEMPERATURE_EPS);
        let prob = (-delta / t).exp();
        self.scheduler.rng_mut().random::<f64>() < prob
    }

    /// Runs the destroy+repair loop to termination, returning the best
    /// solution found.
    pub fn run(&mut self) -> S {
        let mut sol = self.scheduler.incumbent().clone();
        let mut sol_new = sol.clone();

        self.selector.init_method_selector(self.scheduler.iteration());

        loop {
            if self.scheduler.check_termination() {
                break;
            }

            let obj_current = sol.objective();
            let d = self
                .selector
                .select_method(&self.destroy_methods, true, self.scheduler.rng_mut());
            let candidates = self.repair_candidates_for(d);
            let r = self.selector.select_method(&candidates, false, self.scheduler.rng_mut());

            sol_new.copy_from(&sol);
            let result = self.scheduler.perform_method_pair(d, r, &mut sol_new);
            let obj_new = sol_new.objective();
            let new_incumbent = self.scheduler.incumbent_iteration() == self.scheduler.iteration();

            let case = if new_incumbent {
                sol.copy_from(&sol_new);
                UpdateCase::BetterThanIncumbent
            } else if sol_new.is_better_obj(obj_new, obj_current) {
                sol.copy_from(&sol_new);
                UpdateCase::BetterThanCurrent
            } else if self.metropolis_accept(obj_current, obj_new) {
                sol.copy_from(&sol_new);
                UpdateCase::AcceptedAlthoughWorse
            } else {
                sol_new.copy_from(&sol);
                UpdateCase::Rejected
            };

            self.selector
                .update_method_selector(d, r, case, self.scheduler.iteration());

            if result.terminate {
                sol.copy_from(self.scheduler.incumbent());
                break;
            }

            self.temperature *= self.params.temp_dec_factor;
        }

        self.scheduler.incumbent().clone()
    }
}

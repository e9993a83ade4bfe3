//! General Variable Neighborhood Search driver (C4): variable neighborhood
//! descent composed with a shaking loop atop the Scheduler.

use std::time::Instant;

use crate::error::{MhError, MhResult};
use crate::method::MHMethod;
use crate::scheduler::{Scheduler, SchedulerParameters};
use crate::solution::Solution;

/// Construction + local-improvement + shaking method lists driving a
/// [`Scheduler`].
pub struct GVNSDriver<S: Solution> {
    scheduler: Scheduler<S>,
    construction: Vec<usize>,
    li: Vec<usize>,
    sh: Vec<usize>,
    consider_initial_sol: bool,
}

impl<S: Solution> GVNSDriver<S> {
    pub fn new(
        initial: S,
        construction_methods: Vec<MHMethod<S>>,
        li_methods: Vec<MHMethod<S>>,
        sh_methods: Vec<MHMethod<S>>,
        consider_initial_sol: bool,
        scheduler_params: SchedulerParameters,
        seed: u64,
    ) -> MhResult<Self> {
        if !consider_initial_sol && construction_methods.is_empty() {
            return Err(MhError::configuration(
                "construction-method list is empty and consider_initial_sol is false",
            ));
        }

        let construction_count = construction_methods.len();
        let li_count = li_methods.len();
        let mut all_methods = construction_methods;
        all_methods.extend(li_methods);
        all_methods.extend(sh_methods.iter().copied());

        let construction: Vec<usize> = (0..construction_count).collect();
        let li: Vec<usize> = (construction_count..construction_count + li_count).collect();
        let sh: Vec<usize> = (construction_count + li_count..construction_count + li_count + sh_methods.len()).collect();

        let scheduler = Scheduler::new(initial, consider_initial_sol, all_methods, scheduler_params, seed);

        Ok(Self {
            scheduler,
            construction,
            li,
            sh,
            consider_initial_sol,
        })
    }

    pub fn scheduler(&self) -> &Scheduler<S> {
        &self.scheduler
    }

    /// Variable neighborhood descent: cycles `li` methods on a working copy,
    /// restarting from the first method on strict improvement, reverting
    /// non-improving changes, and skipping the restart (continuing to the
    /// next method without reverting) when the operator itself reports no
    /// change (its own local optimum).
    ///
    /// Returns whether global termination fired.
    fn vnd(&mut self, sol: &mut S) -> bool {
        if self.li.is_empty() {
            return false;
        }
        let mut working = sol.copy();
        let mut idx = 0;
        loop {
            if idx >= self.li.len() {
                return false;
            }
            let method_idx = self.li[idx];
            let result = self.scheduler.perform_method(method_idx, &mut working, false);

            if result.terminate {
                if working.is_better_obj(working.objective(), sol.objective()) {
                    sol.copy_from(&working);
                }
                return true;
            }

            if working.is_better_obj(working.objective(), sol.objective()) {
                sol.copy_from(&working);
                idx = 0;
                continue;
            }
            if !result.changed {
                idx += 1;
                continue;
            }
            working.copy_from(sol);
            idx += 1;
        }
    }

    /// Shaking loop: repeatedly applies `sh` methods (cycling, not
    /// restarting the underlying list order) to a working copy, running
    /// VND after each shake when `li` is non-empty, and restarting the
    /// shake cycle from the first method on strict improvement.
    fn shake_loop(&mut self, sol: &mut S) {
        if self.sh.is_empty() {
            return;
        }
        let use_vnd = !self.li.is_empty();
        let mut seq = self.scheduler.method_sequence(&self.sh, false, true);
        let mut working = sol.copy();
        let mut since_improvement = 0usize;

        loop {
            let Some(sh_idx) = seq.next(self.scheduler.rng_mut()) else {
                break;
            };
            working.copy_from(sol);
            let obj_old = working.objective();
            let t0 = Instant::now();

            let result = self.scheduler.perform_method(sh_idx, &mut working, use_vnd);
            let mut terminate = result.terminate;
            if use_vnd && !terminate {
                terminate = self.vnd(&mut working);
            }
            if use_vnd {
                self.scheduler.delayed_success_update(sh_idx, obj_old, t0, &mut working);
            }

            if working.is_better_obj(working.objective(), sol.objective()) {
                sol.copy_from(&working);
                since_improvement = 0;
                seq = self.scheduler.method_sequence(&self.sh, false, true);
            } else {
                since_improvement += 1;
            }

            if terminate || since_improvement >= self.sh.len() {
                break;
            }
        }
    }

    /// Runs construction (unless the initial solution was declared valid),
    /// then VND, then the shaking loop, returning the best solution found.
    pub fn run(&mut self) -> S {
        let mut sol = self.scheduler.incumbent().clone();
        if !self.consider_initial_sol {
            let construction_order = self.construction.clone();
            self.scheduler.perform_sequentially(&mut sol, &construction_order);
            sol.copy_from(self.scheduler.incumbent());
        }

        if !self.li.is_empty() {
            let terminate = self.vnd(&mut sol);
            if terminate || self.sh.is_empty() {
                return self.scheduler.incumbent().clone();
            }
        } else if self.sh.is_empty() {
            return self.scheduler.incumbent().clone();
        }

        self.shake_loop(&mut sol);
        self.scheduler.incumbent().clone()
    }
}

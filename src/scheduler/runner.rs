//! The generic method-scheduling engine (C3): sole gateway through which
//! operators are applied to solutions.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::RngCore;

use crate::method::{MHMethod, MHMethodStatistics, MethodResult};
use crate::random::create_rng;
use crate::solution::Solution;

use super::config::SchedulerParameters;
use super::types::should_log;

/// A lazy sequence over a fixed set of method indices, with optional
/// shuffle-per-pass and optional infinite repeat.
pub struct MethodSequence {
    order: Vec<usize>,
    pos: usize,
    randomize: bool,
    repeat: bool,
}

impl MethodSequence {
    pub fn new(indices: &[usize], randomize: bool, repeat: bool) -> Self {
        Self {
            order: indices.to_vec(),
            pos: 0,
            randomize,
            repeat,
        }
    }

    /// Returns the next method index, or `None` when the (non-repeating)
    /// sequence is exhausted.
    pub fn next(&mut self, rng: &mut dyn RngCore) -> Option<usize> {
        if self.order.is_empty() {
            return None;
        }
        if self.pos == 0 && self.randomize {
            crate::random::shuffle(&mut self.order, rng);
        }
        if self.pos >= self.order.len() {
            if !self.repeat {
                return None;
            }
            self.pos = 0;
            if self.randomize {
                crate::random::shuffle(&mut self.order, rng);
            }
        }
        let val = self.order[self.pos];
        self.pos += 1;
        Some(val)
    }
}

/// Sole gateway for applying methods to solutions. Owns the incumbent, the
/// per-method statistics table, the iteration/time counters, and the
/// per-run PRNG (Design Note: "Randomness" — never a process-global
/// generator).
pub struct Scheduler<S: Solution> {
    incumbent: S,
    incumbent_valid: bool,
    incumbent_iteration: u64,
    incumbent_time: Duration,
    methods: Vec<MHMethod<S>>,
    stats: HashMap<&'static str, MHMethodStatistics>,
    iteration: u64,
    time_start: Instant,
    run_time: Option<Duration>,
    params: SchedulerParameters,
    rng: StdRng,
    terminated: bool,
}

impl<S: Solution> Scheduler<S> {
    pub fn new(
        initial: S,
        incumbent_valid: bool,
        methods: Vec<MHMethod<S>>,
        params: SchedulerParameters,
        seed: u64,
    ) -> Self {
        let mut stats = HashMap::new();
        for m in &methods {
            stats.entry(m.name).or_insert_with(MHMethodStatistics::new);
        }
        Self {
            incumbent: initial,
            incumbent_valid,
            incumbent_iteration: 0,
            incumbent_time: Duration::ZERO,
            methods,
            stats,
            iteration: 0,
            time_start: Instant::now(),
            run_time: None,
            params,
            rng: create_rng(seed),
            terminated: false,
        }
    }

    pub fn incumbent(&self) -> &S {
        &self.incumbent
    }

    pub fn incumbent_valid(&self) -> bool {
        self.incumbent_valid
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn incumbent_iteration(&self) -> u64 {
        self.incumbent_iteration
    }

    pub fn params(&self) -> &SchedulerParameters {
        &self.params
    }

    pub fn statistics(&self, name: &str) -> Option<&MHMethodStatistics> {
        self.stats.get(name)
    }

    pub fn all_statistics(&self) -> &HashMap<&'static str, MHMethodStatistics> {
        &self.stats
    }

    pub fn methods(&self) -> &[MHMethod<S>] {
        &self.methods
    }

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Registers an additional method after construction, returning its
    /// index. Used by drivers composing construction/li/sh or
    /// destroy/repair lists that are not all known up front.
    pub fn register_method(&mut self, method: MHMethod<S>) -> usize {
        self.stats.entry(method.name).or_insert_with(MHMethodStatistics::new);
        self.methods.push(method);
        self.methods.len() - 1
    }

    pub fn method_sequence(&self, indices: &[usize], randomize: bool, repeat: bool) -> MethodSequence {
        MethodSequence::new(indices, randomize, repeat)
    }

    fn elapsed(&self) -> Duration {
        self.time_start.elapsed()
    }

    /// Elapsed time if the run has terminated, else time so far.
    pub fn run_time(&self) -> Duration {
        self.run_time.unwrap_or_else(|| self.elapsed())
    }

    fn incumbent_objective(&self) -> f64 {
        let (val, valid) = self.incumbent.obj_val_cache();
        if valid {
            val
        } else {
            f64::NAN
        }
    }

    /// Pure termination check against the current counters. Idempotent:
    /// once true, stays true and `run_time()` freezes at first detection.
    pub fn check_termination(&mut self) -> bool {
        if self.terminated {
            return true;
        }
        let p = &self.params;
        let elapsed = self.elapsed();
        let since_incumbent = elapsed.saturating_sub(self.incumbent_time);
        let stale_iters = self.iteration.saturating_sub(self.incumbent_iteration);

        let mut terminate = false;
        if p.titer >= 0 && self.iteration as i64 >= p.titer {
            terminate = true;
        }
        if p.tciter >= 0 && stale_iters as i64 >= p.tciter {
            terminate = true;
        }
        if p.ttime >= 0.0 && elapsed.as_secs_f64() >= p.ttime {
            terminate = true;
        }
        if p.tctime >= 0.0 && since_incumbent.as_secs_f64() >= p.tctime {
            terminate = true;
        }
        if p.tobj >= 0.0 && self.incumbent_valid {
            let (val, valid) = self.incumbent.obj_val_cache();
            if valid {
                let reached = if self.incumbent.to_maximize() {
                    val >= p.tobj
                } else {
                    val <= p.tobj
                };
                if reached {
                    terminate = true;
                }
            }
        }

        if terminate {
            self.terminated = true;
            self.run_time = Some(elapsed);
        }
        terminate
    }

    fn maybe_update_incumbent(&mut self, solution: &S, obj_new: f64) -> bool {
        let is_improvement = !self.incumbent_valid || solution.is_better_obj(obj_new, self.incumbent_objective());
        if is_improvement {
            self.incumbent = solution.copy();
            self.incumbent_valid = true;
            self.incumbent_iteration = self.iteration;
            self.incumbent_time = self.elapsed();
        }
        is_improvement
    }

    fn run_check(&self, solution: &S) {
        if let Err(e) = solution.check() {
            log::error!("solution invariant violation at iteration {}: {e}", self.iteration);
            panic!("solution invariant violation: {e}");
        }
    }

    fn maybe_log(&self, new_incumbent: bool, obj_old: f64, obj_new: f64, method_name: &str, info: &str) {
        if should_log(self.iteration, self.params.lfreq, new_incumbent, self.params.lnewinc, false) {
            log::info!(
                "iter={:>8} incumbent={:>14.6} obj_old={:>14.6} obj_new={:>14.6} time={:>9.3}s method={:<24} info={}",
                self.iteration,
                self.incumbent_objective(),
                obj_old,
                obj_new,
                self.elapsed().as_secs_f64(),
                method_name,
                info,
            );
        }
    }

    /// Applies one method to `solution`, recording statistics, updating the
    /// incumbent, checking termination, and logging.
    ///
    /// `delayed_success`: when the operator's success is only knowable
    /// after a downstream step (e.g. GVNS VND), pass `true` and later call
    /// [`Scheduler::delayed_success_update`].
    pub fn perform_method(&mut self, method_idx: usize, solution: &mut S, delayed_success: bool) -> MethodResult {
        let method = self.methods[method_idx];
        let obj_old = solution.objective();
        let t0 = Instant::now();
        let mut result = MethodResult::new();
        (method.function)(solution, method.par, &mut self.rng, &mut result);
        let dt = t0.elapsed();
        let obj_new = solution.objective();

        {
            let stats = self.stats.entry(method.name).or_insert_with(MHMethodStatistics::new);
            stats.applications += 1;
            stats.netto_time += dt;
            if !delayed_success {
                stats.brutto_time += dt;
                if solution.is_better_obj(obj_new, obj_old) {
                    stats.successes += 1;
                    stats.obj_gain += obj_new - obj_old;
                }
            }
        }

        self.iteration += 1;
        let new_incumbent = self.maybe_update_incumbent(solution, obj_new);

        if self.params.checkit {
            self.run_check(solution);
        }

        let terminate = self.check_termination();
        result.terminate = result.terminate || terminate;

        self.maybe_log(new_incumbent, obj_old, obj_new, method.name, &result.log_info);
        result
    }

    /// Completes the bookkeeping for a method applied with
    /// `delayed_success = true`, once its success is known.
    pub fn delayed_success_update(&mut self, method_idx: usize, obj_old: f64, t_start: Instant, solution: &mut S) {
        let method = self.methods[method_idx];
        let dt = t_start.elapsed();
        let obj_new = solution.objective();
        let stats = self.stats.entry(method.name).or_insert_with(MHMethodStatistics::new);
        stats.brutto_time += dt;
        if solution.is_better_obj(obj_new, obj_old) {
            stats.successes += 1;
            stats.obj_gain += obj_new - obj_old;
        }
    }

    /// Applies a destroy method then a repair method as a single
    /// iteration: each method is timed and counted individually, but the
    /// iteration counter advances once and the incumbent/termination/log
    /// bookkeeping runs once, after the pair completes.
    pub fn perform_method_pair(&mut self, destroy_idx: usize, repair_idx: usize, solution: &mut S) -> MethodResult {
        let obj_before = solution.objective();

        let d_method = self.methods[destroy_idx];
        let t_d = Instant::now();
        let mut d_result = MethodResult::new();
        (d_method.function)(solution, d_method.par, &mut self.rng, &mut d_result);
        let d_dt = t_d.elapsed();

        let r_method = self.methods[repair_idx];
        let t_r = Instant::now();
        let mut r_result = MethodResult::new();
        (r_method.function)(solution, r_method.par, &mut self.rng, &mut r_result);
        let r_dt = t_r.elapsed();

        let obj_after = solution.objective();
        let improved = solution.is_better_obj(obj_after, obj_before);

        for (name, dt) in [(d_method.name, d_dt), (r_method.name, r_dt)] {
            let stats = self.stats.entry(name).or_insert_with(MHMethodStatistics::new);
            stats.applications += 1;
            stats.netto_time += dt;
            stats.brutto_time += dt;
            if improved {
                stats.successes += 1;
                stats.obj_gain += obj_after - obj_before;
            }
        }

        self.iteration += 1;
        let new_incumbent = self.maybe_update_incumbent(solution, obj_after);

        if self.params.checkit {
            self.run_check(solution);
        }

        let terminate = self.check_termination();
        let info = format!("{}/{}: {} | {}", d_method.name, r_method.name, d_result.log_info, r_result.log_info);
        let result = MethodResult {
            changed: d_result.changed || r_result.changed,
            terminate: d_result.terminate || r_result.terminate || terminate,
            log_info: info.clone(),
        };

        self.maybe_log(new_incumbent, obj_before, obj_after, &format!("{}+{}", d_method.name, r_method.name), &info);
        result
    }

    /// Applies each method once, in order, updating the incumbent after
    /// each and stopping early on terminate.
    pub fn perform_sequentially(&mut self, solution: &mut S, method_indices: &[usize]) -> MethodResult {
        let mut last = MethodResult::new();
        for &idx in method_indices {
            last = self.perform_method(idx, solution, false);
            if last.terminate {
                break;
            }
        }
        last
    }

    /// Renders the method-statistics and main-results summary report.
    pub fn summary_report(&self) -> String {
        let mut out = String::new();
        out.push_str("method_statistics:\n");
        out.push_str(&format!(
            "{:<24} {:>6} {:>6} {:>8} {:>12} {:>10} {:>10} {:>10} {:>10}\n",
            "method", "appls", "succ", "succ%", "obj_gain", "avg_gain", "gain_share%", "netto_s", "brutto_%"
        ));
        let total_successes: u64 = self.stats.values().map(|s| s.successes).sum();
        let total_time = self.run_time().as_secs_f64().max(1e-12);
        let mut names: Vec<&&str> = self.stats.keys().collect();
        names.sort();
        for &name in names {
            let s = &self.stats[name];
            let gain_share = if total_successes > 0 {
                s.successes as f64 / total_successes as f64 * 100.0
            } else {
                f64::NAN
            };
            out.push_str(&format!(
                "{:<24} {:>6} {:>6} {:>8.2} {:>12.3} {:>10.3} {:>10.2} {:>10.3} {:>10.2}\n",
                name,
                s.applications,
                s.successes,
                s.success_rate() * 100.0,
                s.obj_gain,
                s.avg_obj_gain(),
                gain_share,
                s.netto_time.as_secs_f64(),
                s.brutto_time.as_secs_f64() / total_time * 100.0,
            ));
        }
        out.push_str(&format!(
            "main_results: best_obj={:.6} best_iteration={} total_iterations={} best_time={:.3}s total_time={:.3}s\n",
            self.incumbent_objective(),
            self.incumbent_iteration,
            self.iteration,
            self.incumbent_time.as_secs_f64(),
            self.run_time().as_secs_f64(),
        ));
        out
    }

    /// Emits the summary report through the `log` facade at `info` level.
    pub fn log_summary(&self) {
        log::info!("\n{}", self.summary_report());
    }
}

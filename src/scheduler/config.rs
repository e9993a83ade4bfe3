//! Scheduler configuration (C8).

/// Parameters controlling termination and logging, built once per run and
/// immutable after construction (Design Note: "Global configuration").
///
/// All threshold fields use a negative sentinel to mean "disabled"; a
/// non-negative value (including `0`) activates the corresponding
/// termination condition. This means `titer = 0` terminates a run before
/// any operator is applied (`0 >= 0` is already true at the first check).
#[derive(Debug, Clone)]
pub struct SchedulerParameters {
    /// Iteration cap. Negative disables.
    pub titer: i64,
    /// Stale-iteration cap (iterations since incumbent). Negative disables.
    pub tciter: i64,
    /// Total wall-time cap, in seconds. Negative disables.
    pub ttime: f64,
    /// Stale-time cap (seconds since incumbent). Negative disables.
    pub tctime: f64,
    /// Target objective; run terminates once the incumbent reaches it
    /// (directional). Negative disables.
    pub tobj: f64,
    /// Log every new incumbent, regardless of `lfreq`.
    pub lnewinc: bool,
    /// Iteration log frequency: `0` = off, `>0` = every k-th iteration,
    /// `<0` = logarithmic (1, 2, 5, 10, 20, 50, 100, ...).
    pub lfreq: i64,
    /// Invoke `Solution::check()` after every operator application.
    pub checkit: bool,
}

impl Default for SchedulerParameters {
    fn default() -> Self {
        Self {
            titer: 100,
            tciter: -1,
            ttime: -1.0,
            tctime: -1.0,
            tobj: -1.0,
            lnewinc: true,
            lfreq: 0,
            checkit: false,
        }
    }
}

impl SchedulerParameters {
    pub fn with_titer(mut self, titer: i64) -> Self {
        self.titer = titer;
        self
    }
    pub fn with_tciter(mut self, tciter: i64) -> Self {
        self.tciter = tciter;
        self
    }
    pub fn with_ttime(mut self, ttime: f64) -> Self {
        self.ttime = ttime;
        self
    }
    pub fn with_tctime(mut self, tctime: f64) -> Self {
        self.tctime = tctime;
        self
    }
    pub fn with_tobj(mut self, tobj: f64) -> Self {
        self.tobj = tobj;
        self
    }
    pub fn with_lnewinc(mut self, lnewinc: bool) -> Self {
        self.lnewinc = lnewinc;
        self
    }
    pub fn with_lfreq(mut self, lfreq: i64) -> Self {
        self.lfreq = lfreq;
        self
    }
    pub fn with_checkit(mut self, checkit: bool) -> Self {
        self.checkit = checkit;
        self
    }
}

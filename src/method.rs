//! Method records and per-application outcomes (C3 data model).

use std::time::Duration;

/// The outcome of a single operator application.
///
/// Renamed from the spec's bare `Result` to avoid clashing with
/// `std::result::Result`. Acceptance-rule rejections and ordinary
/// termination are reported here, not as an [`crate::error::MhError`].
#[derive(Debug, Clone, Default)]
pub struct MethodResult {
    /// Whether the operator modified the solution.
    pub changed: bool,
    /// Whether global termination has been signaled.
    pub terminate: bool,
    /// Free-form diagnostic text, surfaced in the iteration log.
    pub log_info: String,
}

impl MethodResult {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A tagged callable: function pointer + integer parameter + stable name.
///
/// Avoids hidden globals and trait-object dispatch (Design Note "Method
/// dispatch"): each driver owns its own `Vec<MHMethod<S>>` and the
/// scheduler only ever calls through this record.
#[derive(Clone, Copy)]
pub struct MHMethod<S> {
    /// Name, unique within the driver that owns this method.
    pub name: &'static str,
    /// The operator itself: mutates `solution` in place, may set
    /// `result.changed`/`result.log_info`. Receives the integer
    /// `par` (typically a neighborhood size or destroy/repair strength)
    /// and a type-erased RNG since function pointers cannot be generic
    /// over a concrete `Rng` implementation.
    pub function: fn(&mut S, i32, &mut dyn rand::RngCore, &mut MethodResult),
    /// Integer parameter passed to `function` on every application.
    pub par: i32,
}

impl<S> MHMethod<S> {
    pub const fn new(
        name: &'static str,
        function: fn(&mut S, i32, &mut dyn rand::RngCore, &mut MethodResult),
        par: i32,
    ) -> Self {
        Self { name, function, par }
    }
}

impl<S> std::fmt::Debug for MHMethod<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MHMethod")
            .field("name", &self.name)
            .field("par", &self.par)
            .finish()
    }
}

/// Mutable per-method counters, created once at scheduler construction and
/// updated on every application (C3 data model: `MHMethodStatistics`).
#[derive(Debug, Clone, Default)]
pub struct MHMethodStatistics {
    pub applications: u64,
    pub successes: u64,
    pub obj_gain: f64,
    pub netto_time: Duration,
    pub brutto_time: Duration,
}

impl MHMethodStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of applications that were strict improvements, or `NaN`
    /// when the method has never been applied (surfaced as "NaN" in
    /// reports per the numeric-edge-case error policy).
    pub fn success_rate(&self) -> f64 {
        if self.applications == 0 {
            f64::NAN
        } else {
            self.successes as f64 / self.applications as f64
        }
    }

    /// Average objective gain per successful application.
    pub fn avg_obj_gain(&self) -> f64 {
        if self.successes == 0 {
            f64::NAN
        } else {
            self.obj_gain / self.successes as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_statistics_are_zero() {
        let s = MHMethodStatistics::new();
        assert_eq!(s.applications, 0);
        assert_eq!(s.successes, 0);
        assert!(s.success_rate().is_nan());
        assert!(s.avg_obj_gain().is_nan());
    }

    #[test]
    fn success_rate_after_applications() {
        let mut s = MHMethodStatistics::new();
        s.applications = 4;
        s.successes = 1;
        s.obj_gain = 5.0;
        assert!((s.success_rate() - 0.25).abs() < 1e-12);
        assert!((s.avg_obj_gain() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn applications_ge_successes_invariant_holds_by_construction() {
        let mut s = MHMethodStatistics::new();
        s.applications = 2;
        s.successes = 2;
        assert!(s.applications >= s.successes);
    }
}

//! Iteration-log filtering policy (C3).

/// Whether iteration `iteration` (1-based) should be logged under the
/// logarithmic policy (`lfreq < 0`): at iterations whose decimal
/// representation is `1`, `2`, or `5` followed by any number of trailing
/// zeros (1, 2, 5, 10, 20, 50, 100, 200, 500, ...).
fn is_logarithmic_checkpoint(iteration: u64) -> bool {
    if iteration == 0 {
        return false;
    }
    let mut n = iteration;
    while n % 10 == 0 {
        n /= 10;
    }
    n == 1 || n == 2 || n == 5
}

/// Decides whether to emit an iteration log line.
///
/// A line is emitted if `forced`, if `new_incumbent && lnewinc`, or per
/// `lfreq`: `lfreq > 0` emits every `lfreq`-th iteration, `lfreq < 0` emits
/// at logarithmic checkpoints, `lfreq == 0` emits nothing beyond the first
/// two cases.
pub fn should_log(iteration: u64, lfreq: i64, new_incumbent: bool, lnewinc: bool, forced: bool) -> bool {
    if forced {
        return true;
    }
    if new_incumbent && lnewinc {
        return true;
    }
    match lfreq.cmp(&0) {
        std::cmp::Ordering::Greater => iteration % (lfreq as u64) == 0,
        std::cmp::Ordering::Less => is_logarithmic_checkpoint(iteration),
        std::cmp::Ordering::Equal => false,
    }
}

//! Percentages for goal progress and period-over-period change.

/// How far `current` is towards `target`, as a percentage in `[0, 100]`.
///
/// A target that is zero, negative or not a number gives 0.
pub fn progress_percent(current: f64, target: f64) -> f64 {
    if !current.is_finite() || !target.is_finite() || target <= 0.0 {
        return 0.0;
    }

    (current / target * 100.0).clamp(0.0, 100.0)
}

/// The percentage change from `previous` to `current`, `(current - previous) / previous * 100`.
///
/// When `previous` is zero there is no meaningful ratio and 0 is returned.
/// A negative `previous` flips the sign of the result.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
        return 0.0;
    }

    (current - previous) / previous * 100.0
}

/// Percentage of `score` over `total`, rounded to one decimal.
pub fn percentage(score: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_one_decimal(score as f64 / total as f64 * 100.0)
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn elapsed_secs(budget_secs: u32, remaining_secs: u32) -> u32 {
    budget_secs.saturating_sub(remaining_secs)
}

/// Fraction of the quiz already answered, for progress bars.
pub fn progress(current_index: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (current_index as f64 / total as f64).clamp(0.0, 1.0)
}

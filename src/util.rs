//! Small numeric helpers shared by the pattern store, trainer, and coach.

#[cfg(test)]
mod tests;

/// Round to two decimal places, the precision projections are reported at.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Arithmetic mean; zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by `n`, not `n - 1`).
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64
}

/// `max(0, 100 - cv * 100)` where cv is the coefficient of variation.
///
/// A non-positive mean makes the ratio meaningless and scores zero.
pub fn consistency_score(values: &[f64]) -> f64 {
    let avg = mean(values);
    if values.is_empty() || avg <= 0.0 {
        return 0.0;
    }
    let std_dev = population_variance(values).sqrt();
    (100.0 - (std_dev / avg) * 100.0).clamp(0.0, 100.0)
}

/// Nearest-rank percentile: the element at `floor(n * pct)` of the sorted values.
///
/// No interpolation between neighbours. `pct` is a fraction in `[0, 1)`.
pub fn nearest_rank(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() as f64) * pct).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Ordinary least-squares slope of `values` against their index (0, 1, 2, ...).
pub fn index_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 2 {
        return 0.0;
    }
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }
    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return 0.0;
    }
    (n * sum_xy - sum_x * sum_y) / denominator
}

/// Logistic function.
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

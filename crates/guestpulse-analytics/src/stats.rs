use statrs::distribution::{ContinuousCDF, StudentsT};

/// Arithmetic mean, absent for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Pearson correlation coefficient.
///
/// Returns `None` for mismatched or too-short samples and for zero
/// variance in either dimension, so a degenerate sample can never leak
/// through as `NaN`.
#[must_use]
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

/// Two-tailed p-value for a Pearson coefficient over `n` pairs.
///
/// Uses the exact t-test with `n - 2` degrees of freedom. With zero
/// residual degrees of freedom (`n == 2`) the test carries no information
/// and the p-value is 1. A coefficient of exactly ±1 yields 0.
#[must_use]
pub fn pearson_two_tailed_p(r: f64, n: usize) -> f64 {
    if n <= 2 {
        return 1.0;
    }
    let df = (n - 2) as f64;
    let residual = 1.0 - r * r;
    if residual <= 0.0 {
        return 0.0;
    }
    let t = r.abs() * (df / residual).sqrt();
    StudentsT::new(0.0, 1.0, df).map_or(1.0, |dist| 2.0 * (1.0 - dist.cdf(t)))
}

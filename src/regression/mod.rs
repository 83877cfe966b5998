//! Closed-form least-squares fitters over the sample index.
//!
//! All three fitters regress against `x = 0, 1, .., n-1` rather than the
//! observation timestamps, so unevenly spaced samples are treated as equally
//! spaced.

pub mod exponential;
pub mod linear;
pub mod quadratic;

pub use exponential::ExponentialFit;
pub use linear::LinearFit;
pub use quadratic::QuadraticFit;

use crate::error::{ForecastError, Result};
use crate::series::{power_sum, sum, weighted_power_sum};

/// Ordinary least squares line through `(xs, ys)`, returning `(slope, intercept)`.
pub(crate) fn ols(xs: &[f64], ys: &[f64], model: &'static str) -> Result<(f64, f64)> {
    let n = xs.len() as f64;
    let sum_x = sum(xs);
    let sum_y = sum(ys);
    let sum_xx = power_sum(xs, 2);
    let sum_xy = weighted_power_sum(xs, ys, 1);

    let denom = n * sum_xx - sum_x * sum_x;
    if denom == 0.0 || !denom.is_finite() {
        return Err(ForecastError::DegenerateFit(model));
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;
    Ok((slope, intercept))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ols_rejects_constant_x() {
        let err = ols(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0], "linear").unwrap_err();
        assert!(matches!(err, ForecastError::DegenerateFit("linear")));
    }

    #[test]
    fn ols_fits_a_line() {
        let (slope, intercept) = ols(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0], "linear").unwrap();
        assert!((slope - 2.0).abs() < 1e-12);
        assert!((intercept - 1.0).abs() < 1e-12);
    }
}

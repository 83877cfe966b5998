//! Shared numeric helpers for the fitters.

use crate::error::{ForecastError, Result};

/// Sample indices `0..n` as regression x coordinates.
pub fn indices(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

pub fn sum(xs: &[f64]) -> f64 {
    xs.iter().sum()
}

pub fn mean(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    Some(sum(xs) / xs.len() as f64)
}

/// `Σ x^k`.
pub fn power_sum(xs: &[f64], k: i32) -> f64 {
    xs.iter().map(|x| x.powi(k)).sum()
}

/// `Σ x^k · y` over paired samples.
pub fn weighted_power_sum(xs: &[f64], ys: &[f64], k: i32) -> f64 {
    xs.iter().zip(ys).map(|(x, y)| x.powi(k) * y).sum()
}

/// Natural log of every value. Rejects values that are not strictly positive.
pub fn log_transform(xs: &[f64]) -> Result<Vec<f64>> {
    xs.iter()
        .enumerate()
        .map(|(index, &value)| {
            // NaN fails this comparison too
            if value > 0.0 {
                Ok(value.ln())
            } else {
                Err(ForecastError::Domain { index, value })
            }
        })
        .collect()
}

//! Accuracy metrics and best-model selection.

use serde::Serialize;

use crate::error::{ForecastError, Result};
use crate::forecast::ModelResult;
use crate::series::mean;

/// Goodness of fit of one model against the observed series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    /// Coefficient of determination; `None` when the observed series is constant
    /// or its sums of squares overflow.
    pub r2: Option<f64>,
    pub mae: f64,
    pub rmse: f64,
}

impl Evaluation {
    pub fn compute(actual: &[f64], fitted: &[f64]) -> Result<Self> {
        check_lengths(actual, fitted)?;
        let n = actual.len() as f64;
        let mut abs_sum = 0.0;
        let mut ss_res = 0.0;
        for (y, yhat) in actual.iter().zip(fitted) {
            let err = y - yhat;
            abs_sum += err.abs();
            ss_res += err * err;
        }
        let r2 = match r_squared(actual, fitted) {
            Ok(v) => Some(v),
            Err(ForecastError::NonComputable) => None,
            Err(e) => return Err(e),
        };
        Ok(Self {
            r2,
            mae: abs_sum / n,
            rmse: (ss_res / n).sqrt(),
        })
    }

    /// R² for ranking; a missing or NaN R² ranks below every computed one.
    pub fn ranking_score(&self) -> f64 {
        match self.r2 {
            Some(r2) if !r2.is_nan() => r2,
            _ => f64::NEG_INFINITY,
        }
    }
}

/// `1 - SS_res / SS_tot`. Fails with [`ForecastError::NonComputable`] when the
/// actual series has no variance, or when either sum of squares overflows.
pub fn r_squared(actual: &[f64], fitted: &[f64]) -> Result<f64> {
    check_lengths(actual, fitted)?;
    if actual.iter().all(|y| *y == actual[0]) {
        return Err(ForecastError::NonComputable);
    }
    let y_mean = mean(actual).ok_or(ForecastError::insufficient(1, 0))?;
    let mut ss_tot = 0.0;
    let mut ss_res = 0.0;
    for (y, yhat) in actual.iter().zip(fitted) {
        let d = y - y_mean;
        ss_tot += d * d;
        let err = y - yhat;
        ss_res += err * err;
    }
    if ss_tot == 0.0 || !ss_tot.is_finite() {
        return Err(ForecastError::NonComputable);
    }
    let r2 = 1.0 - ss_res / ss_tot;
    if !r2.is_finite() {
        return Err(ForecastError::NonComputable);
    }
    Ok(r2)
}

pub fn mae(actual: &[f64], fitted: &[f64]) -> Result<f64> {
    Evaluation::compute(actual, fitted).map(|e| e.mae)
}

pub fn rmse(actual: &[f64], fitted: &[f64]) -> Result<f64> {
    Evaluation::compute(actual, fitted).map(|e| e.rmse)
}

/// Index of the model with the highest R². Ties keep the earlier model, so
/// callers pass models in priority order. NaN scores rank as `-∞`.
pub fn select_best(models: &[ModelResult]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, m) in models.iter().enumerate() {
        let score = m.evaluation.ranking_score();
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}

fn check_lengths(actual: &[f64], fitted: &[f64]) -> Result<()> {
    if actual.len() != fitted.len() {
        return Err(ForecastError::LengthMismatch {
            actual: actual.len(),
            fitted: fitted.len(),
        });
    }
    if actual.is_empty() {
        return Err(ForecastError::insufficient(1, 0));
    }
    Ok(())
}

use serde::Serialize;

use crate::error::{ForecastError, Result};
use crate::forecast::ForecastPoint;
use crate::series::{indices, log_transform};

use super::ols;

pub const EXPONENTIAL_MIN_SAMPLES: usize = 2;

/// `y = a * e^(b * x)`, fitted as a line through `ln y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExponentialFit {
    pub a: f64,
    pub b: f64,
    pub n: usize,
}

impl ExponentialFit {
    pub fn fit(values: &[f64]) -> Result<Self> {
        let n = values.len();
        if n < EXPONENTIAL_MIN_SAMPLES {
            return Err(ForecastError::insufficient(EXPONENTIAL_MIN_SAMPLES, n));
        }
        let ln_y = log_transform(values)?;
        let (slope, intercept) = ols(&indices(n), &ln_y, "exponential")?;
        Ok(Self {
            a: intercept.exp(),
            b: slope,
            n,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.a * (self.b * x).exp()
    }

    pub fn fitted(&self) -> Vec<f64> {
        indices(self.n).into_iter().map(|x| self.predict(x)).collect()
    }

    pub fn forecast(&self, horizon: usize) -> Vec<ForecastPoint> {
        (1..=horizon)
            .map(|h| ForecastPoint::new(h, self.predict((self.n - 1) as f64 + h as f64)))
            .collect()
    }
}

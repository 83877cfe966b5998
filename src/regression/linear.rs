use serde::Serialize;

use crate::error::{ForecastError, Result};
use crate::forecast::ForecastPoint;
use crate::series::indices;

use super::ols;

pub const LINEAR_MIN_SAMPLES: usize = 2;

/// Width of the confidence band in residual standard errors (~95% under
/// normally distributed residuals).
pub const BAND_STD_ERRORS: f64 = 2.0;

/// `y = slope * x + intercept` over the sample index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// `sqrt(Σe² / (n - 2))`; `None` when `n == 2` leaves no degrees of freedom.
    pub std_error: Option<f64>,
    pub n: usize,
}

impl LinearFit {
    pub fn fit(values: &[f64]) -> Result<Self> {
        let n = values.len();
        if n < LINEAR_MIN_SAMPLES {
            return Err(ForecastError::insufficient(LINEAR_MIN_SAMPLES, n));
        }
        let x = indices(n);
        let (slope, intercept) = ols(&x, values, "linear")?;

        let std_error = if n > 2 {
            let sse = x
                .iter()
                .zip(values)
                .map(|(xi, y)| {
                    let e = y - (slope * xi + intercept);
                    e * e
                })
                .sum::<f64>();
            Some((sse / (n - 2) as f64).sqrt())
        } else {
            None
        };

        Ok(Self {
            slope,
            intercept,
            std_error,
            n,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn fitted(&self) -> Vec<f64> {
        indices(self.n).into_iter().map(|x| self.predict(x)).collect()
    }

    /// Half-width of the confidence band, if the standard error exists.
    pub fn margin(&self) -> Option<f64> {
        self.std_error.map(|se| BAND_STD_ERRORS * se)
    }

    /// Prediction one sample interval past the last observation (`x = n`).
    pub fn forecast_next(&self) -> ForecastPoint {
        self.point_at(1)
    }

    /// Steps `1..=horizon` past the last observation, each carrying the same band.
    pub fn forecast(&self, horizon: usize) -> Vec<ForecastPoint> {
        (1..=horizon).map(|h| self.point_at(h)).collect()
    }

    fn point_at(&self, h: usize) -> ForecastPoint {
        let predicted = self.predict((self.n - 1) as f64 + h as f64);
        match self.margin() {
            Some(m) => ForecastPoint::with_band(h, predicted, predicted - m, predicted + m),
            None => ForecastPoint::new(h, predicted),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::config::check_horizon;
use crate::error::{ForecastError, Result};

/// Smoothing constants for the additive Holt-Winters recurrence.
///
/// The constants are applied as given; nothing here searches for better
/// values against the data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoltWintersConfig {
    /// Level smoothing.
    pub alpha: f64,
    /// Trend smoothing.
    pub beta: f64,
    /// Seasonal smoothing.
    pub gamma: f64,
    /// Samples per seasonal cycle.
    pub season_length: usize,
}

impl Default for HoltWintersConfig {
    fn default() -> Self {
        Self {
            alpha: 0.2,
            beta: 0.1,
            gamma: 0.3,
            season_length: 7,
        }
    }
}

impl HoltWintersConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ForecastError::InvalidParameter {
                    name,
                    reason: format!("must be within [0, 1], got {value}"),
                });
            }
        }
        if self.season_length == 0 {
            return Err(ForecastError::InvalidParameter {
                name: "season_length",
                reason: "must be > 0".to_string(),
            });
        }
        Ok(())
    }

    /// Observations needed before the seasonal cycle is estimated.
    pub fn min_full_samples(&self) -> usize {
        self.season_length * 2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoltWintersMode {
    /// Level, trend and seasonal components were estimated.
    Full,
    /// Too little history for one seasonal cycle; the last value is repeated.
    FlatFallback,
}

/// In-sample fit followed by the out-of-sample forecast, as one sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct HoltWintersOutput {
    pub values: Vec<f64>,
    pub observed: usize,
    pub mode: HoltWintersMode,
}

impl HoltWintersOutput {
    pub fn fitted(&self) -> &[f64] {
        &self.values[..self.observed]
    }

    pub fn forecast(&self) -> &[f64] {
        &self.values[self.observed..]
    }
}

/// Runs the additive Holt-Winters recurrence over `values` and extends it
/// `horizon` steps. Series shorter than two seasons fall back to a flat
/// forecast at the last observed value, which is not an error.
pub fn holt_winters(
    values: &[f64],
    config: &HoltWintersConfig,
    horizon: usize,
) -> Result<HoltWintersOutput> {
    config.validate()?;
    check_horizon(horizon)?;
    let n = values.len();
    let Some(&last) = values.last() else {
        return Err(ForecastError::insufficient(1, 0));
    };
    let total = n
        .checked_add(horizon)
        .ok_or_else(|| ForecastError::InvalidParameter {
            name: "horizon",
            reason: format!("{n} observations plus {horizon} steps overflows"),
        })?;

    if n < config.min_full_samples() {
        return Ok(HoltWintersOutput {
            values: vec![last; total],
            observed: n,
            mode: HoltWintersMode::FlatFallback,
        });
    }

    let HoltWintersConfig {
        alpha,
        beta,
        gamma,
        season_length,
    } = *config;

    let mut level = values[0];
    let mut trend = values[1] - values[0];
    let mut seasonals: Vec<f64> = values[..season_length].iter().map(|v| v - level).collect();

    let mut out = Vec::with_capacity(total);
    for t in 0..total {
        let idx = t % season_length;
        if t < n {
            let v = values[t];
            let seasonal = seasonals[idx];
            let new_level = alpha * (v - seasonal) + (1.0 - alpha) * (level + trend);
            trend = beta * (new_level - level) + (1.0 - beta) * trend;
            level = new_level;
            seasonals[idx] = gamma * (v - level) + (1.0 - gamma) * seasonal;
            out.push(level + trend + seasonals[idx]);
        } else {
            let steps = (t - n + 1) as f64;
            out.push(level + trend * steps + seasonals[idx]);
        }
    }

    Ok(HoltWintersOutput {
        values: out,
        observed: n,
        mode: HoltWintersMode::Full,
    })
}

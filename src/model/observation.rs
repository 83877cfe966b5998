use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MarketChart, MarketColumn};
use crate::error::Result;

/// One price sample from the market-data provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp_ms: i64,
    pub value: f64,
}

impl Observation {
    pub fn new(timestamp_ms: i64, value: f64) -> Self {
        Self {
            timestamp_ms,
            value,
        }
    }

    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_ms)
    }
}

/// Ordered price history.
///
/// Observations are expected in ascending timestamp order. The order is not
/// validated or repaired here: regressions use the sample index as their x
/// coordinate, so unevenly spaced or out-of-order samples are treated as if
/// they were equally spaced. Use [`Series::is_chronological`] to check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn from_pairs(pairs: &[(i64, f64)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(ts, v)| Observation::new(*ts, *v))
                .collect(),
        )
    }

    /// Build a series from bare values, stamping them one minute apart from zero.
    pub fn from_values(values: &[f64]) -> Self {
        Self::new(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| Observation::new(i as i64 * 60_000, *v))
                .collect(),
        )
    }

    /// Price history from a market-chart document.
    pub fn from_market_chart_json(json: &str) -> Result<Self> {
        Self::from_market_chart_json_column(json, MarketColumn::Prices)
    }

    pub fn from_market_chart_json_column(json: &str, column: MarketColumn) -> Result<Self> {
        MarketChart::from_json(json)?.series(column)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// True when timestamps are strictly increasing.
    pub fn is_chronological(&self) -> bool {
        self.observations
            .windows(2)
            .all(|w| w[0].timestamp_ms < w[1].timestamp_ms)
    }

    /// Sampling interval taken from the last two observations.
    pub fn step_ms(&self) -> Option<i64> {
        let n = self.observations.len();
        if n < 2 {
            return None;
        }
        Some(self.observations[n - 1].timestamp_ms - self.observations[n - 2].timestamp_ms)
    }

    /// Wall-clock time `horizon` sampling intervals after the last observation.
    pub fn timestamp_at_horizon(&self, horizon: usize) -> Option<i64> {
        let last = self.last()?.timestamp_ms;
        let step = self.step_ms()?;
        step.checked_mul(horizon as i64)
            .and_then(|offset| last.checked_add(offset))
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Series;
use crate::error::{ForecastError, Result};

/// One `[[timestamp_ms, value], ...]` column of a market-chart document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketColumn {
    Prices,
    MarketCaps,
    TotalVolumes,
}

impl MarketColumn {
    pub const ALL: [MarketColumn; 3] = [
        MarketColumn::Prices,
        MarketColumn::MarketCaps,
        MarketColumn::TotalVolumes,
    ];

    /// Field name in the provider's document.
    pub fn key(self) -> &'static str {
        match self {
            MarketColumn::Prices => "prices",
            MarketColumn::MarketCaps => "market_caps",
            MarketColumn::TotalVolumes => "total_volumes",
        }
    }
}

impl fmt::Display for MarketColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MarketColumn {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        MarketColumn::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| ForecastError::InvalidParameter {
                name: "column",
                reason: format!("expected prices, market_caps or total_volumes, got '{s}'"),
            })
    }
}

/// Market-chart document as served by the provider.
///
/// `prices` is required. The other two columns are optional so that a bare
/// price history still parses.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MarketChart {
    pub prices: Vec<(i64, f64)>,
    pub market_caps: Option<Vec<(i64, f64)>>,
    pub total_volumes: Option<Vec<(i64, f64)>>,
}

impl MarketChart {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn column(&self, column: MarketColumn) -> Option<&[(i64, f64)]> {
        match column {
            MarketColumn::Prices => Some(self.prices.as_slice()),
            MarketColumn::MarketCaps => self.market_caps.as_deref(),
            MarketColumn::TotalVolumes => self.total_volumes.as_deref(),
        }
    }

    pub fn series(&self, column: MarketColumn) -> Result<Series> {
        self.column(column)
            .map(Series::from_pairs)
            .ok_or(ForecastError::MissingColumn(column.key()))
    }

    /// Every column present in the document, in [`MarketColumn::ALL`] order.
    pub fn columns(&self) -> Vec<(MarketColumn, Series)> {
        MarketColumn::ALL
            .into_iter()
            .filter_map(|c| self.column(c).map(|pairs| (c, Series::from_pairs(pairs))))
            .collect()
    }
}

pub mod config;
pub mod error;
pub mod evaluator;
pub mod forecast;
pub mod model;
pub mod regression;
pub mod series;
pub mod smoothing;

pub use config::{Config, ForecastConfig};
pub use error::{ForecastError, Result};
pub use forecast::{ForecastBundle, ForecastEngine, ModelKind};
pub use model::{MarketChart, MarketColumn, Observation, Series};

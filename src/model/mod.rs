pub mod market_chart;
pub mod observation;

pub use market_chart::{MarketChart, MarketColumn};
pub use observation::{Observation, Series};

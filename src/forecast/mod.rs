pub mod engine;
pub mod types;

pub use engine::ForecastEngine;
pub use types::{
    ForecastBundle, ForecastPoint, ModelKind, ModelParams, ModelResult, UnavailableModel,
};

use std::fmt;

use serde::Serialize;

use crate::evaluator::Evaluation;
use crate::model::Series;
use crate::regression::{ExponentialFit, LinearFit, QuadraticFit};
use crate::smoothing::HoltWintersMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ModelKind {
    Linear,
    Quadratic,
    Exponential,
    HoltWinters,
}

impl ModelKind {
    /// Priority order, also used to break R² ties.
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Linear,
        ModelKind::Quadratic,
        ModelKind::Exponential,
        ModelKind::HoltWinters,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ModelKind::Linear => "linear",
            ModelKind::Quadratic => "quadratic",
            ModelKind::Exponential => "exponential",
            ModelKind::HoltWinters => "holt-winters",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Steps past the last observation, starting at 1.
    pub horizon_index: usize,
    pub predicted_value: f64,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
    /// Extrapolated wall-clock time of this step, when the series has a sampling interval.
    pub timestamp_ms: Option<i64>,
}

impl ForecastPoint {
    pub fn new(horizon_index: usize, predicted_value: f64) -> Self {
        Self {
            horizon_index,
            predicted_value,
            lower_bound: None,
            upper_bound: None,
            timestamp_ms: None,
        }
    }

    pub fn with_band(horizon_index: usize, predicted_value: f64, lower: f64, upper: f64) -> Self {
        Self {
            lower_bound: Some(lower),
            upper_bound: Some(upper),
            ..Self::new(horizon_index, predicted_value)
        }
    }

    pub fn is_finite(&self) -> bool {
        self.predicted_value.is_finite()
            && self.lower_bound.map_or(true, f64::is_finite)
            && self.upper_bound.map_or(true, f64::is_finite)
    }
}

/// Fitted coefficients, kept for display next to the metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ModelParams {
    Linear(LinearFit),
    Quadratic(QuadraticFit),
    Exponential(ExponentialFit),
    HoltWinters { mode: HoltWintersMode },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelResult {
    pub kind: ModelKind,
    pub params: ModelParams,
    /// One estimate per observation, positionally aligned with the series.
    pub fitted: Vec<f64>,
    pub forecast: Vec<ForecastPoint>,
    pub evaluation: Evaluation,
}

/// A model whose fit failed for this series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnavailableModel {
    pub kind: ModelKind,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastBundle {
    pub series: Series,
    /// Available models, in priority order.
    pub models: Vec<ModelResult>,
    pub unavailable: Vec<UnavailableModel>,
    pub best: Option<ModelKind>,
}

impl ForecastBundle {
    pub fn model(&self, kind: ModelKind) -> Option<&ModelResult> {
        self.models.iter().find(|m| m.kind == kind)
    }

    pub fn best_model(&self) -> Option<&ModelResult> {
        self.best.and_then(|kind| self.model(kind))
    }

    pub fn is_available(&self, kind: ModelKind) -> bool {
        self.model(kind).is_some()
    }

    pub fn unavailable_reason(&self, kind: ModelKind) -> Option<&str> {
        self.unavailable
            .iter()
            .find(|u| u.kind == kind)
            .map(|u| u.reason.as_str())
    }
}

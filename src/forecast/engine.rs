use std::fmt;

use crate::config::ForecastConfig;
use crate::error::{ForecastError, Result};
use crate::evaluator::{select_best, Evaluation};
use crate::model::Series;
use crate::regression::{ExponentialFit, LinearFit, QuadraticFit};
use crate::smoothing::holt_winters;

use super::{
    ForecastBundle, ForecastPoint, ModelKind, ModelParams, ModelResult, UnavailableModel,
};

/// Runs every fitter against one series and ranks the results.
///
/// The engine only holds configuration, so a single instance can serve any
/// number of series concurrently.
#[derive(Debug, Clone, Copy)]
pub struct ForecastEngine {
    config: ForecastConfig,
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self {
            config: ForecastConfig::default(),
        }
    }
}

impl ForecastEngine {
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn run(&self, series: &Series) -> ForecastBundle {
        let values = series.values();
        let mut models = Vec::with_capacity(ModelKind::ALL.len());
        let mut unavailable = Vec::new();

        for kind in ModelKind::ALL {
            match self.run_model(kind, series, &values) {
                Ok(result) => {
                    tracing::debug!(
                        model = %kind,
                        r2 = ?result.evaluation.r2,
                        mae = result.evaluation.mae,
                        rmse = result.evaluation.rmse,
                        "Model fitted"
                    );
                    models.push(result);
                }
                Err(e) => {
                    tracing::warn!(model = %kind, n = values.len(), error = %e, "Model unavailable");
                    unavailable.push(UnavailableModel {
                        kind,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let best = select_best(&models).map(|i| models[i].kind);
        tracing::info!(
            n = values.len(),
            available = models.len(),
            best = ?best,
            "Forecast bundle ready"
        );

        ForecastBundle {
            series: series.clone(),
            models,
            unavailable,
            best,
        }
    }

    /// Runs each labelled series on its own scoped thread. Bundles come back in
    /// input order. The label tags every log line of its run.
    ///
    /// A panic inside a worker is resumed on the calling thread.
    pub fn run_batch<L>(&self, inputs: &[(L, Series)]) -> Vec<ForecastBundle>
    where
        L: fmt::Display + Sync,
    {
        std::thread::scope(|scope| {
            let handles: Vec<_> = inputs
                .iter()
                .map(|(label, series)| {
                    scope.spawn(move || {
                        let _span = tracing::info_span!("forecast", label = %label).entered();
                        self.run(series)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        })
    }

    fn run_model(&self, kind: ModelKind, series: &Series, values: &[f64]) -> Result<ModelResult> {
        let horizon = self.config.horizon;
        let (params, fitted, forecast) = match kind {
            ModelKind::Linear => {
                let fit = LinearFit::fit(values)?;
                (ModelParams::Linear(fit), fit.fitted(), fit.forecast(horizon))
            }
            ModelKind::Quadratic => {
                let fit = QuadraticFit::fit(values)?;
                (ModelParams::Quadratic(fit), fit.fitted(), fit.forecast(horizon))
            }
            ModelKind::Exponential => {
                let fit = ExponentialFit::fit(values)?;
                (ModelParams::Exponential(fit), fit.fitted(), fit.forecast(horizon))
            }
            ModelKind::HoltWinters => {
                let out = holt_winters(values, &self.config.holt_winters, horizon)?;
                let forecast: Vec<ForecastPoint> = out
                    .forecast()
                    .iter()
                    .enumerate()
                    .map(|(i, v)| ForecastPoint::new(i + 1, *v))
                    .collect();
                (
                    ModelParams::HoltWinters { mode: out.mode },
                    out.fitted().to_vec(),
                    forecast,
                )
            }
        };

        if !fitted.iter().all(|v| v.is_finite())
            || !forecast.iter().all(ForecastPoint::is_finite)
        {
            return Err(ForecastError::NonFinite(kind.label()));
        }

        let evaluation = Evaluation::compute(values, &fitted)?;
        let forecast = forecast
            .into_iter()
            .map(|p| ForecastPoint {
                timestamp_ms: series.timestamp_at_horizon(p.horizon_index),
                ..p
            })
            .collect();

        Ok(ModelResult {
            kind,
            params,
            fitted,
            forecast,
            evaluation,
        })
    }
}

use coin_forecast::config::{ForecastConfig, MAX_HORIZON};
use coin_forecast::error::ForecastError;
use coin_forecast::forecast::{ForecastEngine, ModelKind, ModelParams};
use coin_forecast::model::Series;
use coin_forecast::smoothing::{HoltWintersConfig, HoltWintersMode};

const PRICES_14: [f64; 14] = [
    100.0, 102.0, 101.0, 105.0, 107.0, 106.0, 110.0, 112.0, 111.0, 115.0, 117.0, 116.0, 120.0,
    122.0,
];

fn engine() -> ForecastEngine {
    ForecastEngine::new(ForecastConfig::default()).unwrap()
}

#[test]
fn fitted_length_matches_series_for_every_model() {
    let series = Series::from_values(&PRICES_14);
    let bundle = engine().run(&series);
    assert_eq!(bundle.models.len(), 4);
    assert!(bundle.unavailable.is_empty());
    for m in &bundle.models {
        assert_eq!(m.fitted.len(), series.len(), "{}", m.kind);
        assert!(m.evaluation.r2.unwrap() <= 1.0);
    }
    let kinds: Vec<ModelKind> = bundle.models.iter().map(|m| m.kind).collect();
    assert_eq!(kinds, ModelKind::ALL.to_vec());
}

#[test]
fn fourteen_prices_run_holt_winters_in_full_mode() {
    let bundle = engine().run(&Series::from_values(&PRICES_14));
    let hw = bundle.model(ModelKind::HoltWinters).unwrap();
    assert_eq!(
        hw.params,
        ModelParams::HoltWinters {
            mode: HoltWintersMode::Full
        }
    );
    assert_eq!(hw.fitted.len() + hw.forecast.len(), 21);
    assert!(hw.fitted.iter().all(|v| v.is_finite()));
    assert!(hw.forecast.iter().all(|p| p.predicted_value.is_finite()));
}

#[test]
fn two_prices_skip_quadratic_but_fit_linear() {
    let bundle = engine().run(&Series::from_values(&[10.0, 20.0]));

    assert!(!bundle.is_available(ModelKind::Quadratic));
    let reason = bundle.unavailable_reason(ModelKind::Quadratic).unwrap();
    assert!(reason.contains("insufficient data"), "{reason}");

    let linear = bundle.model(ModelKind::Linear).unwrap();
    match linear.params {
        ModelParams::Linear(fit) => {
            assert!((fit.slope - 10.0).abs() < f64::EPSILON);
            assert!((fit.intercept - 10.0).abs() < f64::EPSILON);
            assert_eq!(fit.std_error, None);
        }
        other => panic!("unexpected params {other:?}"),
    }
    assert_eq!(linear.evaluation.r2, Some(1.0));
    assert_eq!(linear.forecast[0].lower_bound, None);
    assert_eq!(bundle.best, Some(ModelKind::Linear));
}

#[test]
fn negative_price_skips_exponential_only() {
    let bundle = engine().run(&Series::from_values(&[5.0, -3.0, 8.0]));
    assert!(bundle.is_available(ModelKind::Linear));
    assert!(bundle.is_available(ModelKind::Quadratic));
    assert!(bundle.is_available(ModelKind::HoltWinters));
    let reason = bundle.unavailable_reason(ModelKind::Exponential).unwrap();
    assert!(reason.contains("log domain"), "{reason}");
    // three points are interpolated exactly by the parabola
    assert_eq!(bundle.best, Some(ModelKind::Quadratic));
}

#[test]
fn curved_series_prefers_quadratic() {
    let y: Vec<f64> = (0..8)
        .map(|i| {
            let x = i as f64;
            3.0 - 2.0 * x + 0.5 * x * x
        })
        .collect();
    let bundle = engine().run(&Series::from_values(&y));
    assert_eq!(bundle.best, Some(ModelKind::Quadratic));
    assert_eq!(bundle.best_model().unwrap().kind, ModelKind::Quadratic);
}

#[test]
fn growth_series_prefers_exponential() {
    let y: Vec<f64> = (0..12).map(|i| 50.0 * (0.05 * i as f64).exp()).collect();
    let bundle = engine().run(&Series::from_values(&y));
    assert_eq!(bundle.best, Some(ModelKind::Exponential));
}

#[test]
fn empty_series_has_no_models() {
    let bundle = engine().run(&Series::default());
    assert!(bundle.models.is_empty());
    assert_eq!(bundle.unavailable.len(), 4);
    assert_eq!(bundle.best, None);
    assert!(bundle.best_model().is_none());
}

#[test]
fn single_price_keeps_flat_holt_winters() {
    let bundle = engine().run(&Series::from_values(&[42.0]));
    assert_eq!(bundle.models.len(), 1);
    let hw = &bundle.models[0];
    assert_eq!(hw.kind, ModelKind::HoltWinters);
    assert_eq!(hw.fitted, vec![42.0]);
    assert_eq!(hw.evaluation.r2, None);
    assert!(hw.forecast.iter().all(|p| p.predicted_value == 42.0));
    assert_eq!(bundle.best, Some(ModelKind::HoltWinters));
}

#[test]
fn constant_series_ranks_without_panicking() {
    let bundle = engine().run(&Series::from_values(&[5.0; 20]));
    assert_eq!(bundle.models.len(), 4);
    assert!(bundle.models.iter().all(|m| m.evaluation.r2.is_none()));
    assert_eq!(bundle.best, Some(ModelKind::Linear));
}

#[test]
fn horizon_applies_to_every_model() {
    let cfg = ForecastConfig {
        horizon: 3,
        ..ForecastConfig::default()
    };
    let bundle = ForecastEngine::new(cfg)
        .unwrap()
        .run(&Series::from_values(&PRICES_14));
    for m in &bundle.models {
        let steps: Vec<usize> = m.forecast.iter().map(|p| p.horizon_index).collect();
        assert_eq!(steps, vec![1, 2, 3], "{}", m.kind);
    }
}

#[test]
fn forecast_points_carry_extrapolated_timestamps() {
    let series = Series::from_pairs(&[(1_000, 10.0), (2_000, 11.0), (3_000, 13.0)]);
    let bundle = engine().run(&series);
    let linear = bundle.model(ModelKind::Linear).unwrap();
    assert_eq!(linear.forecast[0].timestamp_ms, Some(4_000));
    assert_eq!(linear.forecast[6].timestamp_ms, Some(10_000));
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = ForecastConfig {
        horizon: 7,
        holt_winters: HoltWintersConfig {
            beta: 2.0,
            ..HoltWintersConfig::default()
        },
    };
    assert!(ForecastEngine::new(cfg).is_err());
}

#[test]
fn horizon_above_ceiling_is_rejected() {
    for horizon in [MAX_HORIZON + 1, usize::MAX] {
        let cfg = ForecastConfig {
            horizon,
            ..ForecastConfig::default()
        };
        assert!(matches!(
            ForecastEngine::new(cfg),
            Err(ForecastError::InvalidParameter { name: "horizon", .. })
        ));
    }
}

#[test]
fn largest_horizon_runs_every_model() {
    let cfg = ForecastConfig {
        horizon: MAX_HORIZON,
        ..ForecastConfig::default()
    };
    let bundle = ForecastEngine::new(cfg)
        .unwrap()
        .run(&Series::from_values(&[1.0, 1.01, 1.02]));
    assert_eq!(bundle.models.len(), 4);
    for m in &bundle.models {
        assert_eq!(m.forecast.len(), MAX_HORIZON, "{}", m.kind);
    }
}

#[test]
fn overflowing_variance_never_ranks_as_nan() {
    let series = Series::from_values(&[1e200, -1e200, 1e200, -1e200, 1e200]);
    let bundle = engine().run(&series);
    assert!(!bundle.models.is_empty());
    for m in &bundle.models {
        assert_eq!(m.evaluation.r2, None, "{}", m.kind);
    }
    // every R² is missing, so the first available model in priority order wins
    assert_eq!(bundle.best, bundle.models.first().map(|m| m.kind));
}

#[test]
fn batch_keeps_input_order() {
    let inputs = vec![
        ("btc", Series::from_values(&PRICES_14)),
        ("eth", Series::from_values(&[10.0, 20.0])),
        ("doge", Series::default()),
    ];
    let bundles = engine().run_batch(&inputs);
    assert_eq!(bundles.len(), 3);
    for ((_, series), bundle) in inputs.iter().zip(&bundles) {
        assert_eq!(&bundle.series, series);
        assert_eq!(bundle, &engine().run(series));
    }
}

#[test]
fn batch_accepts_any_displayable_label() {
    let inputs = vec![
        (1u32, Series::from_values(&PRICES_14)),
        (2u32, Series::from_values(&[5.0, -3.0, 8.0])),
    ];
    let bundles = engine().run_batch(&inputs);
    assert_eq!(bundles[0].best, engine().run(&inputs[0].1).best);
    assert!(!bundles[1].is_available(ModelKind::Exponential));
}

#[test]
fn bundle_serializes_to_json() {
    let bundle = engine().run(&Series::from_values(&[10.0, 20.0]));
    let json = serde_json::to_value(&bundle).unwrap();
    assert_eq!(json["best"], "Linear");
    assert_eq!(json["models"][0]["params"]["model"], "linear");
    assert!(json["models"][0]["evaluation"]["r2"].is_number());
    assert_eq!(json["unavailable"][0]["kind"], "Quadratic");
}

use coin_forecast::error::ForecastError;
use coin_forecast::evaluator::{mae, r_squared, rmse, select_best, Evaluation};
use coin_forecast::forecast::{ModelKind, ModelParams, ModelResult};
use coin_forecast::smoothing::HoltWintersMode;

fn result_with_r2(kind: ModelKind, r2: Option<f64>) -> ModelResult {
    ModelResult {
        kind,
        params: ModelParams::HoltWinters {
            mode: HoltWintersMode::Full,
        },
        fitted: vec![],
        forecast: vec![],
        evaluation: Evaluation {
            r2,
            mae: 0.0,
            rmse: 0.0,
        },
    }
}

#[test]
fn identical_series_scores_perfectly() {
    let y = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
    let eval = Evaluation::compute(&y, &y).unwrap();
    assert_eq!(eval.r2, Some(1.0));
    assert_eq!(eval.mae, 0.0);
    assert_eq!(eval.rmse, 0.0);
}

#[test]
fn metrics_match_hand_computation() {
    let actual = [1.0, 2.0, 3.0, 4.0];
    let fitted = [1.0, 2.0, 3.0, 6.0];
    let eval = Evaluation::compute(&actual, &fitted).unwrap();
    // mean 2.5, ss_tot 5, ss_res 4
    assert!((eval.r2.unwrap() - 0.2).abs() < 1e-12);
    assert!((eval.mae - 0.5).abs() < 1e-12);
    assert!((eval.rmse - 1.0).abs() < 1e-12);
    assert!((mae(&actual, &fitted).unwrap() - 0.5).abs() < 1e-12);
    assert!((rmse(&actual, &fitted).unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn r2_can_go_negative() {
    let eval = Evaluation::compute(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
    assert!(eval.r2.unwrap() < 0.0);
}

#[test]
fn constant_series_is_not_computable() {
    let actual = [7.0; 5];
    let fitted = [6.0, 7.0, 8.0, 7.0, 7.0];
    assert!(matches!(
        r_squared(&actual, &fitted),
        Err(ForecastError::NonComputable)
    ));
    let eval = Evaluation::compute(&actual, &fitted).unwrap();
    assert_eq!(eval.r2, None);
    assert_eq!(eval.ranking_score(), f64::NEG_INFINITY);
    assert!((eval.mae - 0.4).abs() < 1e-12);
}

#[test]
fn overflowing_sums_of_squares_are_not_computable() {
    let actual = [1e200, -1e200, 1e200, -1e200, 1e200];
    let fitted = [1e200; 5];
    assert!(matches!(
        r_squared(&actual, &fitted),
        Err(ForecastError::NonComputable)
    ));
    assert_eq!(Evaluation::compute(&actual, &fitted).unwrap().r2, None);
}

#[test]
fn length_mismatch_and_empty_input_are_errors() {
    assert!(matches!(
        Evaluation::compute(&[1.0, 2.0], &[1.0]),
        Err(ForecastError::LengthMismatch {
            actual: 2,
            fitted: 1
        })
    ));
    assert!(matches!(
        Evaluation::compute(&[], &[]),
        Err(ForecastError::InsufficientData { .. })
    ));
}

#[test]
fn best_model_has_highest_r2() {
    let models = vec![
        result_with_r2(ModelKind::Linear, Some(0.5)),
        result_with_r2(ModelKind::Quadratic, Some(0.9)),
        result_with_r2(ModelKind::Exponential, Some(0.7)),
        result_with_r2(ModelKind::HoltWinters, None),
    ];
    assert_eq!(select_best(&models), Some(1));
}

#[test]
fn ties_go_to_earlier_model() {
    let models = vec![
        result_with_r2(ModelKind::Linear, Some(0.8)),
        result_with_r2(ModelKind::Quadratic, Some(0.8)),
        result_with_r2(ModelKind::HoltWinters, Some(0.8)),
    ];
    assert_eq!(select_best(&models), Some(0));
}

#[test]
fn non_computable_never_beats_computed_r2() {
    let models = vec![
        result_with_r2(ModelKind::Linear, None),
        result_with_r2(ModelKind::Quadratic, Some(-5.0)),
    ];
    assert_eq!(select_best(&models), Some(1));
    assert_eq!(select_best(&[]), None);
}

#[test]
fn nan_r2_ranks_below_every_number() {
    let models = vec![
        result_with_r2(ModelKind::Linear, Some(-3.0)),
        result_with_r2(ModelKind::Quadratic, Some(f64::NAN)),
    ];
    assert_eq!(select_best(&models), Some(0));

    let models = vec![
        result_with_r2(ModelKind::Linear, Some(f64::NAN)),
        result_with_r2(ModelKind::HoltWinters, Some(0.1)),
    ];
    assert_eq!(select_best(&models), Some(1));
    assert_eq!(models[0].evaluation.ranking_score(), f64::NEG_INFINITY);
}

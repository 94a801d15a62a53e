//! Tests for imputation and transforms

use approx::assert_relative_eq;

use super::*;
use crate::data::{DataSeries, SeriesStamp, SeriesValues};

fn floats(values: Vec<Option<f64>>) -> DataSeries {
    DataSeries::from_floats("x", values)
}

// ==================== Imputation ====================

#[test]
fn test_impute_none_and_empty() {
    let series = floats(vec![Some(1.0), None, Some(3.0)]);
    let out = ImputePolicy::None.apply(&series).unwrap();
    assert_eq!(out, series);

    let empty = floats(vec![]);
    let out = ImputePolicy::Mean.apply(&empty).unwrap();
    assert_eq!(out, empty);
}

#[test]
fn test_impute_forward_fill() {
    let series = floats(vec![None, Some(2.0), None, None, Some(5.0), None]);
    let out = ImputePolicy::ForwardFill.apply(&series).unwrap();
    // Leading gap back-filled, interior and trailing gaps forward-filled
    assert_eq!(
        out.as_floats().unwrap(),
        vec![Some(2.0), Some(2.0), Some(2.0), Some(2.0), Some(5.0), Some(5.0)]
    );
}

#[test]
fn test_impute_forward_fill_idempotent() {
    let series = floats(vec![None, Some(2.0), None, Some(5.0)]);
    let once = ImputePolicy::ForwardFill.apply(&series).unwrap();
    let twice = ImputePolicy::ForwardFill.apply(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_impute_backward_fill() {
    let series = floats(vec![None, Some(2.0), None, Some(5.0), None]);
    let out = ImputePolicy::BackwardFill.apply(&series).unwrap();
    // Trailing gap forward-filled, the rest backward-filled
    assert_eq!(
        out.as_floats().unwrap(),
        vec![Some(2.0), Some(2.0), Some(5.0), Some(5.0), Some(5.0)]
    );
}

#[test]
fn test_impute_mean_median() {
    let series = floats(vec![Some(1.0), None, Some(2.0), Some(6.0)]);
    let out = ImputePolicy::Mean.apply(&series).unwrap();
    assert_eq!(
        out.as_floats().unwrap(),
        vec![Some(1.0), Some(3.0), Some(2.0), Some(6.0)]
    );

    let out = ImputePolicy::Median.apply(&series).unwrap();
    assert_eq!(
        out.as_floats().unwrap(),
        vec![Some(1.0), Some(2.0), Some(2.0), Some(6.0)]
    );
}

#[test]
fn test_impute_mean_rejects_text() {
    let text = DataSeries::from_text("s", vec![Some("a".to_string()), None]);
    assert!(matches!(
        ImputePolicy::Mean.apply(&text),
        Err(PrepError::UnsupportedType { .. })
    ));
}

#[test]
fn test_impute_mean_all_missing() {
    // Mean of an all-missing series is undefined; this must be an error,
    // not a silent default.
    let series = floats(vec![None, None, None]);
    assert!(ImputePolicy::Mean.apply(&series).is_err());
}

#[test]
fn test_impute_value() {
    let series = floats(vec![Some(1.0), None]);
    let out = ImputePolicy::Value("9.5".to_string()).apply(&series).unwrap();
    assert_eq!(out.as_floats().unwrap(), vec![Some(1.0), Some(9.5)]);

    let ints = DataSeries::from_ints("n", vec![None, Some(2)]);
    let out = ImputePolicy::Value("7".to_string()).apply(&ints).unwrap();
    assert_eq!(out.values(), &SeriesValues::Int(vec![Some(7), Some(2)]));

    let bad = ImputePolicy::Value("not a number".to_string()).apply(&series);
    assert!(matches!(bad, Err(PrepError::ParseError { .. })));

    let text = DataSeries::from_text("s", vec![None, Some("b".to_string())]);
    let out = ImputePolicy::Value("n/a".to_string()).apply(&text).unwrap();
    assert_eq!(
        out.values(),
        &SeriesValues::Text(vec![Some("n/a".to_string()), Some("b".to_string())])
    );
}

#[test]
fn test_impute_guarantee_no_missing() {
    let series = floats(vec![None, Some(2.0), None, Some(4.0), None]);
    for policy in [
        ImputePolicy::ForwardFill,
        ImputePolicy::BackwardFill,
        ImputePolicy::Mean,
        ImputePolicy::Median,
        ImputePolicy::Value("0.5".to_string()),
    ] {
        let out = policy.apply(&series).unwrap();
        assert!(!out.has_missing(), "policy {:?} left missing values", policy);
    }
}

#[test]
fn test_impute_labels_round_trip() {
    for label in ["", "Forward Fill", "Backward Fill", "Mean", "Median", "Value"] {
        let policy = ImputePolicy::from_label(label, "1.0").unwrap();
        assert_eq!(policy.label(), label);
    }
    assert!(ImputePolicy::from_label("Interpolate", "").is_none());
}

// ==================== Transform catalog ====================

#[test]
fn test_transform_labels_round_trip() {
    for transform in CATALOG {
        assert_eq!(Transform::from_label(transform.label()), Some(transform));
    }
    assert!(Transform::from_label("Cube").is_none());
}

#[test]
fn test_transform_cost() {
    assert_eq!(Transform::Returns.cost(), -1);
    assert_eq!(Transform::LnReturns.cost(), -1);
    assert_eq!(Transform::RiskAdjReturns.cost(), -1);
    assert_eq!(Transform::RiskAdjLnReturns.cost(), -1);
    assert_eq!(Transform::None.cost(), 0);
    assert_eq!(Transform::RiskAdj.cost(), 0);
    assert_eq!(Transform::Ln.cost(), 0);
    assert_eq!(Transform::Sqrt.cost(), 0);
}

#[test]
fn test_risk_asset_sub_catalog() {
    let usable: Vec<Transform> = CATALOG
        .into_iter()
        .filter(Transform::usable_for_risk_asset)
        .collect();
    assert_eq!(
        usable,
        vec![
            Transform::None,
            Transform::Returns,
            Transform::LnReturns,
            Transform::Ln,
            Transform::Sqrt,
        ]
    );
}

// ==================== Phase 1: returns ====================

#[test]
fn test_returns_basic() {
    let series = floats(vec![Some(100.0), Some(110.0), Some(99.0)]);
    let outcome = Transform::Returns.check_apply_returns(&series);
    assert!(outcome.is_ok());
    assert!(outcome.suggestions.is_empty());
    assert_eq!(outcome.series.len(), 2);

    let values = outcome.series.as_floats().unwrap();
    assert_relative_eq!(values[0].unwrap(), 0.1);
    assert_relative_eq!(values[1].unwrap(), -0.1);

    // Oldest stamp retained, newest dropped
    assert_eq!(outcome.series.stamps(), &series.stamps()[..2]);
}

#[test]
fn test_returns_noop_for_other_transforms() {
    let series = floats(vec![Some(1.0), Some(2.0)]);
    for transform in [Transform::None, Transform::Ln, Transform::Sqrt, Transform::RiskAdj] {
        let outcome = transform.check_apply_returns(&series);
        assert!(outcome.is_ok());
        assert_eq!(outcome.series, series);
    }
}

#[test]
fn test_returns_insufficient_data() {
    let series = floats(vec![Some(1.0)]);
    let outcome = Transform::Returns.check_apply_returns(&series);
    assert!(!outcome.is_ok());
    assert!(matches!(
        outcome.errors[0],
        PrepError::InsufficientData { needed: 2, got: 1, .. }
    ));
    // Input echoed back unchanged
    assert_eq!(outcome.series, series);
}

#[test]
fn test_returns_zero_is_an_error() {
    let series = floats(vec![Some(1.0), Some(0.0), Some(2.0)]);
    let outcome = Transform::Returns.check_apply_returns(&series);
    assert!(!outcome.is_ok());
    assert!(outcome.errors[0].to_string().contains("zero"));
    assert_eq!(outcome.series, series);
}

#[test]
fn test_returns_negative_and_missing_are_suggestions() {
    let series = floats(vec![Some(1.0), Some(-2.0), None, Some(3.0)]);
    let outcome = Transform::Returns.check_apply_returns(&series);
    assert!(outcome.is_ok());
    assert_eq!(outcome.suggestions.len(), 2);

    // Missing operands produce missing returns
    let values = outcome.series.as_floats().unwrap();
    assert_eq!(values.len(), 3);
    assert!(values[1].is_none());
    assert!(values[2].is_none());
}

#[test]
fn test_returns_errors_are_collected_not_short_circuited() {
    // Too short AND contains a zero: both errors reported
    let series = floats(vec![Some(0.0)]);
    let outcome = Transform::Returns.check_apply_returns(&series);
    assert_eq!(outcome.errors.len(), 2);
}

// ==================== Phase 2: risk adjust / log / sqrt ====================

#[test]
fn test_remaining_noop() {
    // Transforms without a risk-adjust, log, or sqrt step pass through
    let series = floats(vec![Some(1.0), Some(2.0)]);
    for transform in [Transform::None, Transform::Returns] {
        let outcome = transform.check_apply_remaining(&series, None);
        assert!(outcome.is_ok());
        assert_eq!(outcome.series, series);
    }
}

#[test]
fn test_log_transform() {
    let series = floats(vec![Some(1.0), Some(std::f64::consts::E)]);
    let outcome = Transform::Ln.check_apply_remaining(&series, None);
    assert!(outcome.is_ok());
    let values = outcome.series.as_floats().unwrap();
    assert_relative_eq!(values[0].unwrap(), 0.0);
    assert_relative_eq!(values[1].unwrap(), 1.0);
}

#[test]
fn test_log_rejects_non_positive() {
    for bad in [0.0, -1.0] {
        let series = floats(vec![Some(1.0), Some(bad)]);
        let outcome = Transform::Ln.check_apply_remaining(&series, None);
        assert!(!outcome.is_ok());
        assert!(matches!(outcome.errors[0], PrepError::DomainViolation { .. }));
        assert_eq!(outcome.series, series);
    }
}

#[test]
fn test_sqrt_transform() {
    let series = floats(vec![Some(0.0), Some(4.0), Some(9.0)]);
    let outcome = Transform::Sqrt.check_apply_remaining(&series, None);
    assert!(outcome.is_ok());
    assert_eq!(
        outcome.series.as_floats().unwrap(),
        vec![Some(0.0), Some(2.0), Some(3.0)]
    );

    let negative = floats(vec![Some(-1.0)]);
    let outcome = Transform::Sqrt.check_apply_remaining(&negative, None);
    assert!(!outcome.is_ok());
}

#[test]
fn test_risk_adjust() {
    let series = floats(vec![Some(0.10), Some(0.05)]);
    let asset = DataSeries::from_floats("benchmark", vec![Some(0.02), Some(0.01)]);
    let outcome = Transform::RiskAdj.check_apply_remaining(&series, Some(&asset));
    assert!(outcome.is_ok());
    let values = outcome.series.as_floats().unwrap();
    assert_relative_eq!(values[0].unwrap(), 0.08);
    assert_relative_eq!(values[1].unwrap(), 0.04);
}

#[test]
fn test_risk_adjust_requires_asset() {
    let series = floats(vec![Some(0.10), Some(0.05)]);
    let outcome = Transform::RiskAdj.check_apply_remaining(&series, None);
    assert!(!outcome.is_ok());
    assert!(matches!(outcome.errors[0], PrepError::AlignmentError { .. }));
}

#[test]
fn test_risk_adjust_mismatched_length() {
    let series = floats(vec![Some(0.10), Some(0.05)]);
    let asset = DataSeries::from_floats("benchmark", vec![Some(0.02)]);
    let outcome = Transform::RiskAdj.check_apply_remaining(&series, Some(&asset));
    assert!(!outcome.is_ok());
    assert!(matches!(outcome.errors[0], PrepError::AlignmentError { .. }));
    // No subtraction was performed
    assert_eq!(outcome.series, series);
}

#[test]
fn test_risk_adjust_mismatched_stamps() {
    let series = DataSeries::new(
        "x",
        vec![SeriesStamp::date("2024-01-31"), SeriesStamp::date("2024-02-29")],
        SeriesValues::Float(vec![Some(0.10), Some(0.05)]),
    )
    .unwrap();
    let asset = DataSeries::new(
        "benchmark",
        vec![SeriesStamp::date("2024-01-31"), SeriesStamp::date("2024-03-31")],
        SeriesValues::Float(vec![Some(0.02), Some(0.01)]),
    )
    .unwrap();
    let outcome = Transform::RiskAdj.check_apply_remaining(&series, Some(&asset));
    assert!(!outcome.is_ok());
}

#[test]
fn test_risk_adjust_then_log() {
    // Risk Adj. LN Returns, phase 2 on already-computed returns:
    // subtraction first, then the log sees the adjusted values.
    let series = floats(vec![Some(1.10), Some(1.05)]);
    let asset = DataSeries::from_floats("benchmark", vec![Some(0.10), Some(0.05)]);
    let outcome = Transform::RiskAdjLnReturns.check_apply_remaining(&series, Some(&asset));
    assert!(outcome.is_ok());
    let values = outcome.series.as_floats().unwrap();
    assert_relative_eq!(values[0].unwrap(), 0.0);
    assert_relative_eq!(values[1].unwrap(), 0.0);
}

#[test]
fn test_log_failure_reported_after_risk_adjust() {
    // Adjusted values go non-positive, so the log must refuse
    let series = floats(vec![Some(1.0), Some(2.0)]);
    let asset = DataSeries::from_floats("benchmark", vec![Some(1.0), Some(1.0)]);
    let outcome = Transform::RiskAdjLnReturns.check_apply_remaining(&series, Some(&asset));
    assert!(!outcome.is_ok());
    assert!(matches!(outcome.errors[0], PrepError::DomainViolation { .. }));
}

#[test]
fn test_remaining_missing_value_suggestion() {
    let series = floats(vec![Some(1.0), None, Some(4.0)]);
    let outcome = Transform::Sqrt.check_apply_remaining(&series, None);
    assert!(outcome.is_ok());
    assert_eq!(outcome.suggestions.len(), 1);
}

// ==================== Unchecked fast path ====================

#[test]
fn test_apply_full_pipeline() {
    // LN Returns end to end: percent change then log of (1 + r) basis values
    let series = floats(vec![Some(100.0), Some(110.0), Some(121.0)]);
    let returns = Transform::LnReturns.check_apply_returns(&series);
    assert!(returns.is_ok());
    let outcome = Transform::LnReturns.check_apply_remaining(&returns.series, None);
    assert!(outcome.is_ok());

    // Unchecked path reproduces the two checked phases
    let fast = Transform::LnReturns.apply(&series, None).unwrap();
    assert_eq!(fast, outcome.series);
}

#[test]
fn test_apply_cost_predicts_length() {
    let series = floats(vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]);
    for transform in CATALOG {
        if transform.is_risk_adjusting() {
            continue;
        }
        let out = transform.apply(&series, None).unwrap();
        let expected = (series.len() as i64 + transform.cost()) as usize;
        assert_eq!(out.len(), expected, "transform {:?}", transform);
    }
}

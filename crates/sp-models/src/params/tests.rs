//! Tests for parameter registries and validators

use ndarray::{arr1, arr2};

use super::*;

fn demo_set() -> ParameterSet {
    ParameterSet::build([
        (
            "missing",
            ParamSpec::choice("How missing observations are treated", &["none", "drop", "raise"]),
        ),
        (
            "hasconst",
            ParamSpec::opt_bool_choice("Whether the design already contains a constant"),
        ),
        (
            "q",
            ParamSpec::float_range("Quantile to estimate", (0.0, false), (1.0, false), 0.5, 2),
        ),
        ("maxlags", ParamSpec::int_range("HAC lag count", 0, 1000, 1)),
        ("weights", ParamSpec::array("Observation weights", ElementType::Float)),
        ("groups", ParamSpec::array("Cluster labels", ElementType::Int)),
        ("group_names", ParamSpec::array("Cluster display names", ElementType::Text)),
        ("sigma", ParamSpec::matrix("Error covariance", ElementType::Float)),
        ("lag_structure", ParamSpec::matrix("Per-group lag counts", ElementType::Int)),
    ])
    .unwrap()
}

// ==================== Registry construction ====================

#[test]
fn test_duplicate_name_is_a_construction_error() {
    let result = ParameterSet::build([
        ("q", ParamSpec::float_range("first", (0.0, true), (1.0, true), 0.5, 2)),
        ("q", ParamSpec::float_range("second", (0.0, true), (1.0, true), 0.9, 2)),
    ]);
    assert!(matches!(result, Err(ParamError::DuplicateParameter(_))));
}

#[test]
fn test_extend_rejects_override() {
    let base = demo_set();
    let result = base.extend([(
        "missing",
        ParamSpec::choice("shadowed", &["drop"]),
    )]);
    assert!(matches!(result, Err(ParamError::DuplicateParameter(_))));

    let extended = base.extend([("rho", ParamSpec::int_range("AR order", 1, 12, 1))]).unwrap();
    assert_eq!(extended.len(), base.len() + 1);
    // Declaration order preserved, extensions appended
    assert_eq!(extended.names().last(), Some("rho"));
}

#[test]
fn test_unknown_parameter() {
    let set = demo_set();
    let values = ParameterValues::new();
    assert!(matches!(
        set.check_choice("nonesuch", &values),
        Err(ParamError::UnknownParameter(_))
    ));
}

// ==================== Choice ====================

#[test]
fn test_choice_default_is_first_value() {
    let set = demo_set();
    let values = ParameterValues::new();
    assert_eq!(set.check_choice("missing", &values).unwrap(), "none");
}

#[test]
fn test_choice_membership() {
    let set = demo_set();
    let mut values = ParameterValues::new();
    values.set("missing", "drop");
    assert_eq!(set.check_choice("missing", &values).unwrap(), "drop");

    values.set("missing", "interpolate");
    let err = set.check_choice("missing", &values).unwrap_err();
    assert!(matches!(err, ParamError::InvalidChoice { .. }));
    // The message names the offending value and the allowed set
    let message = err.to_string();
    assert!(message.contains("interpolate"));
    assert!(message.contains("none, drop, raise"));
}

#[test]
fn test_opt_bool_choice() {
    let set = demo_set();
    let mut values = ParameterValues::new();
    assert_eq!(set.check_opt_bool("hasconst", &values).unwrap(), None);

    values.set("hasconst", "True");
    assert_eq!(set.check_opt_bool("hasconst", &values).unwrap(), Some(true));

    values.set("hasconst", "False");
    assert_eq!(set.check_opt_bool("hasconst", &values).unwrap(), Some(false));
}

// ==================== Numeric range ====================

#[test]
fn test_numeric_default() {
    let set = demo_set();
    let values = ParameterValues::new();
    assert_eq!(set.check_float("q", &values).unwrap(), 0.5);
    assert_eq!(set.check_int("maxlags", &values).unwrap(), 1);
}

#[test]
fn test_numeric_bounds_both_raise() {
    let set = demo_set();
    let mut values = ParameterValues::new();

    // q has exclusive bounds: 0.0 and 1.0 both violate
    values.set("q", 0.0);
    assert!(matches!(
        set.check_float("q", &values),
        Err(ParamError::RangeViolation { .. })
    ));

    values.set("q", 1.0);
    assert!(matches!(
        set.check_float("q", &values),
        Err(ParamError::RangeViolation { .. })
    ));

    values.set("q", 0.75);
    assert_eq!(set.check_float("q", &values).unwrap(), 0.75);

    values.set("maxlags", 1001_i64);
    assert!(matches!(
        set.check_int("maxlags", &values),
        Err(ParamError::RangeViolation { .. })
    ));
}

#[test]
fn test_numeric_type_mismatch() {
    let set = demo_set();
    let mut values = ParameterValues::new();

    // An integer supplied for a float parameter is a mismatch, not a coercion
    values.set("q", 1_i64);
    assert!(matches!(
        set.check_float("q", &values),
        Err(ParamError::TypeMismatch { .. })
    ));

    values.set("maxlags", 2.0);
    assert!(matches!(
        set.check_int("maxlags", &values),
        Err(ParamError::TypeMismatch { .. })
    ));
}

// ==================== Arrays and matrices ====================

#[test]
fn test_float_array_from_text() {
    let set = demo_set();
    let mut values = ParameterValues::new();
    values.set("weights", "1.0, 2.0, 3.0");
    let arr = set.check_float_array("weights", &values).unwrap().unwrap();
    assert_eq!(arr, arr1(&[1.0, 2.0, 3.0]));
}

#[test]
fn test_typed_array_passes_through() {
    let set = demo_set();
    let mut values = ParameterValues::new();
    values.set("weights", arr1(&[0.5, 0.5]));
    let arr = set.check_float_array("weights", &values).unwrap().unwrap();
    assert_eq!(arr, arr1(&[0.5, 0.5]));

    // Absent array → None, to let the family decide whether it is required
    assert!(set.check_float_array("weights", &ParameterValues::new()).unwrap().is_none());
}

#[test]
fn test_array_parse_error_names_token() {
    let set = demo_set();
    let mut values = ParameterValues::new();
    values.set("weights", "1.0, oops, 3.0");
    let err = set.check_float_array("weights", &values).unwrap_err();
    assert!(matches!(err, ParamError::ParseError { .. }));
    assert!(err.to_string().contains("oops"));
}

#[test]
fn test_int_array() {
    let set = demo_set();
    let mut values = ParameterValues::new();
    values.set("groups", "0, 0, 1, 1");
    let arr = set.check_int_array("groups", &values).unwrap().unwrap();
    assert_eq!(arr, arr1(&[0_i64, 0, 1, 1]));

    values.set("groups", "0, 1.5");
    assert!(set.check_int_array("groups", &values).is_err());
}

#[test]
fn test_text_array() {
    let set = demo_set();
    let mut values = ParameterValues::new();
    values.set("group_names", "east,west");
    let names = set.check_text_array("group_names", &values).unwrap().unwrap();
    assert_eq!(names, vec!["east".to_string(), "west".to_string()]);

    // Typed values pass through; a numeric array is the wrong element type
    values.set("group_names", vec!["north".to_string()]);
    let names = set.check_text_array("group_names", &values).unwrap().unwrap();
    assert_eq!(names, vec!["north".to_string()]);

    values.set("group_names", arr1(&[1_i64, 2]));
    assert!(matches!(
        set.check_text_array("group_names", &values),
        Err(ParamError::TypeMismatch { .. })
    ));

    assert!(set.check_text_array("group_names", &ParameterValues::new()).unwrap().is_none());
}

#[test]
fn test_matrix_from_text() {
    let set = demo_set();
    let mut values = ParameterValues::new();
    values.set("sigma", "1.0, 2.0; 3.0, 4.0");
    let m = set.check_float_matrix("sigma", &values).unwrap().unwrap();
    assert_eq!(m, arr2(&[[1.0, 2.0], [3.0, 4.0]]));
}

#[test]
fn test_matrix_trailing_empty_row_dropped() {
    let set = demo_set();
    let mut values = ParameterValues::new();
    values.set("sigma", "1.0, 2.0; 3.0, 4.0;");
    let m = set.check_float_matrix("sigma", &values).unwrap().unwrap();
    assert_eq!(m.nrows(), 2);
}

#[test]
fn test_matrix_must_be_rectangular() {
    let set = demo_set();
    let mut values = ParameterValues::new();
    values.set("sigma", "1.0, 2.0; 3.0");
    assert!(matches!(
        set.check_float_matrix("sigma", &values),
        Err(ParamError::ShapeError { .. })
    ));
}

#[test]
fn test_matrix_from_typed_array_is_one_row() {
    let set = demo_set();
    let mut values = ParameterValues::new();
    values.set("sigma", arr1(&[1.0, 2.0, 3.0]));
    let m = set.check_float_matrix("sigma", &values).unwrap().unwrap();
    assert_eq!(m.shape(), &[1, 3]);
}

#[test]
fn test_int_matrix_from_text() {
    let set = demo_set();
    let mut values = ParameterValues::new();
    values.set("lag_structure", "1, 2; 3, 4");
    let m = set.check_int_matrix("lag_structure", &values).unwrap().unwrap();
    assert_eq!(m, arr2(&[[1_i64, 2], [3, 4]]));

    assert!(set.check_int_matrix("lag_structure", &ParameterValues::new()).unwrap().is_none());
}

#[test]
fn test_wrong_domain_is_reported() {
    let set = demo_set();
    let values = ParameterValues::new();
    // Asking for a float where a choice is declared is a programming error
    // on the caller's side and gets a dedicated message
    assert!(matches!(
        set.check_float("missing", &values),
        Err(ParamError::WrongDomain { .. })
    ));
}

// ==================== Text grammar directly ====================

#[test]
fn test_parse_text_array_keeps_whitespace() {
    // Whitespace is only stripped for numeric element types
    let tokens = parse_text_array("a, b");
    assert_eq!(tokens, vec!["a".to_string(), " b".to_string()]);
}

#[test]
fn test_parse_int_matrix() {
    let m = parse_int_matrix("sigma", "1, 2; 3, 4").unwrap();
    assert_eq!(m, arr2(&[[1_i64, 2], [3, 4]]));
}

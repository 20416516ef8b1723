use super::*;

#[test]
fn parses_numbers_and_ignores_extra_fields() {
    let pts = parse_points(r#"[{"x": 1, "y": 2.5, "id": "a"}, {"y": -3, "x": 4.25}]"#).unwrap();
    assert_eq!(pts.xs(), &[1.0, 4.25]);
    assert_eq!(pts.ys(), &[2.5, -3.0]);
}

#[test]
fn empty_array_is_a_valid_empty_set() {
    assert!(parse_points("[]").unwrap().is_empty());
}

#[test]
fn missing_key_names_the_element() {
    let err = parse_points(r#"[{"x": 1, "y": 2}, {"x": 3}]"#).unwrap_err();
    assert!(matches!(err, HeatError::Data(ref m) if m.contains("point 1") && m.contains("'y'")));
}

#[test]
fn non_numeric_value_is_rejected() {
    let err = parse_points(r#"[{"x": "7", "y": 2}]"#).unwrap_err();
    assert!(matches!(err, HeatError::Data(ref m) if m.contains("non-numeric 'x'")));
}

#[test]
fn non_array_and_malformed_json_are_data_errors() {
    assert!(matches!(parse_points(r#"{"x": 1}"#), Err(HeatError::Data(_))));
    assert!(matches!(parse_points("[{"), Err(HeatError::Data(_))));
}

#[test]
fn load_reports_missing_file_path() {
    let err = load_points(Path::new("target/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, HeatError::Other(_)));
    assert!(err.to_string().contains("here.json"));
}

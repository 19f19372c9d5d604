use super::*;

#[test]
fn presets_match_reference_values() {
    let s = FieldConfig::supplier();
    assert_eq!(s.total, 7000);
    assert_eq!(s.design_count, 6000);
    assert_eq!(s.alpha_threshold, 40);
    assert_eq!(s.color, Rgb8::new(66, 133, 244));
    assert_eq!(s.icons, IconSet::Supplier);
    assert_eq!(FieldConfig::warehouse().icons, IconSet::Warehouse);
    assert_eq!(FieldConfig::architecture().icons, IconSet::None);
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = FieldConfig::from_json_str(r#"{ "total": 50, "design_count": 10, "seed": 9 }"#)
        .unwrap();
    assert_eq!(cfg.total, 50);
    assert_eq!(cfg.design_count, 10);
    assert_eq!(cfg.seed, Some(9));
    assert_eq!(cfg.alpha_threshold, 40);
    assert_eq!(cfg.init_retry_ms, 100);
    assert_eq!(cfg.icons, IconSet::None);
}

#[test]
fn validation_rejects_bad_counts() {
    let err = FieldConfig::from_json_str(r#"{ "total": 5, "design_count": 6 }"#).unwrap_err();
    assert!(err.to_string().contains("design_count"));
    assert!(FieldConfig::from_json_str(r#"{ "total": 0, "design_count": 0 }"#).is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = FieldConfig::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, FieldError::Serde(_)));
}

#[test]
fn json_round_trip_keeps_icon_set() {
    let cfg = FieldConfig::warehouse().with_seed(3);
    let json = serde_json::to_string(&cfg).unwrap();
    assert_eq!(FieldConfig::from_json_str(&json).unwrap(), cfg);
}

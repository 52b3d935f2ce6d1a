use super::*;

#[test]
fn defaults_match_documented_values() {
    let cfg = Config::default();
    assert_eq!(cfg.fps, Fps::new(30, 1).unwrap());
    assert_eq!(cfg.animation_duration, 0.5);
    assert!(cfg.print_initial);
    assert!(cfg.validate().is_ok());
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let cfg = Config::from_json_str(r#"{ "fps": { "num": 60, "den": 1 }, "stroke_width": 4.0 }"#)
        .unwrap();
    assert_eq!(cfg.fps.num, 60);
    assert_eq!(cfg.stroke_width, 4.0);
    assert_eq!(cfg.font_family, "sans-serif");
}

#[test]
fn json_errors_are_reported() {
    assert!(Config::from_json_str("{ not json").is_err());
    assert!(Config::from_json_str(r#"{ "animation_duration": -1.0 }"#).is_err());
}

#[test]
fn frames_for_defers_to_default_duration() {
    let cfg = Config::default();
    assert_eq!(cfg.frames_for(None).unwrap(), 15);
    assert_eq!(cfg.frames_for(Some(2.0)).unwrap(), 60);
    assert!(cfg.frames_for(Some(f64::NAN)).is_err());
}

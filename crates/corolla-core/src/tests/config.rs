use crate::ConfigOverrides;
use serde_json::json;

#[test]
fn dotted_paths_read_nested_values() {
    let cfg = ConfigOverrides::from_value(json!({
        "sunburst": { "innerRadius": 40, "fontFamily": "serif", "debug": true }
    }));
    assert_eq!(cfg.get_f64("sunburst.innerRadius"), Some(40.0));
    assert_eq!(cfg.get_str("sunburst.fontFamily"), Some("serif"));
    assert_eq!(cfg.get_bool("sunburst.debug"), Some(true));
    assert_eq!(cfg.get_f64("sunburst.missing"), None);
    assert_eq!(cfg.get_f64("sunburst.fontFamily"), None);
}

#[test]
fn set_value_creates_intermediate_objects() {
    let mut cfg = ConfigOverrides::from_value(json!("not an object"));
    cfg.set_value("sunburst.width", json!(600));
    assert_eq!(cfg.as_value(), &json!({ "sunburst": { "width": 600 } }));
}

#[test]
fn deep_merge_keeps_unrelated_keys() {
    let mut cfg = ConfigOverrides::from_value(json!({
        "sunburst": { "width": 480, "height": 480 }
    }));
    cfg.deep_merge(&json!({ "sunburst": { "width": 640 } }));
    assert_eq!(cfg.get_f64("sunburst.width"), Some(640.0));
    assert_eq!(cfg.get_f64("sunburst.height"), Some(480.0));
}

#[test]
fn from_json_str_rejects_non_objects() {
    let err = ConfigOverrides::from_json_str("[1, 2]").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid config (): config root must be a JSON object"
    );
    assert!(ConfigOverrides::from_json_str("{}").is_ok());
}

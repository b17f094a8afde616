use super::*;
use crate::animation::element::ElementKind;

fn element() -> ElementInfo {
    ElementInfo::new("badge", ElementKind::Image, 120, 80)
        .at(300.0, 200.0)
        .on_canvas(1920, 1080)
}

#[test]
fn builtin_covers_stock_presets() {
    let reg = EffectRegistry::builtin();
    for name in [
        "fadeIn", "fadeOut", "alphaIn", "alphaOut", "zoomIn", "zoomOut", "zoomingIn", "rotateIn",
        "rotateOut", "rotatingIn", "moveInLeft", "moveInRight", "moveInUp", "moveInDown",
        "moveOutLeft", "moveOutRight", "moveOutUp", "moveOutDown",
    ] {
        assert!(reg.lookup(name).is_some(), "{name}");
    }
    assert_eq!(reg.len(), 18);
    assert!(reg.lookup("wobble").is_none());
}

#[test]
fn composite_presets_keep_their_order() {
    let reg = EffectRegistry::builtin();
    let sets = reg.lookup("moveOutRight").unwrap().param_sets();
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0]["type"], json!("move"));
    assert_eq!(sets[0]["to"], json!("right_out"));
    assert_eq!(sets[1]["type"], json!("show"));
    assert_eq!(sets[1]["showType"], json!("out"));
}

#[test]
fn registry_loads_from_json() {
    let reg = EffectRegistry::from_json_str(
        r#"{
            "popIn": {"type": "zoom", "showType": "in", "time": 0.3, "from": 1.2, "to": 1},
            "slideFade": [
                {"type": "move", "showType": "in", "time": 1, "from": "left_out"},
                {"type": "alpha", "showType": "in", "time": 1}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(reg.names().collect::<Vec<_>>(), vec!["popIn", "slideFade"]);
    assert!(matches!(reg.lookup("popIn"), Some(Preset::Single(_))));
    assert_eq!(reg.lookup("slideFade").unwrap().param_sets().len(), 2);

    assert!(EffectRegistry::from_json_str(r#"{"bad": 3}"#).is_err());
}

#[test]
fn registries_compose_with_builder() {
    let mut set = ParamSet::new();
    set.insert("type".to_string(), json!("alpha"));
    let reg = EffectRegistry::new().with("custom", Preset::Single(set));
    assert!(!reg.is_empty());
    assert_eq!(reg.lookup("custom").unwrap().param_sets()[0]["type"], json!("alpha"));
}

#[test]
fn symbolic_tokens_map_to_points() {
    let el = element();
    assert_eq!(map_symbolic(&json!("left_out"), &el), Some(json!({"x": -120.0, "y": 200.0})));
    assert_eq!(map_symbolic(&json!("right_out"), &el), Some(json!({"x": 1920.0, "y": 200.0})));
    assert_eq!(map_symbolic(&json!("top_out"), &el), Some(json!({"x": 300.0, "y": -80.0})));
    assert_eq!(map_symbolic(&json!("bottom_out"), &el), Some(json!({"x": 300.0, "y": 1080.0})));
    assert_eq!(map_symbolic(&json!("origin"), &el), Some(json!({"x": 300.0, "y": 200.0})));
    assert_eq!(map_symbolic(&json!("center"), &el), None);
    assert_eq!(map_symbolic(&json!(1.5), &el), None);
}

#[test]
fn requests_expose_name_and_overrides() {
    let named = EffectRequest::named("fadeIn", Some(2.0), None);
    assert_eq!(named.name(), Some("fadeIn"));
    assert_eq!(named.overrides().get("time"), Some(&json!(2.0)));
    assert!(!named.overrides().contains_key("delay"));

    let Value::Object(conf) = json!({"type": "zoomIn", "delay": 1, "ease": null, "pad": false})
    else {
        unreachable!()
    };
    let req = EffectRequest::from(conf);
    assert_eq!(req.name(), Some("zoomIn"));
    let overrides = req.overrides();
    assert_eq!(overrides.len(), 2);
    assert_eq!(overrides["delay"], json!(1));
    assert_eq!(overrides["pad"], json!(false));

    let Value::Object(nameless) = json!({"time": 1}) else {
        unreachable!()
    };
    assert_eq!(EffectRequest::from(nameless).name(), None);
}

#[test]
fn missing_preset_file_reports_path() {
    let err = EffectRegistry::from_path("tests/data/no_such_presets.json").unwrap_err();
    assert!(matches!(err, crate::foundation::error::WavyteError::Other(_)));
    let msg = err.to_string();
    assert!(msg.contains("read effect presets"), "{msg}");
    assert!(msg.contains("no_such_presets.json"), "{msg}");
}

use super::*;
use crate::animation::descriptor::ShowType;
use crate::animation::element::ElementKind;
use crate::filters::OptionValue;
use serde_json::json;

fn image() -> ElementInfo {
    ElementInfo::new("img", ElementKind::Image, 320, 240)
}

#[test]
fn conf_accessors_round_trip() {
    let mut node = AnimationNode::new(AnimationDescriptor::new("alpha", ShowType::In, 1.0, 0.0));
    assert_eq!(node.get_from_conf("type"), Some(&json!("alpha")));
    node.set_to_conf("delay", 2.5);
    assert_eq!(node.conf().delay(), 2.5);
    assert_eq!(node.parent(), None);
}

#[test]
fn get_from_to_resolves_scalar_defaults() {
    let zoom = AnimationNode::new(AnimationDescriptor::new("zoom", ShowType::In, 1.0, 0.0));
    assert_eq!(zoom.get_from_to(), Some((2.0, 1.0)));

    let explicit = AnimationNode::new(
        AnimationDescriptor::new("zoom", ShowType::In, 1.0, 0.0).with("from", 1.5),
    );
    assert_eq!(explicit.get_from_to(), Some((1.5, 1.0)));

    let moving = AnimationNode::new(
        AnimationDescriptor::new("move", ShowType::In, 1.0, 0.0).with("from", json!({"x": 0, "y": 0})),
    );
    assert_eq!(moving.get_from_to(), None);

    let broken = AnimationNode::new(AnimationDescriptor::default().with("type", "zoom"));
    assert_eq!(broken.get_from_to(), None);
}

#[test]
fn fade_builds_native_filter() {
    let node = AnimationNode::new(AnimationDescriptor::new("show", ShowType::Out, 1.0, 4.0));
    let filters = node.to_filter(&image()).unwrap();
    assert_eq!(filters.len(), 1);

    let f = &filters[0];
    assert_eq!(f.filter, "fade");
    assert!(f.is_named("fade"));
    assert_eq!(f.options.get("t"), Some(&OptionValue::Text("out".to_string())));
    assert_eq!(f.options.get("st"), Some(&OptionValue::Number(4.0)));
    assert_eq!(f.options.get("d"), Some(&OptionValue::Number(1.0)));
    assert_eq!(f.options.get("alpha"), Some(&OptionValue::Number(1.0)));
    assert!(f.merge.is_none());
}

#[test]
fn dispatch_picks_family_builder() {
    let cases = [
        ("alpha", vec!["alpha"]),
        ("rotate", vec!["rotate"]),
        ("zoom", vec!["zoompan"]),
        ("zoompan", vec!["zoompan"]),
    ];
    for (kind, want) in cases {
        let node = AnimationNode::new(AnimationDescriptor::new(kind, ShowType::In, 1.0, 0.0));
        let got: Vec<_> = node
            .to_filter(&image())
            .unwrap()
            .iter()
            .map(|f| f.filter.clone())
            .collect();
        assert_eq!(got, want, "{kind}");
    }

    let moving = AnimationNode::new(
        AnimationDescriptor::new("move", ShowType::In, 1.0, 0.0).with("from", json!({"x": -320, "y": 0})),
    );
    assert_eq!(moving.to_filter(&image()).unwrap()[0].filter, "overlay");
}

#[test]
fn invalid_descriptor_fails_to_build() {
    let node = AnimationNode::new(AnimationDescriptor::default().with("type", "alpha"));
    assert!(matches!(
        node.to_filter(&image()),
        Err(crate::foundation::error::WavyteError::InvalidAnimationConfig(_))
    ));
}

#[test]
fn inputs_convert_from_descriptors_and_nodes() {
    let d = AnimationDescriptor::new("alpha", ShowType::In, 1.0, 0.0);
    assert!(matches!(AnimationInput::from(d.clone()), AnimationInput::Raw(_)));
    assert!(matches!(
        AnimationInput::from(AnimationNode::new(d)),
        AnimationInput::Node(_)
    ));
}

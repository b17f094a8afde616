use super::*;
use crate::animation::descriptor::{AnimationDescriptor, ShowType};
use crate::animation::element::ElementKind;
use crate::filters::OptionValue;

fn build(d: AnimationDescriptor) -> AniFilter {
    let spec = d.normalize().unwrap();
    let el = ElementInfo::new("logo", ElementKind::Image, 100, 100);
    RotateFilter::build(&spec, &el).unwrap().remove(0)
}

fn angle(f: &AniFilter, t: f64) -> f64 {
    match f.clone().finalized().options.remove("a") {
        Some(OptionValue::Expr(e)) => e.eval(t).unwrap(),
        other => panic!("a is not an expression: {other:?}"),
    }
}

#[test]
fn degrees_become_rounded_radians() {
    assert_eq!(to_radians(180.0), 3.1416);
    assert_eq!(to_radians(90.0), 1.5708);
    assert_eq!(to_radians(0.0), 0.0);
}

#[test]
fn default_entrance_unwinds_half_turn() {
    let f = build(AnimationDescriptor::new("rotate", ShowType::In, 1.0, 0.0));
    assert_eq!(f.filter, "rotate");
    assert_eq!(f.options.get("c"), Some(&OptionValue::Text("none".to_string())));
    assert!(!f.options.contains_key("ow"));

    assert_eq!(angle(&f, -1.0), 3.1416);
    assert!((angle(&f, 0.5) - 1.5708).abs() < 1e-12);
    assert_eq!(angle(&f, 1.0), 0.0);
    assert_eq!(angle(&f, 5.0), 0.0);
}

#[test]
fn padding_grows_output() {
    let f = build(AnimationDescriptor::new("rotate", ShowType::Out, 1.0, 0.0).with("pad", true));
    assert_eq!(f.options.get("ow"), Some(&OptionValue::Text("hypot(iw,ih)".to_string())));
    assert_eq!(f.options.get("oh"), Some(&OptionValue::Text("hypot(iw,ih)".to_string())));
    assert_eq!(angle(&f, 0.0), 0.0);
    assert_eq!(angle(&f, 1.0), 3.1416);
}

#[test]
fn continuous_rate_is_degrees_per_second() {
    let f = build(
        AnimationDescriptor::new("rotate", ShowType::In, 2.0, 0.0)
            .with("from", 0.0)
            .with("ing", true)
            .with("add", 90.0),
    );
    assert!((angle(&f, 1.0) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    assert!((angle(&f, 4.0) - std::f64::consts::PI).abs() < 1e-12);
}

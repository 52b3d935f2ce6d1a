use super::*;
use crate::animation::lazy::Lazy;
use crate::graph::node::{Node, TEXT};

fn run(anim: &mut impl Animation) -> u32 {
    let mut frames = 0;
    while anim.next_frame().unwrap() {
        frames += 1;
    }
    frames
}

#[test]
fn translation_reaches_its_destination() {
    let cfg = Config::default();
    let t = TransformRef::default();
    let mut tween = PropertyAnimation::translation(&t, Vec2::new(0.0, 75.0))
        .duration(1.0)
        .eager(&cfg)
        .unwrap();
    assert_eq!(tween.num_frames(), 30);
    assert_eq!(run(&mut tween), 30);
    assert_eq!(t.translation(), Vec2::new(0.0, 75.0));
}

#[test]
fn intermediate_frames_follow_the_easing() {
    let cfg = Config::default();
    let t = TransformRef::default();
    let mut tween = PropertyAnimation::rotation(&t, 100.0)
        .duration(4.0 / 30.0)
        .easing(Easing::Linear)
        .eager(&cfg)
        .unwrap();
    let mut seen = Vec::new();
    while tween.next_frame().unwrap() {
        seen.push(t.rotation());
    }
    assert_eq!(seen, vec![25.0, 50.0, 75.0, 100.0]);
}

#[test]
fn eager_reads_initial_values_at_construction() {
    let cfg = Config::default();
    let t = TransformRef::default();
    let mut tween = PropertyAnimation::rotation(&t, 10.0)
        .duration(0.1)
        .eager(&cfg)
        .unwrap();
    t.set_rotation(1000.0);
    assert!(tween.next_frame().unwrap());
    assert!(t.rotation() < 10.0);
}

#[test]
fn lazy_reads_initial_values_on_first_advance() {
    let cfg = Config::default();
    let t = TransformRef::default();
    let right = Lazy::root(t.clone()).map(|t| t.translation()) + Vec2::new(100.0, 0.0);
    let mut deferred = PropertyAnimation::translation(&t, right)
        .duration(0.5)
        .lazy(&cfg)
        .unwrap();
    t.set_translation(Vec2::new(0.0, 75.0));
    run(&mut deferred);
    assert_eq!(t.translation(), Vec2::new(100.0, 75.0));
}

#[test]
fn explicit_initial_values_override_current_state() {
    let cfg = Config::default();
    let t = TransformRef::at(Vec2::new(500.0, 500.0));
    let mut tween = PropertyAnimation::translation(&t, Vec2::new(10.0, 0.0))
        .from_values(vec![Arg::Now(Value::Vec2(Vec2::ZERO))])
        .duration(2.0 / 30.0)
        .easing(Easing::Linear)
        .eager(&cfg)
        .unwrap();
    assert!(tween.next_frame().unwrap());
    assert_eq!(t.translation(), Vec2::new(5.0, 0.0));
}

#[test]
fn full_transform_animation_writes_three_properties() {
    let cfg = Config::default();
    let t = TransformRef::default();
    let target = Transform {
        translation: Vec2::new(3.0, 4.0),
        scale: Vec2::new(2.0, 2.0),
        rotation: 90.0,
    };
    let mut tween = PropertyAnimation::transform(&t, target).eager(&cfg).unwrap();
    assert_eq!(tween.locker().pairs().len(), 3);
    tween.finish().unwrap();
    assert_eq!(t.get(), target);
}

#[test]
fn zero_duration_lands_in_one_frame() {
    let cfg = Config::default();
    let color = ColorRef::new(Rgb::BLACK);
    let mut tween = PropertyAnimation::rgb(&color, Rgb::WHITE)
        .duration(0.0)
        .eager(&cfg)
        .unwrap();
    assert!(!tween.next_frame().unwrap());
    assert_eq!(color.rgb(), Rgb::WHITE);
}

#[test]
fn size_mismatches_are_reported() {
    let cfg = Config::default();
    let t = TransformRef::default();
    let anim = PropertyAnimation::new(Rc::new(t), &["translation", "scale"], vec![Arg::Now(
        Value::Vec2(Vec2::ZERO),
    )]);
    assert!(matches!(
        anim.eager(&cfg),
        Err(SceneError::SizeMismatch {
            expected: 2,
            actual: 1
        })
    ));
}

#[test]
fn text_properties_are_not_interpolable() {
    let cfg = Config::default();
    let node = Node::text(
        "hi",
        "serif",
        12.0,
        Rc::new(crate::assets::text::ApproxMetrics),
    )
    .unwrap();
    let anim = PropertyAnimation::new(Rc::new(node), &[TEXT], vec![Arg::Now(Value::Text(
        "bye".into(),
    ))]);
    assert!(matches!(
        anim.eager(&cfg),
        Err(SceneError::NotInterpolable { .. })
    ));
}

#[test]
fn mismatched_value_types_fail_before_running() {
    let cfg = Config::default();
    let t = TransformRef::default();
    let anim = PropertyAnimation::new(Rc::new(t.clone()), &["rotation"], vec![Arg::Now(
        Value::Vec2(Vec2::ZERO),
    )]);
    assert!(matches!(
        anim.eager(&cfg),
        Err(SceneError::NotInterpolable { .. })
    ));
    assert_eq!(t.rotation(), 0.0);
}

#[test]
fn opacity_works_on_nodes_and_colors() {
    let cfg = Config::default();
    let node = Node::circle(1.0);
    let mut fade = PropertyAnimation::opacity(Rc::new(node.clone()), 0.0)
        .eager(&cfg)
        .unwrap();
    fade.finish().unwrap();
    assert_eq!(node.opacity(), 0.0);
    assert!(fade.locker().contains(node.id(), style::OPACITY));
}

#[test]
fn value_conversions_check_types() {
    assert_eq!(Value::from(2.0).kind(), "number");
    assert!(Value::Text("a".into()).into_number("x").is_err());
    assert!(
        Value::interpolate(&Value::Text("a".into()), &Value::Text("b".into()), 0.5, "t").is_err()
    );
    assert_eq!(
        Value::interpolate(&Value::Number(0.0), &Value::Number(4.0), 0.25, "n").unwrap(),
        Value::Number(1.0)
    );
}

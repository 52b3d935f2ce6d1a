use super::*;
use crate::foundation::core::Vec2;

const DT: f64 = 1.0 / 30.0;

fn pair(target: Vec2) -> (TransformRef, TransformRef) {
    (TransformRef::default(), TransformRef::at(target))
}

#[test]
fn uncapped_follower_snaps() {
    let (me, goal) = pair(Vec2::new(40.0, -3.0));
    let mut f = TranslationUpdater::new(&me, &goal).unwrap();
    f.update(0.0, DT).unwrap();
    assert_eq!(me.translation(), Vec2::new(40.0, -3.0));
}

#[test]
fn velocity_cap_bounds_each_step() {
    let (me, goal) = pair(Vec2::new(95.0, 0.0));
    let mut f = TranslationUpdater::new(&me, &goal)
        .unwrap()
        .with_max_velocity(300.0)
        .unwrap();
    f.update(0.0, DT).unwrap();
    assert!((me.translation().x - 10.0).abs() < 1e-9);

    let mut frames = 1;
    while me.translation() != goal.translation() {
        f.update(0.0, DT).unwrap();
        frames += 1;
        assert!(me.translation().x <= 95.0);
    }
    assert_eq!(frames, 10);
}

#[test]
fn accelerating_follower_never_overshoots() {
    let (me, goal) = pair(Vec2::new(0.0, 500.0));
    let mut f = TranslationUpdater::new(&me, &goal)
        .unwrap()
        .with_max_velocity(400.0)
        .unwrap()
        .with_acceleration(800.0)
        .unwrap();

    let mut last = 0.0;
    for _ in 0..600 {
        f.update(0.0, DT).unwrap();
        let y = me.translation().y;
        assert!(y <= 500.0);
        assert!(y >= last);
        assert!(f.current_speed() <= 400.0);
        last = y;
    }
    assert_eq!(me.translation(), Vec2::new(0.0, 500.0));
    assert_eq!(f.current_speed(), 0.0);
}

#[test]
fn follower_tracks_a_moving_target() {
    let (me, goal) = pair(Vec2::new(10.0, 0.0));
    let mut f = TranslationUpdater::new(&me, &goal).unwrap();
    f.update(0.0, DT).unwrap();
    goal.set_translation(Vec2::new(-5.0, 5.0));
    f.update(DT, DT).unwrap();
    assert_eq!(me.translation(), Vec2::new(-5.0, 5.0));
}

#[test]
fn caps_must_be_positive() {
    let (me, goal) = pair(Vec2::ZERO);
    assert!(
        TranslationUpdater::new(&me, &goal)
            .unwrap()
            .with_max_velocity(0.0)
            .is_err()
    );
    assert!(
        TranslationUpdater::new(&me, &goal)
            .unwrap()
            .with_acceleration(f64::NAN)
            .is_err()
    );
}

#[test]
fn locks_the_follower_translation() {
    let (me, goal) = pair(Vec2::ZERO);
    let f = TranslationUpdater::new(&me, &goal).unwrap();
    assert!(f.locker().contains(me.id(), TRANSLATION));
    assert!(!f.locker().contains(goal.id(), TRANSLATION));
}

use super::*;
use crate::animation::anim::AnimationSpec;
use crate::animation::locker::Locker;
use crate::animation::property::PropertyAnimation;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Vec2;
use crate::updater::FunctionUpdater;
use crate::updater::follow::TranslationUpdater;

fn scene(mode: SceneMode, print_initial: bool) -> (Scene, InMemorySink) {
    let cfg = Config {
        print_initial,
        ..Config::default()
    };
    let sink = InMemorySink::new();
    let scene = Scene::new(cfg, mode).unwrap().with_sink(sink.clone());
    (scene, sink)
}

#[test]
fn play_emits_one_frame_per_animation_frame() {
    let (mut scene, sink) = scene(SceneMode::Player, false);
    let dot = Node::circle(1.0);
    scene.add(&dot);
    let cfg = scene.config().clone();
    let anim = PropertyAnimation::translation(&dot.transform(), Vec2::new(1.0, 0.0))
        .duration(1.0)
        .eager(&cfg)
        .unwrap();
    assert_eq!(scene.play(anim).unwrap(), 30);
    assert_eq!(scene.finish().unwrap(), 30);
    assert_eq!(sink.len(), 30);
    assert!(sink.is_ended());
}

#[test]
fn initial_frame_is_emitted_once_on_start() {
    let (mut scene, sink) = scene(SceneMode::Player, true);
    scene.wait(Some(0.1)).unwrap();
    scene.wait(Some(0.1)).unwrap();
    assert_eq!(scene.frames_emitted(), 7);
    assert_eq!(scene.finish().unwrap(), 7);
    let indices: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(indices, (0..7).collect::<Vec<_>>());
}

#[test]
fn finishing_an_idle_scene_still_brackets_the_stream() {
    let (scene, sink) = scene(SceneMode::Player, false);
    assert_eq!(scene.finish().unwrap(), 0);
    assert!(sink.config().is_some());
    assert!(sink.is_ended());
}

#[test]
fn modes_guard_their_apis() {
    let (mut player, _) = scene(SceneMode::Player, false);
    let cfg = player.config().clone();
    let pause = NoAnimation::new(&cfg, None).unwrap();
    assert!(matches!(
        player.push_animation(pause),
        Err(SceneError::ModeMismatch(_))
    ));
    assert!(matches!(
        player.with_scope(|_| Ok(())),
        Err(SceneError::ModeMismatch(_))
    ));

    let (mut queued, _) = scene(SceneMode::Animations, false);
    let pause = NoAnimation::new(&cfg, None).unwrap();
    assert!(matches!(
        queued.play(pause),
        Err(SceneError::ModeMismatch(_))
    ));
}

#[test]
fn queued_animations_run_together() {
    let (mut scene, sink) = scene(SceneMode::Animations, false);
    let cfg = scene.config().clone();
    let a = Node::circle(1.0);
    let b = Node::circle(1.0);
    scene.add(&a);
    scene.add(&b);
    scene
        .push_animation(
            PropertyAnimation::translation(&a.transform(), Vec2::new(5.0, 0.0))
                .duration(1.0)
                .eager(&cfg)
                .unwrap(),
        )
        .unwrap();
    scene.wait(Some(0.5)).unwrap();
    let clash = PropertyAnimation::translation(&a.transform(), Vec2::ZERO)
        .eager(&cfg)
        .unwrap();
    assert!(matches!(
        scene.push_animation(clash),
        Err(SceneError::LockedProperty { .. })
    ));

    assert_eq!(scene.run().unwrap(), 30);
    assert_eq!(a.transform().translation(), Vec2::new(5.0, 0.0));
    assert_eq!(scene.run().unwrap(), 0);
    assert_eq!(sink.len(), 30);
}

#[test]
fn next_frame_steps_the_queue_one_frame_at_a_time() {
    let (mut scene, sink) = scene(SceneMode::Animations, false);
    scene.wait(Some(0.1)).unwrap();
    assert!(scene.next_frame().unwrap());
    assert!(scene.next_frame().unwrap());
    assert!(scene.next_frame().unwrap());
    assert!(!scene.next_frame().unwrap());
    assert_eq!(sink.len(), 3);

    scene.wait(Some(0.1)).unwrap();
    assert_eq!(scene.run().unwrap(), 3);
}

#[test]
fn updaters_and_animations_cannot_share_properties() {
    let (mut scene, _) = scene(SceneMode::Player, false);
    let cfg = scene.config().clone();
    let me = Node::circle(1.0);
    let leader = Node::circle(1.0);
    let follow = TranslationUpdater::new(&me.transform(), &leader.transform()).unwrap();
    let handle = scene.push_updater(follow).unwrap();

    let anim = PropertyAnimation::translation(&me.transform(), Vec2::ZERO)
        .eager(&cfg)
        .unwrap();
    assert!(matches!(
        scene.play(anim),
        Err(SceneError::LockedProperty { .. })
    ));

    assert!(scene.remove_updater(&handle));
    let anim = PropertyAnimation::translation(&me.transform(), Vec2::ZERO)
        .eager(&cfg)
        .unwrap();
    assert!(scene.play(anim).is_ok());
}

#[test]
fn queued_animations_block_conflicting_updaters() {
    let (mut scene, _) = scene(SceneMode::Animations, false);
    let cfg = scene.config().clone();
    let me = Node::circle(1.0);
    scene
        .push_animation(
            PropertyAnimation::translation(&me.transform(), Vec2::ZERO)
                .eager(&cfg)
                .unwrap(),
        )
        .unwrap();
    let writer = FunctionUpdater::new(|_: f64, _: f64| {})
        .locking(Locker::of(me.transform().id(), &["translation"]).unwrap());
    assert!(matches!(
        scene.push_updater(writer),
        Err(SceneError::LockedProperty { .. })
    ));
}

#[test]
fn updaters_run_after_animations_each_frame() {
    let (mut scene, _) = scene(SceneMode::Player, false);
    let cfg = scene.config().clone();
    let leader = Node::circle(1.0);
    let follower = Node::circle(1.0);
    scene
        .push_updater(TranslationUpdater::new(&follower.transform(), &leader.transform()).unwrap())
        .unwrap();
    let anim = PropertyAnimation::translation(&leader.transform(), Vec2::new(9.0, 9.0))
        .duration(0.1)
        .eager(&cfg)
        .unwrap();
    scene.play(anim).unwrap();
    assert_eq!(follower.transform().translation(), Vec2::new(9.0, 9.0));
}

#[test]
fn updaters_see_scene_time() {
    let (mut scene, _) = scene(SceneMode::Player, true);
    let times = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = times.clone();
    scene
        .push_updater(FunctionUpdater::new(move |t: f64, _dt: f64| {
            sink.borrow_mut().push(t)
        }))
        .unwrap();
    scene.wait(Some(0.1)).unwrap();
    let times = times.borrow();
    assert_eq!(times.len(), 3);
    assert!((times[0] - 1.0 / 30.0).abs() < 1e-12);
}

#[test]
fn scopes_drop_inner_state_and_resume_outer_queue() {
    let (mut scene, sink) = scene(SceneMode::Animations, false);
    let outer = Node::circle(1.0);
    scene.add(&outer);
    scene.wait(Some(0.1)).unwrap();

    let inside = scene
        .with_scope(|scene| {
            let inner = Node::rect(1.0, 1.0);
            scene.add(&inner);
            scene.push_updater(FunctionUpdater::new(|_: f64, _: f64| {}))?;
            scene.wait(Some(0.2))?;
            Ok(scene.drawables().len())
        })
        .unwrap();
    assert_eq!(inside, 2);
    assert_eq!(sink.len(), 6);
    assert_eq!(scene.drawables().len(), 1);
    assert!(scene.updaters().is_empty());

    assert_eq!(scene.run().unwrap(), 3);
}

#[test]
fn scopes_restore_state_on_error() {
    let (mut scene, _) = scene(SceneMode::Animations, false);
    let result: SceneResult<()> = scene.with_scope(|scene| {
        scene.add(&Node::group());
        Err(SceneError::validation("boom"))
    });
    assert!(result.is_err());
    assert!(scene.drawables().is_empty());
}

#[test]
fn drawables_register_once() {
    let (mut scene, _) = scene(SceneMode::Player, false);
    let n = Node::group();
    scene.add(&n);
    scene.add(&n);
    assert_eq!(scene.drawables().len(), 1);
    assert!(scene.remove(&n));
    assert!(!scene.remove(&n));
}

use super::*;
use crate::foundation::core::ObjectId;
use std::cell::Cell;
use std::rc::Rc;

/// Counts the internal frames it produces.
struct Ticker {
    timeline: Timeline,
    seen: Rc<Cell<u32>>,
    locker: Locker,
    pacing: Pacing,
}

fn ticker(frames: u32) -> (Ticker, Rc<Cell<u32>>) {
    let seen = Rc::new(Cell::new(0));
    let t = Ticker {
        timeline: Timeline::new(frames, Easing::Linear),
        seen: seen.clone(),
        locker: Locker::of(ObjectId::next(), &["x"]).unwrap(),
        pacing: Pacing::default(),
    };
    (t, seen)
}

impl Animation for Ticker {
    fn step(&mut self) -> SceneResult<bool> {
        if self.timeline.tick().is_none() {
            return Ok(false);
        }
        self.seen.set(self.seen.get() + 1);
        Ok(self.timeline.has_more())
    }

    fn locker(&self) -> &Locker {
        &self.locker
    }

    fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    fn pacing_mut(&mut self) -> &mut Pacing {
        &mut self.pacing
    }
}

fn external_frames(anim: &mut impl Animation) -> u32 {
    let mut n = 0;
    while anim.next_frame().unwrap() {
        n += 1;
    }
    n
}

#[test]
fn timeline_ends_on_exact_alpha_one() {
    let mut t = Timeline::new(4, Easing::Linear);
    let alphas: Vec<f64> = std::iter::from_fn(|| t.tick()).collect();
    assert_eq!(alphas, vec![0.25, 0.5, 0.75, 1.0]);
    assert_eq!(t.frame(), 4);
}

#[test]
fn zero_frame_timeline_ticks_once() {
    let mut t = Timeline::new(0, Easing::SinEase);
    assert_eq!(t.tick(), Some(1.0));
    assert!(!t.has_more());
    assert_eq!(t.tick(), None);
}

#[test]
fn n_frame_animation_reports_n_frames() {
    let (mut a, seen) = ticker(30);
    assert_eq!(external_frames(&mut a), 30);
    assert_eq!(seen.get(), 30);
    assert!(a.is_finished());
}

#[test]
fn speed_divides_external_frames() {
    for (frames, speed) in [(30, 2), (30, 4), (7, 3), (5, 5), (3, 10)] {
        let (mut a, seen) = ticker(frames);
        a.set_speed(f64::from(speed)).unwrap();
        assert_eq!(external_frames(&mut a), frames / speed, "{frames}/{speed}");
        assert_eq!(seen.get(), frames, "{frames}/{speed}");
    }
}

#[test]
fn bad_speeds_are_rejected() {
    let (mut a, _) = ticker(3);
    for bad in [0.0, -1.0, 1.5, f64::NAN, f64::INFINITY] {
        assert!(matches!(a.set_speed(bad), Err(SceneError::BadSpeed(_))));
    }
    assert_eq!(a.speed(), 1);
    let a = a.with_speed(3.0).unwrap();
    assert_eq!(a.speed(), 3);
}

#[test]
fn finished_is_absorbing() {
    let (mut a, seen) = ticker(2);
    a.finish().unwrap();
    assert!(a.is_finished());
    assert!(!a.advance().unwrap());
    assert!(!a.next_frame().unwrap());
    a.finish().unwrap();
    assert_eq!(seen.get(), 2);
    assert_eq!(a.pacing().phase(), Phase::Finished);
}

#[test]
fn compressed_animation_spans_one_frame() {
    let (a, seen) = ticker(12);
    let mut c = a.compress();
    assert!(c.next_frame().unwrap());
    assert_eq!(seen.get(), 12);
    assert!(!c.next_frame().unwrap());
    assert!(c.into_inner().is_finished());
}

#[test]
fn boxed_animations_delegate() {
    let (a, seen) = ticker(3);
    let mut boxed: Box<dyn Animation> = Box::new(a);
    assert_eq!(external_frames(&mut boxed), 3);
    assert_eq!(seen.get(), 3);
    assert!(boxed.is_finished());
}

struct Recipe {
    frames: u32,
    built: Rc<Cell<bool>>,
    seen: Rc<Cell<u32>>,
}

impl AnimationSpec for Recipe {
    type Output = Ticker;

    fn locker(&self) -> SceneResult<Locker> {
        Ok(Locker::new())
    }

    fn initialize(self, _cfg: &Config) -> SceneResult<Ticker> {
        self.built.set(true);
        let (mut t, _) = ticker(self.frames);
        t.seen = self.seen;
        Ok(t)
    }
}

#[test]
fn deferred_animations_build_on_first_advance() {
    let built = Rc::new(Cell::new(false));
    let seen = Rc::new(Cell::new(0));
    let recipe = Recipe {
        frames: 3,
        built: built.clone(),
        seen: seen.clone(),
    };
    let mut deferred = recipe.lazy(&Config::default()).unwrap();
    assert!(!built.get());
    assert!(!deferred.is_materialized());

    assert!(deferred.next_frame().unwrap());
    assert!(built.get());
    assert!(deferred.is_materialized());
    assert_eq!(deferred.inner().map(|t| t.seen.get()), Some(1));

    assert_eq!(external_frames(&mut deferred), 2);
    assert_eq!(seen.get(), 3);
}

#[test]
fn timelines_follow_configured_durations() {
    let cfg = Config::default();
    assert_eq!(
        Timeline::for_duration(&cfg, None, Easing::Linear)
            .unwrap()
            .num_frames(),
        15
    );
    assert_eq!(
        Timeline::for_duration(&cfg, Some(2.0), Easing::Linear)
            .unwrap()
            .num_frames(),
        60
    );
}

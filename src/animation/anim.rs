use tracing::debug;

use crate::animation::ease::Easing;
use crate::animation::locker::Locker;
use crate::foundation::config::Config;
use crate::foundation::error::{SceneError, SceneResult};

/// Lifecycle of an animation. `Finished` is absorbing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Fresh,
    Running,
    Finished,
}

/// Speed factor and frame accounting shared by every animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pacing {
    speed: u32,
    calls: u64,
    consumed: u64,
    phase: Phase,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            speed: 1,
            calls: 0,
            consumed: 0,
            phase: Phase::Fresh,
        }
    }
}

impl Pacing {
    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of internal advances owed for the next external frame.
    fn owed(&mut self) -> u64 {
        self.calls += 1;
        let due = u64::from(self.speed) * self.calls;
        let owed = due.saturating_sub(self.consumed);
        self.consumed = due;
        owed
    }
}

/// A time-stepped writer of object properties.
///
/// Implementors provide [`Animation::step`], which performs one internal frame of effect and
/// reports whether another follows. Everything else (phase tracking, speed, fast-forward) is
/// provided on top of it.
pub trait Animation {
    /// Produce one internal frame; `Ok(true)` iff another follows.
    fn step(&mut self) -> SceneResult<bool>;

    /// (object, property) pairs this animation writes.
    fn locker(&self) -> &Locker;

    fn pacing(&self) -> &Pacing;

    fn pacing_mut(&mut self) -> &mut Pacing;

    /// One internal frame with lifecycle tracking.
    fn advance(&mut self) -> SceneResult<bool> {
        match self.pacing().phase {
            Phase::Finished => return Ok(false),
            Phase::Fresh => self.pacing_mut().phase = Phase::Running,
            Phase::Running => {}
        }
        let more = self.step()?;
        if !more {
            self.pacing_mut().phase = Phase::Finished;
        }
        Ok(more)
    }

    /// One external frame: `speed` internal advances. `Ok(false)` once any of them reports the
    /// end of the animation.
    fn next_frame(&mut self) -> SceneResult<bool> {
        let owed = self.pacing_mut().owed();
        for _ in 0..owed {
            if !self.advance()? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Run to completion, leaving every controlled property at its terminal value.
    fn finish(&mut self) -> SceneResult<()> {
        while self.next_frame()? {}
        Ok(())
    }

    /// Set the number of internal frames collapsed into one external frame.
    fn set_speed(&mut self, speed: f64) -> SceneResult<()> {
        if !speed.is_finite() || speed <= 0.0 || speed.fract() != 0.0 || speed > f64::from(u32::MAX)
        {
            return Err(SceneError::BadSpeed(speed));
        }
        self.pacing_mut().speed = speed as u32;
        Ok(())
    }

    fn speed(&self) -> u32 {
        self.pacing().speed
    }

    fn is_finished(&self) -> bool {
        self.pacing().phase == Phase::Finished
    }

    /// Builder form of [`Animation::set_speed`].
    fn with_speed(mut self, speed: f64) -> SceneResult<Self>
    where
        Self: Sized,
    {
        self.set_speed(speed)?;
        Ok(self)
    }

    /// Collapse the whole animation into a single external frame.
    fn compress(self) -> Compressed<Self>
    where
        Self: Sized,
    {
        Compressed::new(self)
    }
}

impl<A: Animation + ?Sized> Animation for Box<A> {
    fn step(&mut self) -> SceneResult<bool> {
        (**self).step()
    }

    fn locker(&self) -> &Locker {
        (**self).locker()
    }

    fn pacing(&self) -> &Pacing {
        (**self).pacing()
    }

    fn pacing_mut(&mut self) -> &mut Pacing {
        (**self).pacing_mut()
    }

    fn advance(&mut self) -> SceneResult<bool> {
        (**self).advance()
    }

    fn next_frame(&mut self) -> SceneResult<bool> {
        (**self).next_frame()
    }
}

/// Frame counter mapping internal frames `1..=n` onto eased alphas.
#[derive(Clone, Debug)]
pub struct Timeline {
    frame: u32,
    num_frames: u32,
    easing: Easing,
}

impl Timeline {
    pub fn new(num_frames: u32, easing: Easing) -> Self {
        Self {
            frame: 0,
            num_frames,
            easing,
        }
    }

    /// Timeline of `duration` seconds (`None` defers to the configured default).
    pub fn for_duration(cfg: &Config, duration: Option<f64>, easing: Easing) -> SceneResult<Self> {
        Ok(Self::new(cfg.frames_for(duration)?, easing))
    }

    pub fn num_frames(&self) -> u32 {
        self.num_frames
    }

    /// Frames already ticked.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Alpha for the next frame, or `None` once exhausted.
    ///
    /// A zero-frame timeline yields `easing(1)` exactly once.
    pub fn tick(&mut self) -> Option<f64> {
        let n = self.num_frames.max(1);
        if self.frame >= n {
            return None;
        }
        self.frame += 1;
        Some(self.easing.apply(f64::from(self.frame) / f64::from(n)))
    }

    /// Result a step reports after ticking: zero-frame timelines end on their only tick, others
    /// end on the tick that returns `None`.
    pub fn has_more(&self) -> bool {
        self.num_frames > 0
    }
}

/// Construction recipe of an animation, split into "locker now" and "state later".
///
/// [`AnimationSpec::eager`] resolves every argument immediately; [`AnimationSpec::lazy`] fixes
/// only the locker and materializes the animation on its first advance, so that lazy arguments
/// and unspecified initial values are read from the state earlier animations left behind.
pub trait AnimationSpec: Sized + 'static {
    type Output: Animation + 'static;

    /// Pairs the animation will write. Must not depend on lazy arguments.
    fn locker(&self) -> SceneResult<Locker>;

    /// Structural checks that do not read lazy arguments.
    fn validate(&self) -> SceneResult<()> {
        Ok(())
    }

    /// Resolve arguments and build the running animation.
    fn initialize(self, cfg: &Config) -> SceneResult<Self::Output>;

    fn eager(self, cfg: &Config) -> SceneResult<Self::Output> {
        self.validate()?;
        self.initialize(cfg)
    }

    fn lazy(self, cfg: &Config) -> SceneResult<Deferred<Self>> {
        self.validate()?;
        Deferred::new(self, cfg)
    }
}

enum Stage<S: AnimationSpec> {
    Pending(S),
    Ready(S::Output),
    Failed,
}

/// Animation whose state is materialized from its spec on the first advance.
pub struct Deferred<S: AnimationSpec> {
    stage: Stage<S>,
    locker: Locker,
    cfg: Config,
    pacing: Pacing,
}

impl<S: AnimationSpec> Deferred<S> {
    fn new(spec: S, cfg: &Config) -> SceneResult<Self> {
        Ok(Self {
            locker: spec.locker()?,
            stage: Stage::Pending(spec),
            cfg: cfg.clone(),
            pacing: Pacing::default(),
        })
    }

    /// Return `true` once the first advance has built the inner animation.
    pub fn is_materialized(&self) -> bool {
        matches!(self.stage, Stage::Ready(_))
    }

    /// Inner animation, once materialized.
    pub fn inner(&self) -> Option<&S::Output> {
        match &self.stage {
            Stage::Ready(inner) => Some(inner),
            _ => None,
        }
    }
}

impl<S: AnimationSpec> Animation for Deferred<S> {
    fn step(&mut self) -> SceneResult<bool> {
        if let Stage::Pending(_) = self.stage {
            let Stage::Pending(spec) = std::mem::replace(&mut self.stage, Stage::Failed) else {
                return Ok(false);
            };
            let inner = spec.initialize(&self.cfg)?;
            debug!(
                animation = std::any::type_name::<S::Output>(),
                "materialized deferred animation"
            );
            self.stage = Stage::Ready(inner);
        }
        match &mut self.stage {
            Stage::Ready(inner) => inner.advance(),
            _ => Ok(false),
        }
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

/// Animation collapsed into one external frame.
pub struct Compressed<A> {
    inner: A,
    drained: bool,
    pacing: Pacing,
}

impl<A: Animation> Compressed<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            drained: false,
            pacing: Pacing::default(),
        }
    }

    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<A: Animation> Animation for Compressed<A> {
    fn step(&mut self) -> SceneResult<bool> {
        if self.drained {
            return Ok(false);
        }
        self.drained = true;
        self.inner.finish()?;
        Ok(true)
    }

    fn locker(&self) -> &Locker {
        self.inner.locker()
    }

    fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    fn pacing_mut(&mut self) -> &mut Pacing {
        &mut self.pacing
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;

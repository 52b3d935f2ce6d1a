use crate::animation::anim::{Animation, AnimationSpec, Pacing, Timeline};
use crate::animation::ease::Easing;
use crate::animation::locker::Locker;
use crate::animation::property::PropertyAnimation;
use crate::foundation::config::Config;
use crate::foundation::core::Rgb;
use crate::foundation::error::SceneResult;
use crate::graph::style::ColorRef;
use crate::updater::Updater;

/// Children played one after another.
///
/// Children may write the same property, so their lockers are merged with conflicts ignored.
#[derive(Default)]
pub struct Sequence {
    children: Vec<Box<dyn Animation>>,
    index: usize,
    locker: Locker,
    pacing: Pacing,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, child: impl Animation + 'static) -> SceneResult<()> {
        self.push_boxed(Box::new(child))
    }

    pub fn push_boxed(&mut self, child: Box<dyn Animation>) -> SceneResult<()> {
        self.locker.merge(child.locker(), true)?;
        self.children.push(child);
        Ok(())
    }

    /// Push `child` if present.
    pub fn push_opt(&mut self, child: Option<impl Animation + 'static>) -> SceneResult<()> {
        match child {
            Some(child) => self.push(child),
            None => Ok(()),
        }
    }

    pub fn push_all(
        &mut self,
        children: impl IntoIterator<Item = Box<dyn Animation>>,
    ) -> SceneResult<()> {
        for child in children {
            self.push_boxed(child)?;
        }
        Ok(())
    }

    /// Builder form of [`Sequence::push`].
    pub fn then(mut self, child: impl Animation + 'static) -> SceneResult<Self> {
        self.push(child)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Animation for Sequence {
    fn step(&mut self) -> SceneResult<bool> {
        while let Some(child) = self.children.get_mut(self.index) {
            if child.next_frame()? {
                return Ok(true);
            }
            self.index += 1;
        }
        Ok(false)
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

/// Children played concurrently, advanced in registration order.
///
/// Construction fails with [`crate::SceneError::LockedProperty`] when two children write the same
/// property of the same object.
#[derive(Default)]
pub struct Bundle {
    children: Vec<Box<dyn Animation>>,
    locker: Locker,
    pacing: Pacing,
}

impl std::fmt::Debug for Bundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bundle")
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, child: impl Animation + 'static) -> SceneResult<()> {
        self.push_boxed(Box::new(child))
    }

    pub fn push_boxed(&mut self, child: Box<dyn Animation>) -> SceneResult<()> {
        self.locker.merge(child.locker(), false)?;
        self.children.push(child);
        Ok(())
    }

    /// Push `child` if present.
    pub fn push_opt(&mut self, child: Option<impl Animation + 'static>) -> SceneResult<()> {
        match child {
            Some(child) => self.push(child),
            None => Ok(()),
        }
    }

    pub fn push_all(
        &mut self,
        children: impl IntoIterator<Item = Box<dyn Animation>>,
    ) -> SceneResult<()> {
        for child in children {
            self.push_boxed(child)?;
        }
        Ok(())
    }

    /// Builder form of [`Bundle::push`].
    pub fn with(mut self, child: impl Animation + 'static) -> SceneResult<Self> {
        self.push(child)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Animation for Bundle {
    fn step(&mut self) -> SceneResult<bool> {
        let mut any = false;
        for child in &mut self.children {
            any |= child.next_frame()?;
        }
        Ok(any)
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

type Callback = Box<dyn FnOnce() -> SceneResult<()>>;

/// Invoke a closure once, synchronized with the surrounding sequence.
///
/// With `consume_frame` the call occupies one frame of its own; otherwise the next animation in
/// the sequence starts on the same frame.
pub struct RunFunction {
    f: Option<Callback>,
    consume_frame: bool,
    locker: Locker,
    pacing: Pacing,
}

impl RunFunction {
    pub fn new(f: impl FnOnce() -> SceneResult<()> + 'static, consume_frame: bool) -> Self {
        Self {
            f: Some(Box::new(f)),
            consume_frame,
            locker: Locker::new(),
            pacing: Pacing::default(),
        }
    }

    /// Declare the pairs the closure writes.
    pub fn locking(mut self, locker: Locker) -> Self {
        self.locker = locker;
        self
    }
}

impl Animation for RunFunction {
    fn step(&mut self) -> SceneResult<bool> {
        match self.f.take() {
            Some(f) => {
                f()?;
                Ok(self.consume_frame)
            }
            None => Ok(false),
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

/// Wait for a duration without writing anything.
pub struct NoAnimation {
    timeline: Timeline,
    locker: Locker,
    pacing: Pacing,
}

impl NoAnimation {
    /// `duration` in seconds; `None` defers to the configured default.
    pub fn new(cfg: &Config, duration: Option<f64>) -> SceneResult<Self> {
        Ok(Self {
            timeline: Timeline::for_duration(cfg, duration, Easing::Linear)?,
            locker: Locker::new(),
            pacing: Pacing::default(),
        })
    }
}

impl Animation for NoAnimation {
    fn step(&mut self) -> SceneResult<bool> {
        Ok(self.timeline.tick().is_some() && self.timeline.has_more())
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

/// Drive an updater for a fixed duration as part of an animation tree.
///
/// The updater sees `t` measured from the animation's own first frame.
pub struct UpdaterAnimation {
    updater: Box<dyn Updater>,
    timeline: Timeline,
    dt: f64,
    locker: Locker,
    pacing: Pacing,
}

impl UpdaterAnimation {
    pub fn new(
        cfg: &Config,
        updater: impl Updater + 'static,
        duration: Option<f64>,
    ) -> SceneResult<Self> {
        Ok(Self {
            locker: updater.locker().clone(),
            updater: Box::new(updater),
            timeline: Timeline::for_duration(cfg, duration, Easing::Linear)?,
            dt: cfg.dt(),
            pacing: Pacing::default(),
        })
    }
}

impl Animation for UpdaterAnimation {
    fn step(&mut self) -> SceneResult<bool> {
        if self.timeline.tick().is_none() {
            return Ok(false);
        }
        let t = f64::from(self.timeline.frame() - 1) * self.dt;
        self.updater.update(t, self.dt)?;
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

/// Recolor `color` to `target` over the first half of `duration`, then back over the second.
///
/// The color it returns to is the one held when `flash` is called.
pub fn flash(
    cfg: &Config,
    color: &ColorRef,
    target: Rgb,
    duration: Option<f64>,
) -> SceneResult<Sequence> {
    let half = 0.5 * duration.unwrap_or(cfg.animation_duration);
    let original = color.rgb();

    let there = PropertyAnimation::rgb(color, target).duration(half);
    let back = PropertyAnimation::rgb(color, original).duration(half);

    Sequence::new()
        .then(there.lazy(cfg)?)?
        .then(back.lazy(cfg)?)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;

use crate::animation::anim::{Animation, AnimationSpec, Pacing, Timeline};
use crate::animation::ease::Easing;
use crate::animation::locker::Locker;
use crate::animation::property::Timing;
use crate::foundation::config::Config;
use crate::foundation::error::{SceneError, SceneResult};
use crate::geometry::path::Path;
use crate::graph::transform::{TRANSLATION, TransformRef};

/// Move a transform's translation along a path, by fraction of arc length.
#[derive(Clone, Debug)]
pub struct PathAnimation {
    transform: TransformRef,
    path: Path,
    timing: Timing,
}

impl PathAnimation {
    pub fn new(transform: &TransformRef, path: Path) -> Self {
        Self {
            transform: transform.clone(),
            path,
            timing: Timing::default(),
        }
    }

    pub fn duration(mut self, secs: f64) -> Self {
        self.timing.duration = Some(secs);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.timing.easing = easing;
        self
    }
}

impl AnimationSpec for PathAnimation {
    type Output = PathTween;

    fn locker(&self) -> SceneResult<Locker> {
        Locker::of(self.transform.id(), &[TRANSLATION])
    }

    fn validate(&self) -> SceneResult<()> {
        if self.path.is_empty() {
            return Err(SceneError::validation("path animation needs a non-empty path"));
        }
        Ok(())
    }

    fn initialize(self, cfg: &Config) -> SceneResult<PathTween> {
        Ok(PathTween {
            locker: self.locker()?,
            transform: self.transform,
            path: self.path,
            timeline: Timeline::for_duration(cfg, self.timing.duration, self.timing.easing)?,
            pacing: Pacing::default(),
        })
    }
}

/// Running [`PathAnimation`].
pub struct PathTween {
    transform: TransformRef,
    path: Path,
    timeline: Timeline,
    locker: Locker,
    pacing: Pacing,
}

impl Animation for PathTween {
    fn step(&mut self) -> SceneResult<bool> {
        let Some(alpha) = self.timeline.tick() else {
            return Ok(false);
        };
        self.transform
            .set_translation(self.path.point_percentage(alpha)?);
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

#[cfg(test)]
#[path = "../../tests/unit/animation/path_anim.rs"]
mod tests;

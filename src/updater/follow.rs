use crate::animation::locker::Locker;
use crate::foundation::error::{SceneError, SceneResult};
use crate::graph::transform::{TRANSLATION, TransformRef};
use crate::updater::Updater;

/// Steers one transform's translation toward another's.
///
/// Without caps the follower snaps to the target every frame. A maximum velocity bounds each
/// step; an acceleration adds a speed ramp that brakes in time to stop on the target.
#[derive(Debug)]
pub struct TranslationUpdater {
    transform: TransformRef,
    target: TransformRef,
    max_velocity: Option<f64>,
    acceleration: Option<f64>,
    current_speed: f64,
    locker: Locker,
}

impl TranslationUpdater {
    pub fn new(transform: &TransformRef, target: &TransformRef) -> SceneResult<Self> {
        Ok(Self {
            locker: Locker::of(transform.id(), &[TRANSLATION])?,
            transform: transform.clone(),
            target: target.clone(),
            max_velocity: None,
            acceleration: None,
            current_speed: 0.0,
        })
    }

    /// Cap the speed in scene units per second.
    pub fn with_max_velocity(mut self, max_velocity: f64) -> SceneResult<Self> {
        self.max_velocity = Some(positive("max_velocity", max_velocity)?);
        Ok(self)
    }

    /// Ramp the speed up and down by `acceleration` units per second squared.
    pub fn with_acceleration(mut self, acceleration: f64) -> SceneResult<Self> {
        self.acceleration = Some(positive("acceleration", acceleration)?);
        Ok(self)
    }

    /// Speed used for the most recent step when accelerating.
    pub fn current_speed(&self) -> f64 {
        self.current_speed
    }
}

impl Updater for TranslationUpdater {
    fn update(&mut self, _t: f64, dt: f64) -> SceneResult<()> {
        let position = self.transform.translation();
        let goal = self.target.translation();
        let delta = goal - position;
        let distance = delta.hypot();
        if distance == 0.0 {
            self.current_speed = 0.0;
            return Ok(());
        }

        let step = match (self.max_velocity, self.acceleration) {
            (None, None) => distance,
            (Some(v), None) => (v * dt).min(distance),
            (max_velocity, Some(a)) => {
                let stop_distance = self.current_speed * self.current_speed / (2.0 * a);
                self.current_speed = if distance > stop_distance {
                    (self.current_speed + a * dt).min(max_velocity.unwrap_or(f64::INFINITY))
                } else {
                    (self.current_speed - a * dt).max(0.0)
                };
                self.current_speed * dt
            }
        };

        if step >= distance {
            self.transform.set_translation(goal);
            self.current_speed = 0.0;
        } else {
            self.transform
                .set_translation(position + delta * (step / distance));
        }
        Ok(())
    }

    fn locker(&self) -> &Locker {
        &self.locker
    }
}

fn positive(name: &str, v: f64) -> SceneResult<f64> {
    if !v.is_finite() || v <= 0.0 {
        return Err(SceneError::validation(format!(
            "{name} must be finite and > 0, got {v}"
        )));
    }
    Ok(v)
}

#[cfg(test)]
#[path = "../../tests/unit/updater/follow.rs"]
mod tests;

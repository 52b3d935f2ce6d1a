use std::rc::Rc;

use crate::animation::anim::{Animation, AnimationSpec, Pacing, Timeline};
use crate::animation::ease::Easing;
use crate::animation::lazy::Arg;
use crate::animation::locker::Locker;
use crate::foundation::config::Config;
use crate::foundation::core::{ObjectId, Rgb, Vec2};
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::math::{Lerp, Transform};
use crate::graph::style::{self, ColorRef};
use crate::graph::transform::{self, TransformRef};

/// Dynamically typed property value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Vec2(Vec2),
    Rgb(Rgb),
    Transform(Transform),
    /// Text content; readable and writable but not interpolable.
    Text(String),
}

impl Value {
    /// Name of the value's type, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Vec2(_) => "vec2",
            Self::Rgb(_) => "rgb",
            Self::Transform(_) => "transform",
            Self::Text(_) => "text",
        }
    }

    pub fn is_interpolable(&self) -> bool {
        !matches!(self, Self::Text(_))
    }

    /// Interpolate between two values of the same interpolable type.
    pub fn interpolate(a: &Value, b: &Value, t: f64, property: &str) -> SceneResult<Value> {
        let v = match (a, b) {
            (Self::Number(a), Self::Number(b)) => Self::Number(<f64 as Lerp>::lerp(a, b, t)),
            (Self::Vec2(a), Self::Vec2(b)) => Self::Vec2(<Vec2 as Lerp>::lerp(a, b, t)),
            (Self::Rgb(a), Self::Rgb(b)) => Self::Rgb(<Rgb as Lerp>::lerp(a, b, t)),
            (Self::Transform(a), Self::Transform(b)) => {
                Self::Transform(<Transform as Lerp>::lerp(a, b, t))
            }
            _ => {
                return Err(SceneError::NotInterpolable {
                    property: property.to_owned(),
                });
            }
        };
        Ok(v)
    }

    pub fn into_number(self, property: &str) -> SceneResult<f64> {
        match self {
            Self::Number(v) => Ok(v),
            _ => Err(SceneError::property_type(property, "number")),
        }
    }

    pub fn into_vec2(self, property: &str) -> SceneResult<Vec2> {
        match self {
            Self::Vec2(v) => Ok(v),
            _ => Err(SceneError::property_type(property, "vec2")),
        }
    }

    pub fn into_rgb(self, property: &str) -> SceneResult<Rgb> {
        match self {
            Self::Rgb(v) => Ok(v),
            _ => Err(SceneError::property_type(property, "rgb")),
        }
    }

    pub fn into_text(self, property: &str) -> SceneResult<String> {
        match self {
            Self::Text(v) => Ok(v),
            _ => Err(SceneError::property_type(property, "text")),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<Vec2> for Value {
    fn from(v: Vec2) -> Self {
        Self::Vec2(v)
    }
}

impl From<Rgb> for Value {
    fn from(v: Rgb) -> Self {
        Self::Rgb(v)
    }
}

impl From<Transform> for Value {
    fn from(v: Transform) -> Self {
        Self::Transform(v)
    }
}

/// Object exposing named properties to animations and updaters.
///
/// Identity (for lockers) is [`Animatable::object_id`], never value equality.
pub trait Animatable {
    fn object_id(&self) -> ObjectId;

    fn get_property(&self, property: &str) -> SceneResult<Value>;

    fn set_property(&self, property: &str, value: Value) -> SceneResult<()>;
}

/// Duration and easing of an alpha-driven animation.
#[derive(Clone, Debug, Default)]
pub struct Timing {
    /// Seconds; `None` defers to [`Config::animation_duration`].
    pub duration: Option<f64>,
    pub easing: Easing,
}

/// Interpolate named properties of one object towards destinations.
///
/// Initial values default to whatever the object holds when the animation is built: at
/// [`AnimationSpec::eager`] time, or on the first advance for [`AnimationSpec::lazy`].
#[derive(Clone)]
pub struct PropertyAnimation {
    target: Rc<dyn Animatable>,
    properties: Vec<String>,
    destinations: Vec<Arg<Value>>,
    initials: Option<Vec<Arg<Value>>>,
    timing: Timing,
}

impl PropertyAnimation {
    pub fn new(
        target: Rc<dyn Animatable>,
        properties: &[&str],
        destinations: Vec<Arg<Value>>,
    ) -> Self {
        Self {
            target,
            properties: properties.iter().map(|p| (*p).to_owned()).collect(),
            destinations,
            initials: None,
            timing: Timing::default(),
        }
    }

    /// Move `transform`'s translation to `target`.
    pub fn translation(transform: &TransformRef, target: impl Into<Arg<Vec2>>) -> Self {
        Self::new(
            Rc::new(transform.clone()),
            &[transform::TRANSLATION],
            vec![target.into().into_value()],
        )
    }

    /// Scale `transform` to `target`.
    pub fn scale(transform: &TransformRef, target: impl Into<Arg<Vec2>>) -> Self {
        Self::new(
            Rc::new(transform.clone()),
            &[transform::SCALE],
            vec![target.into().into_value()],
        )
    }

    /// Rotate `transform` to `degrees`.
    pub fn rotation(transform: &TransformRef, degrees: impl Into<Arg<f64>>) -> Self {
        Self::new(
            Rc::new(transform.clone()),
            &[transform::ROTATION],
            vec![degrees.into().into_value()],
        )
    }

    /// Move every member of `transform` to `target`.
    pub fn transform(transform: &TransformRef, target: impl Into<Arg<Transform>>) -> Self {
        let target = target.into();
        Self::new(
            Rc::new(transform.clone()),
            &[transform::TRANSLATION, transform::SCALE, transform::ROTATION],
            vec![
                target.clone().map(|t| Value::Vec2(t.translation)),
                target.clone().map(|t| Value::Vec2(t.scale)),
                target.map(|t| Value::Number(t.rotation)),
            ],
        )
    }

    /// Fade anything exposing an `opacity` property (colors, nodes).
    pub fn opacity(target: Rc<dyn Animatable>, opacity: impl Into<Arg<f64>>) -> Self {
        Self::new(target, &[style::OPACITY], vec![opacity.into().into_value()])
    }

    /// Recolor `color` to `target`.
    pub fn rgb(color: &ColorRef, target: impl Into<Arg<Rgb>>) -> Self {
        Self::new(
            Rc::new(color.clone()),
            &[style::RGB],
            vec![target.into().into_value()],
        )
    }

    /// Explicit initial values, one per property.
    pub fn from_values(mut self, initials: Vec<Arg<Value>>) -> Self {
        self.initials = Some(initials);
        self
    }

    pub fn duration(mut self, secs: f64) -> Self {
        self.timing.duration = Some(secs);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.timing.easing = easing;
        self
    }

    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }
}

impl AnimationSpec for PropertyAnimation {
    type Output = Tween;

    fn locker(&self) -> SceneResult<Locker> {
        let props: Vec<&str> = self.properties.iter().map(String::as_str).collect();
        Locker::of(self.target.object_id(), &props)
    }

    fn validate(&self) -> SceneResult<()> {
        let expected = self.properties.len();
        if self.destinations.len() != expected {
            return Err(SceneError::SizeMismatch {
                expected,
                actual: self.destinations.len(),
            });
        }
        if let Some(initials) = &self.initials
            && initials.len() != expected
        {
            return Err(SceneError::SizeMismatch {
                expected,
                actual: initials.len(),
            });
        }
        for property in &self.properties {
            if !self.target.get_property(property)?.is_interpolable() {
                return Err(SceneError::NotInterpolable {
                    property: property.clone(),
                });
            }
        }
        Ok(())
    }

    fn initialize(self, cfg: &Config) -> SceneResult<Tween> {
        let locker = self.locker()?;
        let from = match &self.initials {
            Some(initials) => initials
                .iter()
                .map(Arg::resolve)
                .collect::<SceneResult<Vec<_>>>()?,
            None => self
                .properties
                .iter()
                .map(|p| self.target.get_property(p))
                .collect::<SceneResult<Vec<_>>>()?,
        };
        let to = self
            .destinations
            .iter()
            .map(Arg::resolve)
            .collect::<SceneResult<Vec<_>>>()?;

        for ((property, a), b) in self.properties.iter().zip(&from).zip(&to) {
            // Mismatched initial/destination types fail here rather than mid-stream.
            Value::interpolate(a, b, 0.0, property)?;
        }

        Ok(Tween {
            target: self.target,
            properties: self.properties,
            from,
            to,
            timeline: Timeline::for_duration(cfg, self.timing.duration, self.timing.easing)?,
            locker,
            pacing: Pacing::default(),
        })
    }
}

/// Running [`PropertyAnimation`].
pub struct Tween {
    target: Rc<dyn Animatable>,
    properties: Vec<String>,
    from: Vec<Value>,
    to: Vec<Value>,
    timeline: Timeline,
    locker: Locker,
    pacing: Pacing,
}

impl Tween {
    /// Values written at alpha 1.
    pub fn destinations(&self) -> &[Value] {
        &self.to
    }

    pub fn num_frames(&self) -> u32 {
        self.timeline.num_frames()
    }
}

impl Animation for Tween {
    fn step(&mut self) -> SceneResult<bool> {
        let Some(alpha) = self.timeline.tick() else {
            return Ok(false);
        };
        for ((property, a), b) in self.properties.iter().zip(&self.from).zip(&self.to) {
            let v = Value::interpolate(a, b, alpha, property)?;
            self.target.set_property(property, v)?;
        }
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
#[path = "../../tests/unit/animation/property.rs"]
mod tests;

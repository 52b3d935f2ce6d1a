use std::cell::Cell;
use std::rc::Rc;

use crate::animation::property::{Animatable, Value};
use crate::foundation::core::{ObjectId, Rgb};
use crate::foundation::error::{SceneError, SceneResult};

/// Property name of a color's channels.
pub const RGB: &str = "rgb";
/// Property name of an opacity in `[0, 1]`.
pub const OPACITY: &str = "opacity";

struct ColorInner {
    id: ObjectId,
    rgb: Cell<Rgb>,
    opacity: Cell<f64>,
}

/// Shared, animatable paint: an [`Rgb`] plus its own opacity.
#[derive(Clone)]
pub struct ColorRef(Rc<ColorInner>);

impl ColorRef {
    /// Fully opaque color.
    pub fn new(rgb: Rgb) -> Self {
        Self::with_opacity(rgb, 1.0)
    }

    /// Color with explicit opacity (clamped into `[0, 1]`).
    pub fn with_opacity(rgb: Rgb, opacity: f64) -> Self {
        Self(Rc::new(ColorInner {
            id: ObjectId::next(),
            rgb: Cell::new(rgb),
            opacity: Cell::new(clamp_opacity(opacity)),
        }))
    }

    /// Identity used by lockers.
    pub fn id(&self) -> ObjectId {
        self.0.id
    }

    /// Current channels.
    pub fn rgb(&self) -> Rgb {
        self.0.rgb.get()
    }

    /// Write the channels.
    pub fn set_rgb(&self, rgb: Rgb) {
        self.0.rgb.set(rgb);
    }

    /// Current opacity.
    pub fn opacity(&self) -> f64 {
        self.0.opacity.get()
    }

    /// Write the opacity (clamped into `[0, 1]`).
    pub fn set_opacity(&self, opacity: f64) {
        self.0.opacity.set(clamp_opacity(opacity));
    }
}

impl std::fmt::Debug for ColorRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorRef")
            .field("id", &self.0.id)
            .field("rgb", &self.rgb())
            .field("opacity", &self.opacity())
            .finish()
    }
}

impl Animatable for ColorRef {
    fn object_id(&self) -> ObjectId {
        self.id()
    }

    fn get_property(&self, property: &str) -> SceneResult<Value> {
        match property {
            RGB => Ok(Value::Rgb(self.rgb())),
            OPACITY => Ok(Value::Number(self.opacity())),
            _ => Err(SceneError::unknown_property(property)),
        }
    }

    fn set_property(&self, property: &str, value: Value) -> SceneResult<()> {
        match property {
            RGB => self.set_rgb(value.into_rgb(property)?),
            OPACITY => self.set_opacity(value.into_number(property)?),
            _ => return Err(SceneError::unknown_property(property)),
        }
        Ok(())
    }
}

/// Outline component of a drawable.
#[derive(Clone, Debug)]
pub struct Stroke {
    /// Outline paint.
    pub color: ColorRef,
    /// Outline width in scene units.
    pub width: f64,
}

impl Stroke {
    /// Stroke of `width` painted with a fresh opaque `rgb`.
    pub fn new(rgb: Rgb, width: f64) -> Self {
        Self {
            color: ColorRef::new(rgb),
            width,
        }
    }
}

/// Optional paint components owned by a drawable.
#[derive(Clone, Debug, Default)]
pub struct Style {
    /// Interior paint.
    pub fill: Option<ColorRef>,
    /// Outline paint and width.
    pub stroke: Option<Stroke>,
}

pub(crate) fn clamp_opacity(opacity: f64) -> f64 {
    if opacity.is_nan() {
        return 0.0;
    }
    opacity.clamp(0.0, 1.0)
}

use std::f64::consts::PI;
use std::rc::Rc;

/// Time-reshaping curve applied to the normalized frame fraction.
///
/// Every built-in curve maps `0 → 0` and `1 → 1` exactly.
#[derive(Clone, Default)]
pub enum Easing {
    Linear,
    /// `(1 - cos(πa)) / 2`.
    #[default]
    SinEase,
    /// `sin²(πa/2)`, the half-angle form of [`Easing::SinEase`]; used for short bounces.
    SinEase2,
    /// `6a⁵ - 15a⁴ + 10a³` (smootherstep).
    Quintic,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    /// Author-supplied curve. Endpoints are not enforced.
    Custom(Rc<dyn Fn(f64) -> f64>),
}

impl Easing {
    /// Every built-in curve, in declaration order.
    pub const BUILTIN: [Easing; 10] = [
        Easing::Linear,
        Easing::SinEase,
        Easing::SinEase2,
        Easing::Quintic,
        Easing::InQuad,
        Easing::OutQuad,
        Easing::InOutQuad,
        Easing::InCubic,
        Easing::OutCubic,
        Easing::InOutCubic,
    ];

    /// Wrap an arbitrary curve.
    pub fn custom(f: impl Fn(f64) -> f64 + 'static) -> Self {
        Self::Custom(Rc::new(f))
    }

    pub fn apply(&self, a: f64) -> f64 {
        let t = a.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::SinEase => (1.0 - (PI * t).cos()) / 2.0,
            Self::SinEase2 => (PI * t / 2.0).sin().powi(2),
            Self::Quintic => t * t * t * (t * (6.0 * t - 15.0) + 10.0),
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::Custom(f) => f(a),
        }
    }
}

impl std::fmt::Debug for Easing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Linear => "Linear",
            Self::SinEase => "SinEase",
            Self::SinEase2 => "SinEase2",
            Self::Quintic => "Quintic",
            Self::InQuad => "InQuad",
            Self::OutQuad => "OutQuad",
            Self::InOutQuad => "InOutQuad",
            Self::InCubic => "InCubic",
            Self::OutCubic => "OutCubic",
            Self::InOutCubic => "InOutCubic",
            Self::Custom(_) => "Custom",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;

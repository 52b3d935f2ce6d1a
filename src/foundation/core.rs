use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::error::{SceneError, SceneResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Absolute 0-based index of an emitted frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> SceneResult<Self> {
        if den == 0 {
            return Err(SceneError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(SceneError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds (`dt` handed to updaters).
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Number of frames an animation of `secs` seconds spans: `round(fps * secs)`.
    pub fn frames_for_secs(self, secs: f64) -> u32 {
        let frames = (secs * self.as_f64()).round();
        if frames.is_finite() && frames > 0.0 {
            frames.min(f64::from(u32::MAX)) as u32
        } else {
            0
        }
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

/// Output frame dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Logical scene dimensions in scene units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneSize {
    /// Width in scene units.
    pub width: f64,
    /// Height in scene units.
    pub height: f64,
}

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Reference identity of an animatable object.
///
/// Lockers key ownership by identity, never by value equality: two transforms holding the same
/// numbers are still different objects.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Allocate a fresh, process-unique identity.
    pub fn next() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric identity.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Build a [`Vec2`] from a slice, failing unless it has exactly two elements.
pub fn vec2_from_slice(values: &[f64]) -> SceneResult<Vec2> {
    match values {
        [x, y] => Ok(Vec2::new(*x, *y)),
        _ => Err(SceneError::SizeMismatch {
            expected: 2,
            actual: values.len(),
        }),
    }
}

/// Element-wise product.
pub fn vec2_mul(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(a.x * b.x, a.y * b.y)
}

/// Element-wise quotient; any zero component in `b` is an error.
pub fn vec2_div(a: Vec2, b: Vec2) -> SceneResult<Vec2> {
    if b.x == 0.0 || b.y == 0.0 {
        return Err(SceneError::DivisionByZero);
    }
    Ok(Vec2::new(a.x / b.x, a.y / b.y))
}

/// 8-bit RGB color.
///
/// Addition and subtraction saturate per channel; scalar multiplication rounds then clamps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Black.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// White.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Build a color from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a slice of exactly three channels.
    pub fn from_slice(values: &[u8]) -> SceneResult<Self> {
        match values {
            [r, g, b] => Ok(Self::new(*r, *g, *b)),
            _ => Err(SceneError::SizeMismatch {
                expected: 3,
                actual: values.len(),
            }),
        }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> SceneResult<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(SceneError::validation(format!("invalid hex color '{hex}'")));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| SceneError::validation(format!("invalid hex color '{hex}'")))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb` representation used in SVG attributes.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channel-wise division; any zero divisor channel is an error.
    pub fn checked_div(self, rhs: Rgb) -> SceneResult<Rgb> {
        if rhs.r == 0 || rhs.g == 0 || rhs.b == 0 {
            return Err(SceneError::DivisionByZero);
        }
        Ok(Self::new(self.r / rhs.r, self.g / rhs.g, self.b / rhs.b))
    }

    /// Channels as an array, in `r, g, b` order.
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl std::ops::Add for Rgb {
    type Output = Rgb;

    fn add(self, rhs: Rgb) -> Rgb {
        Rgb::new(
            self.r.saturating_add(rhs.r),
            self.g.saturating_add(rhs.g),
            self.b.saturating_add(rhs.b),
        )
    }
}

impl std::ops::Sub for Rgb {
    type Output = Rgb;

    fn sub(self, rhs: Rgb) -> Rgb {
        Rgb::new(
            self.r.saturating_sub(rhs.r),
            self.g.saturating_sub(rhs.g),
            self.b.saturating_sub(rhs.b),
        )
    }
}

impl std::ops::Mul<f64> for Rgb {
    type Output = Rgb;

    fn mul(self, k: f64) -> Rgb {
        fn scale(c: u8, k: f64) -> u8 {
            (f64::from(c) * k).round().clamp(0.0, 255.0) as u8
        }
        Rgb::new(scale(self.r, k), scale(self.g, k), scale(self.b, k))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

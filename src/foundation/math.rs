use crate::foundation::core::{Affine, Rgb, Vec2, vec2_div, vec2_mul};
use crate::foundation::error::{SceneError, SceneResult};

/// Interpolation contract for animatable value types.
///
/// Implementations must return `a` exactly at `t == 0` and `b` exactly at `t == 1`, so that a
/// finished animation lands on its destination without floating drift.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a * (1.0 - t) + b * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(
            <f64 as Lerp>::lerp(&a.x, &b.x, t),
            <f64 as Lerp>::lerp(&a.y, &b.y, t),
        )
    }
}

impl Lerp for Rgb {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            <f64 as Lerp>::lerp(&f64::from(a), &f64::from(b), t)
                .round()
                .clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
        }
    }
}

impl Lerp for Transform {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            translation: <Vec2 as Lerp>::lerp(&a.translation, &b.translation, t),
            scale: <Vec2 as Lerp>::lerp(&a.scale, &b.scale, t),
            rotation: <f64 as Lerp>::lerp(&a.rotation, &b.rotation, t),
        }
    }
}

/// Rotate `v` by `degrees` (clockwise on screen, since SVG's y axis points down).
pub fn rotate_vec2(v: Vec2, degrees: f64) -> Vec2 {
    if degrees == 0.0 {
        return v;
    }
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// 2D placement: translation, per-axis scale and rotation in degrees.
///
/// Applied to a vector as `translation + R(rotation)(scale * v)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    /// Translation in parent space.
    pub translation: Vec2,
    /// Per-axis scale factors.
    pub scale: Vec2,
    /// Rotation in degrees.
    pub rotation: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Transform = Transform {
        translation: Vec2::ZERO,
        scale: Vec2::new(1.0, 1.0),
        rotation: 0.0,
    };

    /// Pure translation.
    pub fn translate(translation: Vec2) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Map a point from local into parent space.
    pub fn apply(&self, v: Vec2) -> Vec2 {
        self.translation + rotate_vec2(vec2_mul(self.scale, v), self.rotation)
    }

    /// Exact inverse of [`Transform::apply`].
    pub fn apply_inverse(&self, v: Vec2) -> SceneResult<Vec2> {
        vec2_div(rotate_vec2(v - self.translation, -self.rotation), self.scale)
    }

    /// `self ∘ other`: apply `other` first, then `self`.
    pub fn compose(&self, other: &Transform) -> Transform {
        Transform {
            translation: self.apply(other.translation),
            scale: vec2_mul(self.scale, other.scale),
            rotation: self.rotation + other.rotation,
        }
    }

    /// Inverse under [`Transform::compose`].
    ///
    /// Exact when the scale is uniform; with non-uniform scale and non-zero rotation the
    /// translation/scale/rotation form cannot represent the inverse and only the origin is
    /// guaranteed to round-trip. Use [`Transform::apply_inverse`] for exact point mapping.
    pub fn inverse(&self) -> SceneResult<Transform> {
        let inv_scale = vec2_div(Vec2::new(1.0, 1.0), self.scale)?;
        let rotation = -self.rotation;
        let translation = -rotate_vec2(vec2_mul(inv_scale, self.translation), rotation);
        Ok(Transform {
            translation,
            scale: inv_scale,
            rotation,
        })
    }

    /// Largest absolute scale component; scales circumscribed radii.
    pub fn max_scale(&self) -> f64 {
        self.scale.x.abs().max(self.scale.y.abs())
    }

    /// Equivalent affine matrix, `T(translation) * R(rotation) * S(scale)`.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translation)
            * Affine::rotate(self.rotation.to_radians())
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }

    /// Reject non-finite members.
    pub fn validate(&self) -> SceneResult<()> {
        let finite =
            self.translation.is_finite() && self.scale.is_finite() && self.rotation.is_finite();
        if !finite {
            return Err(SceneError::validation("transform members must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;

use crate::foundation::core::{Point, Rect, Vec2};
use crate::foundation::math::Transform;

/// Reference point of a drawable's bounding rectangle that is moved onto the local origin.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Anchor {
    /// Geometry is drawn where its kind places it; no shift.
    #[default]
    Default,
    /// Top-left corner.
    TopLeft,
    /// Middle of the top edge.
    Top,
    /// Top-right corner.
    TopRight,
    /// Middle of the right edge.
    Right,
    /// Bottom-right corner.
    BottomRight,
    /// Middle of the bottom edge.
    Bottom,
    /// Bottom-left corner.
    BottomLeft,
    /// Middle of the left edge.
    Left,
    /// Rectangle center.
    Center,
}

/// Axis-aligned bounding rectangle plus circumscribed radius, with named boundary points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shape {
    /// Bounding rectangle (`y` grows downward).
    pub bounds: Rect,
    /// Circumscribed radius.
    pub radius: f64,
}

impl Default for Shape {
    fn default() -> Self {
        Self::from_rect(Rect::ZERO)
    }
}

impl Shape {
    /// Shape of `rect` with radius half its diagonal.
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self {
            bounds: rect,
            radius: 0.5 * rect.width().hypot(rect.height()),
        }
    }

    /// Shape spanning `min..max`.
    pub fn from_corners(min: Vec2, max: Vec2) -> Self {
        Self::from_rect(Rect::from_points(min.to_point(), max.to_point()))
    }

    /// Rectangle width.
    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    /// Rectangle height.
    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.bounds.x0, self.bounds.y0)
    }

    pub fn top(&self) -> Vec2 {
        Vec2::new(self.mid_x(), self.bounds.y0)
    }

    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.bounds.x1, self.bounds.y0)
    }

    pub fn right(&self) -> Vec2 {
        Vec2::new(self.bounds.x1, self.mid_y())
    }

    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.bounds.x1, self.bounds.y1)
    }

    pub fn bottom(&self) -> Vec2 {
        Vec2::new(self.mid_x(), self.bounds.y1)
    }

    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.bounds.x0, self.bounds.y1)
    }

    pub fn left(&self) -> Vec2 {
        Vec2::new(self.bounds.x0, self.mid_y())
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.mid_x(), self.mid_y())
    }

    /// Boundary point selected by `anchor`; `None` for [`Anchor::Default`].
    pub fn point(&self, anchor: Anchor) -> Option<Vec2> {
        let p = match anchor {
            Anchor::Default => return None,
            Anchor::TopLeft => self.top_left(),
            Anchor::Top => self.top(),
            Anchor::TopRight => self.top_right(),
            Anchor::Right => self.right(),
            Anchor::BottomRight => self.bottom_right(),
            Anchor::Bottom => self.bottom(),
            Anchor::BottomLeft => self.bottom_left(),
            Anchor::Left => self.left(),
            Anchor::Center => self.center(),
        };
        Some(p)
    }

    /// Offset that moves the `anchor` point onto the origin.
    pub fn anchor_offset(&self, anchor: Anchor) -> Vec2 {
        self.point(anchor).map(|p| -p).unwrap_or(Vec2::ZERO)
    }

    /// Same shape moved by `offset`.
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            bounds: self.bounds + offset,
            radius: self.radius,
        }
    }

    /// Axis-aligned bounds of this shape's corners under `transform`.
    ///
    /// The radius is carried over scaled by the largest scale component.
    pub fn transformed(&self, transform: &Transform) -> Self {
        let corners = [
            self.top_left(),
            self.top_right(),
            self.bottom_right(),
            self.bottom_left(),
        ];
        let mut bounds: Option<Rect> = None;
        for corner in corners {
            let p: Point = transform.apply(corner).to_point();
            bounds = Some(match bounds {
                None => Rect::from_points(p, p),
                Some(r) => r.union_pt(p),
            });
        }
        Self {
            bounds: bounds.unwrap_or(Rect::ZERO),
            radius: self.radius * transform.max_scale(),
        }
    }

    /// Smallest shape covering both.
    pub fn union(&self, other: &Shape) -> Self {
        Self::from_rect(self.bounds.union(other.bounds))
    }

    fn mid_x(&self) -> f64 {
        0.5 * (self.bounds.x0 + self.bounds.x1)
    }

    fn mid_y(&self) -> f64 {
        0.5 * (self.bounds.y0 + self.bounds.y1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/shape.rs"]
mod tests;

use std::fmt::Write as _;

use kurbo::{ParamCurve, ParamCurveDeriv, QuadBez};

use crate::foundation::core::{Rect, Vec2};
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::math::Lerp;

const QUAD_LENGTH_SAMPLES: usize = 1001;
const QUAD_BOUNDS_SAMPLES: usize = 25;

/// One piece of a [`Path`], in absolute (un-offset) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    /// Start a new subpath at a point.
    MoveTo(Vec2),
    /// Straight line to a point.
    LineTo(Vec2),
    /// Quadratic Bézier through a control point.
    Quad {
        /// Control point.
        ctrl: Vec2,
        /// End point.
        end: Vec2,
    },
    /// Straight line back to the most recent `MoveTo` target.
    Close(Vec2),
}

impl Segment {
    /// Point where the segment ends.
    pub fn end(&self) -> Vec2 {
        match *self {
            Segment::MoveTo(p) | Segment::LineTo(p) | Segment::Close(p) => p,
            Segment::Quad { end, .. } => end,
        }
    }

    /// Arc length when drawn from `start`. Moves have no length.
    pub fn length(&self, start: Vec2) -> f64 {
        match *self {
            Segment::MoveTo(_) => 0.0,
            Segment::LineTo(p) | Segment::Close(p) => (p - start).hypot(),
            Segment::Quad { ctrl, end } => quad_length(start, ctrl, end),
        }
    }

    /// Point at `t ∈ [0, 1]` along the segment drawn from `start`.
    pub fn point_at(&self, start: Vec2, t: f64) -> Vec2 {
        match *self {
            Segment::MoveTo(p) => p,
            Segment::LineTo(p) | Segment::Close(p) => <Vec2 as Lerp>::lerp(&start, &p, t),
            Segment::Quad { ctrl, end } => quad_bez(start, ctrl, end).eval(t).to_vec2(),
        }
    }
}

/// Piecewise `M`/`L`/`Q`/`Z` path with arc-length queries.
///
/// Built fluently; every append updates the running bounding box. The offset set through
/// [`Path::set_offset`] is absolute, applied on top of the coordinates the segments were built
/// with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    segments: Vec<Segment>,
    bounds: Option<Rect>,
    offset: Vec2,
    last_move: Option<Vec2>,
}

impl Path {
    /// Empty path.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        let p = Vec2::new(x, y);
        self.last_move = Some(p);
        self.push(Segment::MoveTo(p));
        self
    }

    /// Line from the current point. Without a preceding move the path starts at the origin.
    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.push(Segment::LineTo(Vec2::new(x, y)));
        self
    }

    pub fn quad(mut self, cx: f64, cy: f64, x: f64, y: f64) -> Self {
        self.push(Segment::Quad {
            ctrl: Vec2::new(cx, cy),
            end: Vec2::new(x, y),
        });
        self
    }

    /// Close the current subpath back to the most recent move target.
    pub fn close(mut self) -> Self {
        let target = self.last_move.unwrap_or(Vec2::ZERO);
        self.push(Segment::Close(target));
        self
    }

    /// Copy of this path translated by `(dx, dy)` relative to the original coordinates.
    pub fn set_offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            offset: Vec2::new(dx, dy),
            ..self.clone()
        }
    }

    /// Current absolute offset.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Segments in build order, without offset applied.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Bounding box over every control point and sampled curve point, offset applied.
    pub fn bounds(&self) -> Rect {
        self.bounds.unwrap_or(Rect::ZERO) + self.offset
    }

    /// First point of the path.
    pub fn start(&self) -> Vec2 {
        let first = match self.segments.first() {
            Some(Segment::MoveTo(p)) => *p,
            _ => Vec2::ZERO,
        };
        first + self.offset
    }

    /// Last point of the path.
    pub fn end(&self) -> Vec2 {
        self.segments.last().map(Segment::end).unwrap_or(Vec2::ZERO) + self.offset
    }

    /// Total arc length.
    pub fn arc_length(&self) -> f64 {
        let mut current = Vec2::ZERO;
        let mut total = 0.0;
        for seg in &self.segments {
            total += seg.length(current);
            current = seg.end();
        }
        total
    }

    /// Point reached after walking `length` along the path.
    pub fn point(&self, length: f64) -> SceneResult<Vec2> {
        let total = self.arc_length();
        if length.is_nan() || length < 0.0 || length > total + 1e-9 * total.max(1.0) {
            return Err(SceneError::out_of_bounds(format!(
                "path length {length} outside [0, {total}]"
            )));
        }

        let mut remaining = length;
        let mut current = Vec2::ZERO;
        for seg in &self.segments {
            let seg_len = seg.length(current);
            if seg_len > 0.0 && remaining <= seg_len {
                return Ok(seg.point_at(current, remaining / seg_len) + self.offset);
            }
            remaining -= seg_len;
            current = seg.end();
        }
        Ok(self.end())
    }

    /// Point at fraction `p` of the total length; `p` is clamped into `[0, 1]`.
    pub fn point_percentage(&self, p: f64) -> SceneResult<Vec2> {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        if p == 1.0 {
            return Ok(self.end());
        }
        self.point(p * self.arc_length())
    }

    /// SVG path data (`d` attribute), offset applied.
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();
        let o = self.offset;
        for seg in &self.segments {
            if !d.is_empty() {
                d.push(' ');
            }
            let _ = match *seg {
                Segment::MoveTo(p) => write!(d, "M {} {}", p.x + o.x, p.y + o.y),
                Segment::LineTo(p) => write!(d, "L {} {}", p.x + o.x, p.y + o.y),
                Segment::Quad { ctrl, end } => write!(
                    d,
                    "Q {} {} {} {}",
                    ctrl.x + o.x,
                    ctrl.y + o.y,
                    end.x + o.x,
                    end.y + o.y
                ),
                Segment::Close(_) => write!(d, "Z"),
            };
        }
        d
    }

    fn push(&mut self, seg: Segment) {
        let start = self.segments.last().map(Segment::end).unwrap_or(Vec2::ZERO);
        match seg {
            Segment::MoveTo(p) | Segment::LineTo(p) | Segment::Close(p) => {
                if !matches!(seg, Segment::MoveTo(_)) {
                    self.include(start);
                }
                self.include(p);
            }
            Segment::Quad { ctrl, end } => {
                self.include(start);
                self.include(ctrl);
                let curve = quad_bez(start, ctrl, end);
                for i in 0..QUAD_BOUNDS_SAMPLES {
                    let t = i as f64 / (QUAD_BOUNDS_SAMPLES - 1) as f64;
                    self.include(curve.eval(t).to_vec2());
                }
            }
        }
        self.segments.push(seg);
    }

    fn include(&mut self, p: Vec2) {
        let p = p.to_point();
        self.bounds = Some(match self.bounds {
            None => Rect::from_points(p, p),
            Some(r) => r.union_pt(p),
        });
    }
}

fn quad_bez(p0: Vec2, ctrl: Vec2, p1: Vec2) -> QuadBez {
    QuadBez::new(p0.to_point(), ctrl.to_point(), p1.to_point())
}

/// Trapezoid integration of `|B'(t)|` over equally spaced samples.
fn quad_length(p0: Vec2, ctrl: Vec2, p1: Vec2) -> f64 {
    let velocity = quad_bez(p0, ctrl, p1).deriv();
    let speed = |t: f64| velocity.eval(t).to_vec2().hypot();
    let n = QUAD_LENGTH_SAMPLES - 1;
    let h = 1.0 / n as f64;
    let mut sum = 0.5 * (speed(0.0) + speed(1.0));
    for i in 1..n {
        sum += speed(i as f64 * h);
    }
    sum * h
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/path.rs"]
mod tests;

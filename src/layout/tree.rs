use crate::foundation::core::Vec2;
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::math::Transform;

/// Placement of a complete binary tree stored heap-style in an array.
///
/// Node `i` has children `2i + 1` and `2i + 2`. Level `l` holds `2^l` slots spread evenly over
/// `width`, centred on `x = 0`; the root sits at `y = 0` and each level is `level_height` lower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BinaryTreeOrganizer {
    depth: u32,
    width: f64,
    level_height: f64,
}

impl BinaryTreeOrganizer {
    /// Tree with `depth` levels (`1..=31`).
    pub fn new(depth: u32, width: f64, level_height: f64) -> SceneResult<Self> {
        if depth == 0 || depth > 31 {
            return Err(SceneError::validation("tree depth must be in 1..=31"));
        }
        if !(width.is_finite() && width > 0.0) || !level_height.is_finite() {
            return Err(SceneError::validation(
                "tree width must be finite and > 0, level height finite",
            ));
        }
        Ok(Self {
            depth,
            width,
            level_height,
        })
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of slots: `2^depth - 1`.
    pub fn capacity(&self) -> usize {
        (1usize << self.depth) - 1
    }

    /// Level of slot `i` (root is level 0).
    pub fn level(&self, i: usize) -> SceneResult<u32> {
        self.check(i)?;
        Ok((i + 1).ilog2())
    }

    /// Translation of slot `i`.
    pub fn transform(&self, i: usize) -> SceneResult<Transform> {
        let level = self.level(i)?;
        let first = (1usize << level) - 1;
        let pos = (i - first) as f64;
        let slot_width = self.width / f64::from(1u32 << level);
        Ok(Transform::translate(Vec2::new(
            (pos + 0.5) * slot_width - self.width / 2.0,
            f64::from(level) * self.level_height,
        )))
    }

    /// Parent slot; `None` for the root.
    pub fn parent(&self, i: usize) -> SceneResult<Option<usize>> {
        self.check(i)?;
        Ok(i.checked_sub(1).map(|j| j / 2))
    }

    /// Left child slot, if inside the tree.
    pub fn left(&self, i: usize) -> SceneResult<Option<usize>> {
        self.check(i)?;
        Ok(Some(2 * i + 1).filter(|&c| c < self.capacity()))
    }

    /// Right child slot, if inside the tree.
    pub fn right(&self, i: usize) -> SceneResult<Option<usize>> {
        self.check(i)?;
        Ok(Some(2 * i + 2).filter(|&c| c < self.capacity()))
    }

    fn check(&self, i: usize) -> SceneResult<()> {
        if i >= self.capacity() {
            return Err(SceneError::out_of_bounds(format!(
                "tree slot {i} outside 0..{}",
                self.capacity()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/tree.rs"]
mod tests;

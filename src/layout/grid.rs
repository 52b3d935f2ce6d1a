use crate::foundation::core::Vec2;
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::math::Transform;

/// Grid of `rows × cols` equal cells centred on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridOrganizer {
    rows: usize,
    cols: usize,
    cell_width: f64,
    cell_height: f64,
}

impl GridOrganizer {
    pub fn new(rows: usize, cols: usize, cell_width: f64, cell_height: f64) -> SceneResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(SceneError::validation("grid needs at least one row and column"));
        }
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(cell_width) || !valid(cell_height) {
            return Err(SceneError::validation("grid cell size must be finite and > 0"));
        }
        Ok(Self {
            rows,
            cols,
            cell_width,
            cell_height,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Translation to the centre of cell `(row, col)`.
    pub fn transform_at(&self, row: usize, col: usize) -> SceneResult<Transform> {
        if row >= self.rows || col >= self.cols {
            return Err(SceneError::out_of_bounds(format!(
                "cell ({row}, {col}) outside a {}x{} grid",
                self.rows, self.cols
            )));
        }
        let total_w = self.cell_width * self.cols as f64;
        let total_h = self.cell_height * self.rows as f64;
        Ok(Transform::translate(Vec2::new(
            (col as f64 + 0.5) * self.cell_width - total_w / 2.0,
            (row as f64 + 0.5) * self.cell_height - total_h / 2.0,
        )))
    }

    /// Translation to the `i`-th cell in row-major order.
    pub fn index(&self, i: usize) -> SceneResult<Transform> {
        if i >= self.len() {
            return Err(SceneError::out_of_bounds(format!(
                "grid index {i} outside 0..{}",
                self.len()
            )));
        }
        self.transform_at(i / self.cols, i % self.cols)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;

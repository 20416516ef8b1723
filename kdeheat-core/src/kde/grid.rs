use crate::foundation::core::{Extent, PointSet};
use crate::foundation::error::{HeatError, HeatResult};

/// Upper bound on lattice cells; larger grids are rejected before allocation.
pub const MAX_GRID_CELLS: usize = 1 << 24;

// Step ratios within this many ULPs of an integer are treated as exact multiples.
const STEP_SNAP_ULPS: f64 = 4.0;

/// Regular lattice of cell centers, stored as its two axis sequences.
///
/// Rows are indexed by y and columns by x; row 0 holds the smallest y. Adjacent centers are
/// exactly `step` apart and every center is `origin + k * step`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    step: f64,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Grid {
    /// Spacing between adjacent centers.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of columns (x-steps).
    pub fn cols(&self) -> usize {
        self.xs.len()
    }

    /// Number of rows (y-steps).
    pub fn rows(&self) -> usize {
        self.ys.len()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.xs.len() * self.ys.len()
    }

    /// `true` when the grid has no cells. Grids built by [`build_grid`] never are.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// X coordinate of every column, ascending.
    pub fn x_axis(&self) -> &[f64] {
        &self.xs
    }

    /// Y coordinate of every row, ascending.
    pub fn y_axis(&self) -> &[f64] {
        &self.ys
    }

    /// Center of cell `(row, col)`.
    pub fn center(&self, row: usize, col: usize) -> (f64, f64) {
        (self.xs[col], self.ys[row])
    }

    /// Rectangle spanned by the first and last centers.
    pub fn span(&self) -> Extent {
        Extent {
            x_min: self.xs[0],
            x_max: self.xs[self.xs.len() - 1],
            y_min: self.ys[0],
            y_max: self.ys[self.ys.len() - 1],
        }
    }

    /// Expand to the full row-major coordinate arrays `(x_mesh, y_mesh)`.
    pub fn mesh(&self) -> (Vec<f64>, Vec<f64>) {
        let mut x_mesh = Vec::with_capacity(self.len());
        let mut y_mesh = Vec::with_capacity(self.len());
        for &y in &self.ys {
            x_mesh.extend_from_slice(&self.xs);
            y_mesh.extend(std::iter::repeat_n(y, self.xs.len()));
        }
        (x_mesh, y_mesh)
    }
}

/// Validate the two numeric estimation parameters.
pub fn validate_grid_params(grid_size: f64, bandwidth: f64) -> HeatResult<()> {
    if !grid_size.is_finite() || grid_size <= 0.0 {
        return Err(HeatError::invalid_parameter(format!(
            "grid_size must be a finite value > 0, got {grid_size}"
        )));
    }
    if !bandwidth.is_finite() || bandwidth <= 0.0 {
        return Err(HeatError::invalid_parameter(format!(
            "bandwidth must be a finite value > 0, got {bandwidth}"
        )));
    }
    Ok(())
}

/// Build the lattice over the points' bounding box padded by `bandwidth` on every side.
///
/// Parameters are validated before the points are inspected. Each axis starts at `min - bandwidth`
/// and runs in `grid_size` steps until it reaches `max + bandwidth`; when the padded range is not
/// a multiple of `grid_size` the last center overshoots by less than one step.
pub fn build_grid(points: &PointSet, grid_size: f64, bandwidth: f64) -> HeatResult<Grid> {
    validate_grid_params(grid_size, bandwidth)?;
    if points.is_empty() {
        return Err(HeatError::empty_input(
            "cannot derive a grid from zero points",
        ));
    }
    points.ensure_finite()?;
    let bounds = points
        .bounds()
        .ok_or_else(|| HeatError::empty_input("cannot derive a grid from zero points"))?;
    build_grid_over(bounds, grid_size, bandwidth)
}

/// Build the lattice over a fixed extent padded by `bandwidth`.
///
/// Used when several heatmaps must share identical dimensions. Points are not consulted, so a
/// point outside the padded extent contributes to no cell.
pub fn build_grid_over(extent: Extent, grid_size: f64, bandwidth: f64) -> HeatResult<Grid> {
    validate_grid_params(grid_size, bandwidth)?;
    extent.validate()?;
    let padded = extent.padded(bandwidth);

    let cols = axis_len(padded.x_min, padded.x_max, grid_size)?;
    let rows = axis_len(padded.y_min, padded.y_max, grid_size)?;
    let cells = cols.checked_mul(rows).filter(|&c| c <= MAX_GRID_CELLS);
    if cells.is_none() {
        return Err(HeatError::invalid_parameter(format!(
            "grid of {cols}x{rows} cells exceeds the limit of {MAX_GRID_CELLS}; increase grid_size"
        )));
    }

    tracing::debug!(cols, rows, grid_size, bandwidth, "built grid");
    Ok(Grid {
        step: grid_size,
        xs: axis(padded.x_min, cols, grid_size),
        ys: axis(padded.y_min, rows, grid_size),
    })
}

fn axis_len(origin: f64, end: f64, step: f64) -> HeatResult<usize> {
    let range = end - origin;
    let ratio = range / step;
    if !ratio.is_finite() || ratio > MAX_GRID_CELLS as f64 {
        return Err(HeatError::invalid_parameter(format!(
            "axis range {range} with grid_size {step} exceeds the limit of {MAX_GRID_CELLS} cells"
        )));
    }
    let nearest = ratio.round();
    let snapped = (ratio - nearest).abs() <= STEP_SNAP_ULPS * f64::EPSILON * nearest.max(1.0);
    let mut steps = if snapped { nearest } else { ratio.ceil() };
    if range > 0.0 {
        steps = steps.max(1.0);
    }
    // The last center is computed as `origin + steps * step`; its rounding must not fall short.
    if !snapped && origin + steps * step < end {
        steps += 1.0;
    }
    Ok(steps as usize + 1)
}

fn axis(origin: f64, len: usize, step: f64) -> Vec<f64> {
    (0..len).map(|k| origin + (k as f64) * step).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/kde/grid.rs"]
mod tests;

use rayon::prelude::*;

use crate::foundation::core::PointSet;
use crate::foundation::error::{HeatError, HeatResult};
use crate::kde::field::Field2D;
use crate::kde::grid::Grid;
use crate::kde::kernel::quartic_from_u2;

/// Sum the quartic kernel contribution of every point at every cell center.
///
/// Rows are evaluated in parallel; within a cell the points are summed in input order, so the
/// result is bit-identical to [`estimate_intensity_sequential`] and stable across thread counts.
pub fn estimate_intensity(points: &PointSet, grid: &Grid, bandwidth: f64) -> HeatResult<Field2D> {
    check_inputs(points, bandwidth)?;
    let mut field = Field2D::zeros(grid.cols(), grid.rows());
    let cols = grid.cols();
    field
        .data_mut()
        .par_chunks_mut(cols)
        .zip(grid.y_axis().par_iter())
        .for_each(|(row, &cy)| accumulate_row(row, cy, grid.x_axis(), points, bandwidth));
    Ok(field)
}

/// Single-threaded variant of [`estimate_intensity`].
pub fn estimate_intensity_sequential(
    points: &PointSet,
    grid: &Grid,
    bandwidth: f64,
) -> HeatResult<Field2D> {
    check_inputs(points, bandwidth)?;
    let mut field = Field2D::zeros(grid.cols(), grid.rows());
    let cols = grid.cols();
    for (row, &cy) in field.data_mut().chunks_mut(cols).zip(grid.y_axis()) {
        accumulate_row(row, cy, grid.x_axis(), points, bandwidth);
    }
    Ok(field)
}

fn check_inputs(points: &PointSet, bandwidth: f64) -> HeatResult<()> {
    if !bandwidth.is_finite() || bandwidth <= 0.0 {
        return Err(HeatError::invalid_parameter(format!(
            "bandwidth must be a finite value > 0, got {bandwidth}"
        )));
    }
    if points.is_empty() {
        return Err(HeatError::empty_input("no points to estimate density from"));
    }
    Ok(())
}

// Points whose vertical offset already exceeds the bandwidth add exactly 0.0 to every cell of the
// row, so dropping them up front leaves each sum bit-for-bit unchanged.
fn accumulate_row(out: &mut [f64], cy: f64, xs: &[f64], points: &PointSet, bandwidth: f64) {
    let h2 = bandwidth * bandwidth;
    let near: Vec<(f64, f64)> = points
        .iter()
        .filter_map(|(px, py)| {
            let dy = cy - py;
            let dy2 = dy * dy;
            (dy2 <= h2).then_some((px, dy2))
        })
        .collect();
    if near.is_empty() {
        return;
    }

    for (cell, &cx) in out.iter_mut().zip(xs) {
        let mut acc = 0.0;
        for &(px, dy2) in &near {
            let dx = cx - px;
            let d2 = dx * dx + dy2;
            if d2 <= h2 {
                acc += quartic_from_u2(d2 / h2);
            }
        }
        *cell = acc;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kde/intensity.rs"]
mod tests;

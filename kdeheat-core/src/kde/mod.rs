//! Kernel density estimation over a regular grid.
//!
//! Stages run leaves first: `kernel` evaluates one contribution, `grid` lays out cell centers
//! around the points, `intensity` sums every point into every cell and `normalize` rescales
//! the result to `[0, 1]`.

pub(crate) mod field;
pub(crate) mod grid;
pub(crate) mod intensity;
pub(crate) mod kernel;
pub(crate) mod normalize;

use crate::foundation::core::PointSet;
use crate::foundation::error::{HeatError, HeatResult};

/// Displacement applied along one axis.
#[derive(Clone, Debug, PartialEq)]
pub enum Delta {
    /// One offset per point, in point order.
    PerPoint(Vec<f64>),
    /// The same offset for every point.
    Uniform(f64),
}

impl Delta {
    fn apply(&self, axis: &'static str, coords: &[f64]) -> HeatResult<Vec<f64>> {
        match self {
            Delta::Uniform(d) => Ok(coords.iter().map(|c| c + d).collect()),
            Delta::PerPoint(ds) => {
                if ds.len() != coords.len() {
                    return Err(HeatError::data(format!(
                        "{axis} delta has {} values for {} points",
                        ds.len(),
                        coords.len()
                    )));
                }
                Ok(coords.iter().zip(ds).map(|(c, d)| c + d).collect())
            }
        }
    }
}

impl From<f64> for Delta {
    fn from(d: f64) -> Self {
        Delta::Uniform(d)
    }
}

impl From<Vec<f64>> for Delta {
    fn from(ds: Vec<f64>) -> Self {
        Delta::PerPoint(ds)
    }
}

/// Shift every point by `(dx, dy)` and return the moved set.
pub fn update_coordinates(points: &PointSet, dx: &Delta, dy: &Delta) -> HeatResult<PointSet> {
    let xs = dx.apply("x", points.xs())?;
    let ys = dy.apply("y", points.ys())?;
    PointSet::new(xs, ys)
}

/// Seeded random drift of a point cloud.
///
/// Points start on integer positions in `[0, 100)`. Each [`RandomWalk::step`] picks one sign per
/// axis for the whole cloud and moves every point by its own magnitude drawn from `[0, 1)`, so the
/// cloud drifts coherently while spreading out. The same seed always yields the same sequence.
#[derive(Clone, Debug)]
pub struct RandomWalk {
    rng: fastrand::Rng,
    points: PointSet,
}

impl RandomWalk {
    /// Upper bound (exclusive) of the initial integer coordinates.
    pub const START_RANGE: i32 = 100;

    /// Scatter `count` points using `seed`.
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let xs: Vec<f64> = (0..count)
            .map(|_| f64::from(rng.i32(0..Self::START_RANGE)))
            .collect();
        let ys: Vec<f64> = (0..count)
            .map(|_| f64::from(rng.i32(0..Self::START_RANGE)))
            .collect();
        Self {
            rng,
            points: PointSet::from_pairs(xs.into_iter().zip(ys)),
        }
    }

    /// Current positions.
    pub fn points(&self) -> &PointSet {
        &self.points
    }

    /// Advance one frame and return the new positions.
    pub fn step(&mut self) -> HeatResult<&PointSet> {
        let dx = self.axis_delta();
        let dy = self.axis_delta();
        self.points = update_coordinates(&self.points, &dx, &dy)?;
        Ok(&self.points)
    }

    /// Snapshot of `frames` consecutive states, the first being the current one.
    pub fn frames(&mut self, frames: usize) -> HeatResult<Vec<PointSet>> {
        let mut out = Vec::with_capacity(frames);
        for i in 0..frames {
            if i > 0 {
                self.step()?;
            }
            out.push(self.points.clone());
        }
        Ok(out)
    }

    fn axis_delta(&mut self) -> Delta {
        let sign = if self.rng.bool() { 1.0 } else { -1.0 };
        let n = self.points.len();
        Delta::PerPoint((0..n).map(|_| self.rng.f64() * sign).collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/walk.rs"]
mod tests;

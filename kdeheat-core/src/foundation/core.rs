use crate::foundation::error::{HeatError, HeatResult};

/// 0-based position of a frame within an animation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Two parallel coordinate sequences of equal length.
///
/// The set is immutable once built; pipeline stages only borrow it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl PointSet {
    /// Build a point set from parallel x/y sequences.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> HeatResult<Self> {
        if xs.len() != ys.len() {
            return Err(HeatError::data(format!(
                "x and y coordinate counts differ ({} vs {})",
                xs.len(),
                ys.len()
            )));
        }
        Ok(Self { xs, ys })
    }

    /// Build a point set from `(x, y)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (xs, ys) = pairs.into_iter().unzip();
        Self { xs, ys }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// `true` when the set holds no points.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// X coordinates in input order.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Y coordinates in input order.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Iterate `(x, y)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    /// Tight bounding box, or `None` for an empty set.
    pub fn bounds(&self) -> Option<Extent> {
        let mut it = self.iter();
        let (x0, y0) = it.next()?;
        let mut e = Extent {
            x_min: x0,
            x_max: x0,
            y_min: y0,
            y_max: y0,
        };
        for (x, y) in it {
            e.x_min = e.x_min.min(x);
            e.x_max = e.x_max.max(x);
            e.y_min = e.y_min.min(y);
            e.y_max = e.y_max.max(y);
        }
        Some(e)
    }

    /// Reject NaN or infinite coordinates.
    pub fn ensure_finite(&self) -> HeatResult<()> {
        if let Some(i) = self
            .iter()
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(HeatError::invalid_parameter(format!(
                "point {i} has a non-finite coordinate ({}, {})",
                self.xs[i], self.ys[i]
            )));
        }
        Ok(())
    }
}

/// Axis-aligned rectangle in data coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Extent {
    /// Smallest x.
    pub x_min: f64,
    /// Largest x.
    pub x_max: f64,
    /// Smallest y.
    pub y_min: f64,
    /// Largest y.
    pub y_max: f64,
}

impl Extent {
    /// Build an extent, requiring finite bounds with `min <= max` on both axes.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> HeatResult<Self> {
        let e = Self {
            x_min,
            x_max,
            y_min,
            y_max,
        };
        e.validate()?;
        Ok(e)
    }

    /// Check finiteness and ordering.
    pub fn validate(&self) -> HeatResult<()> {
        let all_finite = [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(HeatError::invalid_parameter(format!(
                "extent bounds must be finite, got {self:?}"
            )));
        }
        if self.x_min > self.x_max || self.y_min > self.y_max {
            return Err(HeatError::invalid_parameter(format!(
                "extent min must be <= max on both axes, got {self:?}"
            )));
        }
        Ok(())
    }

    /// Smallest extent containing both `self` and `other`.
    pub fn union(self, other: Extent) -> Extent {
        Extent {
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
            y_min: self.y_min.min(other.y_min),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Grow every side by `pad`.
    pub fn padded(self, pad: f64) -> Extent {
        Extent {
            x_min: self.x_min - pad,
            x_max: self.x_max + pad,
            y_min: self.y_min - pad,
            y_max: self.y_max + pad,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

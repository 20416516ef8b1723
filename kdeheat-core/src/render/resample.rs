use std::fmt;
use std::str::FromStr;

use crate::foundation::error::HeatError;
use crate::kde::field::Field2D;

/// How grid cells are blended into pixels when a field is upsampled.
///
/// Only affects the rendered image; the density field itself is never modified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Interpolation {
    /// Each pixel takes the value of the cell it falls in.
    Nearest,
    /// Linear blend of the two nearest cells per axis.
    Bilinear,
    /// Keys cubic convolution (`a = -0.5`) over four cells per axis.
    Bicubic,
    /// Gaussian weights `exp(-2t²)` over four cells per axis; smooths even at unit scale.
    Gaussian,
}

impl Interpolation {
    /// Every supported mode.
    pub const ALL: [Interpolation; 4] = [
        Interpolation::Nearest,
        Interpolation::Bilinear,
        Interpolation::Bicubic,
        Interpolation::Gaussian,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Interpolation::Nearest => "nearest",
            Interpolation::Bilinear => "bilinear",
            Interpolation::Bicubic => "bicubic",
            Interpolation::Gaussian => "gaussian",
        }
    }

    fn radius(self) -> i64 {
        match self {
            Interpolation::Nearest | Interpolation::Bilinear => 1,
            Interpolation::Bicubic | Interpolation::Gaussian => 2,
        }
    }

    fn weight(self, t: f64) -> f64 {
        let t = t.abs();
        match self {
            Interpolation::Nearest => {
                if t < 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            Interpolation::Bilinear => (1.0 - t).max(0.0),
            Interpolation::Bicubic => {
                const A: f64 = -0.5;
                if t <= 1.0 {
                    ((A + 2.0) * t - (A + 3.0)) * t * t + 1.0
                } else if t < 2.0 {
                    ((A * t - 5.0 * A) * t + 8.0 * A) * t - 4.0 * A
                } else {
                    0.0
                }
            }
            Interpolation::Gaussian => {
                if t < 2.0 {
                    (-2.0 * t * t).exp()
                } else {
                    0.0
                }
            }
        }
    }
}

impl FromStr for Interpolation {
    type Err = HeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Interpolation::ALL
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Interpolation::ALL.iter().map(|m| m.name()).collect();
                HeatError::invalid_parameter(format!(
                    "unknown interpolation '{s}' (supported: {})",
                    known.join(", ")
                ))
            })
    }
}

impl TryFrom<String> for Interpolation {
    type Error = HeatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Interpolation> for String {
    fn from(value: Interpolation) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

struct Taps {
    first: i64,
    weights: Vec<f64>,
}

fn build_taps(src_len: usize, scale: usize, mode: Interpolation) -> Vec<Taps> {
    let out_len = src_len * scale;
    let r = mode.radius();
    let last = src_len as i64 - 1;
    (0..out_len)
        .map(|o| {
            if mode == Interpolation::Nearest {
                return Taps {
                    first: (o / scale) as i64,
                    weights: vec![1.0],
                };
            }
            // Output pixel centers mapped back into cell-center coordinates.
            let s = (o as f64 + 0.5) / scale as f64 - 0.5;
            let base = s.floor() as i64;
            let first = base - r + 1;
            let mut weights: Vec<f64> = (first..=base + r)
                .map(|i| mode.weight(s - i as f64))
                .collect();
            let sum: f64 = weights.iter().sum();
            if sum != 0.0 {
                weights.iter_mut().for_each(|w| *w /= sum);
            }
            Taps { first, weights }.clamped(last)
        })
        .collect()
}

impl Taps {
    // Fold out-of-range taps onto the edge cells.
    fn clamped(self, last: i64) -> Taps {
        if self.first >= 0 && self.first + self.weights.len() as i64 - 1 <= last {
            return self;
        }
        let lo = self.first.clamp(0, last);
        let hi = (self.first + self.weights.len() as i64 - 1).clamp(0, last);
        let mut weights = vec![0.0; (hi - lo + 1) as usize];
        for (k, w) in self.weights.iter().enumerate() {
            let idx = (self.first + k as i64).clamp(0, last);
            weights[(idx - lo) as usize] += w;
        }
        Taps { first: lo, weights }
    }

    fn apply(&self, sample: impl Fn(usize) -> f64) -> f64 {
        self.weights
            .iter()
            .enumerate()
            .map(|(k, w)| w * sample(self.first as usize + k))
            .sum()
    }
}

/// Upsample `field` by an integer factor on both axes, clamping results to `[0, 1]`.
///
/// The output is row-major with `cols * scale` columns and `rows * scale` rows, in the same row
/// order as the field. Horizontal and vertical passes run separately, with edge cells repeated
/// past the border.
pub(crate) fn upsample_unit_field(field: &Field2D, scale: usize, mode: Interpolation) -> Vec<f64> {
    let (cols, rows) = (field.cols(), field.rows());
    let (out_w, out_h) = (cols * scale, rows * scale);
    if out_w == 0 || out_h == 0 {
        return Vec::new();
    }

    let x_taps = build_taps(cols, scale, mode);
    let y_taps = build_taps(rows, scale, mode);

    let mut tmp = vec![0.0f64; out_w * rows];
    for row in 0..rows {
        let dst = &mut tmp[row * out_w..(row + 1) * out_w];
        for (x, taps) in x_taps.iter().enumerate() {
            dst[x] = taps.apply(|c| field.get(row, c));
        }
    }

    let mut out = vec![0.0f64; out_w * out_h];
    for (y, taps) in y_taps.iter().enumerate() {
        let dst = &mut out[y * out_w..(y + 1) * out_w];
        for (x, d) in dst.iter_mut().enumerate() {
            *d = taps.apply(|r| tmp[r * out_w + x]).clamp(0.0, 1.0);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/resample.rs"]
mod tests;

use std::fmt;
use std::str::FromStr;

use crate::foundation::error::HeatError;
use crate::foundation::math::{lerp, unit_to_u8};

/// Closed set of color scales a density field can be mapped through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Colormap {
    /// Blue → cyan → yellow → red → dark red.
    Jet,
    /// Perceptually uniform purple → green → yellow.
    Viridis,
    /// Perceptually uniform blue → magenta → yellow.
    Plasma,
    /// Perceptually uniform black → red → pale yellow.
    Inferno,
    /// Perceptually uniform black → purple → cream.
    Magma,
    /// Black → red → yellow → white.
    Hot,
    /// Black → white.
    Gray,
    /// Diverging blue → light gray → red.
    Coolwarm,
}

// Per-channel breakpoints `(t, value)`; values between breakpoints are interpolated linearly.
struct Segments {
    r: &'static [(f64, f64)],
    g: &'static [(f64, f64)],
    b: &'static [(f64, f64)],
}

enum Lut {
    Segments(Segments),
    // Evenly spaced 0xRRGGBB stops.
    Stops(&'static [u32]),
}

const JET: Segments = Segments {
    r: &[(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)],
    g: &[
        (0.0, 0.0),
        (0.125, 0.0),
        (0.375, 1.0),
        (0.64, 1.0),
        (0.91, 0.0),
        (1.0, 0.0),
    ],
    b: &[(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)],
};

const HOT: Segments = Segments {
    r: &[(0.0, 0.0416), (0.365079, 1.0), (1.0, 1.0)],
    g: &[(0.0, 0.0), (0.365079, 0.0), (0.746032, 1.0), (1.0, 1.0)],
    b: &[(0.0, 0.0), (0.746032, 0.0), (1.0, 1.0)],
};

const GRAY: Segments = Segments {
    r: &[(0.0, 0.0), (1.0, 1.0)],
    g: &[(0.0, 0.0), (1.0, 1.0)],
    b: &[(0.0, 0.0), (1.0, 1.0)],
};

const VIRIDIS: &[u32] = &[
    0x440154, 0x482878, 0x3e4989, 0x31688e, 0x26828e, 0x1f9e89, 0x35b779, 0x6ece58, 0xb5de2b,
    0xfde725,
];
const PLASMA: &[u32] = &[
    0x0d0887, 0x46039f, 0x7201a8, 0x9c179e, 0xbd3786, 0xd8576b, 0xed7953, 0xfb9f3a, 0xfdca26,
    0xf0f921,
];
const INFERNO: &[u32] = &[
    0x000004, 0x1b0c41, 0x4a0c6b, 0x781c6d, 0xa52c60, 0xcf4446, 0xed6925, 0xfb9b06, 0xf7d13d,
    0xfcffa4,
];
const MAGMA: &[u32] = &[
    0x000004, 0x180f3d, 0x440f76, 0x721f81, 0x9e2f7f, 0xcd4071, 0xf1605d, 0xfd9668, 0xfeca8d,
    0xfcfdbf,
];
const COOLWARM: &[u32] = &[
    0x3b4cc0, 0x6889ee, 0x9abbff, 0xc9d7f0, 0xedd1c2, 0xf7a889, 0xe26952, 0xb40426,
];

impl Colormap {
    /// Every supported colormap.
    pub const ALL: [Colormap; 8] = [
        Colormap::Jet,
        Colormap::Viridis,
        Colormap::Plasma,
        Colormap::Inferno,
        Colormap::Magma,
        Colormap::Hot,
        Colormap::Gray,
        Colormap::Coolwarm,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Colormap::Jet => "jet",
            Colormap::Viridis => "viridis",
            Colormap::Plasma => "plasma",
            Colormap::Inferno => "inferno",
            Colormap::Magma => "magma",
            Colormap::Hot => "hot",
            Colormap::Gray => "gray",
            Colormap::Coolwarm => "coolwarm",
        }
    }

    fn lut(self) -> Lut {
        match self {
            Colormap::Jet => Lut::Segments(JET),
            Colormap::Hot => Lut::Segments(HOT),
            Colormap::Gray => Lut::Segments(GRAY),
            Colormap::Viridis => Lut::Stops(VIRIDIS),
            Colormap::Plasma => Lut::Stops(PLASMA),
            Colormap::Inferno => Lut::Stops(INFERNO),
            Colormap::Magma => Lut::Stops(MAGMA),
            Colormap::Coolwarm => Lut::Stops(COOLWARM),
        }
    }

    /// Map `t` in `[0, 1]` to an RGB triple. Out-of-range input is clamped.
    pub fn sample(self, t: f64) -> [u8; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self.lut() {
            Lut::Segments(s) => [
                unit_to_u8(segment_value(s.r, t)),
                unit_to_u8(segment_value(s.g, t)),
                unit_to_u8(segment_value(s.b, t)),
            ],
            Lut::Stops(stops) => stop_value(stops, t),
        }
    }
}

fn segment_value(points: &[(f64, f64)], t: f64) -> f64 {
    for pair in points.windows(2) {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        if t <= t1 {
            if t1 <= t0 {
                return v1;
            }
            return lerp(v0, v1, ((t - t0) / (t1 - t0)).clamp(0.0, 1.0));
        }
    }
    points.last().map_or(0.0, |&(_, v)| v)
}

fn stop_value(stops: &[u32], t: f64) -> [u8; 3] {
    let last = stops.len() - 1;
    let pos = t * last as f64;
    let i = (pos.floor() as usize).min(last);
    let j = (i + 1).min(last);
    let f = pos - i as f64;
    let (a, b) = (unpack(stops[i]), unpack(stops[j]));
    let mut out = [0u8; 3];
    for c in 0..3 {
        out[c] = lerp(f64::from(a[c]), f64::from(b[c]), f)
            .round()
            .clamp(0.0, 255.0) as u8;
    }
    out
}

fn unpack(hex: u32) -> [u8; 3] {
    [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8]
}

impl FromStr for Colormap {
    type Err = HeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Colormap::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Colormap::ALL.iter().map(|c| c.name()).collect();
                HeatError::invalid_parameter(format!(
                    "unknown colormap '{s}' (supported: {})",
                    known.join(", ")
                ))
            })
    }
}

impl TryFrom<String> for Colormap {
    type Error = HeatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Colormap> for String {
    fn from(value: Colormap) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/colormap.rs"]
mod tests;

/// Quartic (biweight) kernel: `(1 - u²)²` for `|u| <= 1` with `u = distance / bandwidth`, else 0.
///
/// The value is 1 at the sample, falls smoothly to 0 at `distance == bandwidth` and is exactly 0
/// beyond it. A non-positive bandwidth has no support and yields 0; parameter validation rejects
/// such bandwidths before any estimation runs.
pub fn quartic_kernel(distance: f64, bandwidth: f64) -> f64 {
    if bandwidth <= 0.0 || bandwidth.is_nan() {
        return 0.0;
    }
    let u = distance / bandwidth;
    quartic_from_u2(u * u)
}

/// Kernel value from the squared normalized distance.
///
/// The estimator works on squared distances to keep `sqrt` out of the inner loop.
#[inline]
pub(crate) fn quartic_from_u2(u2: f64) -> f64 {
    if u2 > 1.0 {
        return 0.0;
    }
    let s = 1.0 - u2;
    s * s
}

#[cfg(test)]
#[path = "../../tests/unit/kde/kernel.rs"]
mod tests;

use crate::kde::field::Field2D;

/// Linearly rescale a field so its minimum maps to 0 and its maximum to 1.
///
/// A uniform field (including the all-zero one) has no contrast to stretch and maps to all zeros.
pub fn normalize_alpha(field: &Field2D) -> Field2D {
    if let Some((lo, hi)) = field.min_max()
        && hi == lo
    {
        tracing::warn!(value = lo, "uniform density field, alpha is zero everywhere");
    }
    rescale_unit(field)
}

/// [`normalize_alpha`] without the uniform-field warning.
pub(crate) fn rescale_unit(field: &Field2D) -> Field2D {
    let mut out = Field2D::zeros(field.cols(), field.rows());
    let Some((lo, hi)) = field.min_max() else {
        return out;
    };
    if hi == lo {
        return out;
    }
    let span = hi - lo;
    for (dst, &v) in out.data_mut().iter_mut().zip(field.data()) {
        *dst = ((v - lo) / span).clamp(0.0, 1.0);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/kde/normalize.rs"]
mod tests;

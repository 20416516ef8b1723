use super::*;

fn ramp(cols: usize, rows: usize) -> Field2D {
    let data = (0..cols * rows)
        .map(|i| (i % cols) as f64 / (cols - 1) as f64)
        .collect();
    Field2D::from_vec(cols, rows, data).unwrap()
}

#[test]
fn names_parse_and_unknown_fails() {
    for m in Interpolation::ALL {
        assert_eq!(m.name().parse::<Interpolation>().unwrap(), m);
    }
    let err = "lanczos".parse::<Interpolation>().unwrap_err();
    assert!(matches!(err, HeatError::InvalidParameter(ref m) if m.contains("lanczos")));
}

#[test]
fn nearest_replicates_cells() {
    let f = Field2D::from_vec(2, 1, vec![0.25, 0.75]).unwrap();
    let out = upsample_unit_field(&f, 3, Interpolation::Nearest);
    assert_eq!(out.len(), 6 * 3);
    assert_eq!(&out[..6], &[0.25, 0.25, 0.25, 0.75, 0.75, 0.75]);
    assert_eq!(&out[12..], &[0.25, 0.25, 0.25, 0.75, 0.75, 0.75]);
}

#[test]
fn bilinear_at_unit_scale_is_identity() {
    let f = ramp(5, 3);
    let out = upsample_unit_field(&f, 1, Interpolation::Bilinear);
    for (a, b) in out.iter().zip(f.data()) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
fn constant_field_stays_constant_for_every_mode() {
    let f = Field2D::from_vec(4, 4, vec![0.6; 16]).unwrap();
    for m in Interpolation::ALL {
        let out = upsample_unit_field(&f, 3, m);
        assert_eq!(out.len(), 12 * 12);
        assert!(out.iter().all(|v| (v - 0.6).abs() < 1e-9), "{m}");
    }
}

#[test]
fn bilinear_ramp_is_monotonic() {
    let f = ramp(4, 2);
    let out = upsample_unit_field(&f, 4, Interpolation::Bilinear);
    let row = &out[..16];
    for w in row.windows(2) {
        assert!(w[1] >= w[0]);
    }
}

#[test]
fn outputs_are_clamped_to_unit_range() {
    // A hard step makes bicubic overshoot before clamping.
    let f = Field2D::from_vec(4, 1, vec![0.0, 0.0, 1.0, 1.0]).unwrap();
    for m in Interpolation::ALL {
        let out = upsample_unit_field(&f, 5, m);
        assert!(out.iter().all(|v| (0.0..=1.0).contains(v)), "{m}");
    }
}

#[test]
fn gaussian_smooths_a_spike_at_unit_scale() {
    let mut data = vec![0.0; 9];
    data[4] = 1.0;
    let f = Field2D::from_vec(3, 3, data).unwrap();
    let out = upsample_unit_field(&f, 1, Interpolation::Gaussian);
    assert!(out[4] < 1.0);
    assert!(out[1] > 0.0);
    assert!(out[4] > out[1]);
}

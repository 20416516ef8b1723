use super::*;

#[test]
fn point_set_rejects_mismatched_lengths() {
    let err = PointSet::new(vec![1.0, 2.0], vec![1.0]).unwrap_err();
    assert!(matches!(err, HeatError::Data(_)));
}

#[test]
fn bounds_cover_all_points() {
    let pts = PointSet::from_pairs([(3.0, -1.0), (-2.0, 4.0), (0.5, 0.5)]);
    let b = pts.bounds().unwrap();
    assert_eq!(
        b,
        Extent {
            x_min: -2.0,
            x_max: 3.0,
            y_min: -1.0,
            y_max: 4.0
        }
    );
    assert!(PointSet::default().bounds().is_none());
}

#[test]
fn non_finite_coordinates_are_rejected() {
    let pts = PointSet::from_pairs([(0.0, 0.0), (f64::NAN, 1.0)]);
    let err = pts.ensure_finite().unwrap_err();
    assert!(err.to_string().contains("point 1"));
}

#[test]
fn extent_union_and_padding() {
    let a = Extent::new(0.0, 1.0, 0.0, 1.0).unwrap();
    let b = Extent::new(-1.0, 0.5, 2.0, 3.0).unwrap();
    let u = a.union(b).padded(2.0);
    assert_eq!(u, Extent::new(-3.0, 3.0, -2.0, 5.0).unwrap());
}

#[test]
fn extent_rejects_inverted_bounds() {
    assert!(Extent::new(1.0, 0.0, 0.0, 1.0).is_err());
    assert!(Extent::new(0.0, f64::INFINITY, 0.0, 1.0).is_err());
}

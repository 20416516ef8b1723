use super::*;

#[test]
fn per_point_and_uniform_deltas() {
    let p = PointSet::from_pairs([(0.0, 0.0), (1.0, 2.0)]);
    let moved = update_coordinates(&p, &Delta::PerPoint(vec![1.0, -1.0]), &Delta::Uniform(0.5))
        .unwrap();
    assert_eq!(moved.xs(), &[1.0, 0.0]);
    assert_eq!(moved.ys(), &[0.5, 2.5]);
    // input untouched
    assert_eq!(p.xs(), &[0.0, 1.0]);
}

#[test]
fn delta_length_mismatch_is_data_error() {
    let p = PointSet::from_pairs([(0.0, 0.0), (1.0, 2.0)]);
    let err = update_coordinates(&p, &Delta::PerPoint(vec![1.0]), &Delta::Uniform(0.0)).unwrap_err();
    assert!(matches!(err, HeatError::Data(ref m) if m.contains("x delta")));
}

#[test]
fn walk_starts_on_integer_grid() {
    let walk = RandomWalk::new(200, 7);
    assert_eq!(walk.points().len(), 200);
    for (x, y) in walk.points().iter() {
        assert_eq!(x.fract(), 0.0);
        assert_eq!(y.fract(), 0.0);
        assert!((0.0..100.0).contains(&x));
        assert!((0.0..100.0).contains(&y));
    }
}

#[test]
fn step_moves_whole_cloud_in_one_direction_per_axis() {
    let mut walk = RandomWalk::new(50, 3);
    for _ in 0..20 {
        let before = walk.points().clone();
        let after = walk.step().unwrap().clone();
        let dxs: Vec<f64> = after.xs().iter().zip(before.xs()).map(|(a, b)| a - b).collect();
        let dys: Vec<f64> = after.ys().iter().zip(before.ys()).map(|(a, b)| a - b).collect();
        for ds in [&dxs, &dys] {
            assert!(ds.iter().all(|d| d.abs() < 1.0));
            let all_up = ds.iter().all(|d| *d >= 0.0);
            let all_down = ds.iter().all(|d| *d <= 0.0);
            assert!(all_up || all_down);
        }
    }
}

#[test]
fn same_seed_same_frames() {
    let a = RandomWalk::new(10, 42).frames(5).unwrap();
    let b = RandomWalk::new(10, 42).frames(5).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 5);
    assert_eq!(a[0], RandomWalk::new(10, 42).points().clone());
    assert_ne!(RandomWalk::new(10, 43).frames(5).unwrap(), a);
}

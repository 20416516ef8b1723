use super::*;
use crate::kde::grid::build_grid;
use crate::kde::kernel::quartic_kernel;

fn cell_at(grid: &Grid, x: f64, y: f64) -> (usize, usize) {
    let col = grid.x_axis().iter().position(|&v| v == x).unwrap();
    let row = grid.y_axis().iter().position(|&v| v == y).unwrap();
    (row, col)
}

#[test]
fn two_points_far_apart_do_not_interact() {
    let pts = PointSet::from_pairs([(0.0, 0.0), (10.0, 0.0)]);
    let grid = build_grid(&pts, 1.0, 5.0).unwrap();
    let field = estimate_intensity(&pts, &grid, 5.0).unwrap();

    let (r, c) = cell_at(&grid, 0.0, 0.0);
    assert_eq!(field.get(r, c), quartic_kernel(0.0, 5.0) + quartic_kernel(10.0, 5.0));
    assert_eq!(field.get(r, c), 1.0);

    let (r, c) = cell_at(&grid, 10.0, 0.0);
    assert_eq!(field.get(r, c), 1.0);

    let (r, c) = cell_at(&grid, 5.0, 0.0);
    assert_eq!(field.get(r, c), 0.0);
}

#[test]
fn field_matches_brute_force_kernel_sum() {
    let pts = PointSet::from_pairs([(0.5, 1.0), (2.0, 2.5), (3.1, 0.2), (2.2, 2.4)]);
    let bw = 1.75;
    let grid = build_grid(&pts, 0.4, bw).unwrap();
    let field = estimate_intensity(&pts, &grid, bw).unwrap();

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let (cx, cy) = grid.center(row, col);
            let want: f64 = pts
                .iter()
                .map(|(x, y)| quartic_kernel(((cx - x).powi(2) + (cy - y).powi(2)).sqrt(), bw))
                .sum();
            assert!((field.get(row, col) - want).abs() < 1e-12);
        }
    }
}

#[test]
fn field_is_non_negative() {
    let pts = PointSet::from_pairs((0..50).map(|i| {
        let t = f64::from(i) * 0.37;
        (t.sin() * 20.0, t.cos() * 13.0)
    }));
    let grid = build_grid(&pts, 0.8, 4.0).unwrap();
    let field = estimate_intensity(&pts, &grid, 4.0).unwrap();
    assert!(field.data().iter().all(|&v| v >= 0.0));
}

#[test]
fn single_point_field_is_radially_symmetric() {
    let pts = PointSet::from_pairs([(3.0, -2.0)]);
    let grid = build_grid(&pts, 0.5, 4.0).unwrap();
    let field = estimate_intensity(&pts, &grid, 4.0).unwrap();
    let (r0, c0) = cell_at(&grid, 3.0, -2.0);
    assert_eq!(field.get(r0, c0), 1.0);

    for (dr, dc) in [(1usize, 2usize), (3, 0), (2, 5), (4, 4)] {
        let v = field.get(r0 + dr, c0 + dc);
        assert_eq!(field.get(r0 - dr, c0 - dc), v);
        assert_eq!(field.get(r0 + dr, c0 - dc), v);
        assert_eq!(field.get(r0 + dc, c0 + dr), v);
    }
}

#[test]
fn repeated_estimation_is_bit_identical() {
    let pts = PointSet::from_pairs((0..200).map(|i| {
        let t = f64::from(i);
        ((t * 1.618).fract() * 40.0, (t * 2.718).fract() * 25.0)
    }));
    let grid = build_grid(&pts, 0.7, 3.3).unwrap();
    let a = estimate_intensity(&pts, &grid, 3.3).unwrap();
    let b = estimate_intensity(&pts, &grid, 3.3).unwrap();
    let seq = estimate_intensity_sequential(&pts, &grid, 3.3).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, seq);
}

#[test]
fn rejects_bad_bandwidth_and_empty_points() {
    let pts = PointSet::from_pairs([(0.0, 0.0)]);
    let grid = build_grid(&pts, 1.0, 1.0).unwrap();
    assert!(matches!(
        estimate_intensity(&pts, &grid, 0.0),
        Err(HeatError::InvalidParameter(_))
    ));
    assert!(matches!(
        estimate_intensity(&PointSet::default(), &grid, 1.0),
        Err(HeatError::EmptyInput(_))
    ));
}

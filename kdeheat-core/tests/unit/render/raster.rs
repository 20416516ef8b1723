use super::*;
use crate::foundation::core::PointSet;
use crate::kde::grid::build_grid;
use crate::kde::intensity::estimate_intensity;
use crate::kde::normalize::normalize_alpha;

fn opts(ppc: u32) -> RasterOpts {
    RasterOpts {
        colormap: Colormap::Jet,
        interpolation: Interpolation::Nearest,
        pixels_per_cell: ppc,
    }
}

fn single_point(x: f64, y: f64) -> (Grid, Field2D, Field2D) {
    let pts = PointSet::from_pairs([(x, y)]);
    let grid = build_grid(&pts, 1.0, 3.0).unwrap();
    let density = estimate_intensity(&pts, &grid, 3.0).unwrap();
    let alpha = normalize_alpha(&density);
    (grid, density, alpha)
}

#[test]
fn image_size_is_cells_times_scale() {
    let (grid, d, a) = single_point(0.0, 0.0);
    let img = render_fields(&grid, &d, &a, &opts(4)).unwrap();
    assert_eq!((img.width, img.height), (7 * 4, 7 * 4));
    assert_eq!(img.data.len(), 28 * 28 * 4);
}

#[test]
fn peak_is_opaque_and_corners_transparent() {
    let (grid, d, a) = single_point(2.0, 5.0);
    let img = render_fields(&grid, &d, &a, &opts(1)).unwrap();
    assert_eq!(img.pixel(3, 3)[3], 255);
    assert_eq!(img.pixel(3, 3)[..3], Colormap::Jet.sample(1.0));
    assert_eq!(img.pixel(0, 0)[3], 0);
    assert_eq!(img.pixel(6, 6)[3], 0);
}

#[test]
fn rows_are_flipped_so_high_y_is_at_the_top() {
    let pts = PointSet::from_pairs([(0.0, 0.0), (0.0, 10.0)]);
    let grid = build_grid(&pts, 1.0, 2.0).unwrap();
    let mut density = estimate_intensity(&pts, &grid, 2.0).unwrap();
    // Bias the upper point so the two peaks differ.
    let top_row = grid.rows() - 3;
    let i = top_row * grid.cols() + 2;
    let boosted: Vec<f64> = density
        .data()
        .iter()
        .enumerate()
        .map(|(k, v)| if k == i { v + 1.0 } else { *v })
        .collect();
    density = Field2D::from_vec(grid.cols(), grid.rows(), boosted).unwrap();
    let alpha = normalize_alpha(&density);
    let img = render_fields(&grid, &density, &alpha, &opts(1)).unwrap();

    // Data y = 10 is image row 2, data y = 0 is image row height - 3.
    assert_eq!(img.pixel(2, 2)[3], 255);
    assert!(img.pixel(2, img.height - 3)[3] < 255);
    assert_eq!(img.mapping.data_to_pixel(0.0, 10.0), Some((2, 2)));
    assert_eq!(img.mapping.data_to_pixel(0.0, 0.0), Some((2, img.height - 3)));
}

#[test]
fn mapping_finds_cell_center_pixels_when_upsampled() {
    let (grid, d, a) = single_point(0.0, 0.0);
    let img = render_fields(&grid, &d, &a, &opts(4)).unwrap();
    let (px, py) = img.mapping.data_to_pixel(0.0, 0.0).unwrap();
    // Cell 3 spans pixels 12..16; its center sits between 13 and 14.
    assert!((13..=14).contains(&px));
    assert!((13..=14).contains(&py));
    assert_eq!(img.pixel(px, py)[3], 255);
    assert!(img.mapping.data_to_pixel(-100.0, 0.0).is_none());
}

#[test]
fn uniform_alpha_renders_fully_transparent() {
    let (grid, d, _) = single_point(0.0, 0.0);
    let zero = Field2D::zeros(grid.cols(), grid.rows());
    let img = render_fields(&grid, &d, &zero, &opts(2)).unwrap();
    assert!(img.data.chunks_exact(4).all(|px| px[3] == 0));
}

#[test]
fn mismatched_shapes_and_zero_scale_are_rejected() {
    let (grid, d, a) = single_point(0.0, 0.0);
    let wrong = Field2D::zeros(2, 2);
    assert!(matches!(
        render_fields(&grid, &d, &wrong, &opts(1)),
        Err(HeatError::Data(_))
    ));
    assert!(matches!(
        render_fields(&grid, &d, &a, &opts(0)),
        Err(HeatError::InvalidParameter(_))
    ));
}

#[test]
fn converts_to_rgba_image() {
    let (grid, d, a) = single_point(0.0, 0.0);
    let img = render_fields(&grid, &d, &a, &opts(2)).unwrap();
    let rgba = img.to_rgba_image().unwrap();
    assert_eq!(rgba.dimensions(), (img.width, img.height));
    assert_eq!(rgba.get_pixel(5, 6).0, img.pixel(5, 6));
}

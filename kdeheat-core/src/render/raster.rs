use crate::foundation::error::{HeatError, HeatResult};
use crate::foundation::math::unit_to_u8;
use crate::kde::field::Field2D;
use crate::kde::grid::Grid;
use crate::kde::normalize::rescale_unit;
use crate::render::colormap::Colormap;
use crate::render::resample::{Interpolation, upsample_unit_field};

/// Upper bound on rendered pixels.
pub const MAX_IMAGE_PIXELS: usize = 1 << 26;

/// Maps data coordinates onto the pixels of a rendered heatmap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelMapping {
    /// Data x of the first column's cell center.
    pub x0: f64,
    /// Data y of the bottom row's cell center.
    pub y0: f64,
    /// Grid spacing in data units.
    pub step: f64,
    /// Pixels per grid cell along each axis.
    pub pixels_per_cell: u32,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl PixelMapping {
    /// Pixel `(x, y)` (row 0 at the top) whose center is nearest to data point `(x, y)`.
    ///
    /// Returns `None` when the point falls outside the image.
    pub fn data_to_pixel(&self, x: f64, y: f64) -> Option<(u32, u32)> {
        let ppc = f64::from(self.pixels_per_cell);
        let px = (((x - self.x0) / self.step + 0.5) * ppc - 0.5).round();
        let py_up = (((y - self.y0) / self.step + 0.5) * ppc - 0.5).round();
        if px < 0.0 || py_up < 0.0 {
            return None;
        }
        let (px, py_up) = (px as u32, py_up as u32);
        if px >= self.width || py_up >= self.height {
            return None;
        }
        Some((px, self.height - 1 - py_up))
    }
}

/// A rendered heatmap: straight-alpha RGBA8 pixels, row 0 at the top (highest y).
#[derive(Clone, Debug, PartialEq)]
pub struct HeatmapImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Tightly packed, row-major, non-premultiplied RGBA8.
    pub data: Vec<u8>,
    /// Data-to-pixel placement of the grid.
    pub mapping: PixelMapping,
}

impl HeatmapImage {
    /// RGBA of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Copy into an [`image::RgbaImage`].
    pub fn to_rgba_image(&self) -> HeatResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| HeatError::data("heatmap buffer does not match its dimensions"))
    }
}

/// Options for [`render_fields`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterOpts {
    /// Color scale applied to the density.
    pub colormap: Colormap,
    /// Cell-to-pixel blending.
    pub interpolation: Interpolation,
    /// Pixels per grid cell along each axis.
    pub pixels_per_cell: u32,
}

/// Color the density field, take opacity from the alpha field and upsample to pixels.
///
/// Both fields must match the grid's shape. The density is min/max-normalized before the
/// colormap lookup, so absolute magnitudes only matter relative to each other. The image has no
/// margin: grid cells span it edge to edge.
pub fn render_fields(
    grid: &Grid,
    density: &Field2D,
    alpha: &Field2D,
    opts: &RasterOpts,
) -> HeatResult<HeatmapImage> {
    if opts.pixels_per_cell == 0 {
        return Err(HeatError::invalid_parameter("pixels_per_cell must be > 0"));
    }
    for (name, f) in [("density", density), ("alpha", alpha)] {
        if (f.cols(), f.rows()) != (grid.cols(), grid.rows()) {
            return Err(HeatError::data(format!(
                "{name} field is {}x{} but the grid is {}x{}",
                f.cols(),
                f.rows(),
                grid.cols(),
                grid.rows()
            )));
        }
    }
    if grid.is_empty() {
        return Err(HeatError::empty_input("grid has no cells to render"));
    }

    let scale = opts.pixels_per_cell as usize;
    let (width, height) = image_dims(grid, scale)?;

    let color_t = upsample_unit_field(&rescale_unit(density), scale, opts.interpolation);
    let alpha_px = upsample_unit_field(alpha, scale, opts.interpolation);

    let (w, h) = (width as usize, height as usize);
    let mut data = vec![0u8; w * h * 4];
    for (y, out_row) in data.chunks_exact_mut(w * 4).enumerate() {
        // Image rows run top-down, field rows bottom-up.
        let src = (h - 1 - y) * w;
        for (x, px) in out_row.chunks_exact_mut(4).enumerate() {
            let [r, g, b] = opts.colormap.sample(color_t[src + x]);
            px.copy_from_slice(&[r, g, b, unit_to_u8(alpha_px[src + x])]);
        }
    }

    Ok(HeatmapImage {
        width,
        height,
        data,
        mapping: PixelMapping {
            x0: grid.x_axis()[0],
            y0: grid.y_axis()[0],
            step: grid.step(),
            pixels_per_cell: opts.pixels_per_cell,
            width,
            height,
        },
    })
}

fn image_dims(grid: &Grid, scale: usize) -> HeatResult<(u32, u32)> {
    let w = grid.cols().checked_mul(scale);
    let h = grid.rows().checked_mul(scale);
    match (w, h) {
        (Some(w), Some(h))
            if w.checked_mul(h).is_some_and(|p| p <= MAX_IMAGE_PIXELS)
                && u32::try_from(w).is_ok()
                && u32::try_from(h).is_ok() =>
        {
            Ok((w as u32, h as u32))
        }
        _ => Err(HeatError::invalid_parameter(format!(
            "{}x{} cells at {scale} pixels per cell exceeds the limit of {MAX_IMAGE_PIXELS} pixels",
            grid.cols(),
            grid.rows()
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;

use std::path::Path;
use std::time::Instant;

use anyhow::Context as _;

use crate::assets::points::load_points;
use crate::encode::output::save_rgba_atomic;
use crate::foundation::core::{Extent, PointSet};
use crate::foundation::error::{HeatError, HeatResult};
use crate::foundation::trace::TraceCtx;
use crate::kde::field::Field2D;
use crate::kde::grid::{Grid, build_grid, build_grid_over, validate_grid_params};
use crate::kde::intensity::estimate_intensity;
use crate::kde::normalize::normalize_alpha;
use crate::render::colormap::Colormap;
use crate::render::raster::{HeatmapImage, RasterOpts, render_fields};
use crate::render::resample::Interpolation;

/// Everything that shapes one heatmap besides the points themselves.
///
/// Deserializes from a JSON object where every field is optional:
///
/// ```json
/// { "grid_size": 2.0, "bandwidth": 15.0, "colormap": "viridis" }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeatmapParams {
    /// Spacing between grid cell centers, in data units. Must be > 0.
    pub grid_size: f64,
    /// Kernel support radius, in data units. Must be > 0.
    pub bandwidth: f64,
    /// Color scale for the density.
    pub colormap: Colormap,
    /// Cell-to-pixel blending.
    pub interpolation: Interpolation,
    /// Pixels per grid cell along each axis. Must be > 0.
    pub pixels_per_cell: u32,
    /// Fixed data extent to grid over instead of the points' bounding box.
    ///
    /// Frames of one animation share an extent so they share image dimensions. Points farther
    /// than `bandwidth` outside the extent reach no cell and are clipped from the image.
    pub extent: Option<Extent>,
}

impl Default for HeatmapParams {
    fn default() -> Self {
        Self {
            grid_size: 1.0,
            bandwidth: 10.0,
            colormap: Colormap::Jet,
            interpolation: Interpolation::Gaussian,
            pixels_per_cell: 4,
            extent: None,
        }
    }
}

impl HeatmapParams {
    /// Parameters with colormap and interpolation given by name.
    pub fn from_names(
        grid_size: f64,
        bandwidth: f64,
        colormap: &str,
        interpolation: &str,
    ) -> HeatResult<Self> {
        Ok(Self {
            grid_size,
            bandwidth,
            colormap: colormap.parse()?,
            interpolation: interpolation.parse()?,
            ..Self::default()
        })
    }

    /// Read parameters from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> HeatResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read heatmap config '{}'", path.display()))?;
        serde_json::from_str(&text).map_err(|e| {
            HeatError::invalid_parameter(format!("heatmap config '{}': {e}", path.display()))
        })
    }

    /// Check every parameter without looking at any point data.
    pub fn validate(&self) -> HeatResult<()> {
        validate_grid_params(self.grid_size, self.bandwidth)?;
        if self.pixels_per_cell == 0 {
            return Err(HeatError::invalid_parameter("pixels_per_cell must be > 0"));
        }
        if let Some(extent) = &self.extent {
            extent.validate()?;
        }
        Ok(())
    }

    fn raster_opts(&self) -> RasterOpts {
        RasterOpts {
            colormap: self.colormap,
            interpolation: self.interpolation,
            pixels_per_cell: self.pixels_per_cell,
        }
    }
}

/// All intermediate products of one heatmap, from grid to pixels.
#[derive(Clone, Debug)]
pub struct Heatmap {
    /// Lattice the density was evaluated on.
    pub grid: Grid,
    /// Summed kernel contributions per cell.
    pub density: Field2D,
    /// Density rescaled to `[0, 1]`.
    pub alpha: Field2D,
    /// Rendered RGBA pixels.
    pub image: HeatmapImage,
}

/// Run the whole pipeline in memory: grid, density, alpha, pixels.
///
/// Parameters are validated before the points are inspected, so a bad `grid_size` is reported
/// even for an empty point set.
pub fn compute_heatmap(
    points: &PointSet,
    params: &HeatmapParams,
    ctx: &TraceCtx,
) -> HeatResult<Heatmap> {
    params.validate()?;
    let ctx = ctx.heatmap();
    ctx.in_scope(|| {
        let t0 = Instant::now();
        let grid = match params.extent {
            Some(extent) => {
                if points.is_empty() {
                    return Err(HeatError::empty_input(
                        "point set is empty; at least one point is required",
                    ));
                }
                points.ensure_finite()?;
                build_grid_over(extent, params.grid_size, params.bandwidth)?
            }
            None => build_grid(points, params.grid_size, params.bandwidth)?,
        };
        let density = estimate_intensity(points, &grid, params.bandwidth)?;
        let alpha = normalize_alpha(&density);
        let t_kde = t0.elapsed();
        let image = render_fields(&grid, &density, &alpha, &params.raster_opts())?;
        tracing::debug!(
            points = points.len(),
            cols = grid.cols(),
            rows = grid.rows(),
            width = image.width,
            height = image.height,
            kde_ms = t_kde.as_secs_f64() * 1000.0,
            total_ms = t0.elapsed().as_secs_f64() * 1000.0,
            "heatmap computed"
        );
        Ok(Heatmap {
            grid,
            density,
            alpha,
            image,
        })
    })
}

/// [`compute_heatmap`] keeping only the rendered image.
pub fn render_heatmap(
    points: &PointSet,
    params: &HeatmapParams,
    ctx: &TraceCtx,
) -> HeatResult<HeatmapImage> {
    compute_heatmap(points, params, ctx).map(|h| h.image)
}

/// Render a heatmap of `points` and write it to `output`.
///
/// The format follows the extension of `output`; use `.png` to keep the alpha channel. The file
/// is replaced atomically, and nothing is written when any step fails.
pub fn generate(
    points: &PointSet,
    params: &HeatmapParams,
    output: &Path,
    ctx: &TraceCtx,
) -> HeatResult<HeatmapImage> {
    let image = render_heatmap(points, params, ctx)?;
    save_rgba_atomic(output, &image.to_rgba_image()?)?;
    tracing::info!(
        parent: ctx.span(),
        output = %output.display(),
        width = image.width,
        height = image.height,
        "wrote heatmap"
    );
    Ok(image)
}

/// [`generate`] from a JSON points file (see [`load_points`]).
pub fn generate_from_file(
    input: &Path,
    params: &HeatmapParams,
    output: &Path,
    ctx: &TraceCtx,
) -> HeatResult<HeatmapImage> {
    params.validate()?;
    let points = load_points(input)?;
    generate(&points, params, output, ctx)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;

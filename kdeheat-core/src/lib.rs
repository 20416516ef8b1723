//! kdeheat turns 2D point clouds into kernel density heatmaps.
//!
//! # Pipeline overview
//!
//! 1. **Grid**: `PointSet -> Grid` (cell centers over the bounding box padded by the bandwidth)
//! 2. **Estimate**: `PointSet + Grid -> Field2D` (summed quartic kernel contributions per cell)
//! 3. **Normalize**: `Field2D -> Field2D` in `[0, 1]` (used as opacity)
//! 4. **Render**: fields -> straight-alpha RGBA8 pixels through a [`Colormap`], upsampled with an
//!    [`Interpolation`] mode
//! 5. **Persist** (optional): atomic PNG write, compositing over a background, GIF assembly
//!
//! [`generate`] runs steps 1-5 for one point set; [`render_animation`] does it per frame on a
//! shared extent and assembles the frames in order.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same points and parameters give a bit-identical density field, with
//!   or without parallelism.
//! - **Fail fast**: parameters are validated before any point data is read, and unknown colormap
//!   or interpolation names are errors.
//! - **No ambient logger**: file-producing calls take a [`TraceCtx`] whose span parents their logs.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod effects;
mod encode;
mod foundation;
mod kde;
mod motion;
mod render;

pub use animation::sequence::{
    AnimateOpts, AnimationSummary, FrameThreading, animate_random_walk, render_animation,
    shared_extent,
};
pub use assets::decode::{decode_rgba, load_rgba};
pub use assets::points::{load_points, parse_points};
pub use effects::composite::{
    CropBox, PremulRgba8, crop, crop_image, over, over_in_place, overlay, overlay_images,
    parse_crop_box, resize, resize_image,
};
pub use encode::gif::{
    GifOpts, create_gif, create_gif_from_directory, create_gif_from_pattern, encode_gif,
    resolve_frame_pattern,
};
pub use encode::output::{ensure_parent_dir, image_format_for, save_rgba_atomic};
pub use foundation::core::{Extent, FrameIndex, PointSet};
pub use foundation::error::{HeatError, HeatResult};
pub use foundation::trace::TraceCtx;
pub use kde::field::Field2D;
pub use kde::grid::{Grid, MAX_GRID_CELLS, build_grid, build_grid_over, validate_grid_params};
pub use kde::intensity::{estimate_intensity, estimate_intensity_sequential};
pub use kde::kernel::quartic_kernel;
pub use kde::normalize::normalize_alpha;
pub use motion::walk::{Delta, RandomWalk, update_coordinates};
pub use render::colormap::Colormap;
pub use render::pipeline::{
    Heatmap, HeatmapParams, compute_heatmap, generate, generate_from_file, render_heatmap,
};
pub use render::raster::{HeatmapImage, MAX_IMAGE_PIXELS, PixelMapping, RasterOpts, render_fields};
pub use render::resample::Interpolation;

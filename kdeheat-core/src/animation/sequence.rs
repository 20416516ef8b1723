use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::assets::decode::load_rgba;
use crate::effects::composite::{CropBox, crop, overlay};
use crate::encode::gif::{GifOpts, create_gif};
use crate::encode::output::save_rgba_atomic;
use crate::foundation::core::{Extent, FrameIndex, PointSet};
use crate::foundation::error::{HeatError, HeatResult};
use crate::foundation::trace::TraceCtx;
use crate::motion::walk::RandomWalk;
use crate::render::pipeline::{HeatmapParams, render_heatmap};

/// Worker controls for per-frame rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameThreading {
    /// Render frames on a rayon pool when `true`.
    pub parallel: bool,
    /// Explicit worker count; `None` uses rayon's default.
    pub threads: Option<usize>,
}

/// Options for [`render_animation`] and [`animate_random_walk`].
#[derive(Clone, Debug)]
pub struct AnimateOpts {
    /// Frame count for [`animate_random_walk`].
    pub frames: usize,
    /// Point count for [`animate_random_walk`].
    pub points: usize,
    /// Seed for [`animate_random_walk`]; `None` draws one and logs it.
    pub seed: Option<u64>,
    /// Heatmap settings shared by every frame.
    ///
    /// When `extent` is unset, the union of all frames' bounding boxes is used.
    pub heatmap: HeatmapParams,
    /// Image to composite every frame over.
    pub background: Option<PathBuf>,
    /// Pixel rectangle to keep from every frame.
    pub crop: Option<CropBox>,
    /// GIF output settings.
    pub gif: GifOpts,
    /// Frame rendering parallelism.
    pub threading: FrameThreading,
    /// Directory that keeps the PNG frames; otherwise they go to a temporary directory that is
    /// removed afterwards.
    pub keep_frames: Option<PathBuf>,
}

impl Default for AnimateOpts {
    fn default() -> Self {
        Self {
            frames: 100,
            points: 100,
            seed: None,
            heatmap: HeatmapParams {
                grid_size: 10.0,
                ..HeatmapParams::default()
            },
            background: None,
            crop: None,
            gif: GifOpts::default(),
            threading: FrameThreading::default(),
            keep_frames: None,
        }
    }
}

/// What [`render_animation`] produced.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationSummary {
    /// Frames rendered.
    pub frames: usize,
    /// Frames in the GIF after optional duplicate merging.
    pub gif_frames: usize,
    /// Data extent shared by all frames.
    pub extent: Extent,
    /// Rendered frame files, in frame order. Empty unless frames were kept.
    pub frame_paths: Vec<PathBuf>,
}

/// Render one heatmap per point set and assemble them, in order, into a GIF at `output`.
///
/// All frames are gridded over one shared extent so they have identical dimensions. With
/// `threading.parallel` frames render concurrently, but the GIF always follows input order.
pub fn render_animation(
    point_sets: &[PointSet],
    output: &Path,
    opts: &AnimateOpts,
    ctx: &TraceCtx,
) -> HeatResult<AnimationSummary> {
    opts.heatmap.validate()?;
    opts.gif.validate()?;
    if point_sets.is_empty() {
        return Err(HeatError::empty_input("animation has no frames"));
    }
    let extent = match opts.heatmap.extent {
        Some(e) => e,
        None => shared_extent(point_sets)?,
    };
    let params = HeatmapParams {
        extent: Some(extent),
        ..opts.heatmap.clone()
    };
    let background = opts.background.as_deref().map(load_rgba).transpose()?;

    let frame_dir = FrameDir::new(opts.keep_frames.as_deref())?;
    let job = FrameJob {
        params: &params,
        background: background.as_ref(),
        crop: opts.crop,
        dir: frame_dir.path(),
    };
    tracing::info!(
        parent: ctx.span(),
        frames = point_sets.len(),
        parallel = opts.threading.parallel,
        "rendering animation"
    );

    let results: Vec<HeatResult<PathBuf>> = if opts.threading.parallel {
        let pool = build_thread_pool(opts.threading.threads)?;
        pool.install(|| {
            point_sets
                .par_iter()
                .enumerate()
                .map(|(i, points)| job.render(i, points, ctx))
                .collect()
        })
    } else {
        point_sets
            .iter()
            .enumerate()
            .map(|(i, points)| job.render(i, points, ctx))
            .collect()
    };
    let frame_paths = results.into_iter().collect::<HeatResult<Vec<_>>>()?;

    let gif_frames = create_gif(&frame_paths, output, &opts.gif, ctx)?;
    let kept = frame_dir.finish();
    tracing::info!(
        parent: ctx.span(),
        output = %output.display(),
        frames = frame_paths.len(),
        "animation written"
    );
    Ok(AnimationSummary {
        frames: frame_paths.len(),
        gif_frames,
        extent,
        frame_paths: if kept { frame_paths } else { Vec::new() },
    })
}

/// Simulate a [`RandomWalk`] of `opts.points` points over `opts.frames` frames and animate it.
pub fn animate_random_walk(
    output: &Path,
    opts: &AnimateOpts,
    ctx: &TraceCtx,
) -> HeatResult<AnimationSummary> {
    opts.heatmap.validate()?;
    if opts.frames == 0 {
        return Err(HeatError::empty_input("animation has no frames"));
    }
    if opts.points == 0 {
        return Err(HeatError::empty_input("random walk needs at least one point"));
    }
    let seed = opts.seed.unwrap_or_else(|| fastrand::u64(..));
    tracing::info!(parent: ctx.span(), seed, points = opts.points, "random walk");
    let point_sets = RandomWalk::new(opts.points, seed).frames(opts.frames)?;
    render_animation(&point_sets, output, opts, ctx)
}

/// Union of every frame's bounding box.
pub fn shared_extent(point_sets: &[PointSet]) -> HeatResult<Extent> {
    let mut out: Option<Extent> = None;
    for (i, points) in point_sets.iter().enumerate() {
        points.ensure_finite()?;
        let b = points
            .bounds()
            .ok_or_else(|| HeatError::empty_input(format!("frame {i} has no points")))?;
        out = Some(match out {
            Some(e) => e.union(b),
            None => b,
        });
    }
    out.ok_or_else(|| HeatError::empty_input("animation has no frames"))
}

struct FrameJob<'a> {
    params: &'a HeatmapParams,
    background: Option<&'a image::RgbaImage>,
    crop: Option<CropBox>,
    dir: &'a Path,
}

impl FrameJob<'_> {
    fn render(&self, index: usize, points: &PointSet, ctx: &TraceCtx) -> HeatResult<PathBuf> {
        let ctx = ctx.frame(FrameIndex(index as u64));
        let heat = render_heatmap(points, self.params, &ctx)?.to_rgba_image()?;
        let frame = match (self.background, self.crop) {
            (Some(bg), c) => overlay(bg, &heat, c)?,
            (None, Some(c)) => crop(&heat, c)?,
            (None, None) => heat,
        };
        let path = self.dir.join(format!("frame_{index:04}.png"));
        save_rgba_atomic(&path, &frame)?;
        ctx.in_scope(|| tracing::debug!(path = %path.display(), "frame written"));
        Ok(path)
    }
}

static FRAME_DIR_SEQ: AtomicU64 = AtomicU64::new(0);

// Frame directory that is either kept or deleted on drop.
struct FrameDir {
    path: PathBuf,
    remove: bool,
}

impl FrameDir {
    fn new(keep: Option<&Path>) -> HeatResult<Self> {
        let (path, remove) = match keep {
            Some(dir) => (dir.to_path_buf(), false),
            None => {
                let nanos = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_nanos())
                    .unwrap_or(0);
                let seq = FRAME_DIR_SEQ.fetch_add(1, Ordering::Relaxed);
                let dir = std::env::temp_dir().join(format!(
                    "kdeheat_frames_{}_{nanos}_{seq}",
                    std::process::id()
                ));
                (dir, true)
            }
        };
        std::fs::create_dir_all(&path)
            .with_context(|| format!("create frame directory '{}'", path.display()))?;
        Ok(Self { path, remove })
    }

    fn path(&self) -> &Path {
        &self.path
    }

    // Returns whether the frames outlive this call.
    fn finish(self) -> bool {
        !self.remove
    }
}

impl Drop for FrameDir {
    fn drop(&mut self) {
        if self.remove {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }
}

fn build_thread_pool(threads: Option<usize>) -> HeatResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(HeatError::invalid_parameter(
            "frame threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| HeatError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sequence.rs"]
mod tests;

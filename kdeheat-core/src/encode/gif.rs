use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use gif::Repeat;

use crate::assets::decode::load_rgba;
use crate::encode::output::write_atomically;
use crate::foundation::error::{HeatError, HeatResult};
use crate::foundation::trace::TraceCtx;

/// Settings for animated GIF output.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GifOpts {
    /// Display time of each frame in milliseconds.
    pub frame_delay_ms: u32,
    /// Number of repetitions; 0 loops forever.
    pub loop_count: u16,
    /// Palette quality from 1 (fastest) to 100 (best).
    pub quality: u8,
    /// Merge identical consecutive frames into one longer frame.
    pub optimize: bool,
}

impl Default for GifOpts {
    fn default() -> Self {
        Self {
            frame_delay_ms: 20,
            loop_count: 0,
            quality: 50,
            optimize: false,
        }
    }
}

impl GifOpts {
    /// Check value ranges.
    pub fn validate(&self) -> HeatResult<()> {
        if !(1..=100).contains(&self.quality) {
            return Err(HeatError::invalid_parameter(format!(
                "gif quality must be within 1..=100, got {}",
                self.quality
            )));
        }
        if self.frame_delay_ms == 0 {
            return Err(HeatError::invalid_parameter("gif frame delay must be > 0 ms"));
        }
        Ok(())
    }

    // NeuQuant sampling factor: 1 samples every pixel, 30 is the coarsest.
    fn speed(&self) -> i32 {
        30 - (i32::from(self.quality) - 1) * 29 / 99
    }

    fn repeat(&self) -> Repeat {
        match self.loop_count {
            0 => Repeat::Infinite,
            n => Repeat::Finite(n),
        }
    }
}

/// Encode `frames` as an animated GIF into `writer`, in iteration order.
///
/// Frames must all share the first frame's dimensions. Each frame clears to transparent before
/// the next is shown, so transparent heatmap areas never reveal earlier frames. Returns the number
/// of GIF frames written, which is lower than the input count when `optimize` merged duplicates.
pub fn encode_gif<W: Write>(
    frames: impl IntoIterator<Item = HeatResult<image::RgbaImage>>,
    writer: W,
    opts: &GifOpts,
) -> HeatResult<usize> {
    opts.validate()?;
    let mut frames = frames.into_iter();
    let first = frames
        .next()
        .ok_or_else(|| HeatError::empty_input("no frames to encode"))??;
    let dims = first.dimensions();
    let (w, h) = gif_dims(dims)?;
    let mut encoder = gif::Encoder::new(writer, w, h, &[]).context("start gif stream")?;
    encoder.set_repeat(opts.repeat()).context("set gif repeat")?;

    let mut written = 0usize;
    let mut pending = (first, opts.frame_delay_ms);
    for (i, frame) in frames.enumerate() {
        let frame = frame?;
        if frame.dimensions() != dims {
            return Err(HeatError::data(format!(
                "frame {} is {}x{} but the animation is {}x{}",
                i + 1,
                frame.width(),
                frame.height(),
                dims.0,
                dims.1
            )));
        }
        if opts.optimize && frame == pending.0 {
            pending.1 = pending.1.saturating_add(opts.frame_delay_ms);
            continue;
        }
        let (prev, delay) = std::mem::replace(&mut pending, (frame, opts.frame_delay_ms));
        write_frame(&mut encoder, prev, delay, opts.speed())?;
        written += 1;
    }
    let (last, delay) = pending;
    write_frame(&mut encoder, last, delay, opts.speed())?;
    written += 1;
    encoder.into_inner().context("finish gif stream")?;
    Ok(written)
}

fn gif_dims((w, h): (u32, u32)) -> HeatResult<(u16, u16)> {
    match (u16::try_from(w), u16::try_from(h)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(HeatError::invalid_parameter(format!(
            "{w}x{h} exceeds the 65535x65535 gif limit"
        ))),
    }
}

fn write_frame<W: Write>(
    encoder: &mut gif::Encoder<W>,
    img: image::RgbaImage,
    delay_ms: u32,
    speed: i32,
) -> HeatResult<()> {
    let (w, h) = gif_dims(img.dimensions())?;
    let mut px = img.into_raw();
    let mut frame = gif::Frame::from_rgba_speed(w, h, &mut px, speed);
    // GIF delays are centiseconds.
    frame.delay = u16::try_from(delay_ms.div_ceil(10)).unwrap_or(u16::MAX);
    frame.dispose = gif::DisposalMethod::Background;
    encoder.write_frame(&frame).context("encode gif frame")?;
    Ok(())
}

/// Assemble the image files in `frames`, in the given order, into an animated GIF at `output`.
pub fn create_gif(
    frames: &[PathBuf],
    output: &Path,
    opts: &GifOpts,
    ctx: &TraceCtx,
) -> HeatResult<usize> {
    if frames.is_empty() {
        return Err(HeatError::empty_input("no frames to assemble into a gif"));
    }
    opts.validate()?;
    let ctx = ctx.gif();
    ctx.in_scope(|| {
        tracing::info!(frames = frames.len(), "assembling gif");
        let mut written = 0;
        write_atomically(output, |tmp| {
            let file =
                File::create(tmp).with_context(|| format!("create gif '{}'", tmp.display()))?;
            let mut w = BufWriter::new(file);
            written = encode_gif(frames.iter().map(|p| load_rgba(p)), &mut w, opts)?;
            w.flush()
                .with_context(|| format!("write gif '{}'", output.display()))?;
            Ok(())
        })?;
        tracing::info!(output = %output.display(), frames = written, "wrote gif");
        Ok(written)
    })
}

/// [`create_gif`] over every file matching `pattern`, sorted by path.
pub fn create_gif_from_pattern(
    pattern: &str,
    output: &Path,
    opts: &GifOpts,
    ctx: &TraceCtx,
) -> HeatResult<usize> {
    let frames = resolve_frame_pattern(pattern)?;
    create_gif(&frames, output, opts, ctx)
}

/// [`create_gif`] over every `*.{extension}` file in `dir`, sorted by name.
pub fn create_gif_from_directory(
    dir: &Path,
    extension: &str,
    output: &Path,
    opts: &GifOpts,
    ctx: &TraceCtx,
) -> HeatResult<usize> {
    let pattern = dir.join(format!("*.{extension}"));
    create_gif_from_pattern(&pattern.to_string_lossy(), output, opts, ctx)
}

/// Expand a file pattern whose last path component may contain `*` and `?`.
///
/// Matches are returned sorted lexicographically, so zero-padded frame numbers come out in order.
pub fn resolve_frame_pattern(pattern: &str) -> HeatResult<Vec<PathBuf>> {
    let path = Path::new(pattern);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| HeatError::invalid_parameter(format!("bad frame pattern '{pattern}'")))?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if dir.to_string_lossy().contains(['*', '?']) {
        return Err(HeatError::invalid_parameter(format!(
            "wildcards are only supported in the file name of '{pattern}'"
        )));
    }

    let mut out = Vec::new();
    if dir.is_dir() {
        for entry in std::fs::read_dir(&dir)
            .with_context(|| format!("list frames in '{}'", dir.display()))?
        {
            let entry = entry.with_context(|| format!("list frames in '{}'", dir.display()))?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if wildcard_match(&name, &file_name) && entry.path().is_file() {
                out.push(entry.path());
            }
        }
    }
    if out.is_empty() {
        return Err(HeatError::empty_input(format!(
            "no images found matching pattern '{pattern}'"
        )));
    }
    out.sort();
    Ok(out)
}

fn wildcard_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    let (mut pi, mut ti) = (0usize, 0usize);
    let mut star: Option<(usize, usize)> = None;
    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ti));
            pi += 1;
        } else if let Some((sp, st)) = star {
            pi = sp + 1;
            ti = st + 1;
            star = Some((sp, st + 1));
        } else {
            return false;
        }
    }
    p[pi..].iter().all(|&c| c == '*')
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;

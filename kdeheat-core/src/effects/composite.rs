use std::path::Path;
use std::str::FromStr;

use crate::assets::decode::load_rgba;
use crate::encode::output::save_rgba_atomic;
use crate::foundation::error::{HeatError, HeatResult};
use crate::foundation::math::{
    mul_div255_u8, premultiply_rgba8_in_place, unpremultiply_rgba8_in_place,
};
use crate::foundation::trace::TraceCtx;

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over of one premultiplied pixel onto another, with extra `opacity` on the source.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// [`over`] applied pixel-wise to two equal-length premultiplied buffers.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> HeatResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(HeatError::data(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Pixel rectangle `[left, right) x [top, bottom)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CropBox {
    /// First included column.
    pub left: u32,
    /// First included row.
    pub top: u32,
    /// One past the last included column.
    pub right: u32,
    /// One past the last included row.
    pub bottom: u32,
}

impl CropBox {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Require a non-empty box lying inside a `width x height` image.
    pub fn check_within(&self, width: u32, height: u32) -> HeatResult<()> {
        if self.left >= self.right || self.top >= self.bottom {
            return Err(HeatError::invalid_parameter(format!(
                "crop box {self:?} must satisfy left < right and top < bottom"
            )));
        }
        if self.right > width || self.bottom > height {
            return Err(HeatError::invalid_parameter(format!(
                "crop box {self:?} exceeds the {width}x{height} image"
            )));
        }
        Ok(())
    }
}

impl FromStr for CropBox {
    type Err = HeatError;

    /// Parse `"left,top,right,bottom"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let bad = || {
            HeatError::invalid_parameter(format!(
                "crop box must be 'left,top,right,bottom' with non-negative integers, got '{s}'"
            ))
        };
        let &[l, t, r, b] = parts.as_slice() else {
            return Err(bad());
        };
        let n = |v: &str| v.parse::<u32>().map_err(|_| bad());
        Ok(CropBox {
            left: n(l)?,
            top: n(t)?,
            right: n(r)?,
            bottom: n(b)?,
        })
    }
}

/// Parse the `"left,top,right,bottom"` crop form.
pub fn parse_crop_box(s: &str) -> HeatResult<CropBox> {
    s.parse()
}

/// Cut `rect` out of `img`.
pub fn crop(img: &image::RgbaImage, rect: CropBox) -> HeatResult<image::RgbaImage> {
    rect.check_within(img.width(), img.height())?;
    Ok(
        image::imageops::crop_imm(img, rect.left, rect.top, rect.width(), rect.height())
            .to_image(),
    )
}

/// Paste `heatmap` at the top-left of `background` using its alpha as the mask, then crop.
///
/// Parts of the heatmap beyond the background's bounds are dropped. The result keeps the
/// background's size unless `crop` is given.
pub fn overlay(
    background: &image::RgbaImage,
    heatmap: &image::RgbaImage,
    crop_box: Option<CropBox>,
) -> HeatResult<image::RgbaImage> {
    if let Some(rect) = crop_box {
        rect.check_within(background.width(), background.height())?;
    }

    let (bg_w, bg_h) = background.dimensions();
    let w = bg_w.min(heatmap.width()) as usize;
    let h = bg_h.min(heatmap.height()) as usize;
    let (bg_stride, fg_stride) = (bg_w as usize * 4, heatmap.width() as usize * 4);

    let mut px = background.as_raw().clone();
    premultiply_rgba8_in_place(&mut px);
    let mut row = vec![0u8; w * 4];
    for y in 0..h {
        row.copy_from_slice(&heatmap.as_raw()[y * fg_stride..y * fg_stride + w * 4]);
        premultiply_rgba8_in_place(&mut row);
        over_in_place(&mut px[y * bg_stride..y * bg_stride + w * 4], &row, 1.0)?;
    }
    unpremultiply_rgba8_in_place(&mut px);
    let out = image::RgbaImage::from_raw(bg_w, bg_h, px)
        .ok_or_else(|| HeatError::data("composite buffer does not match background size"))?;

    match crop_box {
        Some(rect) => crop(&out, rect),
        None => Ok(out),
    }
}

/// File form of [`overlay`]: read both images, composite, write `output` atomically.
///
/// `output` may name one of the inputs; it is only replaced after the composite is complete.
pub fn overlay_images(
    background: &Path,
    heatmap: &Path,
    output: &Path,
    crop_box: Option<CropBox>,
    ctx: &TraceCtx,
) -> HeatResult<()> {
    let ctx = ctx.overlay();
    ctx.in_scope(|| {
        let bg = load_rgba(background)?;
        let fg = load_rgba(heatmap)?;
        let out = overlay(&bg, &fg, crop_box)?;
        save_rgba_atomic(output, &out)?;
        tracing::debug!(
            output = %output.display(),
            width = out.width(),
            height = out.height(),
            "wrote composite"
        );
        Ok(())
    })
}

/// Crop an image file into `output`.
pub fn crop_image(input: &Path, output: &Path, rect: CropBox) -> HeatResult<()> {
    let img = load_rgba(input)?;
    let cropped = crop(&img, rect)?;
    save_rgba_atomic(output, &cropped)?;
    tracing::info!(input = %input.display(), output = %output.display(), "cropped image");
    Ok(())
}

/// Resample `img` with a Lanczos3 filter.
///
/// With `maintain_aspect` the image is shrunk to fit inside `width x height` keeping its aspect
/// ratio and is never enlarged; otherwise it is stretched to exactly that size.
pub fn resize(
    img: &image::RgbaImage,
    width: u32,
    height: u32,
    maintain_aspect: bool,
) -> HeatResult<image::RgbaImage> {
    if width == 0 || height == 0 {
        return Err(HeatError::invalid_parameter(format!(
            "resize target must be non-empty, got {width}x{height}"
        )));
    }
    let (w, h) = if maintain_aspect {
        fit_within(img.width(), img.height(), width, height)
    } else {
        (width, height)
    };
    if (w, h) == img.dimensions() {
        return Ok(img.clone());
    }
    Ok(image::imageops::resize(
        img,
        w,
        h,
        image::imageops::FilterType::Lanczos3,
    ))
}

fn fit_within(w: u32, h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if w <= max_w && h <= max_h {
        return (w, h);
    }
    let scale = (f64::from(max_w) / f64::from(w)).min(f64::from(max_h) / f64::from(h));
    let fit = |v: u32| ((f64::from(v) * scale).round() as u32).max(1);
    (fit(w).min(max_w), fit(h).min(max_h))
}

/// Resize an image file into `output`; see [`resize`].
pub fn resize_image(
    input: &Path,
    output: &Path,
    size: (u32, u32),
    maintain_aspect: bool,
) -> HeatResult<()> {
    let img = load_rgba(input)?;
    let resized = resize(&img, size.0, size.1, maintain_aspect)?;
    save_rgba_atomic(output, &resized)?;
    tracing::info!(input = %input.display(), output = %output.display(), "resized image");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;

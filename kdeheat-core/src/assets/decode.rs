use std::path::Path;

use anyhow::Context;

use crate::foundation::error::HeatResult;

/// Decode an image file to straight-alpha RGBA8.
pub fn load_rgba(path: &Path) -> HeatResult<image::RgbaImage> {
    let img = image::open(path).with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(img.to_rgba8())
}

/// Decode encoded image bytes to straight-alpha RGBA8.
pub fn decode_rgba(bytes: &[u8]) -> HeatResult<image::RgbaImage> {
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(img.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{HeatError, HeatResult};

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> HeatResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Removes the file it names on drop unless disarmed.
pub(crate) struct TempFileGuard(pub(crate) Option<PathBuf>);

impl TempFileGuard {
    pub(crate) fn disarm(&mut self) {
        self.0 = None;
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

/// Hidden sibling path used while `target` is being written.
pub(crate) fn temp_sibling(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    target.with_file_name(format!(".{name}.{}.{nanos}.tmp", std::process::id()))
}

/// Write `path` through a temporary sibling and rename it into place.
///
/// `write` receives the temporary path. On any failure the temporary is removed and `path` is
/// left untouched, so readers never observe a truncated file.
pub(crate) fn write_atomically(
    path: &Path,
    write: impl FnOnce(&Path) -> HeatResult<()>,
) -> HeatResult<()> {
    ensure_parent_dir(path)?;
    let tmp = temp_sibling(path);
    let mut guard = TempFileGuard(Some(tmp.clone()));
    write(&tmp)?;
    std::fs::rename(&tmp, path).with_context(|| {
        format!(
            "failed to move '{}' into place at '{}'",
            tmp.display(),
            path.display()
        )
    })?;
    guard.disarm();
    Ok(())
}

/// Output format implied by the extension of `path`.
pub fn image_format_for(path: &Path) -> HeatResult<image::ImageFormat> {
    image::ImageFormat::from_path(path).map_err(|_| {
        HeatError::invalid_parameter(format!(
            "cannot infer an image format from '{}'; use an extension such as .png",
            path.display()
        ))
    })
}

/// Encode an RGBA8 image to `path` (format from the extension), atomically.
pub fn save_rgba_atomic(path: &Path, img: &image::RgbaImage) -> HeatResult<()> {
    let format = image_format_for(path)?;
    write_atomically(path, |tmp| {
        img.save_with_format(tmp, format)
            .with_context(|| format!("failed to write image '{}'", path.display()))?;
        Ok(())
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/output.rs"]
mod tests;

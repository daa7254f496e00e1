use std::path::{Path, PathBuf};

use crate::capture::frame_capture::CapturedImage;
use crate::errors::{PreviewError, Result};

/// Persists captured frames.
pub trait ImageWriter {
    /// Encodes `image` into `dir` and returns the written file's path.
    fn write(&self, image: &CapturedImage, dir: &Path) -> Result<PathBuf>;
}

/// Writes captures as `<dir>/<name>.png`, creating `dir` when needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngImageWriter;

impl PngImageWriter {
    pub const EXTENSION: &'static str = "png";
}

impl ImageWriter for PngImageWriter {
    fn write(&self, image: &CapturedImage, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.{}", image.name(), Self::EXTENSION));

        let buffer = image.clone().into_rgba_image().ok_or_else(|| {
            PreviewError::ImageEncode(format!(
                "pixel data does not match {}x{}",
                image.width(),
                image.height()
            ))
        })?;
        buffer.save_with_format(&path, image::ImageFormat::Png)?;

        log::info!("Screenshot written to {}", path.display());
        Ok(path)
    }
}

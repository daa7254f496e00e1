use chrono::{Local, NaiveDateTime};

use crate::errors::{PreviewError, Result};
use crate::renderer::target::FrameBuffer;

/// Prefix of every generated screenshot name.
pub const SCREENSHOT_PREFIX: &str = "screenshot_";
/// `chrono` format of the timestamp part of a screenshot name.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// An immutable copy of one rendered frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    name: String,
}

impl CapturedImage {
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA8 pixels, rows top to bottom.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// File stem without extension, e.g. `screenshot_2024-05-01_13-37-00`.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Converts into an `image` buffer for encoding.
    #[must_use]
    pub fn into_rgba_image(self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels)
    }
}

/// Reads rendered frames back into portable images.
pub struct FrameCapture;

impl FrameCapture {
    /// Copies the current contents of `buffer`, named after the local time.
    pub fn snapshot(buffer: &FrameBuffer) -> Result<CapturedImage> {
        Self::snapshot_at(buffer, Local::now().naive_local())
    }

    /// Copies the current contents of `buffer`, named after `timestamp`.
    ///
    /// The pixels are copied out while the target is read-locked; later
    /// frames rendered into the same buffer never show up in the result.
    pub fn snapshot_at(buffer: &FrameBuffer, timestamp: NaiveDateTime) -> Result<CapturedImage> {
        let target = buffer.upgrade().ok_or(PreviewError::NoActiveRenderTarget)?;
        let target = target.read();

        let image = CapturedImage {
            width: target.width(),
            height: target.height(),
            pixels: target.pixels().to_vec(),
            name: Self::name_for(&timestamp),
        };
        log::debug!(
            "Captured {}x{} frame #{} as '{}'",
            image.width,
            image.height,
            target.frame_index(),
            image.name
        );
        Ok(image)
    }

    /// `screenshot_<YYYY-MM-DD_HH-mm-ss>`, without extension.
    #[must_use]
    pub fn name_for(timestamp: &NaiveDateTime) -> String {
        format!("{SCREENSHOT_PREFIX}{}", timestamp.format(TIMESTAMP_FORMAT))
    }
}

//! Still-image capture
//!
//! [`FrameCapture`] copies the session's render target into a
//! [`CapturedImage`]; an [`ImageWriter`] persists it into the folder a
//! [`SavePathProvider`] resolved.

pub mod frame_capture;
pub mod save_path;
pub mod writer;

pub use frame_capture::{CapturedImage, FrameCapture, SCREENSHOT_PREFIX, TIMESTAMP_FORMAT};
pub use save_path::{FixedSavePath, SavePathProvider, StoredSavePath, resolve_save_dir};
pub use writer::{ImageWriter, PngImageWriter};

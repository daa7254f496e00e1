//! Utility Module
//!
//! - [`OrbitCamera`]: bounds-based camera framing around the vertical axis
//! - [`FrameClock`]: capped wall-clock `dt` for tick loops driving a preview

pub mod orbit_camera;
pub mod time;

pub use orbit_camera::{CameraPlacement, OrbitCamera, wrap_degrees};
pub use time::{FrameClock, MAX_FRAME_DT};

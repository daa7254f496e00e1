//! Preview controller
//!
//! - [`settings`]: viewport, framing and playback defaults
//! - [`camera_state`]: operator-controlled yaw, speed and play toggle
//! - [`session`]: the `Closed`/`Open` preview lifecycle

pub mod camera_state;
pub mod session;
pub mod settings;

pub use camera_state::{CameraState, MAX_SPEED, MIN_SPEED, clamp_speed};
pub use session::{PreviewSession, SessionState};
pub use settings::PreviewSettings;

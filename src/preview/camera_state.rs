use crate::preview::settings::PreviewSettings;
use crate::utils::orbit_camera::wrap_degrees;

/// Slowest playback rate a preview accepts.
pub const MIN_SPEED: f32 = 0.0;
/// Fastest playback rate a preview accepts.
pub const MAX_SPEED: f32 = 2.0;

/// Clamps a playback rate into `[MIN_SPEED, MAX_SPEED]`; NaN becomes `MIN_SPEED`.
#[must_use]
pub fn clamp_speed(speed: f32) -> f32 {
    if speed.is_nan() {
        MIN_SPEED
    } else {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    }
}

/// Operator-controlled view and playback parameters.
///
/// Values are normalized on write, so readers can rely on
/// `yaw_degrees ∈ [0, 360)` and `speed ∈ [0, 2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    yaw_degrees: f32,
    speed: f32,
    is_playing: bool,
}

impl CameraState {
    #[must_use]
    pub fn new(yaw_degrees: f32, speed: f32, is_playing: bool) -> Self {
        Self {
            yaw_degrees: wrap_degrees(yaw_degrees),
            speed: clamp_speed(speed),
            is_playing,
        }
    }

    #[must_use]
    pub fn from_settings(settings: &PreviewSettings) -> Self {
        Self::new(
            settings.initial_yaw_degrees,
            settings.initial_speed,
            settings.start_playing,
        )
    }

    #[inline]
    #[must_use]
    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }

    #[inline]
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Returns the wrapped value that was stored.
    pub fn set_yaw(&mut self, yaw_degrees: f32) -> f32 {
        self.yaw_degrees = wrap_degrees(yaw_degrees);
        self.yaw_degrees
    }

    /// Returns the clamped value that was stored.
    pub fn set_speed(&mut self, speed: f32) -> f32 {
        self.speed = clamp_speed(speed);
        self.speed
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::from_settings(&PreviewSettings::default())
    }
}

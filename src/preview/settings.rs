//! Preview Configuration
//!
//! [`PreviewSettings`] gathers everything a [`PreviewSession`](super::PreviewSession)
//! needs to know before it opens: the size of its off-screen target, the
//! camera projection, where the actor is placed, and the initial playback
//! state. Settings can be built in code or loaded from a JSON file; missing
//! fields fall back to [`Default`].
//!
//! ```json
//! { "width": 320, "height": 240, "initial_speed": 1.0 }
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Configuration for a preview session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    // === Render Target ===
    /// Width of the off-screen render target in pixels.
    pub width: u32,
    /// Height of the off-screen render target in pixels.
    pub height: u32,
    /// Clear color in linear `[r, g, b, a]`, each component in `[0, 1]`.
    pub background: [f32; 4],

    // === Camera Projection ===
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,

    // === Actor Placement ===
    /// World position the actor root is moved to after instantiation.
    pub actor_position: Vec3,

    // === Initial Playback State ===
    pub initial_speed: f32,
    pub initial_yaw_degrees: f32,
    pub start_playing: bool,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 640,
            background: [0.2, 0.2, 0.2, 1.0],
            fov_degrees: 60.0,
            near: 0.01,
            far: 5000.0,
            actor_position: Vec3::new(0.0, -0.5, 0.0),
            initial_speed: 0.5,
            initial_yaw_degrees: 0.0,
            start_playing: true,
        }
    }
}

impl PreviewSettings {
    /// Parses settings from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads settings from a JSON file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Width over height of the render target, `1.0` for a degenerate target.
    #[inline]
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// The background color quantized to RGBA8.
    #[must_use]
    pub fn background_rgba8(&self) -> [u8; 4] {
        self.background.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

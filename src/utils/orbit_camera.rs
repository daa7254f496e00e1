use glam::{Quat, Vec3};

use crate::resources::geometry::BoundingBox;

/// Multiplier from the bounds diagonal to the framing distance.
const DISTANCE_FACTOR: f32 = 2.0;
/// Fraction of the half-height the camera is raised above the center.
const HEIGHT_BIAS: f32 = 0.3;

/// Where the preview camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPlacement {
    pub position: Vec3,
    pub look_target: Vec3,
    /// Framing distance derived from the bounds (`|size| * 2`).
    pub distance: f32,
}

impl CameraPlacement {
    /// `true` when the bounds had no size, so the camera sits on its target
    /// and there is nothing meaningful to frame.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.distance == 0.0
    }
}

/// Orbit camera that frames an actor from its world bounds.
///
/// The camera orbits the bounds center around the vertical axis only. Its
/// horizontal radius is `2 * distance` where `distance = |bounds.size| * 2`,
/// and it is raised by `0.3 * half_size.y`, so any actor is framed whole
/// regardless of its absolute size.
pub struct OrbitCamera;

impl OrbitCamera {
    #[must_use]
    pub fn compute_placement(bounds: &BoundingBox, yaw_degrees: f32) -> CameraPlacement {
        let center = bounds.center();
        let extent = bounds.half_size();
        let distance = bounds.size().length() * DISTANCE_FACTOR;

        let local = Vec3::new(0.0, extent.y * HEIGHT_BIAS, -distance * 2.0);
        let offset = Quat::from_rotation_y(yaw_degrees.to_radians()) * local;

        CameraPlacement {
            position: center + offset,
            look_target: center,
            distance,
        }
    }
}

/// Wraps any angle in degrees into `[0, 360)`.
#[must_use]
pub fn wrap_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_degrees_into_range() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(370.0), 10.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert_eq!(wrap_degrees(f32::NAN), 0.0);
        let tiny = wrap_degrees(-1e-6);
        assert!((0.0..360.0).contains(&tiny));
    }
}

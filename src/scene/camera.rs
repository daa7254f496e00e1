use glam::{Mat4, Vec3};

use crate::scene::transform::Transform;
use crate::utils::orbit_camera::CameraPlacement;

/// Perspective preview camera.
///
/// Projection parameters are fixed for the lifetime of a session; the
/// transform is re-derived from an orbit placement before every frame.
#[derive(Debug, Clone)]
pub struct Camera {
    pub transform: Transform,

    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    projection_matrix: Mat4,
}

impl Camera {
    /// `fov` is given in degrees.
    #[must_use]
    pub fn new_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            transform: Transform::new(),
            fov: fov.to_radians(),
            aspect,
            near,
            far,
            projection_matrix: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam
    }

    pub fn update_projection_matrix(&mut self) {
        // glam's perspective_rh maps depth to [0, 1].
        self.projection_matrix = Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far);
    }

    /// Moves the camera to `placement` and aims it at the look target.
    pub fn apply_placement(&mut self, placement: &CameraPlacement) {
        self.transform.position = placement.position;
        self.transform.look_at(placement.look_target, Vec3::Y);
    }

    #[inline]
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    /// View matrix, the inverse of the camera's world matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from(self.transform.matrix()).inverse()
    }

    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix()
    }
}

//! Camera utilities for scene rendering

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};

/// A perspective camera
///
/// The scene is Z-up; the default camera looks along +y.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let perspective = Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far);
        perspective.into_inner()
    }

    /// Combined projection * view matrix
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Move the camera without changing where it looks
    pub fn set_position(&mut self, position: Point3<f32>) {
        let offset = self.target - self.position;
        self.position = position;
        self.target = position + offset;
    }

    /// Update the aspect ratio for a new surface size
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3::new(0.0, -20.0, 5.0),
            Point3::new(0.0, -19.0, 5.0),
            Vector3::new(0.0, 0.0, 1.0),
            30f32.to_radians(),
            4.0 / 3.0,
            1.0,
            200.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_set_position_keeps_direction() {
        let mut camera = Camera::default();
        camera.set_position(Point3::new(1.0, -20.0, 5.0));
        assert_eq!(camera.position, Point3::new(1.0, -20.0, 5.0));
        assert_relative_eq!(camera.target, Point3::new(1.0, -19.0, 5.0));
    }

    #[test]
    fn test_point_ahead_projects_to_center() {
        let camera = Camera::default();
        let clip = camera.view_projection() * Point3::new(0.0, 0.0, 5.0).to_homogeneous();
        assert!(clip.w > 0.0);
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-6);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_up_is_up_on_screen() {
        let camera = Camera::default();
        let clip = camera.view_projection() * Point3::new(0.0, 0.0, 8.0).to_homogeneous();
        assert!(clip.y / clip.w > 0.0);
    }

    #[test]
    fn test_viewport_aspect() {
        let mut camera = Camera::default();
        camera.set_viewport(1920, 1080);
        assert_relative_eq!(camera.aspect_ratio, 16.0 / 9.0);
    }
}

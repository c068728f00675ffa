//! Camera utilities for 3D visualization

use nalgebra::{Matrix4, Point3, Vector3};

/// A translating camera for viewing point sets
///
/// The camera never rotates. Directional nudges slide the eye and the
/// target together along the camera's right and up axes; zoom nudges slide
/// them along the viewing direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Distance covered by one nudge
    pub step: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Point3<f32>, target: Point3<f32>, up: Vector3<f32>, step: f32) -> Self {
        Self {
            position,
            target,
            up,
            step,
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    fn direction(&self) -> Vector3<f32> {
        (self.target - self.position).normalize()
    }

    fn right(&self) -> Vector3<f32> {
        self.direction().cross(&self.up).normalize()
    }

    fn camera_up(&self) -> Vector3<f32> {
        self.right().cross(&self.direction())
    }

    fn translate(&mut self, offset: Vector3<f32>) {
        self.position += offset;
        self.target += offset;
    }

    pub fn move_left(&mut self) {
        let offset = -self.right() * self.step;
        self.translate(offset);
    }

    pub fn move_right(&mut self) {
        let offset = self.right() * self.step;
        self.translate(offset);
    }

    pub fn move_up(&mut self) {
        let offset = self.camera_up() * self.step;
        self.translate(offset);
    }

    pub fn move_down(&mut self) {
        let offset = -self.camera_up() * self.step;
        self.translate(offset);
    }

    /// Move the camera towards what it is looking at
    pub fn move_forward(&mut self) {
        let offset = self.direction() * self.step;
        self.translate(offset);
    }

    /// Move the camera away from what it is looking at
    pub fn move_backward(&mut self) {
        let offset = -self.direction() * self.step;
        self.translate(offset);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3::new(0.0, 0.0, 3.0),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            0.1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_forward_then_backward_restores_view() {
        let mut camera = Camera::default();
        let original = camera.view_matrix();

        camera.move_forward();
        assert!((camera.view_matrix() - original).norm() > 1e-3);
        camera.move_backward();
        assert_relative_eq!(camera.view_matrix(), original, epsilon = 1e-5);
    }

    #[test]
    fn test_forward_approaches_target_direction() {
        let mut camera = Camera::default();
        camera.move_forward();
        assert_relative_eq!(camera.position, Point3::new(0.0, 0.0, 2.9), epsilon = 1e-6);
        assert_relative_eq!(camera.target, Point3::new(0.0, 0.0, -0.1), epsilon = 1e-6);
    }

    #[test]
    fn test_directional_nudges() {
        let mut camera = Camera::default();
        camera.move_left();
        assert_relative_eq!(camera.position, Point3::new(-0.1, 0.0, 3.0), epsilon = 1e-6);
        camera.move_right();
        camera.move_up();
        assert_relative_eq!(camera.position, Point3::new(0.0, 0.1, 3.0), epsilon = 1e-6);
        camera.move_down();
        camera.move_down();
        assert_relative_eq!(camera.position, Point3::new(0.0, -0.1, 3.0), epsilon = 1e-6);
    }

    #[test]
    fn test_nudges_keep_viewing_direction() {
        let mut camera = Camera::default();
        let direction = camera.target - camera.position;
        camera.move_left();
        camera.move_up();
        camera.move_forward();
        assert_relative_eq!(camera.target - camera.position, direction, epsilon = 1e-6);
    }
}

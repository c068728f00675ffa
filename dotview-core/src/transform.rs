//! Model, view and projection transform state

use nalgebra::{Matrix4, Perspective3, Vector3};

/// Fixed pull-back applied on top of the camera view every frame
pub const VIEW_OFFSET: Vector3<f32> = Vector3::new(0.0, 0.0, -1.0);

/// Perspective parameters used when rebuilding the projection matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            fov_y: std::f32::consts::FRAC_PI_4,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// The three matrices handed to the shader program each frame
///
/// The model matrix persists and accumulates relative rotations. View and
/// projection are overwritten every frame and never accumulate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    model: Matrix4<f32>,
    view: Matrix4<f32>,
    projection: Matrix4<f32>,
}

impl TransformState {
    /// Identity model, view and projection
    pub fn new() -> Self {
        Self {
            model: Matrix4::identity(),
            view: Matrix4::identity(),
            projection: Matrix4::identity(),
        }
    }

    /// Compose rotations about X, then Y, then Z onto the model matrix
    ///
    /// Angles are in radians. Each call is relative to the current
    /// orientation.
    pub fn rotate(&mut self, delta: Vector3<f32>) {
        self.model *= Matrix4::from_axis_angle(&Vector3::x_axis(), delta.x);
        self.model *= Matrix4::from_axis_angle(&Vector3::y_axis(), delta.y);
        self.model *= Matrix4::from_axis_angle(&Vector3::z_axis(), delta.z);
    }

    /// Replace the projection matrix for the given viewport aspect ratio
    pub fn recompute_projection(&mut self, aspect_ratio: f32, params: &ProjectionParams) {
        // A minimized window reports a zero-sized viewport.
        let aspect = if aspect_ratio.is_finite() && aspect_ratio > f32::EPSILON {
            aspect_ratio
        } else {
            1.0
        };
        self.projection = Perspective3::new(aspect, params.fov_y, params.near, params.far).into_inner();
    }

    /// Replace the view matrix with the camera view plus the fixed pull-back
    pub fn compose_view(&mut self, camera_view: Matrix4<f32>) {
        self.view = camera_view * Matrix4::new_translation(&VIEW_OFFSET);
    }

    pub fn model(&self) -> &Matrix4<f32> {
        &self.model
    }

    pub fn view(&self) -> &Matrix4<f32> {
        &self.view
    }

    pub fn projection(&self) -> &Matrix4<f32> {
        &self.projection
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new()
    }
}

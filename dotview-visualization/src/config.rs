//! Viewer configuration

use std::path::PathBuf;

use dotview_core::{PrimitiveMode, ProjectionParams};
use dotview_gpu::RenderConfig;

use crate::camera::Camera;

/// Compiled-in viewer settings
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Point-list file loaded at startup
    pub data_path: PathBuf,
    pub window_title: String,
    pub window_size: (u32, u32),
    /// Radians added per arrow key press
    pub rotation_step: f32,
    pub initial_mode: PrimitiveMode,
    pub camera: Camera,
    pub projection: ProjectionParams,
    pub render: RenderConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/five_y"),
            window_title: "Spinal".to_string(),
            window_size: (800, 800),
            rotation_step: 1.0 / 20.0,
            initial_mode: PrimitiveMode::Points,
            camera: Camera::default(),
            projection: ProjectionParams::default(),
            render: RenderConfig::default(),
        }
    }
}

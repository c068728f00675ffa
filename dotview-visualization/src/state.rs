//! Application context shared by the input router and the frame loop

use dotview_core::{IndexSequence, PointSet, PrimitiveMode, ProjectionParams, TransformState};

use crate::camera::Camera;
use crate::config::ViewerConfig;

/// Window viewport in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; zero while the window is minimized
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            0.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Everything the viewer mutates while running
///
/// The point set is fixed for the lifetime of the state and the index
/// sequence is only ever rebuilt by [`ViewerState::set_mode`], so it always
/// matches the current point set and mode.
#[derive(Debug, Clone)]
pub struct ViewerState {
    points: PointSet,
    mode: PrimitiveMode,
    indices: IndexSequence,
    pub transform: TransformState,
    pub camera: Camera,
    pub viewport: Viewport,
    pub projection: ProjectionParams,
    close_requested: bool,
}

impl ViewerState {
    pub fn new(points: PointSet, config: &ViewerConfig) -> Self {
        let mode = config.initial_mode;
        let indices = IndexSequence::generate(points.len(), mode);
        let (width, height) = config.window_size;

        Self {
            points,
            mode,
            indices,
            transform: TransformState::new(),
            camera: config.camera.clone(),
            viewport: Viewport::new(width, height),
            projection: config.projection,
            close_requested: false,
        }
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn mode(&self) -> PrimitiveMode {
        self.mode
    }

    pub fn indices(&self) -> &IndexSequence {
        &self.indices
    }

    /// Switch primitive mode and rebuild the index sequence
    pub fn set_mode(&mut self, mode: PrimitiveMode) {
        self.mode = mode;
        self.indices = IndexSequence::generate(self.points.len(), mode);
        log::info!("Render mode {:?}: {} indices", mode, self.indices.len());
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Recompute view and projection for the frame about to be drawn
    pub fn prepare_frame(&mut self) {
        self.transform.compose_view(self.camera.view_matrix());
        self.transform
            .recompute_projection(self.viewport.aspect_ratio(), &self.projection);
    }
}

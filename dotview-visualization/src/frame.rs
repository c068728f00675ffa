//! Frame loop state machine

use dotview_core::{IndexSequence, PointSet, Result, TransformState};

use crate::input::RouteOutcome;
use crate::state::{Viewport, ViewerState};

/// The rendering side of the frame loop
///
/// Implemented by the wgpu renderer in the windowed viewer and by
/// recording doubles in tests.
pub trait RenderBackend {
    /// Upload a point set and the index sequence built for it
    fn upload(&mut self, points: &PointSet, indices: &IndexSequence) -> Result<()>;

    /// Replace the index sequence after a primitive mode change
    fn upload_indices(&mut self, indices: &IndexSequence) -> Result<()>;

    /// Apply new viewport dimensions
    fn resize(&mut self, viewport: Viewport);

    /// Clear, draw with the given transforms and present
    fn draw(&mut self, transform: &TransformState) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    Running,
    Closed,
}

/// Drives one frame at a time until the viewer is asked to close
#[derive(Debug)]
pub struct FrameLoop {
    phase: FramePhase,
    frame_count: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            phase: FramePhase::Running,
            frame_count: 0,
        }
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == FramePhase::Running
    }

    /// Frames drawn so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Upload the initial point set before the first frame
    pub fn start<B: RenderBackend>(&mut self, state: &ViewerState, backend: &mut B) -> Result<()> {
        backend.upload(state.points(), state.indices())?;
        backend.resize(state.viewport);
        Ok(())
    }

    /// Carry out the external side effect of a routed event
    pub fn apply<B: RenderBackend>(
        &mut self,
        outcome: RouteOutcome,
        state: &ViewerState,
        backend: &mut B,
    ) -> Result<()> {
        match outcome {
            RouteOutcome::TopologyChanged => backend.upload_indices(state.indices())?,
            RouteOutcome::ViewportChanged(viewport) => backend.resize(viewport),
            RouteOutcome::CloseRequested => self.close(),
            RouteOutcome::Handled | RouteOutcome::Ignored => {}
        }
        Ok(())
    }

    /// Draw one frame, or move to `Closed` if a close was requested
    ///
    /// Returns whether a frame was drawn.
    pub fn run_frame<B: RenderBackend>(&mut self, state: &mut ViewerState, backend: &mut B) -> Result<bool> {
        if state.close_requested() {
            self.close();
        }
        if !self.is_running() {
            return Ok(false);
        }

        state.prepare_frame();
        backend.draw(&state.transform)?;
        self.frame_count += 1;

        if self.frame_count % 600 == 0 {
            log::debug!("Rendered {} frames", self.frame_count);
        }
        Ok(true)
    }

    fn close(&mut self) {
        if self.phase == FramePhase::Running {
            log::info!("Closing after {} frames", self.frame_count);
            self.phase = FramePhase::Closed;
        }
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

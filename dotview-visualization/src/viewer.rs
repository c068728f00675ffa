//! Interactive window for a single point set
//!
//! This is the only module that talks to winit. Window events are
//! translated into [`InputEvent`]s and routed synchronously; redraw
//! requests drive the [`FrameLoop`].

use std::sync::Arc;

use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, KeyEvent, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

use dotview_core::{Error, IndexSequence, PointSet, Result, TransformState};
use dotview_gpu::PointSetRenderer;

use crate::config::ViewerConfig;
use crate::frame::{FrameLoop, RenderBackend};
use crate::input::{InputEvent, InputRouter, KeyState, ViewerKey};
use crate::state::{Viewport, ViewerState};

impl RenderBackend for PointSetRenderer<'_> {
    fn upload(&mut self, points: &PointSet, indices: &IndexSequence) -> Result<()> {
        PointSetRenderer::upload(self, points, indices)
    }

    fn upload_indices(&mut self, indices: &IndexSequence) -> Result<()> {
        PointSetRenderer::upload_indices(self, indices)
    }

    fn resize(&mut self, viewport: Viewport) {
        PointSetRenderer::resize(self, PhysicalSize::new(viewport.width, viewport.height));
    }

    fn draw(&mut self, transform: &TransformState) -> Result<()> {
        self.update_transform(transform);
        self.render()
    }
}

/// Map a physical key onto the keys the viewer understands
pub fn viewer_key(code: KeyCode) -> ViewerKey {
    match code {
        KeyCode::Escape => ViewerKey::Escape,
        KeyCode::ArrowLeft => ViewerKey::Left,
        KeyCode::ArrowRight => ViewerKey::Right,
        KeyCode::ArrowUp => ViewerKey::Up,
        KeyCode::ArrowDown => ViewerKey::Down,
        KeyCode::KeyW => ViewerKey::W,
        KeyCode::KeyA => ViewerKey::A,
        KeyCode::KeyS => ViewerKey::S,
        KeyCode::KeyD => ViewerKey::D,
        KeyCode::KeyP => ViewerKey::P,
        KeyCode::KeyL => ViewerKey::L,
        _ => ViewerKey::Other,
    }
}

/// Translate a winit window event, if the viewer cares about it
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CloseRequested => Some(InputEvent::CloseRequested),
        WindowEvent::Resized(size) => Some(InputEvent::Resized {
            width: size.width,
            height: size.height,
        }),
        WindowEvent::MouseWheel { delta, .. } => {
            let dy = match delta {
                MouseScrollDelta::LineDelta(_, y) => *y as f64,
                MouseScrollDelta::PixelDelta(pos) => pos.y,
            };
            Some(InputEvent::Scroll { dy })
        }
        WindowEvent::KeyboardInput {
            event: KeyEvent { physical_key, state, .. },
            ..
        } => {
            let key = match physical_key {
                PhysicalKey::Code(code) => viewer_key(*code),
                PhysicalKey::Unidentified(_) => ViewerKey::Other,
            };
            let state = match state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };
            Some(InputEvent::Key { key, state })
        }
        _ => None,
    }
}

/// Interactive point set viewer
pub struct InteractiveViewer {
    config: ViewerConfig,
    points: PointSet,
}

impl InteractiveViewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            points: PointSet::new(),
        }
    }

    /// Set the point set to display
    pub fn set_point_set(&mut self, points: PointSet) {
        log::info!("Set point set with {} points", points.len());
        self.points = points;
    }

    /// Open the window and run until it is closed
    pub fn run(self) -> Result<()> {
        let event_loop = EventLoop::new()
            .map_err(|e| Error::Visualization(format!("Failed to create event loop: {}", e)))?;
        let (width, height) = self.config.window_size;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(self.config.window_title.as_str())
                .with_inner_size(PhysicalSize::new(width, height))
                .build(&event_loop)
                .map_err(|e| Error::Visualization(format!("Failed to create window: {}", e)))?,
        );

        let size = window.inner_size();
        let mut renderer = pollster::block_on(PointSetRenderer::new(
            window.clone(),
            size,
            self.config.render.clone(),
        ))?;

        let mut state = ViewerState::new(self.points, &self.config);
        state.viewport = Viewport::new(size.width, size.height);
        let router = InputRouter::new(self.config.rotation_step);
        let mut frame_loop = FrameLoop::new();
        frame_loop.start(&state, &mut renderer)?;

        log::info!("Viewer initialized: {}x{}, {:?} mode", size.width, size.height, state.mode());

        event_loop
            .run(move |event, target| {
                target.set_control_flow(ControlFlow::Poll);

                match event {
                    Event::WindowEvent {
                        event: WindowEvent::RedrawRequested,
                        ..
                    } => {
                        if let Err(e) = frame_loop.run_frame(&mut state, &mut renderer) {
                            log::error!("Render error: {}", e);
                        }
                    }
                    Event::WindowEvent { event, .. } => {
                        if let Some(input) = translate_window_event(&event) {
                            let outcome = router.route(&mut state, input);
                            if let Err(e) = frame_loop.apply(outcome, &state, &mut renderer) {
                                log::error!("Failed to apply {:?}: {}", outcome, e);
                            }
                        }
                    }
                    Event::AboutToWait => window.request_redraw(),
                    _ => {}
                }

                if !frame_loop.is_running() {
                    target.exit();
                }
            })
            .map_err(|e| Error::Visualization(format!("Event loop error: {}", e)))?;

        Ok(())
    }
}

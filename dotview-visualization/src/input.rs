//! Input routing
//!
//! Window backends translate their native events into [`InputEvent`] and
//! hand them to [`InputRouter::route`] one at a time. The router mutates the
//! [`ViewerState`] immediately and reports which external side effect, if
//! any, the caller still has to perform.

use dotview_core::{PrimitiveMode, Vector3};

use crate::state::{Viewport, ViewerState};

/// Keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerKey {
    Escape,
    Left,
    Right,
    Up,
    Down,
    W,
    A,
    S,
    D,
    P,
    L,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    /// Initial press or auto-repeat
    Pressed,
    Released,
}

/// Backend-neutral input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key { key: ViewerKey, state: KeyState },
    Scroll { dy: f64 },
    Resized { width: u32, height: u32 },
    CloseRequested,
}

/// What the caller must do after an event was routed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// State changed; nothing external to update
    Handled,
    /// Nothing changed
    Ignored,
    /// The index sequence was regenerated and must be re-uploaded
    TopologyChanged,
    /// The viewport changed and the surface must be reconfigured
    ViewportChanged(Viewport),
    /// The frame loop must stop
    CloseRequested,
}

/// Maps input events onto transform, camera and topology changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputRouter {
    /// Radians per arrow key press
    pub rotation_step: f32,
}

impl InputRouter {
    pub fn new(rotation_step: f32) -> Self {
        Self { rotation_step }
    }

    /// Apply one event to the viewer state
    pub fn route(&self, state: &mut ViewerState, event: InputEvent) -> RouteOutcome {
        match event {
            InputEvent::Key { state: KeyState::Released, .. } => RouteOutcome::Ignored,
            InputEvent::Key { key, .. } => self.route_key(state, key),
            InputEvent::Scroll { dy } => {
                if dy > 0.0 {
                    state.camera.move_forward();
                } else if dy < 0.0 {
                    state.camera.move_backward();
                } else {
                    return RouteOutcome::Ignored;
                }
                RouteOutcome::Handled
            }
            InputEvent::Resized { width, height } => {
                state.viewport = Viewport::new(width, height);
                RouteOutcome::ViewportChanged(state.viewport)
            }
            InputEvent::CloseRequested => {
                state.request_close();
                RouteOutcome::CloseRequested
            }
        }
    }

    fn route_key(&self, state: &mut ViewerState, key: ViewerKey) -> RouteOutcome {
        let step = self.rotation_step;
        match key {
            ViewerKey::Escape => {
                state.request_close();
                return RouteOutcome::CloseRequested;
            }
            ViewerKey::Left => state.transform.rotate(Vector3::new(0.0, step, 0.0)),
            ViewerKey::Right => state.transform.rotate(Vector3::new(0.0, -step, 0.0)),
            ViewerKey::Up => state.transform.rotate(Vector3::new(step, 0.0, 0.0)),
            ViewerKey::Down => state.transform.rotate(Vector3::new(-step, 0.0, 0.0)),
            // W and S are deliberately crossed: W lowers the camera, S raises it.
            ViewerKey::W => state.camera.move_down(),
            ViewerKey::S => state.camera.move_up(),
            ViewerKey::A => state.camera.move_left(),
            ViewerKey::D => state.camera.move_right(),
            ViewerKey::P => {
                state.set_mode(PrimitiveMode::Points);
                return RouteOutcome::TopologyChanged;
            }
            ViewerKey::L => {
                state.set_mode(PrimitiveMode::Lines);
                return RouteOutcome::TopologyChanged;
            }
            ViewerKey::Other => return RouteOutcome::Ignored,
        }
        RouteOutcome::Handled
    }
}

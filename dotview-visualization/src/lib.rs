//! Interactive visualization for dotview
//!
//! - Camera controls
//! - Input routing from window events to viewer state
//! - The frame loop and the winit window that drives it

pub mod camera;
pub mod config;
pub mod state;
pub mod input;
pub mod frame;
pub mod viewer;

pub use camera::*;
pub use config::*;
pub use state::*;
pub use input::*;
pub use frame::*;
pub use viewer::*;

use dotview_core::{PointSet, Result};

/// Show a point set in an interactive viewer until its window is closed
pub fn show_point_set(points: PointSet, config: ViewerConfig) -> Result<()> {
    let mut viewer = InteractiveViewer::new(config);
    viewer.set_point_set(points);
    viewer.run()
}

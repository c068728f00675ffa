//! # dotview GPU
//!
//! wgpu rendering for dotview point sets.
//!
//! The renderer owns the surface, one pipeline per primitive mode, the
//! `model`/`view`/`projection` uniform block and the vertex/index buffers.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dotview_core::{IndexSequence, PointSet, PrimitiveMode, TransformState};
//! use dotview_gpu::{PointSetRenderer, RenderConfig};
//!
//! fn draw(window: Arc<winit::window::Window>, points: &PointSet) -> dotview_core::Result<()> {
//!     let size = window.inner_size();
//!     let mut renderer = pollster::block_on(PointSetRenderer::new(window, size, RenderConfig::default()))?;
//!     renderer.upload(points, &IndexSequence::generate(points.len(), PrimitiveMode::Points))?;
//!     renderer.update_transform(&TransformState::new());
//!     renderer.render()
//! }
//! ```

pub mod device;
pub mod buffers;
pub mod renderer;

pub use device::GpuContext;
pub use buffers::GpuBuffers;
pub use renderer::{
    PointSetRenderer, PointVertex, RenderConfig, TransformUniform, OPENGL_TO_WGPU_MATRIX,
    point_set_to_vertices, primitive_topology,
};

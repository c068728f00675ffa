//! Scoped vertex and index buffers

use crate::device::GpuContext;
use crate::renderer::{point_set_to_vertices, PointVertex};
use dotview_core::{Error, IndexSequence, PointSet, PrimitiveMode, Result};

/// Vertex and index buffers for one point set
///
/// Buffers are created together and destroyed when this value is dropped.
/// Empty sequences hold no buffer at all since zero-sized bindings cannot
/// be drawn from.
pub struct GpuBuffers {
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    point_count: usize,
    index_count: u32,
    mode: PrimitiveMode,
}

impl GpuBuffers {
    /// Upload a point set and its index sequence
    pub fn new(context: &GpuContext, points: &PointSet, indices: &IndexSequence) -> Result<Self> {
        let vertices = point_set_to_vertices(points);
        let vertex_buffer = (!vertices.is_empty()).then(|| {
            context.create_buffer_init::<PointVertex>(
                "Point Set Vertex Buffer",
                &vertices,
                wgpu::BufferUsages::VERTEX,
            )
        });

        let mut buffers = Self {
            vertex_buffer,
            index_buffer: None,
            point_count: points.len(),
            index_count: 0,
            mode: indices.mode(),
        };
        buffers.replace_indices(context, indices)?;

        log::debug!(
            "Uploaded {} vertices and {} indices",
            buffers.point_count,
            buffers.index_count
        );
        Ok(buffers)
    }

    /// Replace the index buffer with a freshly generated sequence
    ///
    /// Fails if the sequence was built for a different point count than the
    /// uploaded vertices.
    pub fn replace_indices(&mut self, context: &GpuContext, indices: &IndexSequence) -> Result<()> {
        if indices.point_count() != self.point_count {
            return Err(Error::Visualization(format!(
                "Index sequence built for {} points but {} are uploaded",
                indices.point_count(),
                self.point_count
            )));
        }

        if let Some(old) = self.index_buffer.take() {
            old.destroy();
        }

        self.index_buffer = (!indices.is_empty()).then(|| {
            context.create_buffer_init(
                "Point Set Index Buffer",
                indices.as_slice(),
                wgpu::BufferUsages::INDEX,
            )
        });
        self.index_count = indices.len() as u32;
        self.mode = indices.mode();
        Ok(())
    }

    /// Mode of the current index buffer
    pub fn mode(&self) -> PrimitiveMode {
        self.mode
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Vertex and index buffers, if there is anything to draw
    pub fn drawable(&self) -> Option<(&wgpu::Buffer, &wgpu::Buffer)> {
        match (&self.vertex_buffer, &self.index_buffer) {
            (Some(vertices), Some(indices)) if self.index_count > 0 => Some((vertices, indices)),
            _ => None,
        }
    }
}

impl Drop for GpuBuffers {
    fn drop(&mut self) {
        if let Some(buffer) = self.index_buffer.take() {
            buffer.destroy();
        }
        if let Some(buffer) = self.vertex_buffer.take() {
            buffer.destroy();
        }
        log::debug!("Released point set buffers");
    }
}

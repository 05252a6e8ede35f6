//! Mesh definition with vertex/index buffers and CPU mirrors.
//!
//! A [`Mesh`] owns both sides of its geometry: the CPU-side attribute arrays
//! (the authoritative copy, validated at build time) and the GPU buffer
//! handles the arrays are uploaded to. The two sides never diverge because
//! accessors hand out read-only views and the only mutation path is the
//! update builder, which re-validates and re-uploads in one step.

use std::sync::Arc;

use glam::{Vec3, Vec4};
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};

use glint_core::bounds::Aabb;
use glint_core::mesh::{MeshData, PrimitiveTopology};

use crate::device::GraphicsDevice;
use crate::resources::Buffer;

use super::builder::MeshBuilder;
use super::layout::VertexLayout;

/// Everything about a mesh that an update replaces atomically.
pub(crate) struct MeshContents {
    pub(crate) data: MeshData,
    pub(crate) topology: PrimitiveTopology,
    pub(crate) layout: Arc<VertexLayout>,
    pub(crate) bounds: Aabb,
    /// Index buffer handle; allocated on first indexed build and kept for
    /// the mesh's lifetime, even across updates that drop the indices.
    pub(crate) index_buffer: Option<Arc<Buffer>>,
    pub(crate) label: Option<String>,
}

/// A mesh: CPU-side vertex attribute arrays mirrored into GPU buffers.
///
/// Meshes are created through [`GraphicsDevice::create_mesh`] and updated in
/// place through [`Mesh::update`]; both paths validate the attribute arrays
/// before anything is uploaded. The vertex buffer handle is allocated at
/// construction and never replaced, so references held by a renderer stay
/// valid across updates.
///
/// # Example
///
/// ```ignore
/// let mesh = device.create_mesh()
///     .with_positions(positions)
///     .with_normals(normals)
///     .with_indices(indices)
///     .build()?;
///
/// // Later: replace the geometry behind the same handle.
/// mesh.update().with_positions(new_positions).build()?;
/// ```
pub struct Mesh {
    device: Arc<GraphicsDevice>,
    vertex_buffer: Arc<Buffer>,
    contents: RwLock<MeshContents>,
}

impl Mesh {
    /// Create a new mesh (called by MeshBuilder).
    pub(crate) fn new(
        device: Arc<GraphicsDevice>,
        vertex_buffer: Arc<Buffer>,
        contents: MeshContents,
    ) -> Self {
        Self {
            device,
            vertex_buffer,
            contents: RwLock::new(contents),
        }
    }

    /// Start an update of this mesh.
    ///
    /// The returned builder starts from empty attribute arrays, exactly like
    /// a construction builder; on `build()` it replaces all CPU-side arrays,
    /// recomputes the bounds, and re-uploads the GPU buffers in place,
    /// returning this same mesh handle.
    pub fn update(self: &Arc<Self>) -> MeshBuilder {
        MeshBuilder::for_update(self.clone())
    }

    /// Replace the mesh contents (called by MeshBuilder on update).
    pub(crate) fn apply_update(&self, contents: MeshContents) {
        *self.contents.write() = contents;
    }

    /// Snapshot the current index buffer handle (called by MeshBuilder).
    pub(crate) fn index_buffer_handle(&self) -> Option<Arc<Buffer>> {
        self.contents.read().index_buffer.clone()
    }

    /// Get the parent device.
    pub fn device(&self) -> &Arc<GraphicsDevice> {
        &self.device
    }

    /// Get the primitive topology.
    pub fn topology(&self) -> PrimitiveTopology {
        self.contents.read().topology
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.contents.read().data.positions.len()
    }

    /// Get a read-only view of the vertex positions.
    pub fn positions(&self) -> MappedRwLockReadGuard<'_, [Vec3]> {
        RwLockReadGuard::map(self.contents.read(), |c| c.data.positions.as_slice())
    }

    /// Get a read-only view of the normals (empty when unused).
    pub fn normals(&self) -> MappedRwLockReadGuard<'_, [Vec3]> {
        RwLockReadGuard::map(self.contents.read(), |c| c.data.normals.as_slice())
    }

    /// Get a read-only view of the texture coordinates (empty when unused).
    pub fn uvs(&self) -> MappedRwLockReadGuard<'_, [Vec4]> {
        RwLockReadGuard::map(self.contents.read(), |c| c.data.uvs.as_slice())
    }

    /// Get a read-only view of the vertex colors (empty when unused).
    pub fn colors(&self) -> MappedRwLockReadGuard<'_, [Vec4]> {
        RwLockReadGuard::map(self.contents.read(), |c| c.data.colors.as_slice())
    }

    /// Get a read-only view of the point sizes (empty when unused).
    pub fn point_sizes(&self) -> MappedRwLockReadGuard<'_, [f32]> {
        RwLockReadGuard::map(self.contents.read(), |c| c.data.point_sizes.as_slice())
    }

    /// Get a read-only view of the indices (empty when unindexed).
    pub fn indices(&self) -> MappedRwLockReadGuard<'_, [u16]> {
        RwLockReadGuard::map(self.contents.read(), |c| c.data.indices.as_slice())
    }

    /// Get the number of indices.
    pub fn index_count(&self) -> usize {
        self.contents.read().data.indices.len()
    }

    /// Check if this mesh uses indexed drawing.
    pub fn is_indexed(&self) -> bool {
        !self.contents.read().data.indices.is_empty()
    }

    /// Get the local axis-aligned bounding box.
    ///
    /// Recomputed on every build/update; an empty mesh has a degenerate box
    /// at the origin.
    pub fn bounds(&self) -> Aabb {
        self.contents.read().bounds
    }

    /// Get the byte size of the mesh on the GPU.
    ///
    /// Exact sum of all uploaded attribute arrays plus the index array.
    pub fn data_size(&self) -> usize {
        self.contents.read().data.data_size()
    }

    /// Get the interleaved vertex layout.
    pub fn layout(&self) -> Arc<VertexLayout> {
        self.contents.read().layout.clone()
    }

    /// Get the vertex buffer handle.
    pub fn vertex_buffer(&self) -> &Arc<Buffer> {
        &self.vertex_buffer
    }

    /// Get the mesh label, if set.
    pub fn label(&self) -> Option<String> {
        self.contents.read().label.clone()
    }

    /// Set up this mesh for drawing.
    ///
    /// Returns the binding snapshot a render pass consumes: the buffers to
    /// bind, the attribute layout, and the draw size. The expected call
    /// sequence for a draw is `material.bind()`, then `mesh.bind()`, then a
    /// draw call sized by [`MeshBinding::draw_count`].
    pub fn bind(&self) -> MeshBinding {
        let contents = self.contents.read();
        log::trace!(
            "Mesh {:?}: binding {} vertices, {} indices",
            contents.label,
            contents.data.positions.len(),
            contents.data.indices.len()
        );
        MeshBinding {
            vertex_buffer: self.vertex_buffer.clone(),
            index_buffer: if contents.data.indices.is_empty() {
                None
            } else {
                contents.index_buffer.clone()
            },
            layout: contents.layout.clone(),
            topology: contents.topology,
            vertex_count: contents.data.positions.len() as u32,
            index_count: contents.data.indices.len() as u32,
        }
    }
}

impl std::fmt::Debug for Mesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let contents = self.contents.read();
        f.debug_struct("Mesh")
            .field("label", &contents.label)
            .field("topology", &contents.topology)
            .field("vertex_count", &contents.data.positions.len())
            .field("index_count", &contents.data.indices.len())
            .field("data_size", &contents.data.data_size())
            .finish()
    }
}

// Ensure Mesh is Send + Sync
static_assertions::assert_impl_all!(Mesh: Send, Sync);

/// The state a render pass binds for one draw of a mesh.
///
/// Produced by [`Mesh::bind`].
#[derive(Debug, Clone)]
pub struct MeshBinding {
    vertex_buffer: Arc<Buffer>,
    index_buffer: Option<Arc<Buffer>>,
    layout: Arc<VertexLayout>,
    topology: PrimitiveTopology,
    vertex_count: u32,
    index_count: u32,
}

impl MeshBinding {
    /// Get the vertex buffer to bind.
    pub fn vertex_buffer(&self) -> &Arc<Buffer> {
        &self.vertex_buffer
    }

    /// Get the index buffer to bind, when drawing indexed.
    pub fn index_buffer(&self) -> Option<&Arc<Buffer>> {
        self.index_buffer.as_ref()
    }

    /// Get the attribute layout for vertex pointer setup.
    pub fn layout(&self) -> &Arc<VertexLayout> {
        &self.layout
    }

    /// Get the primitive topology for the draw call.
    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Get the number of indices.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Check whether the draw is indexed.
    pub fn is_indexed(&self) -> bool {
        self.index_buffer.is_some()
    }

    /// Get the element count for the draw call: indices when indexed,
    /// vertices otherwise.
    pub fn draw_count(&self) -> u32 {
        if self.is_indexed() {
            self.index_count
        } else {
            self.vertex_count
        }
    }

    /// Get the number of whole primitives this draw produces.
    pub fn primitive_count(&self) -> u32 {
        self.topology.primitive_count(self.draw_count())
    }
}

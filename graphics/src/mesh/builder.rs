//! Staged mesh construction and update.
//!
//! A [`MeshBuilder`] accumulates attribute arrays in any order, validates
//! their mutual consistency, and then either constructs a fresh [`Mesh`]
//! (allocating GPU buffers) or updates an existing one in place (re-uploading
//! through the buffer handles the mesh already owns). The two modes are
//! explicit: [`GraphicsDevice::create_mesh`] starts a construction builder,
//! [`Mesh::update`] starts one pre-bound to its target.

use std::sync::Arc;

use glam::{Vec3, Vec4};

use glint_core::mesh::{generators, MeshData, PrimitiveTopology};

use crate::device::GraphicsDevice;
use crate::error::GraphicsError;
use crate::resources::Buffer;
use crate::types::{BufferDescriptor, BufferUsage};

use super::data::{Mesh, MeshContents};
use super::layout::{VertexLayout, VertexSemantic};

/// Builder for constructing or updating a [`Mesh`].
///
/// All setters are chainable and may be called in any order; omitted
/// attributes stay empty (unused). [`MeshBuilder::build`] validates the
/// accumulated arrays before any GPU work happens.
pub struct MeshBuilder {
    device: Arc<GraphicsDevice>,
    target: Option<Arc<Mesh>>,
    data: MeshData,
    topology: PrimitiveTopology,
    label: Option<String>,
}

impl MeshBuilder {
    /// Create a construction-mode builder (called by GraphicsDevice).
    pub(crate) fn new(device: Arc<GraphicsDevice>) -> Self {
        Self {
            device,
            target: None,
            data: MeshData::new(),
            topology: PrimitiveTopology::TriangleList,
            label: None,
        }
    }

    /// Create an update-mode builder bound to an existing mesh.
    pub(crate) fn for_update(mesh: Arc<Mesh>) -> Self {
        Self {
            device: mesh.device().clone(),
            target: Some(mesh),
            data: MeshData::new(),
            topology: PrimitiveTopology::TriangleList,
            label: None,
        }
    }

    /// Set the vertex positions. Their length defines the vertex count.
    pub fn with_positions(mut self, positions: Vec<Vec3>) -> Self {
        self.data.positions = positions;
        self
    }

    /// Set the per-vertex normals.
    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Self {
        self.data.normals = normals;
        self
    }

    /// Set the per-vertex texture coordinates.
    pub fn with_uvs(mut self, uvs: Vec<Vec4>) -> Self {
        self.data.uvs = uvs;
        self
    }

    /// Set the per-vertex colors.
    pub fn with_colors(mut self, colors: Vec<Vec4>) -> Self {
        self.data.colors = colors;
        self
    }

    /// Set the per-vertex point sprite sizes.
    pub fn with_point_sizes(mut self, point_sizes: Vec<f32>) -> Self {
        self.data.point_sizes = point_sizes;
        self
    }

    /// Set the index array. An empty array means unindexed drawing.
    pub fn with_indices(mut self, indices: Vec<u16>) -> Self {
        self.data.indices = indices;
        self
    }

    /// Set the primitive topology.
    pub fn with_topology(mut self, topology: PrimitiveTopology) -> Self {
        self.topology = topology;
        self
    }

    /// Set a debug label. On update, the target's label is kept unless a new
    /// one is given here.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Replace all attribute arrays with prebuilt mesh data.
    pub fn with_mesh_data(mut self, data: MeshData) -> Self {
        self.data = data;
        self
    }

    /// Fill the builder with a unit UV sphere (radius 1, 32 segments,
    /// 16 rings).
    pub fn with_sphere(self) -> Self {
        self.with_mesh_data(generators::generate_sphere(1.0, 32, 16))
    }

    /// Fill the builder with an axis-aligned cube of edge length 2.
    pub fn with_cube(self) -> Self {
        self.with_mesh_data(generators::generate_cube(1.0))
    }

    /// Fill the builder with a 2x2 quad on the XY plane.
    pub fn with_quad(self) -> Self {
        self.with_mesh_data(generators::generate_quad(1.0))
    }

    /// Validate the accumulated data and build or update the mesh.
    ///
    /// In construction mode this allocates GPU buffers and returns a fresh
    /// mesh. In update mode it replaces the target's CPU arrays, recomputes
    /// its bounds, re-uploads through the existing buffer handles, and
    /// returns the same handle the builder was bound to.
    ///
    /// # Errors
    ///
    /// [`GraphicsError::InvalidGeometry`] when a non-empty attribute array
    /// does not match the vertex count or an index is out of range; nothing
    /// is uploaded in that case. Construction can also fail if buffer
    /// allocation is rejected by the device.
    pub fn build(self) -> Result<Arc<Mesh>, GraphicsError> {
        self.data.validate()?;

        let layout = Arc::new(VertexLayout::for_mesh_data(&self.data));
        let vertex_bytes = pack_vertices(&self.data, &layout);
        let bounds = self.data.compute_bounds();

        match self.target {
            None => {
                // An empty mesh still owns a live buffer handle; storage
                // grows on the first non-empty upload.
                let vertex_buffer = self.device.create_buffer(
                    &BufferDescriptor::new(
                        vertex_bytes.len().max(1) as u64,
                        BufferUsage::VERTEX | BufferUsage::COPY_DST,
                    )
                    .with_label("mesh_vertices"),
                )?;
                vertex_buffer.upload(&vertex_bytes);

                let index_buffer = if self.data.is_indexed() {
                    let buffer = self.device.create_buffer(
                        &BufferDescriptor::new(
                            self.data.index_bytes().len() as u64,
                            BufferUsage::INDEX | BufferUsage::COPY_DST,
                        )
                        .with_label("mesh_indices"),
                    )?;
                    buffer.upload(self.data.index_bytes());
                    Some(buffer)
                } else {
                    None
                };

                log::debug!(
                    "Built mesh {:?}: {} vertices, {} indices, {} bytes",
                    self.label,
                    self.data.positions.len(),
                    self.data.indices.len(),
                    self.data.data_size()
                );

                Ok(Arc::new(Mesh::new(
                    self.device,
                    vertex_buffer,
                    MeshContents {
                        data: self.data,
                        topology: self.topology,
                        layout,
                        bounds,
                        index_buffer,
                        label: self.label,
                    },
                )))
            }
            Some(mesh) => {
                mesh.vertex_buffer().upload(&vertex_bytes);

                // Reuse the index buffer handle; allocate one the first time
                // an update introduces indices.
                let existing = mesh.index_buffer_handle();
                let index_buffer = if self.data.is_indexed() {
                    let buffer = match existing {
                        Some(buffer) => buffer,
                        None => self.device.create_buffer(
                            &BufferDescriptor::new(
                                self.data.index_bytes().len() as u64,
                                BufferUsage::INDEX | BufferUsage::COPY_DST,
                            )
                            .with_label("mesh_indices"),
                        )?,
                    };
                    buffer.upload(self.data.index_bytes());
                    Some(buffer)
                } else {
                    existing
                };

                let label = self.label.or_else(|| mesh.label());
                log::debug!(
                    "Updated mesh {:?}: {} vertices, {} indices, {} bytes",
                    label,
                    self.data.positions.len(),
                    self.data.indices.len(),
                    self.data.data_size()
                );

                mesh.apply_update(MeshContents {
                    data: self.data,
                    topology: self.topology,
                    layout,
                    bounds,
                    index_buffer,
                    label,
                });

                Ok(mesh)
            }
        }
    }
}

/// Interleave the attribute arrays into one vertex buffer image.
fn pack_vertices(data: &MeshData, layout: &VertexLayout) -> Vec<u8> {
    let stride = layout.stride() as usize;
    let mut bytes = vec![0u8; stride * data.vertex_count()];

    for attribute in layout.attributes() {
        let offset = attribute.offset as usize;
        match attribute.semantic {
            VertexSemantic::Position => write_attribute(&mut bytes, stride, offset, &data.positions),
            VertexSemantic::Normal => write_attribute(&mut bytes, stride, offset, &data.normals),
            VertexSemantic::Uv => write_attribute(&mut bytes, stride, offset, &data.uvs),
            VertexSemantic::Color => write_attribute(&mut bytes, stride, offset, &data.colors),
            VertexSemantic::PointSize => {
                write_attribute(&mut bytes, stride, offset, &data.point_sizes)
            }
        }
    }

    bytes
}

/// Scatter one planar attribute array into the interleaved image.
fn write_attribute<T: bytemuck::Pod>(bytes: &mut [u8], stride: usize, offset: usize, values: &[T]) {
    let size = std::mem::size_of::<T>();
    for (i, value) in values.iter().enumerate() {
        let start = i * stride + offset;
        bytes[start..start + size].copy_from_slice(bytemuck::bytes_of(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;
    use crate::instance::GraphicsInstance;

    fn create_test_device() -> Arc<GraphicsDevice> {
        let instance = GraphicsInstance::new().unwrap();
        instance.create_device().unwrap()
    }

    fn triangle_positions() -> Vec<Vec3> {
        vec![Vec3::ZERO, Vec3::X, Vec3::Y]
    }

    #[test]
    fn test_build_indexed_triangle() {
        let device = create_test_device();
        let mesh = device
            .create_mesh()
            .with_positions(triangle_positions())
            .with_topology(PrimitiveTopology::TriangleList)
            .with_indices(vec![0, 1, 2])
            .build()
            .unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(&*mesh.positions(), triangle_positions().as_slice());
        assert_eq!(&*mesh.indices(), &[0, 1, 2]);
        assert_eq!(mesh.topology(), PrimitiveTopology::TriangleList);
        assert!(mesh.is_indexed());
        assert!(mesh.normals().is_empty());
        assert!(mesh.uvs().is_empty());
        assert!(mesh.colors().is_empty());
        assert!(mesh.point_sizes().is_empty());
    }

    #[test]
    fn test_build_index_out_of_range_fails() {
        let device = create_test_device();
        let result = device
            .create_mesh()
            .with_positions(triangle_positions())
            .with_indices(vec![0, 1, 5])
            .build();

        match result {
            Err(GraphicsError::InvalidGeometry(GeometryError::IndexOutOfRange {
                index, ..
            })) => assert_eq!(index, 5),
            other => panic!("expected index error, got {:?}", other.map(|_| ())),
        }
        // Nothing was allocated.
        assert_eq!(device.buffer_count(), 0);
    }

    #[test]
    fn test_build_length_mismatch_fails() {
        let device = create_test_device();
        let result = device
            .create_mesh()
            .with_positions(triangle_positions())
            .with_normals(vec![Vec3::Z, Vec3::Z])
            .build();

        assert!(matches!(
            result,
            Err(GraphicsError::InvalidGeometry(
                GeometryError::AttributeLengthMismatch { .. }
            ))
        ));
    }

    #[test]
    fn test_build_empty_mesh() {
        let device = create_test_device();
        let mesh = device.create_mesh().build().unwrap();

        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.bounds(), crate::mesh::Aabb::ZERO);
        assert_eq!(mesh.data_size(), 0);
        assert!(!mesh.is_indexed());
    }

    #[test]
    fn test_data_size_exact() {
        let device = create_test_device();
        let mesh = device
            .create_mesh()
            .with_positions(triangle_positions())
            .with_uvs(vec![Vec4::ZERO; 3])
            .with_indices(vec![0, 1, 2])
            .build()
            .unwrap();

        // 3 * 12 (positions) + 3 * 16 (uvs) + 3 * 2 (indices)
        assert_eq!(mesh.data_size(), 36 + 48 + 6);
        // The vertex buffer holds the interleaved image.
        assert_eq!(mesh.vertex_buffer().size(), 3 * (12 + 16));
    }

    #[test]
    fn test_bounds_recomputed_on_build() {
        let device = create_test_device();
        let mesh = device
            .create_mesh()
            .with_positions(vec![
                Vec3::new(-2.0, 0.0, 1.0),
                Vec3::new(3.0, -1.0, 0.0),
                Vec3::new(0.0, 4.0, -5.0),
            ])
            .build()
            .unwrap();

        let bounds = mesh.bounds();
        assert_eq!(bounds.min, Vec3::new(-2.0, -1.0, -5.0));
        assert_eq!(bounds.max, Vec3::new(3.0, 4.0, 1.0));
    }

    #[test]
    fn test_update_preserves_identity_and_handles() {
        let device = create_test_device();
        let mesh = device
            .create_mesh()
            .with_positions(triangle_positions())
            .with_indices(vec![0, 1, 2])
            .with_label("morphing")
            .build()
            .unwrap();

        let vertex_buffer_before = mesh.vertex_buffer().clone();
        let quad = generators::generate_quad(2.0);
        let updated = mesh.update().with_mesh_data(quad).build().unwrap();

        // Same mesh instance, same vertex buffer handle.
        assert!(Arc::ptr_eq(&mesh, &updated));
        assert!(Arc::ptr_eq(mesh.vertex_buffer(), &vertex_buffer_before));

        // New data is visible through all accessors.
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.index_count(), 6);
        assert_eq!(mesh.bounds().max, Vec3::new(2.0, 2.0, 0.0));
        assert_eq!(mesh.label().as_deref(), Some("morphing"));
    }

    #[test]
    fn test_update_validation_leaves_mesh_untouched() {
        let device = create_test_device();
        let mesh = device
            .create_mesh()
            .with_positions(triangle_positions())
            .build()
            .unwrap();

        let result = mesh
            .update()
            .with_positions(vec![Vec3::ZERO])
            .with_indices(vec![7])
            .build();
        assert!(result.is_err());

        // The failed update changed nothing.
        assert_eq!(mesh.vertex_count(), 3);
        assert!(!mesh.is_indexed());
    }

    #[test]
    fn test_update_grows_vertex_buffer() {
        let device = create_test_device();
        let mesh = device
            .create_mesh()
            .with_positions(triangle_positions())
            .build()
            .unwrap();
        assert_eq!(mesh.vertex_buffer().size(), 36);

        mesh.update()
            .with_positions(vec![Vec3::ZERO; 100])
            .build()
            .unwrap();
        assert_eq!(mesh.vertex_buffer().size(), 1200);
    }

    #[test]
    fn test_update_adds_index_buffer_once() {
        let device = create_test_device();
        let mesh = device
            .create_mesh()
            .with_positions(triangle_positions())
            .build()
            .unwrap();
        assert!(mesh.bind().index_buffer().is_none());

        mesh.update()
            .with_positions(triangle_positions())
            .with_indices(vec![0, 1, 2])
            .build()
            .unwrap();
        let binding = mesh.bind();
        let index_buffer = binding.index_buffer().unwrap().clone();

        // A second indexed update reuses the same handle.
        mesh.update()
            .with_positions(triangle_positions())
            .with_indices(vec![2, 1, 0])
            .build()
            .unwrap();
        assert!(Arc::ptr_eq(
            mesh.bind().index_buffer().unwrap(),
            &index_buffer
        ));
    }

    #[test]
    fn test_convenience_shapes() {
        let device = create_test_device();

        let sphere = device.create_mesh().with_sphere().build().unwrap();
        assert_eq!(sphere.vertex_count(), 33 * 17);
        assert!(sphere.is_indexed());

        let cube = device.create_mesh().with_cube().build().unwrap();
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.index_count(), 36);
        assert_eq!(cube.bounds().min, Vec3::splat(-1.0));

        let quad = device.create_mesh().with_quad().build().unwrap();
        assert_eq!(quad.vertex_count(), 4);
    }

    #[test]
    fn test_bind_snapshot() {
        let device = create_test_device();
        let mesh = device
            .create_mesh()
            .with_positions(triangle_positions())
            .with_indices(vec![0, 1, 2])
            .build()
            .unwrap();

        let binding = mesh.bind();
        assert!(binding.is_indexed());
        assert_eq!(binding.draw_count(), 3);
        assert_eq!(binding.primitive_count(), 1);
        assert_eq!(binding.layout().stride(), 12);
        assert!(Arc::ptr_eq(binding.vertex_buffer(), mesh.vertex_buffer()));
    }

    #[test]
    fn test_pack_vertices_interleaves() {
        let data = MeshData {
            positions: vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)],
            point_sizes: vec![7.0, 8.0],
            ..Default::default()
        };
        let layout = VertexLayout::for_mesh_data(&data);
        let bytes = pack_vertices(&data, &layout);

        // stride = 12 + 4 = 16 bytes, 2 vertices
        assert_eq!(bytes.len(), 32);
        let floats: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes(c.try_into().unwrap()))
            .collect();
        assert_eq!(floats, &[1.0, 2.0, 3.0, 7.0, 4.0, 5.0, 6.0, 8.0]);
    }
}

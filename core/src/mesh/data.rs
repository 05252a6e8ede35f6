//! CPU-side mesh data structures.
//!
//! [`MeshData`] holds one array per vertex attribute in planar form. The
//! position array defines the vertex count; every other attribute is either
//! empty (unused) or exactly as long as the positions. Indices, when present,
//! must all address existing vertices. [`MeshData::validate`] checks both
//! rules and is called by the GPU mesh builder before any upload.

use glam::{Vec3, Vec4};
use thiserror::Error;

use crate::bounds::Aabb;

/// Primitive topology describing how vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
    /// Each vertex is a separate point.
    PointList,
    /// Every two vertices form a line.
    LineList,
    /// Every three vertices form a triangle.
    #[default]
    TriangleList,
}

impl PrimitiveTopology {
    /// Get the number of vertices per primitive.
    pub fn vertices_per_primitive(&self) -> u32 {
        match self {
            Self::PointList => 1,
            Self::LineList => 2,
            Self::TriangleList => 3,
        }
    }

    /// Number of whole primitives assembled from `count` vertices or indices.
    pub fn primitive_count(&self, count: u32) -> u32 {
        count / self.vertices_per_primitive()
    }
}

/// Geometry consistency violations detected by [`MeshData::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A non-empty attribute array does not match the vertex count.
    #[error("{attribute} has {len} elements but the mesh has {vertex_count} vertices")]
    AttributeLengthMismatch {
        /// Name of the offending attribute.
        attribute: &'static str,
        /// Length of the offending array.
        len: usize,
        /// Vertex count defined by the position array.
        vertex_count: usize,
    },

    /// An index addresses a vertex that does not exist.
    #[error("index value {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// The offending index value.
        index: u16,
        /// Vertex count defined by the position array.
        vertex_count: usize,
    },
}

/// CPU-side mesh data: planar vertex attribute arrays plus optional indices.
///
/// The position array is always authoritative for the vertex count. Other
/// attributes are optional; an empty array means the attribute is unused.
/// UVs are stored as 4-component vectors (two components semantically used),
/// colors as 4-component vectors, point sizes as scalars.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex positions; length defines the vertex count.
    pub positions: Vec<Vec3>,
    /// Per-vertex normals, or empty.
    pub normals: Vec<Vec3>,
    /// Per-vertex texture coordinates, or empty.
    pub uvs: Vec<Vec4>,
    /// Per-vertex colors, or empty.
    pub colors: Vec<Vec4>,
    /// Per-vertex point sprite sizes, or empty.
    pub point_sizes: Vec<f32>,
    /// Index array; empty means unindexed drawing.
    pub indices: Vec<u16>,
}

impl MeshData {
    /// Create empty mesh data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Check whether this mesh uses indexed drawing.
    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Validate mutual consistency of the attribute arrays.
    ///
    /// Every non-empty attribute array must match the vertex count, and every
    /// index must address an existing vertex.
    ///
    /// # Errors
    ///
    /// Returns the first [`GeometryError`] found.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let vertex_count = self.positions.len();

        let lengths: [(&'static str, usize); 4] = [
            ("normals", self.normals.len()),
            ("uvs", self.uvs.len()),
            ("colors", self.colors.len()),
            ("point_sizes", self.point_sizes.len()),
        ];
        for (attribute, len) in lengths {
            if len != 0 && len != vertex_count {
                return Err(GeometryError::AttributeLengthMismatch {
                    attribute,
                    len,
                    vertex_count,
                });
            }
        }

        for &index in &self.indices {
            if index as usize >= vertex_count {
                return Err(GeometryError::IndexOutOfRange {
                    index,
                    vertex_count,
                });
            }
        }

        Ok(())
    }

    /// Compute the axis-aligned bounding box over the positions.
    ///
    /// An empty mesh yields a degenerate box at the origin.
    pub fn compute_bounds(&self) -> Aabb {
        Aabb::from_points(&self.positions)
    }

    /// Exact byte size of all non-empty attribute arrays plus the index array.
    ///
    /// This is the GPU memory footprint of the mesh after upload.
    pub fn data_size(&self) -> usize {
        self.positions.len() * std::mem::size_of::<Vec3>()
            + self.normals.len() * std::mem::size_of::<Vec3>()
            + self.uvs.len() * std::mem::size_of::<Vec4>()
            + self.colors.len() * std::mem::size_of::<Vec4>()
            + self.point_sizes.len() * std::mem::size_of::<f32>()
            + self.indices.len() * std::mem::size_of::<u16>()
    }

    /// Get the index array as raw bytes for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

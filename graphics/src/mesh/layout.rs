//! Vertex layout definitions for meshes.
//!
//! A [`VertexLayout`] describes how a mesh's attributes are interleaved in
//! its vertex buffer: one entry per attribute the mesh actually carries, each
//! with a format and a byte offset within the per-vertex stride. The layout
//! is what a renderer uses to set up vertex attribute pointers before a draw,
//! so it fills the role a vertex array object plays in a GL-style backend.
//!
//! Layouts are shared via `Arc`; meshes with the same attribute set can be
//! batched by pointer comparison.

use glint_core::mesh::MeshData;

/// Semantic meaning of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexSemantic {
    /// Vertex position (float3).
    Position,
    /// Vertex normal (float3).
    Normal,
    /// Texture coordinates (float4, two components semantically used).
    Uv,
    /// Vertex color (float4).
    Color,
    /// Point sprite size (float).
    PointSize,
}

impl VertexSemantic {
    /// Get the format this semantic is stored in.
    pub fn format(&self) -> VertexAttributeFormat {
        match self {
            Self::Position | Self::Normal => VertexAttributeFormat::Float3,
            Self::Uv | Self::Color => VertexAttributeFormat::Float4,
            Self::PointSize => VertexAttributeFormat::Float,
        }
    }
}

/// Format of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeFormat {
    /// Single 32-bit float.
    Float,
    /// Three 32-bit floats.
    Float3,
    /// Four 32-bit floats.
    Float4,
}

impl VertexAttributeFormat {
    /// Get the size in bytes of this format.
    pub fn size(&self) -> u32 {
        match self {
            Self::Float => 4,
            Self::Float3 => 12,
            Self::Float4 => 16,
        }
    }
}

/// A single vertex attribute description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    /// Semantic meaning of this attribute.
    pub semantic: VertexSemantic,
    /// Data format of this attribute.
    pub format: VertexAttributeFormat,
    /// Byte offset within the interleaved vertex.
    pub offset: u32,
}

/// Describes the interleaved layout of a mesh's vertex buffer.
///
/// Attributes appear in a fixed order (position, normal, uv, color, point
/// size), each present only when the mesh carries it. The stride is the byte
/// size of one interleaved vertex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
    stride: u32,
}

impl VertexLayout {
    /// Derive the layout for the attributes a mesh carries.
    ///
    /// Position is always present; every other attribute contributes an
    /// entry only when its array is non-empty.
    pub fn for_mesh_data(data: &MeshData) -> Self {
        let mut attributes = Vec::new();
        let mut stride = 0;

        let mut push = |semantic: VertexSemantic| {
            let format = semantic.format();
            attributes.push(VertexAttribute {
                semantic,
                format,
                offset: stride,
            });
            stride += format.size();
        };

        push(VertexSemantic::Position);
        if !data.normals.is_empty() {
            push(VertexSemantic::Normal);
        }
        if !data.uvs.is_empty() {
            push(VertexSemantic::Uv);
        }
        if !data.colors.is_empty() {
            push(VertexSemantic::Color);
        }
        if !data.point_sizes.is_empty() {
            push(VertexSemantic::PointSize);
        }

        Self { attributes, stride }
    }

    /// Get the vertex attributes in interleave order.
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Get the byte size of one interleaved vertex.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Check if this layout has a specific semantic.
    pub fn has_semantic(&self, semantic: VertexSemantic) -> bool {
        self.attributes.iter().any(|attr| attr.semantic == semantic)
    }

    /// Get an attribute by semantic.
    pub fn attribute(&self, semantic: VertexSemantic) -> Option<&VertexAttribute> {
        self.attributes
            .iter()
            .find(|attr| attr.semantic == semantic)
    }
}

//! Mesh types for the graphics engine.
//!
//! This module provides:
//!
//! - [`VertexLayout`] - Interleaved attribute layout derived from the
//!   attributes a mesh actually carries
//! - [`Mesh`] - GPU mesh with CPU-side mirrors, bounds, and buffer handles
//! - [`MeshBuilder`] - Staged construction and in-place update
//! - [`MeshBinding`] - The snapshot a render pass consumes for a draw

mod builder;
mod data;
mod layout;

pub use builder::MeshBuilder;
pub use data::{Mesh, MeshBinding};
pub use layout::{VertexAttribute, VertexAttributeFormat, VertexLayout, VertexSemantic};

// Re-export CPU-side types from core
pub use glint_core::bounds::Aabb;
pub use glint_core::mesh::{GeometryError, MeshData, PrimitiveTopology};

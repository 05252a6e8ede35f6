//! # Glint Core
//!
//! GPU-agnostic geometry data for the Glint rendering abstraction.
//!
//! This crate provides:
//! - [`mesh::MeshData`] - CPU-side vertex attribute arrays with validation
//! - [`mesh::PrimitiveTopology`] - How vertices are assembled into primitives
//! - [`bounds::Aabb`] - Axis-aligned bounding boxes
//! - [`mesh::generators`] - Procedural shape generators (sphere, cube, quad)
//!
//! These types are re-exported by `glint-graphics` for convenience.

pub mod bounds;
pub mod mesh;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the core subsystem.
pub fn init() {
    log::info!("Glint Core v{} initialized", VERSION);
}

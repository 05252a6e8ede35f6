//! # Glint Graphics
//!
//! A small real-time rendering abstraction sitting above a GPU graphics API:
//! mesh storage, material/shader uniform binding, and resource lifecycle
//! management for drawable geometry.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`GraphicsInstance`] / [`GraphicsDevice`] - Entry point and resource factory
//! - [`Mesh`] / [`MeshBuilder`] - GPU-resident geometry with CPU mirrors,
//!   built or updated in place through a validated builder
//! - [`Material`] / [`UniformValueStore`] - Shader-reflected, type-checked
//!   uniform binding
//! - [`Shader`] - The reflected uniform interface of a compiled program
//!
//! ## Example
//!
//! ```ignore
//! let instance = GraphicsInstance::new()?;
//! let device = instance.create_device()?;
//!
//! let shader = device.create_shader(&ShaderDescriptor::new()
//!     .with_uniform("color", UniformType::Vec4)
//!     .with_uniform("tex", UniformType::Texture))?;
//!
//! let mut material = Material::new(device.clone(), shader);
//! material.set_color(Vec4::new(1.0, 0.5, 0.0, 1.0))?;
//!
//! let mesh = device.create_mesh().with_sphere().build()?;
//!
//! // A render pass consumes the bindings:
//! let uniforms = material.bind();
//! let geometry = mesh.bind();
//! // ... issue a draw sized by geometry.draw_count()
//! ```

pub mod device;
pub mod error;
pub mod instance;
pub mod material;
pub mod mesh;
pub mod resources;
pub mod shader;
pub mod types;

// Re-export main types for convenience
pub use device::{DeviceCapabilities, GraphicsDevice};
pub use error::{GeometryError, GraphicsError};
pub use instance::GraphicsInstance;
pub use material::{Material, MaterialBinding, UniformValue, UniformValueStore};
pub use mesh::{
    Aabb, Mesh, MeshBinding, MeshBuilder, MeshData, PrimitiveTopology, VertexAttribute,
    VertexAttributeFormat, VertexLayout, VertexSemantic,
};
pub use resources::{Buffer, Texture};
pub use shader::{Shader, ShaderDescriptor, UniformDescriptor, UniformId, UniformType};
pub use types::{
    BufferDescriptor, BufferUsage, Extent3d, TextureDescriptor, TextureFormat, TextureKind,
    TextureUsage,
};

/// Graphics library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the graphics subsystem.
///
/// This should be called before using any graphics functionality.
pub fn init() {
    log::info!("Glint Graphics v{} initialized", VERSION);
}

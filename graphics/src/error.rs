//! Graphics error types.

use thiserror::Error;

use crate::shader::UniformType;

pub use glint_core::mesh::GeometryError;

/// Errors that can occur in the graphics system.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphicsError {
    /// Mesh attribute arrays are mutually inconsistent.
    ///
    /// This is a data-corruption class failure: construction of the mesh is
    /// aborted and nothing is uploaded.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),

    /// A uniform name is not declared by the material's shader.
    #[error("shader `{shader}` declares no uniform named `{name}`")]
    UnknownUniform {
        /// Label of the shader consulted.
        shader: String,
        /// The requested uniform name.
        name: String,
    },

    /// A uniform was accessed with a kind that disagrees with its declared type.
    #[error("uniform `{name}`: declared {declared:?}, requested {requested:?}")]
    UniformTypeMismatch {
        /// The uniform name.
        name: String,
        /// Type declared by the shader.
        declared: UniformType,
        /// Kind requested or supplied by the caller.
        requested: UniformType,
    },

    /// A declared uniform has no value installed in the store.
    ///
    /// This happens only for uniforms whose declared type is unsupported by
    /// the value store and was skipped at shader assignment.
    #[error("uniform `{0}` has no value installed")]
    UniformNotSet(String),

    /// An invalid parameter was provided.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Failed to create a resource.
    #[error("resource creation failed: {0}")]
    ResourceCreationFailed(String),
}

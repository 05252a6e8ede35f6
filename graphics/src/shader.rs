//! Shader uniform reflection surface.
//!
//! Shader compilation itself happens outside this crate; what materials need
//! from a compiled program is its reflected uniform interface: one
//! [`UniformDescriptor`] per parameter the program exposes. A [`Shader`] is
//! that interface, built from a [`ShaderDescriptor`] by
//! [`GraphicsDevice::create_shader`](crate::device::GraphicsDevice::create_shader)
//! and shared across every material that uses the program.

/// Declared type of a shader uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformType {
    /// 4-component float vector.
    Vec4,
    /// Scalar float.
    Float,
    /// 2D texture.
    Texture,
    /// Cubemap texture.
    TextureCube,
    /// Array of 3x3 matrices.
    Mat3Array,
    /// Array of 4x4 matrices.
    Mat4Array,
    /// Signed integer. Declared by some programs but not representable in a
    /// material's value store; materials skip defaulting these.
    Int,
}

/// Stable identifier of a uniform within one shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniformId(pub u32);

/// A single reflected uniform: identifier, name, and declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformDescriptor {
    /// Identifier used to key the uniform in a material's value store.
    pub id: UniformId,
    /// Name as declared in the shader source.
    pub name: String,
    /// Declared type.
    pub ty: UniformType,
}

/// Descriptor for creating a shader's reflection surface.
///
/// # Example
///
/// ```ignore
/// let shader = device.create_shader(&ShaderDescriptor::new()
///     .with_uniform("color", UniformType::Vec4)
///     .with_uniform("tex", UniformType::Texture)
///     .with_label("unlit"))?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShaderDescriptor {
    /// Declared uniforms in declaration order.
    pub uniforms: Vec<(String, UniformType)>,
    /// Optional label for debugging.
    pub label: Option<String>,
}

impl ShaderDescriptor {
    /// Create a new empty shader descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a uniform. Identifiers are assigned in declaration order.
    pub fn with_uniform(mut self, name: impl Into<String>, ty: UniformType) -> Self {
        self.uniforms.push((name.into(), ty));
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// The reflected uniform interface of a compiled shader program.
///
/// Shaders are created by [`GraphicsDevice::create_shader`] and shared via
/// `Arc`; a shader may back many materials.
///
/// [`GraphicsDevice::create_shader`]: crate::device::GraphicsDevice::create_shader
pub struct Shader {
    label: String,
    uniforms: Vec<UniformDescriptor>,
}

impl Shader {
    /// Create a new shader (called by GraphicsDevice).
    pub(crate) fn new(descriptor: &ShaderDescriptor) -> Self {
        let uniforms = descriptor
            .uniforms
            .iter()
            .enumerate()
            .map(|(index, (name, ty))| UniformDescriptor {
                id: UniformId(index as u32),
                name: name.clone(),
                ty: *ty,
            })
            .collect();

        Self {
            label: descriptor
                .label
                .clone()
                .unwrap_or_else(|| "unnamed shader".to_string()),
            uniforms,
        }
    }

    /// Get all declared uniforms.
    pub fn uniforms(&self) -> &[UniformDescriptor] {
        &self.uniforms
    }

    /// Resolve a uniform by name.
    pub fn uniform(&self, name: &str) -> Option<&UniformDescriptor> {
        self.uniforms.iter().find(|u| u.name == name)
    }

    /// Get the shader label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl std::fmt::Debug for Shader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shader")
            .field("label", &self.label)
            .field("uniform_count", &self.uniforms.len())
            .finish()
    }
}

// Ensure Shader is Send + Sync
static_assertions::assert_impl_all!(Shader: Send, Sync);

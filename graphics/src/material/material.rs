//! Material definition.
//!
//! A [`Material`] couples a shader handle with the exclusively-owned
//! [`UniformValueStore`] holding the current value of every uniform the
//! shader declares. Writes are validated against the shader's reflected
//! uniform types, so the store never holds a value whose kind disagrees with
//! its declaration.

use std::sync::Arc;

use glam::{Mat3, Mat4, Vec2, Vec4};

use crate::device::GraphicsDevice;
use crate::error::GraphicsError;
use crate::resources::Texture;
use crate::shader::{Shader, UniformId, UniformType};

use super::uniforms::{UniformValue, UniformValueStore};

/// A material: a shader plus the current values of its uniforms.
///
/// Materials are created from a device and a shader; every uniform the shader
/// declares receives a type-correct default (opaque white for vectors, the
/// device's default textures for samplers, zero for floats, unset references
/// for matrix arrays). Assigning a different shader with
/// [`Material::set_shader`] discards the store and re-installs defaults for
/// the new shader's uniforms.
///
/// # Example
///
/// ```ignore
/// let shader = device.create_shader(&ShaderDescriptor::new()
///     .with_uniform("color", UniformType::Vec4)
///     .with_uniform("tex", UniformType::Texture))?;
///
/// let mut material = Material::new(device.clone(), shader);
/// material.set_color(Vec4::new(1.0, 0.0, 0.0, 1.0))?;
/// ```
pub struct Material {
    device: Arc<GraphicsDevice>,
    shader: Arc<Shader>,
    uniforms: UniformValueStore,
    name: String,
}

impl Material {
    /// Create a material for a shader, with defaults installed.
    pub fn new(device: Arc<GraphicsDevice>, shader: Arc<Shader>) -> Self {
        let mut material = Self {
            device,
            shader: shader.clone(),
            uniforms: UniformValueStore::new(),
            name: "Undefined material".to_string(),
        };
        material.set_shader(shader);
        material
    }

    /// Get the shader backing this material.
    pub fn shader(&self) -> &Arc<Shader> {
        &self.shader
    }

    /// Replace the shader and reinitialize every uniform to its default.
    ///
    /// The previous uniform values are discarded, including values for
    /// uniforms the new shader also declares. Uniforms with a declared type
    /// the value store cannot represent are reported and left absent; reading
    /// them later yields [`GraphicsError::UniformNotSet`].
    pub fn set_shader(&mut self, shader: Arc<Shader>) {
        self.shader = shader;
        self.uniforms.clear();

        for uniform in self.shader.uniforms() {
            let default = match uniform.ty {
                UniformType::Vec4 => UniformValue::Vec4(Vec4::ONE),
                UniformType::Float => UniformValue::Float(0.0),
                UniformType::Texture => UniformValue::Texture(self.device.white_texture()),
                UniformType::TextureCube => {
                    UniformValue::TextureCube(self.device.default_cubemap())
                }
                UniformType::Mat3Array => UniformValue::Mat3Array(None),
                UniformType::Mat4Array => UniformValue::Mat4Array(None),
                unsupported => {
                    log::error!(
                        "'{}': unsupported uniform type {:?}; no default installed",
                        uniform.name,
                        unsupported
                    );
                    continue;
                }
            };
            self.uniforms.insert(uniform.id, default);
        }
    }

    /// Get the material name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the material name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Set a uniform by name.
    ///
    /// # Errors
    ///
    /// [`GraphicsError::UnknownUniform`] if the shader declares no uniform
    /// with this name; [`GraphicsError::UniformTypeMismatch`] if the value's
    /// kind disagrees with the declared type.
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<UniformValue>,
    ) -> Result<(), GraphicsError> {
        let value = value.into();
        let uniform = self
            .shader
            .uniform(name)
            .ok_or_else(|| GraphicsError::UnknownUniform {
                shader: self.shader.label().to_string(),
                name: name.to_string(),
            })?;

        if uniform.ty != value.kind() {
            return Err(GraphicsError::UniformTypeMismatch {
                name: name.to_string(),
                declared: uniform.ty,
                requested: value.kind(),
            });
        }

        self.uniforms.insert(uniform.id, value);
        Ok(())
    }

    /// Get the stored value of a uniform by name.
    ///
    /// # Errors
    ///
    /// [`GraphicsError::UnknownUniform`] if the shader declares no uniform
    /// with this name; [`GraphicsError::UniformNotSet`] if the uniform was
    /// skipped at shader assignment because its type is unsupported.
    pub fn get(&self, name: &str) -> Result<&UniformValue, GraphicsError> {
        let uniform = self
            .shader
            .uniform(name)
            .ok_or_else(|| GraphicsError::UnknownUniform {
                shader: self.shader.label().to_string(),
                name: name.to_string(),
            })?;

        self.uniforms
            .get(uniform.id)
            .ok_or_else(|| GraphicsError::UniformNotSet(name.to_string()))
    }

    /// Get a vec4 uniform.
    pub fn get_vec4(&self, name: &str) -> Result<Vec4, GraphicsError> {
        match self.get(name)? {
            UniformValue::Vec4(v) => Ok(*v),
            other => Err(self.mismatch(name, other, UniformType::Vec4)),
        }
    }

    /// Get a float uniform.
    pub fn get_float(&self, name: &str) -> Result<f32, GraphicsError> {
        match self.get(name)? {
            UniformValue::Float(f) => Ok(*f),
            other => Err(self.mismatch(name, other, UniformType::Float)),
        }
    }

    /// Get a 2D texture uniform.
    pub fn get_texture(&self, name: &str) -> Result<Arc<Texture>, GraphicsError> {
        match self.get(name)? {
            UniformValue::Texture(t) => Ok(t.clone()),
            other => Err(self.mismatch(name, other, UniformType::Texture)),
        }
    }

    /// Get a cubemap uniform.
    pub fn get_texture_cube(&self, name: &str) -> Result<Arc<Texture>, GraphicsError> {
        match self.get(name)? {
            UniformValue::TextureCube(t) => Ok(t.clone()),
            other => Err(self.mismatch(name, other, UniformType::TextureCube)),
        }
    }

    /// Get a 3x3 matrix array uniform. `None` means unset.
    pub fn get_mat3_array(&self, name: &str) -> Result<Option<Arc<Vec<Mat3>>>, GraphicsError> {
        match self.get(name)? {
            UniformValue::Mat3Array(m) => Ok(m.clone()),
            other => Err(self.mismatch(name, other, UniformType::Mat3Array)),
        }
    }

    /// Get a 4x4 matrix array uniform. `None` means unset.
    pub fn get_mat4_array(&self, name: &str) -> Result<Option<Arc<Vec<Mat4>>>, GraphicsError> {
        match self.get(name)? {
            UniformValue::Mat4Array(m) => Ok(m.clone()),
            other => Err(self.mismatch(name, other, UniformType::Mat4Array)),
        }
    }

    fn mismatch(&self, name: &str, stored: &UniformValue, requested: UniformType) -> GraphicsError {
        GraphicsError::UniformTypeMismatch {
            name: name.to_string(),
            declared: stored.kind(),
            requested,
        }
    }

    // ------------------------------------------------------------------
    // Convenience accessors over fixed uniform names
    // ------------------------------------------------------------------

    /// Get the "color" uniform.
    pub fn color(&self) -> Result<Vec4, GraphicsError> {
        self.get_vec4("color")
    }

    /// Set the "color" uniform.
    pub fn set_color(&mut self, color: Vec4) -> Result<(), GraphicsError> {
        self.set("color", color)
    }

    /// Get the "specularity" uniform.
    pub fn specularity(&self) -> Result<Vec4, GraphicsError> {
        self.get_vec4("specularity")
    }

    /// Set the "specularity" uniform.
    pub fn set_specularity(&mut self, specularity: Vec4) -> Result<(), GraphicsError> {
        self.set("specularity", specularity)
    }

    /// Get the main texture ("tex" uniform).
    pub fn texture(&self) -> Result<Arc<Texture>, GraphicsError> {
        self.get_texture("tex")
    }

    /// Set the main texture ("tex" uniform).
    pub fn set_texture(&mut self, texture: Arc<Texture>) -> Result<(), GraphicsError> {
        self.set("tex", texture)
    }

    /// Get the metallic/roughness texture ("mrTex" uniform).
    pub fn metallic_roughness_texture(&self) -> Result<Arc<Texture>, GraphicsError> {
        self.get_texture("mrTex")
    }

    /// Set the metallic/roughness texture ("mrTex" uniform).
    pub fn set_metallic_roughness_texture(
        &mut self,
        texture: Arc<Texture>,
    ) -> Result<(), GraphicsError> {
        self.set("mrTex", texture)
    }

    /// Get the metallic/roughness factors (x = metallic, y = roughness).
    ///
    /// Stored internally as a vec4 with z and w unused.
    pub fn metallic_roughness(&self) -> Result<Vec2, GraphicsError> {
        let v = self.get_vec4("metallicRoughness")?;
        Ok(Vec2::new(v.x, v.y))
    }

    /// Set the metallic/roughness factors (x = metallic, y = roughness).
    pub fn set_metallic_roughness(&mut self, metallic_roughness: Vec2) -> Result<(), GraphicsError> {
        self.set(
            "metallicRoughness",
            Vec4::new(metallic_roughness.x, metallic_roughness.y, 0.0, 0.0),
        )
    }

    /// Direct access to the uniform value store.
    pub fn uniform_store(&self) -> &UniformValueStore {
        &self.uniforms
    }

    /// Push every stored uniform for a draw.
    ///
    /// Returns the binding snapshot a render pass hands to the GPU pipeline.
    /// Must be called only while this material's shader is the active
    /// program; that precondition is owned by the render pass, not checked
    /// here.
    pub fn bind(&self) -> MaterialBinding {
        log::trace!(
            "Material '{}': binding {} uniforms for shader `{}`",
            self.name,
            self.uniforms.len(),
            self.shader.label()
        );
        MaterialBinding {
            shader: self.shader.clone(),
            uniforms: self.uniforms.snapshot(),
        }
    }
}

impl std::fmt::Debug for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Material")
            .field("name", &self.name)
            .field("shader", &self.shader.label())
            .field("uniform_count", &self.uniforms.len())
            .finish()
    }
}

// Ensure Material is Send + Sync
static_assertions::assert_impl_all!(Material: Send, Sync);

/// The uniform state a render pass pushes to the pipeline for one draw.
///
/// Produced by [`Material::bind`]; entries are ordered by uniform identifier.
#[derive(Debug, Clone)]
pub struct MaterialBinding {
    shader: Arc<Shader>,
    uniforms: Vec<(UniformId, UniformValue)>,
}

impl MaterialBinding {
    /// Get the shader the uniforms belong to.
    pub fn shader(&self) -> &Arc<Shader> {
        &self.shader
    }

    /// Get the pushed uniform entries, ordered by identifier.
    pub fn uniforms(&self) -> &[(UniformId, UniformValue)] {
        &self.uniforms
    }

    /// Get the number of pushed uniforms.
    pub fn uniform_count(&self) -> usize {
        self.uniforms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::GraphicsInstance;
    use crate::shader::ShaderDescriptor;
    use crate::types::{TextureDescriptor, TextureFormat, TextureKind, TextureUsage};

    fn create_test_device() -> Arc<GraphicsDevice> {
        let instance = GraphicsInstance::new().unwrap();
        instance.create_device().unwrap()
    }

    fn standard_shader(device: &Arc<GraphicsDevice>) -> Arc<Shader> {
        device
            .create_shader(
                &ShaderDescriptor::new()
                    .with_uniform("color", UniformType::Vec4)
                    .with_uniform("specularity", UniformType::Vec4)
                    .with_uniform("tex", UniformType::Texture)
                    .with_uniform("mrTex", UniformType::Texture)
                    .with_uniform("metallicRoughness", UniformType::Vec4)
                    .with_uniform("envMap", UniformType::TextureCube)
                    .with_uniform("fadeOut", UniformType::Float)
                    .with_uniform("bones", UniformType::Mat4Array)
                    .with_label("standard"),
            )
            .unwrap()
    }

    #[test]
    fn test_defaults_installed() {
        let device = create_test_device();
        let material = Material::new(device.clone(), standard_shader(&device));

        assert_eq!(material.name(), "Undefined material");
        assert_eq!(material.color().unwrap(), Vec4::ONE);
        assert_eq!(material.get_float("fadeOut").unwrap(), 0.0);
        assert!(material.get_mat4_array("bones").unwrap().is_none());

        // Texture defaults are the device-shared resources.
        let tex = material.texture().unwrap();
        assert!(Arc::ptr_eq(&tex, &device.white_texture()));
        let env = material.get_texture_cube("envMap").unwrap();
        assert!(Arc::ptr_eq(&env, &device.default_cubemap()));
    }

    #[test]
    fn test_color_round_trip() {
        let device = create_test_device();
        let mut material = Material::new(device.clone(), standard_shader(&device));

        let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
        material.set_color(red).unwrap();
        assert_eq!(material.color().unwrap(), red);
    }

    #[test]
    fn test_metallic_roughness_round_trip() {
        let device = create_test_device();
        let mut material = Material::new(device.clone(), standard_shader(&device));

        material
            .set_metallic_roughness(Vec2::new(0.25, 0.75))
            .unwrap();
        assert_eq!(
            material.metallic_roughness().unwrap(),
            Vec2::new(0.25, 0.75)
        );
        // Internal storage is a vec4 with z/w zero.
        assert_eq!(
            material.get_vec4("metallicRoughness").unwrap(),
            Vec4::new(0.25, 0.75, 0.0, 0.0)
        );
    }

    #[test]
    fn test_unknown_uniform_is_error() {
        let device = create_test_device();
        let mut material = Material::new(device.clone(), standard_shader(&device));

        let err = material.set("bogus", Vec4::ONE).unwrap_err();
        assert!(matches!(err, GraphicsError::UnknownUniform { .. }));
        let err = material.get_vec4("bogus").unwrap_err();
        assert!(matches!(err, GraphicsError::UnknownUniform { .. }));
    }

    #[test]
    fn test_type_mismatch_is_error() {
        let device = create_test_device();
        let mut material = Material::new(device.clone(), standard_shader(&device));

        let err = material.set("color", 1.0f32).unwrap_err();
        assert!(matches!(err, GraphicsError::UniformTypeMismatch { .. }));
        // The store still holds the default.
        assert_eq!(material.color().unwrap(), Vec4::ONE);

        let err = material.get_float("color").unwrap_err();
        assert!(matches!(err, GraphicsError::UniformTypeMismatch { .. }));
    }

    #[test]
    fn test_cube_texture_rejected_in_2d_slot() {
        let device = create_test_device();
        let mut material = Material::new(device.clone(), standard_shader(&device));

        let err = material
            .set("tex", device.default_cubemap())
            .unwrap_err();
        assert!(matches!(err, GraphicsError::UniformTypeMismatch { .. }));
    }

    #[test]
    fn test_set_shader_resets_store() {
        let device = create_test_device();
        let mut material = Material::new(device.clone(), standard_shader(&device));

        material.set_color(Vec4::new(0.1, 0.2, 0.3, 1.0)).unwrap();

        let other = device
            .create_shader(
                &ShaderDescriptor::new()
                    .with_uniform("color", UniformType::Vec4)
                    .with_label("unlit"),
            )
            .unwrap();
        material.set_shader(other);

        // Back to the type-correct default.
        assert_eq!(material.color().unwrap(), Vec4::ONE);
        // Uniforms the new shader does not declare are gone.
        assert_eq!(material.uniform_store().len(), 1);
        let err = material.get_float("fadeOut").unwrap_err();
        assert!(matches!(err, GraphicsError::UnknownUniform { .. }));
    }

    #[test]
    fn test_unsupported_uniform_type_skipped() {
        let device = create_test_device();
        let shader = device
            .create_shader(
                &ShaderDescriptor::new()
                    .with_uniform("color", UniformType::Vec4)
                    .with_uniform("pointCount", UniformType::Int)
                    .with_label("particles"),
            )
            .unwrap();
        let mut material = Material::new(device.clone(), shader);

        // Construction succeeded; the int uniform is simply absent.
        assert_eq!(material.uniform_store().len(), 1);
        let err = material.get("pointCount").unwrap_err();
        assert!(matches!(err, GraphicsError::UniformNotSet(_)));
        // Setting it is a defined error, never a crash.
        let err = material.set("pointCount", 1.0f32).unwrap_err();
        assert!(matches!(err, GraphicsError::UniformTypeMismatch { .. }));
    }

    #[test]
    fn test_mat_array_uniform() {
        let device = create_test_device();
        let mut material = Material::new(device.clone(), standard_shader(&device));

        let bones = Arc::new(vec![Mat4::IDENTITY; 4]);
        material.set("bones", bones.clone()).unwrap();
        let stored = material.get_mat4_array("bones").unwrap().unwrap();
        assert!(Arc::ptr_eq(&stored, &bones));
    }

    #[test]
    fn test_bind_snapshot() {
        let device = create_test_device();
        let mut material = Material::new(device.clone(), standard_shader(&device));
        material.set_name("chrome");
        material.set_color(Vec4::new(0.8, 0.8, 0.9, 1.0)).unwrap();

        let binding = material.bind();
        assert_eq!(binding.uniform_count(), material.uniform_store().len());
        assert_eq!(binding.shader().label(), "standard");

        // Entries come out ordered by uniform id.
        let ids: Vec<_> = binding.uniforms().iter().map(|(id, _)| *id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_own_texture_assignment() {
        let device = create_test_device();
        let mut material = Material::new(device.clone(), standard_shader(&device));

        let albedo = device
            .create_texture(
                &TextureDescriptor::new_2d(
                    4,
                    4,
                    TextureFormat::Rgba8Unorm,
                    TextureUsage::TEXTURE_BINDING,
                )
                .with_label("albedo"),
            )
            .unwrap();
        assert_eq!(albedo.kind(), TextureKind::D2);

        material.set_texture(albedo.clone()).unwrap();
        assert!(Arc::ptr_eq(&material.texture().unwrap(), &albedo));
    }
}

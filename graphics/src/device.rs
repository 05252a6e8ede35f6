//! Graphics device.
//!
//! The [`GraphicsDevice`] is the main interface for creating GPU resources:
//! buffers, textures, shaders, and meshes. It also owns the shared default
//! textures handed to materials whose shaders sample a texture the
//! application never assigned.

use std::sync::{Arc, OnceLock, Weak};

use parking_lot::RwLock;

use crate::error::GraphicsError;
use crate::instance::GraphicsInstance;
use crate::mesh::MeshBuilder;
use crate::resources::{Buffer, Texture};
use crate::shader::{Shader, ShaderDescriptor};
use crate::types::{BufferDescriptor, TextureDescriptor, TextureFormat, TextureUsage};

/// Capabilities of a graphics device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceCapabilities {
    /// Maximum texture dimension.
    pub max_texture_dimension: u32,
    /// Maximum buffer size.
    pub max_buffer_size: u64,
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self {
            max_texture_dimension: 16384,
            max_buffer_size: 1 << 30, // 1 GB
        }
    }
}

/// A graphics device for creating GPU resources.
///
/// The device is created by [`GraphicsInstance::create_device`] and is the
/// factory for every resource in this crate. Created resources are tracked
/// through weak references for diagnostics.
///
/// # Default textures
///
/// [`GraphicsDevice::white_texture`] and
/// [`GraphicsDevice::default_cubemap`] are created on first use and shared by
/// reference across all materials of this device. They are dropped together
/// with the device, tying their lifetime to context teardown.
///
/// # Example
///
/// ```ignore
/// let instance = GraphicsInstance::new()?;
/// let device = instance.create_device()?;
///
/// let buffer = device.create_buffer(&BufferDescriptor::new(1024, BufferUsage::VERTEX))?;
/// let mesh = device.create_mesh().with_quad().build()?;
/// ```
pub struct GraphicsDevice {
    instance: Arc<GraphicsInstance>,
    name: String,
    capabilities: DeviceCapabilities,
    // Track allocated resources (weak references for cleanup/debugging)
    buffers: RwLock<Vec<Weak<Buffer>>>,
    textures: RwLock<Vec<Weak<Texture>>>,
    shaders: RwLock<Vec<Weak<Shader>>>,
    // Shared default resources, created on first use
    white_texture: OnceLock<Arc<Texture>>,
    default_cubemap: OnceLock<Arc<Texture>>,
}

impl GraphicsDevice {
    /// Create a new graphics device (called by GraphicsInstance).
    pub(crate) fn new(instance: Arc<GraphicsInstance>, name: String) -> Self {
        Self {
            instance,
            name,
            capabilities: DeviceCapabilities::default(),
            buffers: RwLock::new(Vec::new()),
            textures: RwLock::new(Vec::new()),
            shaders: RwLock::new(Vec::new()),
            white_texture: OnceLock::new(),
            default_cubemap: OnceLock::new(),
        }
    }

    /// Get the parent instance.
    pub fn instance(&self) -> &Arc<GraphicsInstance> {
        &self.instance
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the device capabilities.
    pub fn capabilities(&self) -> &DeviceCapabilities {
        &self.capabilities
    }

    /// Create a GPU buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer size is zero or exceeds device limits.
    pub fn create_buffer(
        self: &Arc<Self>,
        descriptor: &BufferDescriptor,
    ) -> Result<Arc<Buffer>, GraphicsError> {
        if descriptor.size > self.capabilities.max_buffer_size {
            return Err(GraphicsError::InvalidParameter(format!(
                "buffer size {} exceeds maximum {}",
                descriptor.size, self.capabilities.max_buffer_size
            )));
        }

        if descriptor.size == 0 {
            return Err(GraphicsError::InvalidParameter(
                "buffer size cannot be zero".to_string(),
            ));
        }

        let buffer = Arc::new(Buffer::new(Arc::downgrade(self), descriptor.clone()));
        self.buffers.write().push(Arc::downgrade(&buffer));

        log::trace!(
            "GraphicsDevice: created buffer {:?}, size={}",
            descriptor.label,
            descriptor.size
        );

        Ok(buffer)
    }

    /// Create a GPU texture.
    ///
    /// # Errors
    ///
    /// Returns an error if the texture dimensions are zero or exceed device
    /// limits.
    pub fn create_texture(
        self: &Arc<Self>,
        descriptor: &TextureDescriptor,
    ) -> Result<Arc<Texture>, GraphicsError> {
        let max_dim = self.capabilities.max_texture_dimension;
        if descriptor.size.width > max_dim || descriptor.size.height > max_dim {
            return Err(GraphicsError::InvalidParameter(format!(
                "texture dimension exceeds maximum {max_dim}"
            )));
        }

        if descriptor.size.width == 0 || descriptor.size.height == 0 {
            return Err(GraphicsError::InvalidParameter(
                "texture dimensions cannot be zero".to_string(),
            ));
        }

        let texture = Arc::new(Texture::new(Arc::downgrade(self), descriptor.clone()));
        self.textures.write().push(Arc::downgrade(&texture));

        log::trace!(
            "GraphicsDevice: created texture {:?}, size={}x{}",
            descriptor.label,
            descriptor.size.width,
            descriptor.size.height
        );

        Ok(texture)
    }

    /// Create a GPU texture and upload its initial contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor is invalid or `data` does not match
    /// the descriptor's byte size exactly.
    pub fn create_texture_with_data(
        self: &Arc<Self>,
        descriptor: &TextureDescriptor,
        data: &[u8],
    ) -> Result<Arc<Texture>, GraphicsError> {
        if data.len() != descriptor.byte_size() {
            return Err(GraphicsError::InvalidParameter(format!(
                "texture data is {} bytes, descriptor requires {}",
                data.len(),
                descriptor.byte_size()
            )));
        }

        let texture = self.create_texture(descriptor)?;
        log::trace!(
            "GraphicsDevice: uploaded {} bytes to texture {:?}",
            data.len(),
            descriptor.label
        );
        Ok(texture)
    }

    /// Create a shader from its reflected uniform interface.
    ///
    /// # Errors
    ///
    /// Returns an error if two uniforms share a name.
    pub fn create_shader(
        self: &Arc<Self>,
        descriptor: &ShaderDescriptor,
    ) -> Result<Arc<Shader>, GraphicsError> {
        for (i, (name, _)) in descriptor.uniforms.iter().enumerate() {
            if descriptor.uniforms[..i].iter().any(|(n, _)| n == name) {
                return Err(GraphicsError::InvalidParameter(format!(
                    "duplicate uniform name `{name}`"
                )));
            }
        }

        let shader = Arc::new(Shader::new(descriptor));
        self.shaders.write().push(Arc::downgrade(&shader));

        log::trace!(
            "GraphicsDevice: created shader `{}` with {} uniforms",
            shader.label(),
            shader.uniforms().len()
        );

        Ok(shader)
    }

    /// Start building a mesh on this device.
    pub fn create_mesh(self: &Arc<Self>) -> MeshBuilder {
        MeshBuilder::new(self.clone())
    }

    /// Get the shared 1x1 opaque white texture, creating it on first use.
    pub fn white_texture(self: &Arc<Self>) -> Arc<Texture> {
        self.white_texture
            .get_or_init(|| {
                let descriptor = TextureDescriptor::new_2d(
                    1,
                    1,
                    TextureFormat::Rgba8Unorm,
                    TextureUsage::TEXTURE_BINDING | TextureUsage::COPY_DST,
                )
                .with_label("default_white");
                self.new_default_texture(descriptor)
            })
            .clone()
    }

    /// Get the shared 1x1 white cubemap, creating it on first use.
    pub fn default_cubemap(self: &Arc<Self>) -> Arc<Texture> {
        self.default_cubemap
            .get_or_init(|| {
                let descriptor = TextureDescriptor::new_cube(
                    1,
                    TextureFormat::Rgba8Unorm,
                    TextureUsage::TEXTURE_BINDING | TextureUsage::COPY_DST,
                )
                .with_label("default_cubemap");
                self.new_default_texture(descriptor)
            })
            .clone()
    }

    /// Construct and track a default texture without descriptor validation.
    ///
    /// The fixed 1x1 descriptors cannot violate device limits.
    fn new_default_texture(self: &Arc<Self>, descriptor: TextureDescriptor) -> Arc<Texture> {
        let texture = Arc::new(Texture::new(Arc::downgrade(self), descriptor));
        self.textures.write().push(Arc::downgrade(&texture));
        log::trace!(
            "GraphicsDevice: created default texture {:?}",
            texture.label()
        );
        texture
    }

    /// Get the number of live buffers created by this device.
    pub fn buffer_count(&self) -> usize {
        self.buffers
            .read()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Get the number of live textures created by this device.
    pub fn texture_count(&self) -> usize {
        self.textures
            .read()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Get the number of live shaders created by this device.
    pub fn shader_count(&self) -> usize {
        self.shaders
            .read()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Clean up dead weak references to released resources.
    pub fn cleanup_dead_resources(&self) {
        self.buffers.write().retain(|w| w.strong_count() > 0);
        self.textures.write().retain(|w| w.strong_count() > 0);
        self.shaders.write().retain(|w| w.strong_count() > 0);
    }
}

impl std::fmt::Debug for GraphicsDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphicsDevice")
            .field("name", &self.name)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

// Ensure GraphicsDevice is Send + Sync
static_assertions::assert_impl_all!(GraphicsDevice: Send, Sync);

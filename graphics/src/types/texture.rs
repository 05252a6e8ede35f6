//! Texture types and descriptors.

use bitflags::bitflags;

/// Texture dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent3d {
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// Depth or array layer count.
    pub depth: u32,
}

impl Extent3d {
    /// Create a 2D extent with depth 1.
    pub fn new_2d(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            depth: 1,
        }
    }
}

/// Texture pixel format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureFormat {
    /// 8-bit RGBA, unsigned normalized.
    #[default]
    Rgba8Unorm,
    /// 8-bit RGBA, unsigned normalized, sRGB encoded.
    Rgba8UnormSrgb,
    /// 32-bit float RGBA.
    Rgba32Float,
}

impl TextureFormat {
    /// Get the size in bytes of one texel.
    pub fn texel_size(&self) -> usize {
        match self {
            Self::Rgba8Unorm | Self::Rgba8UnormSrgb => 4,
            Self::Rgba32Float => 16,
        }
    }
}

/// Shape of a texture resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureKind {
    /// A standard 2D texture.
    #[default]
    D2,
    /// A cubemap with six faces.
    Cube,
}

bitflags! {
    /// Usage flags for textures.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextureUsage: u32 {
        /// Texture can be sampled in shaders.
        const TEXTURE_BINDING = 1 << 0;
        /// Texture can be copied to.
        const COPY_DST = 1 << 1;
    }
}

impl Default for TextureUsage {
    fn default() -> Self {
        Self::TEXTURE_BINDING
    }
}

/// Descriptor for creating a texture.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureDescriptor {
    /// Debug label for the texture.
    pub label: Option<String>,
    /// Texture dimensions. Cubemaps use `depth` = 6.
    pub size: Extent3d,
    /// Pixel format.
    pub format: TextureFormat,
    /// 2D texture or cubemap.
    pub kind: TextureKind,
    /// Usage flags.
    pub usage: TextureUsage,
}

impl TextureDescriptor {
    /// Create a 2D texture descriptor.
    pub fn new_2d(width: u32, height: u32, format: TextureFormat, usage: TextureUsage) -> Self {
        Self {
            label: None,
            size: Extent3d::new_2d(width, height),
            format,
            kind: TextureKind::D2,
            usage,
        }
    }

    /// Create a cubemap descriptor with six square faces.
    pub fn new_cube(face_size: u32, format: TextureFormat, usage: TextureUsage) -> Self {
        Self {
            label: None,
            size: Extent3d {
                width: face_size,
                height: face_size,
                depth: 6,
            },
            format,
            kind: TextureKind::Cube,
            usage,
        }
    }

    /// Set the debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Total byte size of the texture contents.
    pub fn byte_size(&self) -> usize {
        self.size.width as usize
            * self.size.height as usize
            * self.size.depth as usize
            * self.format.texel_size()
    }
}

//! GPU texture resource.

use std::sync::{Arc, Weak};

use crate::device::GraphicsDevice;
use crate::types::{Extent3d, TextureDescriptor, TextureFormat, TextureKind};

/// A GPU texture resource.
///
/// Textures are created by [`GraphicsDevice::create_texture`] and are
/// reference-counted. They hold a weak reference back to their parent device.
/// A texture is either a 2D texture or a cubemap, per its [`TextureKind`];
/// materials use the kind to decide which uniform slot a texture may occupy.
pub struct Texture {
    device: Weak<GraphicsDevice>,
    descriptor: TextureDescriptor,
}

impl Texture {
    /// Create a new texture (called by GraphicsDevice).
    pub(crate) fn new(device: Weak<GraphicsDevice>, descriptor: TextureDescriptor) -> Self {
        Self { device, descriptor }
    }

    /// Get the parent device, if it still exists.
    pub fn device(&self) -> Option<Arc<GraphicsDevice>> {
        self.device.upgrade()
    }

    /// Get the texture descriptor.
    pub fn descriptor(&self) -> &TextureDescriptor {
        &self.descriptor
    }

    /// Get the texture size.
    pub fn size(&self) -> Extent3d {
        self.descriptor.size
    }

    /// Get the texture format.
    pub fn format(&self) -> TextureFormat {
        self.descriptor.format
    }

    /// Check whether this texture is a 2D texture or a cubemap.
    pub fn kind(&self) -> TextureKind {
        self.descriptor.kind
    }

    /// Get the texture label, if set.
    pub fn label(&self) -> Option<&str> {
        self.descriptor.label.as_deref()
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("size", &self.descriptor.size)
            .field("format", &self.descriptor.format)
            .field("kind", &self.descriptor.kind)
            .field("label", &self.descriptor.label)
            .finish()
    }
}

// Ensure Texture is Send + Sync
static_assertions::assert_impl_all!(Texture: Send, Sync);

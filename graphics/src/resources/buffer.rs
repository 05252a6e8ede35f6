//! GPU buffer resource.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::device::GraphicsDevice;
use crate::types::BufferDescriptor;

/// Storage state behind a buffer handle.
#[derive(Debug, Clone, Copy)]
struct BufferState {
    /// Current storage size in bytes.
    size: u64,
    /// Number of uploads performed through this handle.
    uploads: u64,
}

/// A GPU buffer resource.
///
/// Buffers are created by [`GraphicsDevice::create_buffer`] and are
/// reference-counted. They hold a weak reference back to their parent device.
///
/// The handle is stable for the lifetime of the buffer: [`Buffer::upload`]
/// re-populates the storage behind the same handle, growing it when the new
/// contents are larger. Mesh updates rely on this to keep existing references
/// valid across re-uploads.
///
/// # Example
///
/// ```ignore
/// let buffer = device.create_buffer(&BufferDescriptor::new(1024, BufferUsage::VERTEX))?;
/// buffer.upload(&bytes);
/// ```
pub struct Buffer {
    device: Weak<GraphicsDevice>,
    descriptor: BufferDescriptor,
    state: Mutex<BufferState>,
}

impl Buffer {
    /// Create a new buffer (called by GraphicsDevice).
    pub(crate) fn new(device: Weak<GraphicsDevice>, descriptor: BufferDescriptor) -> Self {
        let state = BufferState {
            size: descriptor.size,
            uploads: 0,
        };
        Self {
            device,
            descriptor,
            state: Mutex::new(state),
        }
    }

    /// Upload a byte range into this buffer, replacing its contents.
    ///
    /// Storage is grown when `data` is larger than the current size; the
    /// handle itself never changes. The upload is synchronous from the
    /// caller's point of view.
    pub fn upload(&self, data: &[u8]) {
        let mut state = self.state.lock();
        if data.len() as u64 > state.size {
            log::trace!(
                "Buffer {:?}: grow {} -> {} bytes",
                self.descriptor.label,
                state.size,
                data.len()
            );
            state.size = data.len() as u64;
        }
        state.uploads += 1;
        log::trace!(
            "Buffer {:?}: upload {} bytes",
            self.descriptor.label,
            data.len()
        );
    }

    /// Get the parent device, if it still exists.
    pub fn device(&self) -> Option<Arc<GraphicsDevice>> {
        self.device.upgrade()
    }

    /// Get the buffer descriptor used at creation.
    pub fn descriptor(&self) -> &BufferDescriptor {
        &self.descriptor
    }

    /// Get the current storage size in bytes.
    pub fn size(&self) -> u64 {
        self.state.lock().size
    }

    /// Get the number of uploads performed through this handle.
    pub fn upload_count(&self) -> u64 {
        self.state.lock().uploads
    }

    /// Get the buffer label, if set.
    pub fn label(&self) -> Option<&str> {
        self.descriptor.label.as_deref()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Buffer")
            .field("size", &state.size)
            .field("usage", &self.descriptor.usage)
            .field("label", &self.descriptor.label)
            .finish()
    }
}

// Ensure Buffer is Send + Sync
static_assertions::assert_impl_all!(Buffer: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BufferUsage;

    #[test]
    fn test_buffer_size() {
        let desc = BufferDescriptor::new(2048, BufferUsage::UNIFORM);
        let buffer = Buffer::new(Weak::new(), desc);
        assert_eq!(buffer.size(), 2048);
        assert_eq!(buffer.upload_count(), 0);
    }

    #[test]
    fn test_upload_grows_storage() {
        let desc = BufferDescriptor::new(16, BufferUsage::VERTEX | BufferUsage::COPY_DST);
        let buffer = Buffer::new(Weak::new(), desc);

        buffer.upload(&[0u8; 8]);
        assert_eq!(buffer.size(), 16); // smaller uploads keep the storage

        buffer.upload(&[0u8; 64]);
        assert_eq!(buffer.size(), 64);
        assert_eq!(buffer.upload_count(), 2);
    }

    #[test]
    fn test_buffer_debug() {
        let desc = BufferDescriptor::new(1024, BufferUsage::VERTEX).with_label("verts");
        let buffer = Buffer::new(Weak::new(), desc);
        let debug = format!("{:?}", buffer);
        assert!(debug.contains("Buffer"));
        assert!(debug.contains("1024"));
    }
}

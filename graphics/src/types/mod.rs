//! Resource descriptors and usage flags.

mod buffer;
mod texture;

pub use buffer::{BufferDescriptor, BufferUsage};
pub use texture::{Extent3d, TextureDescriptor, TextureFormat, TextureKind, TextureUsage};

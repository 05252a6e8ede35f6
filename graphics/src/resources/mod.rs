//! Reference-counted GPU resource handles.

mod buffer;
mod texture;

pub use buffer::Buffer;
pub use texture::Texture;

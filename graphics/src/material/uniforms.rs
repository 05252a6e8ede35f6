//! Heterogeneous uniform value storage.

use std::sync::Arc;

use glam::{Mat3, Mat4, Vec4};
use rustc_hash::FxHashMap;

use crate::resources::Texture;
use crate::shader::{UniformId, UniformType};
use crate::types::TextureKind;

/// A single uniform value, tagged by kind.
///
/// The variant set mirrors the uniform types a value store can represent.
/// Matrix-array uniforms hold a shared array reference that starts out unset.
#[derive(Debug, Clone)]
pub enum UniformValue {
    /// 4-component float vector.
    Vec4(Vec4),
    /// Scalar float.
    Float(f32),
    /// 2D texture reference.
    Texture(Arc<Texture>),
    /// Cubemap texture reference.
    TextureCube(Arc<Texture>),
    /// Shared array of 3x3 matrices, possibly unset.
    Mat3Array(Option<Arc<Vec<Mat3>>>),
    /// Shared array of 4x4 matrices, possibly unset.
    Mat4Array(Option<Arc<Vec<Mat4>>>),
}

impl UniformValue {
    /// Get the uniform type this value satisfies.
    pub fn kind(&self) -> UniformType {
        match self {
            Self::Vec4(_) => UniformType::Vec4,
            Self::Float(_) => UniformType::Float,
            Self::Texture(_) => UniformType::Texture,
            Self::TextureCube(_) => UniformType::TextureCube,
            Self::Mat3Array(_) => UniformType::Mat3Array,
            Self::Mat4Array(_) => UniformType::Mat4Array,
        }
    }
}

impl From<Vec4> for UniformValue {
    fn from(value: Vec4) -> Self {
        Self::Vec4(value)
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<Arc<Texture>> for UniformValue {
    /// A texture reference fills the slot matching its own kind.
    fn from(texture: Arc<Texture>) -> Self {
        match texture.kind() {
            TextureKind::D2 => Self::Texture(texture),
            TextureKind::Cube => Self::TextureCube(texture),
        }
    }
}

impl From<Arc<Vec<Mat3>>> for UniformValue {
    fn from(matrices: Arc<Vec<Mat3>>) -> Self {
        Self::Mat3Array(Some(matrices))
    }
}

impl From<Arc<Vec<Mat4>>> for UniformValue {
    fn from(matrices: Arc<Vec<Mat4>>) -> Self {
        Self::Mat4Array(Some(matrices))
    }
}

/// A type-tagged mapping from uniform identifier to current value.
///
/// Each store is owned exclusively by one material. Every key present
/// corresponds to a uniform declared by the material's current shader, and
/// the stored kind always matches the declared type; the material enforces
/// both on every write.
#[derive(Debug, Default)]
pub struct UniformValueStore {
    values: FxHashMap<UniformId, UniformValue>,
}

impl UniformValueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all values.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Store a value under a uniform identifier.
    pub fn insert(&mut self, id: UniformId, value: UniformValue) {
        self.values.insert(id, value);
    }

    /// Get the value stored under an identifier.
    pub fn get(&self, id: UniformId) -> Option<&UniformValue> {
        self.values.get(&id)
    }

    /// Check whether a value is stored under an identifier.
    pub fn contains(&self, id: UniformId) -> bool {
        self.values.contains_key(&id)
    }

    /// Get the number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Snapshot every entry, ordered by uniform identifier.
    ///
    /// This is the push order used when binding the store for a draw.
    pub fn snapshot(&self) -> Vec<(UniformId, UniformValue)> {
        let mut entries: Vec<_> = self
            .values
            .iter()
            .map(|(id, value)| (*id, value.clone()))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kinds() {
        assert_eq!(UniformValue::Vec4(Vec4::ONE).kind(), UniformType::Vec4);
        assert_eq!(UniformValue::Float(0.5).kind(), UniformType::Float);
        assert_eq!(
            UniformValue::Mat3Array(None).kind(),
            UniformType::Mat3Array
        );
        assert_eq!(
            UniformValue::Mat4Array(None).kind(),
            UniformType::Mat4Array
        );
    }

    #[test]
    fn test_from_impls() {
        let v: UniformValue = Vec4::ONE.into();
        assert!(matches!(v, UniformValue::Vec4(_)));

        let f: UniformValue = 2.0f32.into();
        assert!(matches!(f, UniformValue::Float(_)));

        let m: UniformValue = Arc::new(vec![Mat4::IDENTITY]).into();
        assert!(matches!(m, UniformValue::Mat4Array(Some(_))));
    }

    #[test]
    fn test_store_insert_get_clear() {
        let mut store = UniformValueStore::new();
        assert!(store.is_empty());

        store.insert(UniformId(0), UniformValue::Vec4(Vec4::ONE));
        store.insert(UniformId(1), UniformValue::Float(3.0));
        assert_eq!(store.len(), 2);
        assert!(store.contains(UniformId(1)));
        assert!(matches!(
            store.get(UniformId(0)),
            Some(UniformValue::Vec4(_))
        ));

        store.clear();
        assert!(store.is_empty());
        assert!(store.get(UniformId(0)).is_none());
    }

    #[test]
    fn test_insert_replaces() {
        let mut store = UniformValueStore::new();
        store.insert(UniformId(0), UniformValue::Float(1.0));
        store.insert(UniformId(0), UniformValue::Float(2.0));
        assert_eq!(store.len(), 1);
        match store.get(UniformId(0)) {
            Some(UniformValue::Float(f)) => assert_eq!(*f, 2.0),
            other => panic!("unexpected value: {:?}", other),
        }
    }

    #[test]
    fn test_snapshot_ordered_by_id() {
        let mut store = UniformValueStore::new();
        store.insert(UniformId(2), UniformValue::Float(2.0));
        store.insert(UniformId(0), UniformValue::Float(0.0));
        store.insert(UniformId(1), UniformValue::Float(1.0));

        let ids: Vec<_> = store.snapshot().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![UniformId(0), UniformId(1), UniformId(2)]);
    }
}

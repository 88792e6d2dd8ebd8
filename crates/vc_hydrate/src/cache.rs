use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;
use core::hash::{BuildHasher, Hasher};

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use parking_lot::RwLock;

use crate::attributes::CustomAttributeMap;

/// An immutable, cheaply clonable list of property names.
pub type Attributes = Arc<[&'static str]>;

// -----------------------------------------------------------------------------
// NoOpHashState

/// A no-op hasher, `TypeId` is already a good hash.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        // `TypeId` hashes through `write_u64`, this is only a fallback.
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map container with [`TypeId`] as the fixed key type.
pub(crate) struct TypeIdMap<V>(HashMap<TypeId, V, NoOpHashState>);

impl<V> TypeIdMap<V> {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self(HashMap::with_hasher(NoOpHashState))
    }

    /// Gets the value associated with `type_id`, inserting the result of `f` if absent.
    ///
    /// The closure `f` is only called if the key is not present.
    #[inline]
    pub(crate) fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => entry.insert(f()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    #[inline]
    pub(crate) fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, type_id: &TypeId) -> Option<&mut V> {
        self.0.get_mut(type_id)
    }

    #[inline]
    pub(crate) fn insert(&mut self, type_id: TypeId, v: V) -> Option<V> {
        self.0.insert(type_id, v)
    }

    #[inline]
    pub(crate) fn remove(&mut self, type_id: &TypeId) -> Option<V> {
        self.0.remove(type_id)
    }

    #[inline]
    pub(crate) fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub(crate) fn iter(&self) -> impl ExactSizeIterator<Item = (&TypeId, &V)> {
        self.0.iter()
    }

    #[inline]
    pub(crate) fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.0.values()
    }
}

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

// -----------------------------------------------------------------------------
// ModelCache

/// The three per-type caches shared by all hydration calls.
///
/// - own attributes: properties declared directly on a model;
/// - all attributes: own attributes of a model and of its bases, most-derived first;
/// - custom attributes: the [`CustomAttributeMap`] returned by a model's capability.
///
/// Entries are filled lazily on first access and are never evicted: the set of
/// model types is fixed at build time.
///
/// Lookups take a read lock. A miss is computed outside of any lock and inserted
/// under a write lock; if another thread inserted first, its value is kept.
///
/// The operations live next to the component they cache, see
/// [`own_attributes`](Self::own_attributes), [`all_attributes`](Self::all_attributes)
/// and [`custom_attributes`](Self::custom_attributes).
#[derive(Default)]
pub struct ModelCache {
    pub(crate) own: RwLock<TypeIdMap<Attributes>>,
    pub(crate) all: RwLock<TypeIdMap<Option<Attributes>>>,
    pub(crate) custom: RwLock<TypeIdMap<Arc<CustomAttributeMap>>>,
}

impl ModelCache {
    /// Creates an empty cache.
    #[inline]
    pub const fn new() -> Self {
        Self {
            own: RwLock::new(TypeIdMap::new()),
            all: RwLock::new(TypeIdMap::new()),
            custom: RwLock::new(TypeIdMap::new()),
        }
    }

    /// Returns a clone of the cached value, if present.
    pub(crate) fn lookup<V: Clone>(map: &RwLock<TypeIdMap<V>>, type_id: TypeId) -> Option<V> {
        map.read().get(&type_id).cloned()
    }

    /// Inserts `value` unless another value is already present, returns the cached one.
    pub(crate) fn fill<V: Clone>(map: &RwLock<TypeIdMap<V>>, type_id: TypeId, value: V) -> V {
        map.write().get_or_insert(type_id, || value).clone()
    }

    /// Number of models with cached own attributes.
    #[inline]
    pub fn own_len(&self) -> usize {
        self.own.read().len()
    }

    /// Number of models with cached aggregated attributes.
    #[inline]
    pub fn all_len(&self) -> usize {
        self.all.read().len()
    }

    /// Number of models with a cached custom attribute map.
    #[inline]
    pub fn custom_len(&self) -> usize {
        self.custom.read().len()
    }
}

impl fmt::Debug for ModelCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCache")
            .field("own", &self.own_len())
            .field("all", &self.all_len())
            .field("custom", &self.custom_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use core::any::TypeId;
    use core::hash::{BuildHasher, Hash, Hasher};

    use super::{ModelCache, NoOpHashState, TypeIdMap};

    #[test]
    fn no_op_hasher() {
        let mut hasher = NoOpHashState.build_hasher();
        3_u64.hash(&mut hasher);
        assert_eq!(hasher.finish(), 3);
    }

    #[test]
    fn type_id_map() {
        let mut map = TypeIdMap::<i32>::new();
        assert_eq!(*map.get_or_insert(TypeId::of::<u8>(), || 1), 1);
        assert_eq!(*map.get_or_insert(TypeId::of::<u8>(), || 2), 1);
        assert!(map.contains(&TypeId::of::<u8>()));
        assert_eq!(map.insert(TypeId::of::<u16>(), 5), None);
        *map.get_mut(&TypeId::of::<u16>()).unwrap() += 1;
        assert_eq!(map.get(&TypeId::of::<u16>()), Some(&6));
        assert_eq!(map.len(), 2);
        assert_eq!(map.remove(&TypeId::of::<u8>()), Some(1));
        assert_eq!(map.values().copied().collect::<Vec<_>>(), [6]);
    }

    #[test]
    fn first_fill_wins() {
        let cache = ModelCache::new();
        let id = TypeId::of::<u8>();
        assert_eq!(ModelCache::lookup(&cache.own, id), None);

        let first: Arc<[&'static str]> = Arc::from(["a"]);
        let second: Arc<[&'static str]> = Arc::from(["b"]);

        let kept = ModelCache::fill(&cache.own, id, first.clone());
        assert!(Arc::ptr_eq(&kept, &first));
        let kept = ModelCache::fill(&cache.own, id, second);
        assert!(Arc::ptr_eq(&kept, &first));

        assert_eq!(cache.own_len(), 1);
        assert_eq!(cache.all_len(), 0);
        assert_eq!(cache.custom_len(), 0);
    }
}

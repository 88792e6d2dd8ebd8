use alloc::borrow::Cow;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use foldhash::fast::FixedState;
use hashbrown::HashMap;
use log::trace;

use crate::cache::ModelCache;
use crate::info::ModelInfo;
use crate::registry::{GetModelMeta, ModelRegistry, TypeTraitCustomAttributes};

// -----------------------------------------------------------------------------
// ModelTarget

/// The model type a custom attribute converts its values into.
#[derive(Clone)]
pub enum ModelTarget {
    /// A concrete model type, registered on demand.
    Type {
        type_id: TypeId,
        type_path: &'static str,
        register: fn(&mut ModelRegistry),
    },
    /// A model looked up in the registry, by full path first and then by short name.
    Name(Cow<'static, str>),
}

impl ModelTarget {
    /// Targets the model type `T`.
    #[inline]
    pub fn of<T: GetModelMeta>() -> Self {
        Self::Type {
            type_id: TypeId::of::<T>(),
            type_path: T::type_path(),
            register: ModelRegistry::register::<T>,
        }
    }

    /// Targets the model registered under `name`.
    #[inline]
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Name(name.into())
    }

    /// The path or name the target was declared with.
    pub fn name(&self) -> &str {
        match self {
            Self::Type { type_path, .. } => type_path,
            Self::Name(name) => name,
        }
    }
}

impl fmt::Debug for ModelTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type { type_path, .. } => f.debug_tuple("Type").field(type_path).finish(),
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// CustomAttributeMap

/// A map from property name to the model type its values are converted into.
///
/// # Examples
///
/// ```
/// use vc_hydrate::attributes::CustomAttributeMap;
/// use vc_hydrate::derive::Model;
///
/// #[derive(Model, Default, Debug)]
/// struct Address { city: String }
///
/// let map = CustomAttributeMap::new()
///     .with::<Address>("address")
///     .with_name("friends", "User");
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get("friends").unwrap().name(), "User");
/// assert!(map.get("age").is_none());
/// ```
#[derive(Clone, Default)]
pub struct CustomAttributeMap {
    targets: HashMap<&'static str, ModelTarget, FixedState>,
}

impl CustomAttributeMap {
    /// Creates an empty map.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `property` to the model type `T`.
    #[inline]
    pub fn with<T: GetModelMeta>(mut self, property: &'static str) -> Self {
        self.insert(property, ModelTarget::of::<T>());
        self
    }

    /// Maps `property` to the model registered under `name`.
    #[inline]
    pub fn with_name(mut self, property: &'static str, name: impl Into<Cow<'static, str>>) -> Self {
        self.insert(property, ModelTarget::named(name));
        self
    }

    /// Inserts a mapping, returning the previous target of `property`.
    #[inline]
    pub fn insert(&mut self, property: &'static str, target: ModelTarget) -> Option<ModelTarget> {
        self.targets.insert(property, target)
    }

    /// Returns the target of `property`, if mapped.
    #[inline]
    pub fn get(&self, property: &str) -> Option<&ModelTarget> {
        self.targets.get(property)
    }

    #[inline]
    pub fn contains(&self, property: &str) -> bool {
        self.targets.contains_key(property)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Adds the mappings of `other` for properties that are not mapped yet.
    pub fn extend_missing(&mut self, other: CustomAttributeMap) {
        for (property, target) in other.targets {
            self.targets.entry(property).or_insert(target);
        }
    }

    /// An iterator over the mappings, in arbitrary order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&'static str, &ModelTarget)> {
        self.targets.iter().map(|(name, target)| (*name, target))
    }
}

impl FromIterator<(&'static str, ModelTarget)> for CustomAttributeMap {
    fn from_iter<I: IntoIterator<Item = (&'static str, ModelTarget)>>(iter: I) -> Self {
        Self {
            targets: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for CustomAttributeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.targets.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// HasCustomAttributes

/// The optional capability of a model to declare custom attributes.
///
/// `#[derive(Model)]` implements it from `#[model(nested = T)]` fields. Use
/// `#[model(custom_attributes)]` instead to implement it by hand, for example
/// to target models by name.
///
/// Returning `None` or an empty map means "no custom attributes".
///
/// The capability is inherited: a model also uses the custom attributes of its
/// `#[model(base)]` chain, a mapping of the more derived model wins.
///
/// # Examples
///
/// ```
/// use vc_hydrate::attributes::{CustomAttributeMap, HasCustomAttributes};
/// use vc_hydrate::derive::Model;
///
/// #[derive(Model, Default, Debug)]
/// #[model(custom_attributes)]
/// struct Team {
///     members: Vec<Member>,
/// }
///
/// impl HasCustomAttributes for Team {
///     fn custom_attributes() -> Option<CustomAttributeMap> {
///         Some(CustomAttributeMap::new().with_name("members", "Member"))
///     }
/// }
///
/// #[derive(Model, Default, Debug)]
/// #[model(auto_register)]
/// struct Member { name: String }
/// ```
pub trait HasCustomAttributes {
    fn custom_attributes() -> Option<CustomAttributeMap>;
}

// -----------------------------------------------------------------------------
// Resolver

impl ModelCache {
    /// Returns the custom attribute map of a registered model.
    ///
    /// The map merges the capability of the model and of each of its bases,
    /// most-derived first, so a property mapped by several levels keeps the
    /// mapping of the most derived one.
    ///
    /// Returns `None` when the model is not registered, when no level has the
    /// capability, or when the merged map is empty. Only non-empty maps are
    /// cached, an absent result asks the capabilities again on the next call.
    ///
    /// # Examples
    ///
    /// ```
    /// use core::any::TypeId;
    /// use vc_hydrate::{derive::Model, registry::ModelRegistry, ModelCache};
    ///
    /// #[derive(Model, Default, Debug)]
    /// struct Photo { url: String }
    ///
    /// #[derive(Model, Default, Debug)]
    /// struct Album {
    ///     title: String,
    ///     #[model(nested = Photo)]
    ///     photos: Vec<Photo>,
    /// }
    ///
    /// let mut registry = ModelRegistry::new();
    /// registry.register::<Album>();
    ///
    /// let cache = ModelCache::new();
    /// let map = cache.custom_attributes(&registry, TypeId::of::<Album>()).unwrap();
    /// assert_eq!(map.get("photos").unwrap().name(), <Photo as vc_hydrate::info::TypePath>::type_path());
    ///
    /// assert!(cache.custom_attributes(&registry, TypeId::of::<Photo>()).is_none());
    /// ```
    pub fn custom_attributes(
        &self,
        registry: &ModelRegistry,
        type_id: TypeId,
    ) -> Option<Arc<CustomAttributeMap>> {
        let info = registry.get_model_info(type_id)?;
        let capabilities = lineage_capabilities(registry, info);
        self.resolve_custom_attributes(info, &capabilities)
    }

    /// `capabilities` are those found along the lineage of `info`, most-derived first.
    pub(crate) fn resolve_custom_attributes(
        &self,
        info: &'static ModelInfo,
        capabilities: &[TypeTraitCustomAttributes],
    ) -> Option<Arc<CustomAttributeMap>> {
        let type_id = info.type_id();
        if let Some(cached) = Self::lookup(&self.custom, type_id) {
            return Some(cached);
        }

        let mut map = CustomAttributeMap::new();
        for capability in capabilities {
            if let Some(level) = capability.custom_attributes() {
                map.extend_missing(level);
            }
        }
        if map.is_empty() {
            return None;
        }

        trace!(
            "custom attributes of `{}` cached: {map:?}",
            info.type_path()
        );
        Some(Self::fill(&self.custom, type_id, Arc::new(map)))
    }
}

/// The capabilities of `info` and of its registered bases, most-derived first.
pub(crate) fn lineage_capabilities(
    registry: &ModelRegistry,
    info: &'static ModelInfo,
) -> Vec<TypeTraitCustomAttributes> {
    info.lineage()
        .filter_map(|level| {
            registry
                .get_type_trait::<TypeTraitCustomAttributes>(level.type_id())
                .copied()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use core::any::TypeId;
    use core::sync::atomic::{AtomicUsize, Ordering};

    use super::{CustomAttributeMap, HasCustomAttributes, ModelTarget};
    use crate::ModelCache;
    use crate::derive::Model;
    use crate::info::TypePath;
    use crate::registry::{GetModelMeta, ModelRegistry};

    static CALLS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Model, Default, Debug)]
    #[model(custom_attributes)]
    struct Counted {
        value: i32,
    }

    impl HasCustomAttributes for Counted {
        fn custom_attributes() -> Option<CustomAttributeMap> {
            CALLS.fetch_add(1, Ordering::Relaxed);
            Some(CustomAttributeMap::new())
        }
    }

    #[derive(Model, Default, Debug)]
    #[model(custom_attributes)]
    struct Declines {
        value: i32,
    }

    impl HasCustomAttributes for Declines {
        fn custom_attributes() -> Option<CustomAttributeMap> {
            None
        }
    }

    #[derive(Model, Default, Debug)]
    struct Child {
        name: String,
    }

    #[derive(Model, Default, Debug)]
    struct Parent {
        #[model(nested = Child)]
        child: Option<Child>,
        #[model(nested = Child)]
        children: Vec<Child>,
    }

    // Inherits both mappings of `Parent` without declaring any.
    #[derive(Model, Default, Debug)]
    struct Heir {
        #[model(base)]
        parent: Parent,
        title: String,
    }

    // Overrides the target of `child`.
    #[derive(Model, Default, Debug)]
    #[model(custom_attributes)]
    struct Adopter {
        #[model(base)]
        parent: Parent,
    }

    impl HasCustomAttributes for Adopter {
        fn custom_attributes() -> Option<CustomAttributeMap> {
            Some(CustomAttributeMap::new().with_name("child", "Foster"))
        }
    }

    fn registry_with<T: GetModelMeta>() -> ModelRegistry {
        let mut registry = ModelRegistry::new();
        registry.register::<T>();
        registry
    }

    #[test]
    fn derived_map_from_nested_fields() {
        let registry = registry_with::<Parent>();
        let cache = ModelCache::new();
        let map = cache
            .custom_attributes(&registry, TypeId::of::<Parent>())
            .unwrap();
        assert_eq!(map.len(), 2);
        assert!(matches!(map.get("child"), Some(ModelTarget::Type { .. })));

        let again = cache
            .custom_attributes(&registry, TypeId::of::<Parent>())
            .unwrap();
        assert!(Arc::ptr_eq(&map, &again));
        assert_eq!(cache.custom_len(), 1);
    }

    #[test]
    fn inherited_from_base() {
        let registry = registry_with::<Heir>();
        let cache = ModelCache::new();
        let map = cache
            .custom_attributes(&registry, TypeId::of::<Heir>())
            .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("children").unwrap().name(), Child::type_path());
        assert!(!map.contains("title"));
    }

    #[test]
    fn derived_mapping_wins() {
        let registry = registry_with::<Adopter>();
        let cache = ModelCache::new();
        let map = cache
            .custom_attributes(&registry, TypeId::of::<Adopter>())
            .unwrap();
        assert_eq!(map.get("child").unwrap().name(), "Foster");
        assert_eq!(map.get("children").unwrap().name(), Child::type_path());
    }

    #[test]
    fn without_capability() {
        let registry = registry_with::<Child>();
        let cache = ModelCache::new();
        assert!(cache.custom_attributes(&registry, TypeId::of::<Child>()).is_none());
        assert!(cache.custom_attributes(&registry, TypeId::of::<Declines>()).is_none());
        assert_eq!(cache.custom_len(), 0);
    }

    #[test]
    fn capability_declining() {
        let registry = registry_with::<Declines>();
        let cache = ModelCache::new();
        assert!(cache.custom_attributes(&registry, TypeId::of::<Declines>()).is_none());
        assert_eq!(cache.custom_len(), 0);
    }

    #[test]
    fn empty_map_is_absent_and_not_cached() {
        let registry = registry_with::<Counted>();
        let cache = ModelCache::new();
        let before = CALLS.load(Ordering::Relaxed);
        assert!(cache.custom_attributes(&registry, TypeId::of::<Counted>()).is_none());
        assert!(cache.custom_attributes(&registry, TypeId::of::<Counted>()).is_none());
        assert_eq!(CALLS.load(Ordering::Relaxed) - before, 2);
        assert_eq!(cache.custom_len(), 0);
    }

    #[test]
    fn map_building() {
        let mut map: CustomAttributeMap = [
            ("a", ModelTarget::of::<Child>()),
            ("b", ModelTarget::named("Child")),
        ]
        .into_iter()
        .collect();

        assert!(map.contains("a"));
        assert_eq!(map.get("b").unwrap().name(), "Child");
        assert_eq!(map.iter().count(), 2);
        assert!(CustomAttributeMap::new().is_empty());

        map.extend_missing(
            CustomAttributeMap::new()
                .with_name("b", "Other")
                .with_name("c", "Other"),
        );
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("b").unwrap().name(), "Child");
        assert_eq!(map.get("c").unwrap().name(), "Other");
    }
}

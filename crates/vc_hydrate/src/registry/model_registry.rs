use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;

use foldhash::fast::FixedState;
use hashbrown::{HashMap, HashSet};
use log::warn;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::cache::TypeIdMap;
use crate::info::ModelInfo;
use crate::registry::{FromType, GetModelMeta, ModelMeta, TypeTrait};

// -----------------------------------------------------------------------------
// ModelRegistry

/// A registry of model types.
///
/// This struct is the central store for model metadata.
/// [Registering] a type generates a new [`ModelMeta`] entry using the type's
/// [`GetModelMeta`] implementation (which is automatically implemented when using
/// [`#[derive(Model)]`](crate::derive::Model)).
///
/// Besides `TypeId`, a model can be looked up by its full [type path] or by its
/// short [type name]. Short names shared by several registered models are
/// ambiguous and never resolve.
///
/// # Example
///
/// ```
/// use vc_hydrate::derive::Model;
/// use vc_hydrate::registry::{ModelRegistry, TypeTraitDefault};
///
/// #[derive(Model, Default, Debug)]
/// struct Session { token: String }
///
/// let mut registry = ModelRegistry::new();
/// registry.register::<Session>();
///
/// let ctor = registry
///     .get_with_type_name("Session").unwrap()
///     .get_trait::<TypeTraitDefault>().unwrap();
///
/// let session = ctor.default().take::<Session>().unwrap();
/// assert_eq!(session.token, "");
/// ```
///
/// [Registering]: ModelRegistry::register
/// [type path]: crate::info::TypePath::type_path
/// [type name]: crate::info::TypePath::type_name
pub struct ModelRegistry {
    meta_table: TypeIdMap<ModelMeta>,
    type_path_to_id: HashMap<&'static str, TypeId, FixedState>,
    type_name_to_id: HashMap<&'static str, TypeId, FixedState>,
    ambiguous_names: HashSet<&'static str, FixedState>,
}

impl Default for ModelRegistry {
    /// See [`ModelRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ModelRegistry {
    /// Create an empty [`ModelRegistry`].
    pub fn new() -> Self {
        Self {
            meta_table: TypeIdMap::new(),
            type_path_to_id: HashMap::default(),
            type_name_to_id: HashMap::default(),
            ambiguous_names: HashSet::default(),
        }
    }

    // # Validity
    // The type must **not** already exist.
    fn add_new_type_indices(&mut self, meta: &ModelMeta) {
        let ty = meta.ty();
        let type_name = ty.name();

        if !self.ambiguous_names.contains(type_name) {
            if self.type_name_to_id.remove(type_name).is_some() {
                warn!(
                    "model name `{type_name}` is ambiguous, `{}` must be looked up by its full path",
                    ty.path(),
                );
                self.ambiguous_names.insert(type_name);
            } else {
                self.type_name_to_id.insert(type_name, ty.id());
            }
        }

        // For new type, assuming that the full path cannot be duplicated.
        self.type_path_to_id.insert(ty.path(), ty.id());
    }

    // Returns `false` and does nothing if the type is already registered.
    fn register_internal(&mut self, type_id: TypeId, get_meta: impl FnOnce() -> ModelMeta) -> bool {
        if self.meta_table.contains(&type_id) {
            return false;
        }
        let meta = get_meta();
        self.add_new_type_indices(&meta);
        self.meta_table.insert(type_id, meta);
        true
    }

    /// Insert or **Overwrite** a [`ModelMeta`].
    ///
    /// If the type already exists its metadata is replaced, the name indices are kept.
    ///
    /// This method will _not_ register type dependencies.
    /// Use [`register`](Self::register) to register a type with its dependencies.
    pub fn insert_model_meta(&mut self, meta: ModelMeta) {
        let type_id = meta.type_id();
        if !self.meta_table.contains(&type_id) {
            self.add_new_type_indices(&meta);
        }
        self.meta_table.insert(type_id, meta);
    }

    /// Attempts to register the type `T` if it has not yet been registered already.
    ///
    /// This will also recursively register any dependencies as specified by
    /// [`GetModelMeta::register_dependencies`]. As with any meta, dependencies
    /// are not registered more than once.
    ///
    /// # Example
    ///
    /// ```
    /// # use core::any::TypeId;
    /// # use vc_hydrate::{derive::Model, registry::ModelRegistry};
    /// #[derive(Model, Default, Debug)]
    /// struct Base { id: u64 }
    ///
    /// #[derive(Model, Default, Debug)]
    /// struct Order {
    ///     #[model(base)]
    ///     base: Base,
    ///     #[model(nested = Line)]
    ///     lines: Vec<Line>,
    /// }
    ///
    /// #[derive(Model, Default, Debug)]
    /// struct Line { sku: String }
    ///
    /// let mut registry = ModelRegistry::new();
    /// registry.register::<Order>();
    ///
    /// assert!(registry.contains(TypeId::of::<Order>()));
    /// assert!(registry.contains(TypeId::of::<Base>()));
    /// assert!(registry.contains(TypeId::of::<Line>()));
    /// ```
    pub fn register<T: GetModelMeta>(&mut self) {
        if self.register_internal(TypeId::of::<T>(), T::get_model_meta) {
            T::register_dependencies(self);
        }
    }

    /// Automatically registers all models annotated with `#[model(auto_register)]`.
    ///
    /// This method is equivalent to calling [`register`](Self::register) for each
    /// qualifying type. Repeated calls are cheap and will not insert duplicates.
    ///
    /// ## Return Value
    ///
    /// Returns `true` if automatic registration is available, that is, the
    /// `auto_register` feature is enabled. Otherwise does nothing and returns `false`.
    ///
    /// ## Platform Support
    ///
    /// Static registration is implemented with the `inventory` crate, which supports
    /// Linux, macOS, Windows, iOS, Android and Web.
    ///
    /// # Examples
    ///
    /// ```
    /// # use core::any::TypeId;
    /// # use vc_hydrate::{derive::Model, registry::ModelRegistry};
    /// #[derive(Model, Default, Debug)]
    /// #[model(auto_register)]
    /// struct Invoice { total: f64 }
    ///
    /// let mut registry = ModelRegistry::new();
    /// assert!(registry.auto_register());
    /// assert!(registry.contains(TypeId::of::<Invoice>()));
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            crate::__macro_exports::auto_register::register_types(self);
            true
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Registers the type trait `D` for model `T`, registering `T` first if needed.
    ///
    /// Useful to attach a capability the derive did not generate, for example
    /// a hand written [`HasCustomAttributes`](crate::attributes::HasCustomAttributes).
    pub fn register_type_trait<T: GetModelMeta, D: TypeTrait + FromType<T>>(&mut self) {
        self.register::<T>();
        if let Some(meta) = self.meta_table.get_mut(&TypeId::of::<T>()) {
            meta.insert_trait(D::from_type());
        }
    }

    /// Whether the type with given [`TypeId`] has been registered in this registry.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.meta_table.contains(&type_id)
    }

    /// Returns the number of registered models.
    #[inline]
    pub fn len(&self) -> usize {
        self.meta_table.len()
    }

    /// Returns `true` if no model is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.meta_table.len() == 0
    }

    /// Returns a reference to the [`ModelMeta`] of the type with the given [`TypeId`].
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&ModelMeta> {
        self.meta_table.get(&type_id)
    }

    /// Returns a mutable reference to the [`ModelMeta`] of the type with the given [`TypeId`].
    #[inline]
    pub fn get_mut(&mut self, type_id: TypeId) -> Option<&mut ModelMeta> {
        self.meta_table.get_mut(&type_id)
    }

    /// Returns a reference to the [`ModelMeta`] of the type with the given [type path].
    ///
    /// [type path]: crate::info::TypePath::type_path
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&ModelMeta> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns a reference to the [`ModelMeta`] of the type with the given [type name].
    ///
    /// If the type name is ambiguous, or if no type with the given name
    /// has been registered, returns `None`.
    ///
    /// [type name]: crate::info::TypePath::type_name
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&ModelMeta> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Looks a model up by full path first, then by short name.
    pub fn get_with_name(&self, name: &str) -> Option<&ModelMeta> {
        self.get_with_type_path(name)
            .or_else(|| self.get_with_type_name(name))
    }

    /// Returns `true` if the given [type name] matches multiple registered models.
    ///
    /// # Example
    /// ```
    /// # use vc_hydrate::registry::ModelRegistry;
    /// # mod foo {
    /// #     use vc_hydrate::derive::Model;
    /// #     #[derive(Model, Default, Debug)]
    /// #     pub struct Item { pub id: u32 }
    /// # }
    /// # mod bar {
    /// #     use vc_hydrate::derive::Model;
    /// #     #[derive(Model, Default, Debug)]
    /// #     pub struct Item { pub id: u32 }
    /// # }
    /// let mut registry = ModelRegistry::new();
    /// registry.register::<foo::Item>();
    /// registry.register::<bar::Item>();
    /// assert!(registry.is_ambiguous("Item"));
    /// assert!(registry.get_with_type_name("Item").is_none());
    /// ```
    ///
    /// [type name]: crate::info::TypePath::type_name
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Returns a reference to the type trait `T` of the model with the given [`TypeId`].
    pub fn get_type_trait<T: TypeTrait>(&self, type_id: TypeId) -> Option<&T> {
        match self.get(type_id) {
            Some(meta) => meta.get_trait::<T>(),
            None => None,
        }
    }

    /// Returns the [`ModelInfo`] associated with the given [`TypeId`].
    pub fn get_model_info(&self, type_id: TypeId) -> Option<&'static ModelInfo> {
        self.get(type_id).map(ModelMeta::model_info)
    }

    /// Returns an iterator over the [`ModelMeta`]s of the registered models.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ModelMeta> {
        self.meta_table.values()
    }

    /// Returns a ([`ModelMeta`], type trait) iterator over the models carrying the type trait `T`.
    pub fn iter_with_trait<T: TypeTrait>(&self) -> impl Iterator<Item = (&ModelMeta, &T)> {
        self.meta_table
            .values()
            .filter_map(|meta| meta.get_trait::<T>().map(|t| (meta, t)))
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.type_path_to_id.keys()).finish()
    }
}

// -----------------------------------------------------------------------------
// ModelRegistryArc

/// A shared [`ModelRegistry`] behind a reader-writer lock.
#[derive(Clone, Default)]
pub struct ModelRegistryArc {
    /// The wrapped [`ModelRegistry`].
    pub internal: Arc<RwLock<ModelRegistry>>,
}

impl ModelRegistryArc {
    /// Wraps an existing registry.
    #[inline]
    pub fn new(registry: ModelRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock on the underlying [`ModelRegistry`].
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, ModelRegistry> {
        self.internal.read()
    }

    /// Takes a write lock on the underlying [`ModelRegistry`].
    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, ModelRegistry> {
        self.internal.write()
    }
}

impl fmt::Debug for ModelRegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.internal.read(), f)
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::ModelRegistry;
    use crate::derive::Model;
    use crate::registry::{TypeTraitCustomAttributes, TypeTraitDefault};

    mod left {
        use crate::derive::Model;

        #[derive(Model, Default, Debug)]
        pub struct Node {
            pub id: u32,
        }
    }

    mod right {
        use crate::derive::Model;

        #[derive(Model, Default, Debug)]
        pub struct Node {
            pub id: u32,
        }
    }

    #[derive(Model, Default, Debug)]
    #[model(type_path = "app::Tag")]
    struct Tag {
        label: String,
    }

    #[test]
    fn lookup_by_path_and_name() {
        let mut registry = ModelRegistry::new();
        registry.register::<Tag>();
        registry.register::<Tag>();

        assert_eq!(registry.len(), 1);
        let meta = registry.get_with_type_path("app::Tag").unwrap();
        assert_eq!(meta.type_id(), TypeId::of::<Tag>());
        assert!(registry.get_with_type_name("Tag").is_some());
        assert!(registry.get_with_name("app::Tag").is_some());
        assert!(registry.get_with_name("Tag").is_some());
        assert!(registry.get_with_name("Missing").is_none());
        assert!(meta.has_trait::<TypeTraitDefault>());
        assert!(!meta.has_trait::<TypeTraitCustomAttributes>());
    }

    #[test]
    fn ambiguous_names_resolve_by_path_only() {
        let mut registry = ModelRegistry::new();
        registry.register::<left::Node>();
        assert!(!registry.is_ambiguous("Node"));
        registry.register::<right::Node>();

        assert!(registry.is_ambiguous("Node"));
        assert!(registry.get_with_type_name("Node").is_none());

        let path = <right::Node as crate::info::TypePath>::type_path();
        assert_eq!(
            registry.get_with_name(path).map(|m| m.type_id()),
            Some(TypeId::of::<right::Node>())
        );
    }

    #[test]
    fn iter_with_trait() {
        let mut registry = ModelRegistry::new();
        registry.register::<Tag>();
        registry.register::<left::Node>();

        assert_eq!(registry.iter().len(), 2);
        assert_eq!(registry.iter_with_trait::<TypeTraitDefault>().count(), 2);
        assert_eq!(
            registry.iter_with_trait::<TypeTraitCustomAttributes>().count(),
            0
        );
    }
}

use alloc::boxed::Box;
use alloc::format;
use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use std::sync::LazyLock;

use log::{debug, trace};

use crate::attributes::{CustomAttributeMap, ModelTarget, lineage_capabilities};
use crate::cache::{Attributes, ModelCache};
use crate::hydrate::{HydrateError, Hydrated};
use crate::info::ModelInfo;
use crate::registry::{
    GetModelMeta, ModelMeta, ModelRegistry, ModelRegistryArc, TypeTraitCustomAttributes,
    TypeTraitDefault,
};
use crate::{Model, PropertyValue, RawMap, RawValue};

// -----------------------------------------------------------------------------
// Target

// Metadata copied out of the registry, so no registry lock is held while hydrating.
struct Target {
    info: &'static ModelInfo,
    ctor: Option<TypeTraitDefault>,
    // Most-derived first, bases inherit into the model.
    capabilities: Vec<TypeTraitCustomAttributes>,
}

impl Target {
    fn from_meta(registry: &ModelRegistry, meta: &ModelMeta) -> Self {
        Self {
            info: meta.model_info(),
            ctor: meta.get_trait::<TypeTraitDefault>().copied(),
            capabilities: lineage_capabilities(registry, meta.model_info()),
        }
    }

    #[inline]
    fn type_path(&self) -> &'static str {
        self.info.type_path()
    }
}

// -----------------------------------------------------------------------------
// Hydrator

/// Converts raw key-value trees into model instances.
///
/// A hydrator owns a shared [`ModelRegistry`] and a shared [`ModelCache`],
/// cloning it is cheap and clones observe the same registrations and caches.
/// It is `Send + Sync`, hydration may run concurrently from any number of threads.
///
/// [`Hydrator::global`] is the process-wide instance. Isolated instances are
/// created with [`Hydrator::new`] or [`Hydrator::with_registry`].
///
/// # Examples
///
/// ```
/// use vc_hydrate::{derive::Model, Hydrator};
/// use serde_json::json;
///
/// #[derive(Model, Default, Debug)]
/// struct Pet { name: String }
///
/// #[derive(Model, Default, Debug)]
/// struct Owner {
///     name: String,
///     age: u32,
///     #[model(nested = Pet)]
///     pets: Vec<Pet>,
/// }
///
/// let raw = json!({
///     "name": "Ann",
///     "pets": [{ "name": "Rex" }, { "name": "Tom" }],
///     "unknown": true,
/// });
///
/// let hydrator = Hydrator::new();
/// let owner: Owner = hydrator.hydrate(raw.as_object().unwrap()).unwrap();
///
/// assert_eq!(owner.name, "Ann");
/// assert_eq!(owner.age, 0);
/// assert_eq!(owner.pets.len(), 2);
/// assert_eq!(owner.pets[1].name, "Tom");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Hydrator {
    registry: ModelRegistryArc,
    cache: Arc<ModelCache>,
}

impl Hydrator {
    /// Creates a hydrator with an empty registry and empty caches.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hydrator over an existing registry, with empty caches.
    #[inline]
    pub fn with_registry(registry: ModelRegistryArc) -> Self {
        Self {
            registry,
            cache: Arc::default(),
        }
    }

    /// The process-wide hydrator.
    ///
    /// On first use, every model annotated with `#[model(auto_register)]` is registered.
    pub fn global() -> &'static Hydrator {
        static GLOBAL: LazyLock<Hydrator> = LazyLock::new(|| {
            let hydrator = Hydrator::new();
            hydrator.registry.write().auto_register();
            hydrator
        });
        &GLOBAL
    }

    /// Registers the model `T` and its dependencies, if not yet registered.
    ///
    /// Registration is expected to happen at startup. It takes the registry
    /// write lock only when `T` is new.
    pub fn register<T: GetModelMeta>(&self) -> &Self {
        if !self.registry.read().contains(TypeId::of::<T>()) {
            self.registry.write().register::<T>();
        }
        self
    }

    /// The shared registry.
    #[inline]
    pub fn registry(&self) -> &ModelRegistryArc {
        &self.registry
    }

    /// The shared caches.
    #[inline]
    pub fn cache(&self) -> &ModelCache {
        &self.cache
    }

    // -------------------------------------------------------------------------
    // Attribute queries

    /// Own attributes of a registered model, see [`ModelCache::own_attributes`].
    pub fn own_attributes(&self, type_id: TypeId) -> Option<Attributes> {
        let info = self.registry.read().get_model_info(type_id)?;
        Some(self.cache.own_attributes(info))
    }

    /// Aggregated attributes of a registered model, see [`ModelCache::all_attributes`].
    pub fn all_attributes(&self, type_id: TypeId) -> Option<Attributes> {
        let info = self.registry.read().get_model_info(type_id)?;
        self.cache.all_attributes(info)
    }

    /// Custom attributes of a registered model, see [`ModelCache::custom_attributes`].
    pub fn custom_attributes(&self, type_id: TypeId) -> Option<Arc<CustomAttributeMap>> {
        let target = self.target(type_id).ok()?;
        self.cache
            .resolve_custom_attributes(target.info, &target.capabilities)
    }

    // -------------------------------------------------------------------------
    // Resolution

    fn target(&self, type_id: TypeId) -> Result<Target, HydrateError> {
        let registry = self.registry.read();
        match registry.get(type_id) {
            Some(meta) => Ok(Target::from_meta(&registry, meta)),
            None => Err(HydrateError::UnknownType(format!("{type_id:?}"))),
        }
    }

    fn target_id_with_name(&self, name: &str) -> Result<TypeId, HydrateError> {
        match self.registry.read().get_with_name(name) {
            Some(meta) => Ok(meta.type_id()),
            None => Err(HydrateError::UnknownType(name.to_string())),
        }
    }

    fn resolve_model_target(&self, target: &ModelTarget) -> Result<TypeId, HydrateError> {
        match target {
            ModelTarget::Type {
                type_id, register, ..
            } => {
                if !self.registry.read().contains(*type_id) {
                    let mut registry = self.registry.write();
                    register(&mut *registry);
                }
                Ok(*type_id)
            }
            ModelTarget::Name(name) => self.target_id_with_name(name),
        }
    }

    // -------------------------------------------------------------------------
    // Hydration

    /// Creates a model of type `type_id` and fills it from `source`.
    ///
    /// For each attribute of the model (own attributes first, then those of its bases):
    /// - a key missing from `source` leaves the property at its default;
    /// - without a custom attribute, the raw value is assigned as is;
    /// - with a custom attribute, the raw value is first hydrated into the target model,
    ///   a mapping into one model and a sequence into many.
    ///
    /// A property whose value cannot be assigned keeps its default. Keys of `source`
    /// that are not attributes are ignored.
    ///
    /// # Errors
    ///
    /// - [`HydrateError::NoAttributes`] if the model has no attribute at all,
    ///   nothing is allocated in that case;
    /// - [`HydrateError::UnknownType`] if the model is not registered;
    /// - [`HydrateError::NotConstructible`] if it has no default constructor.
    pub fn hydrate_one(
        &self,
        source: &RawMap,
        type_id: TypeId,
    ) -> Result<Box<dyn Model>, HydrateError> {
        let target = self.target(type_id)?;
        self.hydrate_one_with(source, &target)
    }

    /// Hydrates every element of `source` into the model `type_id`.
    ///
    /// Mappings become [`Hydrated::One`], nested sequences become [`Hydrated::Many`]
    /// (recursively) and scalars are skipped. Elements that fail are skipped too.
    /// The output keeps the input order.
    ///
    /// # Errors
    ///
    /// [`HydrateError::NoConvertibleElements`] if nothing could be hydrated,
    /// which includes an empty `source`.
    pub fn hydrate_many(
        &self,
        source: &[RawValue],
        type_id: TypeId,
    ) -> Result<Vec<Hydrated>, HydrateError> {
        let target = self.target(type_id)?;
        self.hydrate_many_with(source, &target)
    }

    /// Hydrates a raw value of any shape.
    ///
    /// # Errors
    ///
    /// As [`hydrate_one`](Self::hydrate_one) for a mapping, as
    /// [`hydrate_many`](Self::hydrate_many) for a sequence, and
    /// [`HydrateError::UnconvertibleScalar`] for anything else.
    pub fn hydrate_value(&self, source: &RawValue, type_id: TypeId) -> Result<Hydrated, HydrateError> {
        let target = self.target(type_id)?;
        self.hydrate_value_with(source, &target)
    }

    /// [`hydrate_one`](Self::hydrate_one) with the model given by full path or short name.
    pub fn hydrate_one_named(
        &self,
        source: &RawMap,
        name: &str,
    ) -> Result<Box<dyn Model>, HydrateError> {
        let type_id = self.target_id_with_name(name)?;
        self.hydrate_one(source, type_id)
    }

    /// [`hydrate_many`](Self::hydrate_many) with the model given by full path or short name.
    pub fn hydrate_many_named(
        &self,
        source: &[RawValue],
        name: &str,
    ) -> Result<Vec<Hydrated>, HydrateError> {
        let type_id = self.target_id_with_name(name)?;
        self.hydrate_many(source, type_id)
    }

    /// Hydrates a `T`, registering it on demand.
    pub fn hydrate<T: GetModelMeta>(&self, source: &RawMap) -> Result<T, HydrateError> {
        self.register::<T>();
        let model = self.hydrate_one(source, TypeId::of::<T>())?;
        model
            .take::<T>()
            .map_err(|model| HydrateError::UnknownType(model.reflect_model_info().type_path().into()))
    }

    /// Hydrates a sequence of `T`, registering it on demand.
    ///
    /// Nested sequences are flattened, in input order.
    pub fn hydrate_vec<T: GetModelMeta>(&self, source: &[RawValue]) -> Result<Vec<T>, HydrateError> {
        self.register::<T>();
        let items = self.hydrate_many(source, TypeId::of::<T>())?;
        let mut output = Vec::with_capacity(items.len());
        for item in items {
            item.flatten_into(&mut output);
        }
        Ok(output)
    }

    fn hydrate_value_with(&self, source: &RawValue, target: &Target) -> Result<Hydrated, HydrateError> {
        match source {
            RawValue::Object(map) => self.hydrate_one_with(map, target).map(Hydrated::One),
            RawValue::Array(items) => self.hydrate_many_with(items, target).map(Hydrated::Many),
            _ => Err(HydrateError::UnconvertibleScalar(target.type_path())),
        }
    }

    fn hydrate_one_with(
        &self,
        source: &RawMap,
        target: &Target,
    ) -> Result<Box<dyn Model>, HydrateError> {
        let Some(attributes) = self.cache.all_attributes(target.info) else {
            return Err(HydrateError::NoAttributes(target.type_path()));
        };
        let Some(ctor) = target.ctor else {
            return Err(HydrateError::NotConstructible(target.type_path()));
        };

        let mut model = ctor.default();
        let custom = self
            .cache
            .resolve_custom_attributes(target.info, &target.capabilities);

        for &name in attributes.iter() {
            let Some(raw) = source.get(name) else {
                continue;
            };

            let value = match custom.as_deref().and_then(|map| map.get(name)) {
                None => PropertyValue::Raw(raw.clone()),
                Some(nested) => match self.hydrate_nested(raw, nested) {
                    Ok(hydrated) => PropertyValue::Hydrated(hydrated),
                    Err(err) => {
                        debug!(
                            "property `{name}` of `{}` left unset: {err}",
                            target.type_path()
                        );
                        continue;
                    }
                },
            };

            if let Err(err) = model.set_property(name, value) {
                debug!(
                    "property `{name}` of `{}` left unset: {err}",
                    target.type_path()
                );
            }
        }

        Ok(model)
    }

    fn hydrate_many_with(
        &self,
        source: &[RawValue],
        target: &Target,
    ) -> Result<Vec<Hydrated>, HydrateError> {
        let mut output = Vec::with_capacity(source.len());

        for element in source {
            let hydrated = match element {
                RawValue::Object(map) => self.hydrate_one_with(map, target).map(Hydrated::One),
                RawValue::Array(items) => {
                    self.hydrate_many_with(items, target).map(Hydrated::Many)
                }
                _ => continue,
            };
            match hydrated {
                Ok(hydrated) => output.push(hydrated),
                Err(err) => debug!("element skipped: {err}"),
            }
        }

        if output.is_empty() {
            Err(HydrateError::NoConvertibleElements(target.type_path()))
        } else {
            Ok(output)
        }
    }

    fn hydrate_nested(&self, source: &RawValue, nested: &ModelTarget) -> Result<Hydrated, HydrateError> {
        let type_id = self.resolve_model_target(nested)?;
        let target = self.target(type_id)?;
        trace!("hydrating nested `{}`", target.type_path());
        self.hydrate_value_with(source, &target)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::any::TypeId;
    use std::thread;

    use serde_json::json;

    use super::Hydrator;
    use crate::attributes::{CustomAttributeMap, HasCustomAttributes};
    use crate::derive::Model;
    use crate::info::TypePath;
    use crate::{HydrateError, Hydrated, RawMap, RawValue};

    fn map(value: RawValue) -> RawMap {
        match value {
            RawValue::Object(map) => map,
            _ => panic!("fixture is not a mapping"),
        }
    }

    #[derive(Model, Default, Debug, PartialEq)]
    struct Pair {
        a: i64,
        b: String,
    }

    #[derive(Model, Default, Debug, PartialEq)]
    struct Animal {
        name: String,
        legs: u32,
    }

    #[derive(Model, Default, Debug, PartialEq)]
    struct Dog {
        #[model(base)]
        animal: Animal,
        breed: String,
    }

    #[derive(Model, Default, Debug)]
    struct Empty;

    #[derive(Model, Default, Debug)]
    struct Marker {
        #[model(base)]
        empty: Empty,
        #[model(skip)]
        hidden: u8,
    }

    #[derive(Model, Default, Debug, PartialEq, Clone)]
    struct Child {
        name: String,
        v: i64,
    }

    #[derive(Model, Default, Debug, PartialEq)]
    struct Parent {
        label: String,
        #[model(nested = Child)]
        child: Option<Child>,
        #[model(nested = Child)]
        items: Vec<Child>,
        plain: Child,
    }

    // Custom attributes come from `Parent` through the base.
    #[derive(Model, Default, Debug, PartialEq)]
    struct Family {
        #[model(base)]
        parent: Parent,
        surname: String,
    }

    #[derive(Model, Default, Debug, PartialEq)]
    struct Grid {
        #[model(nested = Child)]
        rows: Vec<Vec<Child>>,
    }

    #[derive(Model, Default, Debug, PartialEq)]
    struct Member {
        name: String,
    }

    #[derive(Model, Default, Debug, PartialEq)]
    #[model(custom_attributes)]
    struct Team {
        members: Vec<Member>,
        lead: Option<Member>,
    }

    impl HasCustomAttributes for Team {
        fn custom_attributes() -> Option<CustomAttributeMap> {
            Some(
                CustomAttributeMap::new()
                    .with_name("members", "Member")
                    .with_name("lead", "tests::Nobody"),
            )
        }
    }

    #[test]
    fn empty_source_gives_defaults() {
        let hydrator = Hydrator::new();
        let pair: Pair = hydrator.hydrate(&RawMap::new()).unwrap();
        assert_eq!(pair, Pair::default());
    }

    #[test]
    fn no_attributes_in_hierarchy() {
        let hydrator = Hydrator::new();
        hydrator.register::<Empty>().register::<Marker>();

        let source = map(json!({ "hidden": 1 }));
        assert_eq!(
            hydrator.hydrate_one(&source, TypeId::of::<Marker>()).unwrap_err(),
            HydrateError::NoAttributes(Marker::type_path())
        );
        assert!(matches!(
            hydrator.hydrate::<Empty>(&source),
            Err(HydrateError::NoAttributes(_))
        ));
    }

    #[test]
    fn aggregate_is_idempotent() {
        let hydrator = Hydrator::new();
        hydrator.register::<Dog>();
        let first = hydrator.all_attributes(TypeId::of::<Dog>()).unwrap();
        let second = hydrator.all_attributes(TypeId::of::<Dog>()).unwrap();
        assert_eq!(first, second);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(&*first, ["breed", "name", "legs"]);
        assert_eq!(&*hydrator.own_attributes(TypeId::of::<Dog>()).unwrap(), ["breed"]);
        assert!(hydrator.all_attributes(TypeId::of::<Pair>()).is_none());
    }

    #[test]
    fn nested_mapping() {
        let hydrator = Hydrator::new();
        let source = map(json!({ "child": { "name": "x" } }));
        let parent: Parent = hydrator.hydrate(&source).unwrap();
        assert_eq!(parent.child.unwrap().name, "x");
    }

    #[test]
    fn nested_sequence_keeps_order() {
        let hydrator = Hydrator::new();
        let source = map(json!({ "items": [{ "v": 1 }, { "v": 2 }] }));
        let parent: Parent = hydrator.hydrate(&source).unwrap();
        let values: Vec<i64> = parent.items.iter().map(|c| c.v).collect();
        assert_eq!(values, [1, 2]);
    }

    #[test]
    fn many_without_convertible_elements() {
        let hydrator = Hydrator::new();
        hydrator.register::<Pair>();
        let id = TypeId::of::<Pair>();

        let expected = HydrateError::NoConvertibleElements(Pair::type_path());
        assert_eq!(hydrator.hydrate_many(&[], id).unwrap_err(), expected);

        let scalars = [json!(1), json!("x"), json!(true)];
        assert_eq!(hydrator.hydrate_many(&scalars, id).unwrap_err(), expected);
    }

    #[test]
    fn missing_key_keeps_default() {
        let hydrator = Hydrator::new();
        let pair: Pair = hydrator.hydrate(&map(json!({ "a": 5 }))).unwrap();
        assert_eq!(pair.a, 5);
        assert_eq!(pair.b, "");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let hydrator = Hydrator::new();
        let source = map(json!({ "a": 1, "zzz": [1, 2], "B": "no" }));
        let pair: Pair = hydrator.hydrate(&source).unwrap();
        assert_eq!(pair, Pair { a: 1, b: String::new() });
    }

    #[test]
    fn base_properties_are_filled() {
        let hydrator = Hydrator::new();
        let source = map(json!({ "name": "Rex", "legs": 4, "breed": "collie" }));
        let dog: Dog = hydrator.hydrate(&source).unwrap();
        assert_eq!(dog.animal, Animal { name: "Rex".into(), legs: 4 });
        assert_eq!(dog.breed, "collie");
    }

    #[test]
    fn mismatched_values_are_not_coerced() {
        let hydrator = Hydrator::new();
        let source = map(json!({ "a": "5", "b": 7 }));
        let pair: Pair = hydrator.hydrate(&source).unwrap();
        assert_eq!(pair, Pair::default());
    }

    #[test]
    fn custom_scalar_is_left_unset() {
        let hydrator = Hydrator::new();
        let source = map(json!({ "label": "p", "child": "x", "items": 3 }));
        let parent: Parent = hydrator.hydrate(&source).unwrap();
        assert_eq!(parent.label, "p");
        assert_eq!(parent.child, None);
        assert!(parent.items.is_empty());
    }

    #[test]
    fn model_property_without_mapping_is_left_unset() {
        let hydrator = Hydrator::new();
        let source = map(json!({ "plain": { "name": "x" } }));
        let parent: Parent = hydrator.hydrate(&source).unwrap();
        assert_eq!(parent.plain, Child::default());
    }

    #[test]
    fn shape_mismatch_is_left_unset() {
        let hydrator = Hydrator::new();
        // A sequence for a single child, a mapping for a list of children.
        let source = map(json!({ "child": [{ "v": 1 }], "items": { "v": 2 } }));
        let parent: Parent = hydrator.hydrate(&source).unwrap();
        assert_eq!(parent.child, None);
        assert!(parent.items.is_empty());
    }

    #[test]
    fn base_custom_attributes_are_inherited() {
        let hydrator = Hydrator::new();
        let source = map(json!({
            "surname": "Lee",
            "child": { "name": "a" },
            "items": [{ "v": 1 }, { "v": 2 }],
        }));
        let family: Family = hydrator.hydrate(&source).unwrap();
        assert_eq!(family.surname, "Lee");
        assert_eq!(
            family.parent.child.as_ref().map(|c| c.name.as_str()),
            Some("a")
        );
        assert_eq!(
            family.parent.items.iter().map(|c| c.v).collect::<Vec<_>>(),
            [1, 2]
        );

        let custom = hydrator.custom_attributes(TypeId::of::<Family>()).unwrap();
        assert!(custom.contains("items"));
        assert_eq!(hydrator.cache().custom_len(), 1);
    }

    #[test]
    fn nested_sequences_flatten_into_a_list() {
        let hydrator = Hydrator::new();
        let source = map(json!({
            "items": [{ "v": 1 }, [{ "v": 2 }, [{ "v": 3 }]], 5, { "v": 4 }]
        }));
        let parent: Parent = hydrator.hydrate(&source).unwrap();
        assert_eq!(
            parent.items.iter().map(|c| c.v).collect::<Vec<_>>(),
            [1, 2, 3, 4]
        );
    }

    #[test]
    fn arrays_of_arrays() {
        let hydrator = Hydrator::new();
        let source = map(json!({
            "rows": [[{ "v": 1 }], [{ "v": 2 }, { "v": 3 }]]
        }));
        let grid: Grid = hydrator.hydrate(&source).unwrap();
        let values: Vec<Vec<i64>> = grid
            .rows
            .iter()
            .map(|row| row.iter().map(|c| c.v).collect())
            .collect();
        assert_eq!(values, vec![vec![1], vec![2, 3]]);
    }

    #[test]
    fn many_skips_scalars_and_failures() {
        let hydrator = Hydrator::new();
        hydrator.register::<Child>();
        let source = [
            json!({ "v": 1 }),
            json!(1),
            json!([{ "v": 2 }, "x"]),
            json!([]),
            json!(null),
        ];
        let items = hydrator.hydrate_many(&source, TypeId::of::<Child>()).unwrap();
        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], Hydrated::One(_)));
        assert_eq!(items[1].len(), 1);

        let flat = hydrator.hydrate_vec::<Child>(&source).unwrap();
        assert_eq!(flat.iter().map(|c| c.v).collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn hydrate_value_dispatch() {
        let hydrator = Hydrator::new();
        hydrator.register::<Child>();
        let id = TypeId::of::<Child>();

        assert!(matches!(
            hydrator.hydrate_value(&json!({ "v": 1 }), id),
            Ok(Hydrated::One(_))
        ));
        assert!(matches!(
            hydrator.hydrate_value(&json!([{ "v": 1 }]), id),
            Ok(Hydrated::Many(_))
        ));
        assert_eq!(
            hydrator.hydrate_value(&json!(4), id).unwrap_err(),
            HydrateError::UnconvertibleScalar(Child::type_path())
        );
    }

    #[test]
    fn named_targets() {
        let hydrator = Hydrator::new();
        hydrator.register::<Member>().register::<Team>();

        let source = map(json!({
            "members": [{ "name": "a" }, { "name": "b" }],
            "lead": { "name": "c" },
        }));
        let team: Team = hydrator.hydrate(&source).unwrap();
        assert_eq!(team.members.len(), 2);
        assert_eq!(team.members[1].name, "b");
        // `lead` targets an unregistered name.
        assert_eq!(team.lead, None);

        let by_name = hydrator.hydrate_one_named(&map(json!({ "name": "d" })), "Member");
        assert_eq!(by_name.unwrap().get::<String>("name").unwrap(), "d");

        let by_path = hydrator.hydrate_many_named(&[json!({ "name": "e" })], Member::type_path());
        assert_eq!(by_path.unwrap().len(), 1);

        assert_eq!(
            hydrator.hydrate_one_named(&RawMap::new(), "Nobody").unwrap_err(),
            HydrateError::UnknownType("Nobody".into())
        );
    }

    #[test]
    fn unregistered_type() {
        let hydrator = Hydrator::new();
        assert!(matches!(
            hydrator.hydrate_one(&RawMap::new(), TypeId::of::<Pair>()),
            Err(HydrateError::UnknownType(_))
        ));
        assert!(hydrator.own_attributes(TypeId::of::<Pair>()).is_none());
        assert!(hydrator.custom_attributes(TypeId::of::<Pair>()).is_none());
    }

    #[test]
    fn nested_targets_are_registered_on_demand() {
        let hydrator = Hydrator::new();
        hydrator.register::<Parent>();
        assert!(hydrator.registry().read().contains(TypeId::of::<Child>()));
        assert!(hydrator.custom_attributes(TypeId::of::<Parent>()).is_some());
    }

    #[test]
    fn concurrent_hydration() {
        let hydrator = Hydrator::new();
        hydrator.register::<Parent>().register::<Dog>();

        let source = map(json!({
            "label": "p",
            "items": [{ "name": "a", "v": 1 }, { "name": "b", "v": 2 }],
        }));

        let results: Vec<Parent> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let hydrator = hydrator.clone();
                    let source = &source;
                    scope.spawn(move || hydrator.hydrate::<Parent>(source).unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(results.iter().all(|p| p == &results[0]));
        assert_eq!(results[0].items[1].v, 2);
        assert_eq!(hydrator.cache().all_len(), 2);
        assert_eq!(hydrator.cache().custom_len(), 1);
    }

    #[derive(Model, Default, Debug)]
    #[model(auto_register)]
    struct Registered {
        id: u32,
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn global_runs_auto_register() {
        let global = Hydrator::global();
        assert!(global.registry().read().contains(TypeId::of::<Registered>()));

        let model = global
            .hydrate_one(&map(json!({ "id": 9 })), TypeId::of::<Registered>())
            .unwrap();
        assert_eq!(model.get::<u32>("id"), Some(&9));
    }
}

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::cache::TypeIdMap;
use crate::info::{ModelInfo, Type, Typed};
use crate::registry::{ModelRegistry, TypeTrait};

// -----------------------------------------------------------------------------
// ModelMeta

/// Runtime storage for a model type's [`ModelInfo`] and [`TypeTrait`] table.
///
/// The table is what answers "does this model support capability X": a capability
/// is supported exactly when its type trait is present.
///
/// # Examples
///
/// ```
/// use vc_hydrate::derive::Model;
/// use vc_hydrate::registry::{GetModelMeta, TypeTraitDefault, TypeTraitCustomAttributes};
///
/// #[derive(Model, Default, Debug)]
/// struct Point { x: f32, y: f32 }
///
/// let meta = Point::get_model_meta();
///
/// assert_eq!(meta.model_info().property_len(), 2);
/// assert!(meta.has_trait::<TypeTraitDefault>());
/// assert!(!meta.has_trait::<TypeTraitCustomAttributes>());
/// ```
pub struct ModelMeta {
    model_info: &'static ModelInfo,
    trait_table: TypeIdMap<Box<dyn TypeTrait>>,
}

impl ModelMeta {
    /// Creates an empty [`ModelMeta`] for the type.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self {
            model_info: T::model_info(),
            trait_table: TypeIdMap::new(),
        }
    }

    /// Returns the [`ModelInfo`] of the model.
    #[inline]
    pub fn model_info(&self) -> &'static ModelInfo {
        self.model_info
    }

    /// Returns the [`Type`] of the model.
    #[inline]
    pub fn ty(&self) -> &'static Type {
        self.model_info.ty()
    }

    /// Returns the `TypeId` of the model.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.model_info.type_id()
    }

    /// Returns the fully qualified path of the model.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.model_info.type_path()
    }

    /// Inserts a type trait, replacing the previous one of the same type.
    #[inline]
    pub fn insert_trait<T: TypeTrait>(&mut self, data: T) {
        self.trait_table.insert(TypeId::of::<T>(), Box::new(data));
    }

    /// Removes a type trait and returns it, if present.
    pub fn remove_trait<T: TypeTrait>(&mut self) -> Option<T> {
        let data = self.trait_table.remove(&TypeId::of::<T>())?;
        <Box<dyn Any>>::downcast::<T>(data)
            .ok()
            .map(|data| *data)
    }

    /// Returns `true` if the type trait is present.
    #[inline]
    pub fn has_trait<T: TypeTrait>(&self) -> bool {
        self.trait_table.contains(&TypeId::of::<T>())
    }

    /// Returns a reference to the type trait, if present.
    #[inline]
    pub fn get_trait<T: TypeTrait>(&self) -> Option<&T> {
        self.trait_table
            .get(&TypeId::of::<T>())
            .and_then(|data| data.downcast_ref::<T>())
    }

    /// Returns a mutable reference to the type trait, if present.
    #[inline]
    pub fn get_trait_mut<T: TypeTrait>(&mut self) -> Option<&mut T> {
        self.trait_table
            .get_mut(&TypeId::of::<T>())
            .and_then(|data| data.downcast_mut::<T>())
    }

    /// Returns the number of type traits.
    #[inline]
    pub fn trait_len(&self) -> usize {
        self.trait_table.len()
    }
}

impl Clone for ModelMeta {
    fn clone(&self) -> Self {
        let mut trait_table = TypeIdMap::new();
        for (id, data) in self.trait_table.iter() {
            trait_table.insert(*id, (**data).clone_type_trait());
        }
        Self {
            model_info: self.model_info,
            trait_table,
        }
    }
}

impl fmt::Debug for ModelMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelMeta")
            .field("model_info", self.model_info)
            .field("trait_len", &self.trait_len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GetModelMeta

/// Provides the [`ModelMeta`] of a model type and registers the models it depends on.
///
/// Automatically implemented by [`#[derive(Model)]`](crate::derive::Model).
/// The dependencies of a derived model are its base model and the targets of its
/// `#[model(nested = T)]` fields.
pub trait GetModelMeta: Typed {
    /// Returns the default [`ModelMeta`] for this type.
    fn get_model_meta() -> ModelMeta;

    /// Registers other models needed by this model.
    ///
    /// This method is called by [`ModelRegistry::register`].
    fn register_dependencies(_registry: &mut ModelRegistry) {}
}

#[cfg(test)]
mod tests {
    use crate::derive::Model;
    use crate::registry::{GetModelMeta, TypeTraitCustomAttributes, TypeTraitDefault};

    #[derive(Model, Default, Debug)]
    struct Leaf {
        id: u32,
    }

    #[derive(Model, Default, Debug)]
    struct Tree {
        #[model(nested = Leaf)]
        leaves: Vec<Leaf>,
    }

    #[test]
    fn clone_keeps_traits() {
        let meta = Tree::get_model_meta();
        assert_eq!(meta.trait_len(), 2);

        let copy = meta.clone();
        assert_eq!(copy.type_id(), meta.type_id());
        assert_eq!(copy.trait_len(), 2);
        assert!(copy.get_trait::<TypeTraitDefault>().is_some());

        let map = copy
            .get_trait::<TypeTraitCustomAttributes>()
            .and_then(TypeTraitCustomAttributes::custom_attributes)
            .unwrap();
        assert!(map.contains("leaves"));

        let model = copy.get_trait::<TypeTraitDefault>().unwrap().default();
        assert!(model.is::<Tree>());
    }

    #[test]
    fn remove_trait() {
        let mut meta = Leaf::get_model_meta();
        assert!(meta.remove_trait::<TypeTraitDefault>().is_some());
        assert!(!meta.has_trait::<TypeTraitDefault>());
        assert!(meta.remove_trait::<TypeTraitDefault>().is_none());
    }
}

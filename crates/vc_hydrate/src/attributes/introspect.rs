use log::trace;

use crate::cache::{Attributes, ModelCache};
use crate::info::ModelInfo;

impl ModelCache {
    /// Returns the names of the properties declared directly on the model.
    ///
    /// Properties of the base model are not included. The result is an empty
    /// list for a model without own properties, and it is cached either way.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_hydrate::{derive::Model, info::Typed, ModelCache};
    ///
    /// #[derive(Model, Default, Debug)]
    /// struct Entity { id: u64 }
    ///
    /// #[derive(Model, Default, Debug)]
    /// struct User {
    ///     #[model(base)]
    ///     entity: Entity,
    ///     name: String,
    ///     email: String,
    /// }
    ///
    /// let cache = ModelCache::new();
    /// let own = cache.own_attributes(User::model_info());
    /// assert_eq!(own.len(), 2);
    /// assert!(own.contains(&"name") && own.contains(&"email"));
    /// ```
    pub fn own_attributes(&self, info: &'static ModelInfo) -> Attributes {
        let type_id = info.type_id();
        if let Some(cached) = Self::lookup(&self.own, type_id) {
            return cached;
        }

        let names: Attributes = info.property_names().collect();
        trace!(
            "own attributes of `{}` cached: {names:?}",
            info.type_path()
        );
        Self::fill(&self.own, type_id, names)
    }
}

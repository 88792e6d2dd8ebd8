use alloc::vec::Vec;

use log::trace;

use crate::cache::{Attributes, ModelCache};
use crate::info::ModelInfo;

impl ModelCache {
    /// Returns the properties of the model and of all its bases.
    ///
    /// The own properties of the model come first, then those of its immediate
    /// base, and so on up the chain. Names are not deduplicated.
    ///
    /// Returns `None` when the whole chain declares no property. That outcome is
    /// cached as well, so the walk happens once per model type.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_hydrate::{derive::Model, info::Typed, ModelCache};
    ///
    /// #[derive(Model, Default, Debug)]
    /// struct Animal { name: String }
    ///
    /// #[derive(Model, Default, Debug)]
    /// struct Dog {
    ///     #[model(base)]
    ///     animal: Animal,
    ///     breed: String,
    /// }
    ///
    /// #[derive(Model, Default, Debug)]
    /// struct Marker;
    ///
    /// let cache = ModelCache::new();
    /// let all = cache.all_attributes(Dog::model_info()).unwrap();
    /// assert_eq!(&*all, ["breed", "name"]);
    ///
    /// assert!(cache.all_attributes(Marker::model_info()).is_none());
    /// ```
    pub fn all_attributes(&self, info: &'static ModelInfo) -> Option<Attributes> {
        let type_id = info.type_id();
        if let Some(cached) = Self::lookup(&self.all, type_id) {
            return cached;
        }

        let mut names = Vec::new();
        for level in info.lineage() {
            names.extend(self.own_attributes(level).iter().copied());
        }

        let names = (!names.is_empty()).then(|| Attributes::from(names));
        trace!(
            "all attributes of `{}` cached: {names:?}",
            info.type_path()
        );
        Self::fill(&self.all, type_id, names)
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use crate::ModelCache;
    use crate::derive::Model;
    use crate::info::Typed;

    #[derive(Model, Default, Debug)]
    struct Root {
        id: u64,
    }

    #[derive(Model, Default, Debug)]
    struct Middle {
        #[model(base)]
        root: Root,
    }

    #[derive(Model, Default, Debug)]
    struct Leaf {
        #[model(base)]
        middle: Middle,
        id: u64,
        label: String,
    }

    #[derive(Model, Default, Debug)]
    struct Hollow {
        #[model(base)]
        inner: Empty,
    }

    #[derive(Model, Default, Debug)]
    struct Empty {}

    #[test]
    fn derived_first_then_bases() {
        let cache = ModelCache::new();
        let all = cache.all_attributes(Leaf::model_info()).unwrap();
        // A name redeclared by a base appears twice.
        assert_eq!(&*all, ["id", "label", "id"]);
    }

    #[test]
    fn base_without_properties_is_skipped() {
        let cache = ModelCache::new();
        let all = cache.all_attributes(Middle::model_info()).unwrap();
        assert_eq!(&*all, ["id"]);
    }

    #[test]
    fn absent_when_chain_is_empty() {
        let cache = ModelCache::new();
        assert!(cache.all_attributes(Hollow::model_info()).is_none());
        assert!(cache.all_attributes(Hollow::model_info()).is_none());
        assert_eq!(cache.all_len(), 1);
    }

    #[test]
    fn cached_once() {
        let cache = ModelCache::new();
        let first = cache.all_attributes(Leaf::model_info()).unwrap();
        let second = cache.all_attributes(Leaf::model_info()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        // Every level of the chain has its own attributes cached.
        assert_eq!(cache.own_len(), 3);
    }
}

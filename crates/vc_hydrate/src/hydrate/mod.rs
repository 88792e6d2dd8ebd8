//! Populate model instances from a raw key-value tree.
//!
//! The [`Hydrator`] combines the [`ModelRegistry`](crate::registry::ModelRegistry),
//! which knows how to construct a model and whether it declares custom
//! attributes, with the [`ModelCache`](crate::ModelCache), which remembers the
//! attribute lists of every model it has seen.
//!
//! Hydration never panics and never aborts half way: a property that cannot be
//! assigned keeps its default value. Only the whole call can fail, with a
//! [`HydrateError`] telling why no instance could be produced.

// -----------------------------------------------------------------------------
// Modules

mod error;
mod hydrated;
mod hydrator;

// -----------------------------------------------------------------------------
// Exports

pub use error::HydrateError;
pub use hydrated::Hydrated;
pub use hydrator::Hydrator;

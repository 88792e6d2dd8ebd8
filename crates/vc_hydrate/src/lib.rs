#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::vc_hydrate::...` paths, so the crate must be able
// to name itself that way in its own unit tests and doctests.
extern crate self as vc_hydrate;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod model;

pub mod attributes;
pub mod hydrate;
pub mod info;
pub mod registry;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use cache::{Attributes, ModelCache};
pub use hydrate::{HydrateError, Hydrated, Hydrator};
pub use model::{AssignError, FromPropertyValue, Model, PropertyValue};
pub use value::{RawKind, RawMap, RawValue};
pub use vc_hydrate_derive as derive;

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use proc_macro2::Span;
use toml_edit::{Document, Item, Table};

/// Locate an accessible [`syn::Path`] for a crate of the model workspace, as
/// seen from the caller's `Cargo.toml`.
///
/// This helper is intended for proc-macro code generation where the emitted
/// path must be valid from the invoking crate.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_hydrate"));
/// ```
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the requested crate name begins with `vc_` and the caller depends on
///    the facade crate `vc_model`, return `::vc_model::short_name`
///    (e.g. `vc_hydrate` -> `::vc_model::hydrate`).
/// 3. Repeat step 1-2 in `dev-dependencies`.
/// 4. Otherwise, fall back to the absolute path `::crate_name`.
///
/// A manifest that cannot be found, read or parsed resolves everything
/// through the fallback.
///
/// ## Note
/// A crate that uses its own derive should add `extern crate self as crate_name;`
/// to its root, so that the fallback path also resolves inside the crate.
#[derive(Debug)]
pub struct Manifest {
    manifest: Option<Document<Box<str>>>,
    modified_time: Option<SystemTime>,
}

const FACADE_NAME: &str = "vc_model";
const PREFIX: &str = "vc_";

impl Manifest {
    fn manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        Some(path)
    }

    fn modified_time(path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .ok()
    }

    /// Parse a manifest from its text.
    pub fn parse(text: &str) -> Self {
        Self {
            manifest: Document::parse(Box::from(text)).ok(),
            modified_time: None,
        }
    }

    fn read(path: &Path, modified_time: Option<SystemTime>) -> Self {
        let manifest = std::fs::read_to_string(path)
            .ok()
            .and_then(|text| Document::parse(text.into_boxed_str()).ok());
        Self {
            manifest,
            modified_time,
        }
    }

    fn absolute_path(segments: &[&str]) -> syn::Path {
        let mut path = syn::Path {
            leading_colon: Some(Default::default()),
            segments: Default::default(),
        };
        for segment in segments {
            path.segments
                .push(syn::Ident::new(segment, Span::call_site()).into());
        }
        path
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute_path(&[name]));
        }
        let module = name.strip_prefix(PREFIX)?;
        deps.contains_key(FACADE_NAME)
            .then(|| Self::absolute_path(&[FACADE_NAME, module]))
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from this
    /// crate's Cargo.toml. See the top-level documentation for the resolution order.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        if let Some(manifest) = &self.manifest {
            for table in ["dependencies", "dev-dependencies"] {
                if let Some(Item::Table(deps)) = manifest.get(table)
                    && let Some(path) = Self::find_in_deps(deps, name)
                {
                    return path;
                }
            }
        }
        Self::absolute_path(&[name])
    }

    /// Obtain the [Manifest] of the caller's Cargo.toml.
    ///
    /// The manifest is read once and cached until the file is modified. Callers
    /// should still invoke it once per macro invocation and pass the result around.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let Some(manifest_path) = Self::manifest_path() else {
            return func(&Self::parse(""));
        };
        let modified_time = Self::modified_time(&manifest_path);

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time.is_some()
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Self::read(&manifest_path, modified_time);
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

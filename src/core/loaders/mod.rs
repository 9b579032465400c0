//! Storage loaders for translation files.
//!
//! Each loader owns one on-disk format and knows how to read it into a
//! [`Translations`] map, write a map back, and remove a single key.
//!
//! - [`JsonLoader`]: flat `lang/<locale>.json` files
//! - [`PhpArrayLoader`]: grouped `lang/<locale>/<group>.php` files
//!
//! Loaders are a closed set dispatched through [`Loader`]; configuration picks
//! which ones are active and in which order.

mod json;
pub mod nested;
mod php_array;

use std::path::Path;

use enum_dispatch::enum_dispatch;

use crate::core::data::Translations;

pub use json::JsonLoader;
pub use php_array::PhpArrayLoader;

/// Read/write access to one translation file format.
#[enum_dispatch]
pub trait StorageLoader {
    /// Whether this loader owns `file`. Looks at the name only.
    fn can_handle(&self, file: &Path) -> bool;

    /// Load a file. Missing, unreadable or malformed files load as empty.
    fn load(&self, file: &Path) -> Translations;

    /// Overwrite `file` with `translations`. Returns `false` if the write fails.
    fn save(&self, file: &Path, translations: &Translations) -> bool;

    /// Remove `key` from `file`, deleting the file once nothing is left.
    ///
    /// `group` is the file's group name; a `group.` prefix on `key` is ignored.
    /// Returns `true` only if something was removed.
    fn remove(&self, file: &Path, key: &str, group: Option<&str>) -> bool;
}

#[enum_dispatch(StorageLoader)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loader {
    Json(JsonLoader),
    PhpArray(PhpArrayLoader),
}

impl Loader {
    /// Built-in loaders, in lookup order.
    pub fn defaults() -> Vec<Loader> {
        vec![JsonLoader.into(), PhpArrayLoader.into()]
    }

    /// Look up a loader by its configuration name.
    pub fn from_name(name: &str) -> Option<Loader> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" | "flat" => Some(JsonLoader.into()),
            "php" | "php_array" | "nested" => Some(PhpArrayLoader.into()),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Loader::Json(_) => "json",
            Loader::PhpArray(_) => "php",
        }
    }
}

/// Extension check shared by the loaders.
fn has_extension(file: &Path, extension: &str) -> bool {
    file.extension().and_then(|e| e.to_str()) == Some(extension)
}

/// Write `translations`, or delete the file when nothing is left in it.
fn write_or_delete(
    loader: &impl StorageLoader,
    file: &Path,
    translations: &Translations,
) -> bool {
    if !translations.is_empty() {
        return loader.save(file, translations);
    }
    match std::fs::remove_file(file) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("Failed to delete {}: {}", file.display(), e);
            false
        }
    }
}

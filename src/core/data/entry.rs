use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A translation key as it appears in source code.
///
/// Flat catalogs (`lang/en.json`) use the stored key verbatim. Grouped catalogs
/// (`lang/en/messages.php`) prefix the dot-path inside the file with the file's
/// group name: `messages.nested.child`.
pub type TranslationKey = String;

/// Key/value content of a single storage file, in file order.
pub type Translations = serde_json::Map<String, Value>;

/// Keys referenced anywhere in the scanned source tree.
pub type UsedKeySet = HashSet<TranslationKey>;

/// Locale → entry for a single translation key.
pub type LocaleEntries = BTreeMap<String, LocaleEntry>;

/// Full inventory of defined keys: key → locale → entry.
///
/// Rebuilt from disk on every scan; sorted so reports are stable.
pub type Catalog = BTreeMap<TranslationKey, LocaleEntries>;

/// Where one (key, locale) pair lives on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleEntry {
    /// Storage file holding the key.
    ///
    /// Always set for entries built from a catalog scan. Deserialization is
    /// lenient so a hand-built catalog handed to `prune` with a missing or
    /// malformed path still loads; pruning skips such entries.
    #[serde(default, deserialize_with = "lenient_path")]
    pub file: Option<PathBuf>,
    /// File base name for grouped catalogs, `None` for flat ones.
    #[serde(default)]
    pub group: Option<String>,
    /// Dot-path inside a grouped file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_path: Option<String>,
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub value: Value,
}

impl LocaleEntry {
    /// Entry of a flat `<locale>.json` catalog.
    pub fn flat(file: impl Into<PathBuf>, locale: impl Into<String>, value: Value) -> Self {
        Self {
            file: Some(file.into()),
            group: None,
            key_path: None,
            locale: locale.into(),
            value,
        }
    }

    /// Entry of a grouped `<locale>/<group>.php` catalog.
    pub fn grouped(
        file: impl Into<PathBuf>,
        locale: impl Into<String>,
        group: impl Into<String>,
        key_path: impl Into<String>,
        value: Value,
    ) -> Self {
        Self {
            file: Some(file.into()),
            group: Some(group.into()),
            key_path: Some(key_path.into()),
            locale: locale.into(),
            value,
        }
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Group name, treating an empty string like no group.
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref().filter(|g| !g.is_empty())
    }
}

/// Accepts any JSON value and keeps it only when it is a non-empty string.
fn lenient_path<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(PathBuf::from(s)),
        _ => None,
    })
}

/// Total number of (key, locale) pairs.
pub fn count_entries(keys: &Catalog) -> usize {
    keys.values().map(|locales| locales.len()).sum()
}

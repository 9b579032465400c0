//! Catalog inventory: every defined key across every locale.
//!
//! Layout under the lang directory:
//!
//! ```text
//! lang/
//!   en.json            flat keys for `en`
//!   fr.json
//!   en/
//!     messages.php     grouped keys `messages.*` for `en`
//!     auth.php
//! ```

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern, glob_with};

use crate::core::{
    data::{Catalog, LocaleEntry},
    loaders::{Loader, StorageLoader, nested},
};

/// Hidden files and directories are not part of the catalog.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

#[derive(Debug, Clone)]
pub struct TranslationRepository {
    lang_path: PathBuf,
    loaders: Vec<Loader>,
}

impl TranslationRepository {
    /// An empty `loaders` list falls back to [`Loader::defaults`].
    pub fn new(lang_path: impl Into<PathBuf>, loaders: Vec<Loader>) -> Self {
        let loaders = if loaders.is_empty() {
            Loader::defaults()
        } else {
            loaders
        };
        Self {
            lang_path: lang_path.into(),
            loaders,
        }
    }

    pub fn lang_path(&self) -> &Path {
        &self.lang_path
    }

    pub fn loaders(&self) -> &[Loader] {
        &self.loaders
    }

    /// First configured loader that claims `file`.
    pub fn loader_for(&self, file: &Path) -> Option<Loader> {
        self.loaders.iter().copied().find(|l| l.can_handle(file))
    }

    /// Load the whole catalog. A missing lang directory yields an empty one.
    pub fn all(&self) -> Catalog {
        let mut catalog = Catalog::new();

        if !self.lang_path.is_dir() {
            tracing::debug!(
                "Lang directory does not exist: {}",
                self.lang_path.display()
            );
            return catalog;
        }

        for file in list(&self.lang_path, "*.json") {
            self.hydrate_flat(&mut catalog, &file);
        }

        for dir in list(&self.lang_path, "*")
            .into_iter()
            .filter(|p| p.is_dir())
        {
            self.hydrate_grouped(&mut catalog, &dir);
        }

        catalog
    }

    fn hydrate_flat(&self, catalog: &mut Catalog, file: &Path) {
        let Some(loader) = self.loader_for(file) else {
            return;
        };
        let Some(locale) = stem(file) else {
            return;
        };

        for (key, value) in loader.load(file) {
            catalog
                .entry(key)
                .or_default()
                .insert(locale.clone(), LocaleEntry::flat(file, &locale, value));
        }
    }

    fn hydrate_grouped(&self, catalog: &mut Catalog, locale_dir: &Path) {
        let Some(locale) = locale_dir.file_name().and_then(|n| n.to_str()) else {
            return;
        };

        for file in list(locale_dir, "*.php") {
            if !file.is_file() {
                continue;
            }
            let Some(loader) = self.loader_for(&file) else {
                continue;
            };
            let Some(group) = stem(&file) else {
                continue;
            };

            for (key_path, value) in nested::flatten(&loader.load(&file)) {
                let entry = LocaleEntry::grouped(&file, locale, &group, &key_path, value);
                catalog
                    .entry(format!("{}.{}", group, key_path))
                    .or_default()
                    .insert(locale.to_string(), entry);
            }
        }
    }
}

/// Entries of `dir` matching `pattern`, sorted by name.
fn list(dir: &Path, pattern: &str) -> Vec<PathBuf> {
    let full = format!(
        "{}/{}",
        Pattern::escape(&dir.to_string_lossy()),
        pattern
    );
    match glob_with(&full, MATCH_OPTIONS) {
        Ok(paths) => paths
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::debug!("Cannot access path: {}", e);
                    None
                }
            })
            .collect(),
        Err(e) => {
            tracing::debug!("Invalid glob pattern '{}': {}", full, e);
            Vec::new()
        }
    }
}

fn stem(file: &Path) -> Option<String> {
    file.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}

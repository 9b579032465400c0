use std::{fs, path::Path};

use anyhow::{Context, Result};

use super::{StorageLoader, has_extension, nested, write_or_delete};
use crate::core::{
    data::Translations,
    parsers::php::{format_php_file, parse_php_array},
};

/// Loader for grouped `<locale>/<group>.php` catalogs.
///
/// Keys are dot-paths into the nested array the file returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhpArrayLoader;

impl PhpArrayLoader {
    fn read(file: &Path) -> Result<Translations> {
        let content = fs::read_to_string(file)
            .with_context(|| format!("Failed to read PHP file: {}", file.display()))?;
        parse_php_array(&content)
            .with_context(|| format!("Failed to parse PHP file: {}", file.display()))
    }
}

impl StorageLoader for PhpArrayLoader {
    fn can_handle(&self, file: &Path) -> bool {
        has_extension(file, "php")
    }

    fn load(&self, file: &Path) -> Translations {
        if !file.exists() {
            return Translations::new();
        }
        Self::read(file).unwrap_or_else(|e| {
            tracing::debug!("{:#}", e);
            Translations::new()
        })
    }

    fn save(&self, file: &Path, translations: &Translations) -> bool {
        match fs::write(file, format_php_file(translations)) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("Failed to write file {}: {}", file.display(), e);
                false
            }
        }
    }

    fn remove(&self, file: &Path, key: &str, group: Option<&str>) -> bool {
        let translations = self.load(file);

        let target = group
            .and_then(|g| key.strip_prefix(g))
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(key);

        let Some(remaining) = nested::without_path(&translations, target) else {
            return false;
        };
        write_or_delete(self, file, &remaining)
    }
}

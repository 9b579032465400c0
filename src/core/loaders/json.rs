use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, ser::PrettyFormatter};

use super::{StorageLoader, has_extension, write_or_delete};
use crate::core::data::Translations;

/// Loader for flat `<locale>.json` catalogs.
///
/// Keys are stored verbatim at the top level (`{"Welcome": "Bienvenue"}`), so
/// removal never interprets dots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonLoader;

impl JsonLoader {
    fn read(file: &Path) -> Result<Translations> {
        let content = fs::read_to_string(file)
            .with_context(|| format!("Failed to read JSON file: {}", file.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON file: {}", file.display()))?;
        match value {
            Value::Object(map) => Ok(map),
            _ => anyhow::bail!("{} does not contain a JSON object", file.display()),
        }
    }

    fn write(file: &Path, translations: &Translations) -> Result<()> {
        let mut content = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut content, PrettyFormatter::with_indent(b"    "));
        translations
            .serialize(&mut serializer)
            .context("Failed to serialize JSON")?;
        content.push(b'\n');

        fs::write(file, content)
            .with_context(|| format!("Failed to write file: {}", file.display()))
    }
}

impl StorageLoader for JsonLoader {
    fn can_handle(&self, file: &Path) -> bool {
        has_extension(file, "json")
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
        match Self::write(file, translations) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("{:#}", e);
                false
            }
        }
    }

    fn remove(&self, file: &Path, key: &str, _group: Option<&str>) -> bool {
        let mut translations = self.load(file);
        if translations.shift_remove(key).is_none() {
            return false;
        }
        write_or_delete(self, file, &translations)
    }
}

use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

use super::{SourceScanner, collect_captures, extension};
use crate::core::data::TranslationKey;

const EXTENSIONS: &[&str] = &["vue", "js", "ts", "jsx", "tsx"];

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"trans\(['"]([^'"]+)['"]"#,
        r#"\$t\(['"]([^'"]+)['"]"#,
        r#"i18n\.t\(['"]([^'"]+)['"]"#,
        r#"v-t=['"]([^'"]+)['"]"#,
        r#"\.t\(['"]([^'"]+)['"]"#,
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// vue-i18n and laravel-vue-i18n usage: `$t()`, `trans()`, `i18n.t()`, `v-t`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VueScanner;

impl SourceScanner for VueScanner {
    fn can_handle(&self, file_name: &str) -> bool {
        extension(file_name).is_some_and(|ext| EXTENSIONS.contains(&ext))
    }

    fn scan(&self, content: &str) -> HashSet<TranslationKey> {
        collect_captures(&PATTERNS, content)
    }
}

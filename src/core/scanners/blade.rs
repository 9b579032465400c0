use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

use super::{SourceScanner, collect_captures};
use crate::core::data::TranslationKey;

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"@lang\(['"]([^'"]+)['"]\)"#,
        r#"@choice\(['"]([^'"]+)['"]"#,
        r#"\{\{\s*__\(['"]([^'"]+)['"]"#,
        r#"\{\{\s*trans\(['"]([^'"]+)['"]"#,
        r#"__\(['"]([^'"]+)['"]\)"#,
        r#"trans\(['"]([^'"]+)['"]"#,
        r#"trans_choice\(['"]([^'"]+)['"]"#,
        r#"Lang::get\(['"]([^'"]+)['"]"#,
        r#"Lang::choice\(['"]([^'"]+)['"]"#,
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Blade templates: directives (`@lang`, `@choice`), echoes and helper calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BladeScanner;

impl SourceScanner for BladeScanner {
    fn can_handle(&self, file_name: &str) -> bool {
        file_name.ends_with(".blade.php")
    }

    fn scan(&self, content: &str) -> HashSet<TranslationKey> {
        collect_captures(&PATTERNS, content)
    }
}

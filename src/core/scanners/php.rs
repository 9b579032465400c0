use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

use super::{SourceScanner, collect_captures, extension};
use crate::core::data::TranslationKey;

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"__\(['"]([^'"]+)['"]"#,
        r#"trans\(['"]([^'"]+)['"]"#,
        r#"Lang::get\(['"]([^'"]+)['"]"#,
        r#"trans_choice\(['"]([^'"]+)['"]"#,
        r#"Lang::choice\(['"]([^'"]+)['"]"#,
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Plain PHP: `__()`, `trans()`, `trans_choice()`, `Lang::get()`, `Lang::choice()`.
///
/// Blade templates share the `.php` extension but belong to [`super::BladeScanner`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhpScanner;

impl SourceScanner for PhpScanner {
    fn can_handle(&self, file_name: &str) -> bool {
        extension(file_name) == Some("php") && !file_name.ends_with(".blade.php")
    }

    fn scan(&self, content: &str) -> HashSet<TranslationKey> {
        collect_captures(&PATTERNS, content)
    }
}

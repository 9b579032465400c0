use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

use super::{SourceScanner, collect_captures, extension};
use crate::core::data::TranslationKey;

const EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"(?i)\bt\(\s*['"]([^'"]+)['"]"#,
        r#"i18n\.t\(\s*['"]([^'"]+)['"]"#,
        r#"<Trans[^>]+i18nKey=['"]([^'"]+)['"]"#,
        r#"<FormattedMessage[^>]+id=['"]([^'"]+)['"]"#,
        r"t\(\s*`([^`]+)`",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// react-i18next and react-intl usage: `t()`, `<Trans i18nKey>`,
/// `<FormattedMessage id>` and template-literal `` t(`key`) ``.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReactScanner;

impl SourceScanner for ReactScanner {
    fn can_handle(&self, file_name: &str) -> bool {
        extension(file_name).is_some_and(|ext| EXTENSIONS.contains(&ext))
    }

    fn scan(&self, content: &str) -> HashSet<TranslationKey> {
        collect_captures(&PATTERNS, content)
    }
}

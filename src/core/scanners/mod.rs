//! Source scanners that find translation keys referenced in code.
//!
//! Every scanner is a filename predicate plus a set of regular expressions
//! run over the file content. Matching is textual: a key is only found when
//! it appears as a quoted literal, so `__('messages.' . $name)` is invisible.
//!
//! - [`PhpScanner`]: `*.php` (not Blade templates)
//! - [`BladeScanner`]: `*.blade.php`
//! - [`VueScanner`]: `*.vue`, `*.js`, `*.ts`, `*.jsx`, `*.tsx`
//! - [`ReactScanner`]: `*.js`, `*.ts`, `*.jsx`, `*.tsx`
//!
//! A file is handed to every scanner that claims it and the results are
//! unioned.

mod blade;
mod php;
mod react;
mod vue;

use std::{collections::HashSet, path::Path};

use enum_dispatch::enum_dispatch;
use regex::Regex;

use crate::core::data::TranslationKey;

pub use blade::BladeScanner;
pub use php::PhpScanner;
pub use react::ReactScanner;
pub use vue::VueScanner;

#[enum_dispatch]
pub trait SourceScanner {
    /// Whether this scanner understands files named `file_name`.
    fn can_handle(&self, file_name: &str) -> bool;

    /// Keys referenced in `content`.
    fn scan(&self, content: &str) -> HashSet<TranslationKey>;
}

#[enum_dispatch(SourceScanner)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scanner {
    Php(PhpScanner),
    Blade(BladeScanner),
    Vue(VueScanner),
    React(ReactScanner),
}

impl Scanner {
    /// Built-in scanners.
    pub fn defaults() -> Vec<Scanner> {
        vec![
            PhpScanner.into(),
            BladeScanner.into(),
            VueScanner.into(),
            ReactScanner.into(),
        ]
    }

    /// Look up a scanner by its configuration name.
    pub fn from_name(name: &str) -> Option<Scanner> {
        match name.trim().to_ascii_lowercase().as_str() {
            "php" => Some(PhpScanner.into()),
            "blade" => Some(BladeScanner.into()),
            "vue" => Some(VueScanner.into()),
            "react" => Some(ReactScanner.into()),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scanner::Php(_) => "php",
            Scanner::Blade(_) => "blade",
            Scanner::Vue(_) => "vue",
            Scanner::React(_) => "react",
        }
    }
}

/// First capture group of every match of every pattern.
fn collect_captures(patterns: &[Regex], content: &str) -> HashSet<TranslationKey> {
    patterns
        .iter()
        .flat_map(|pattern| pattern.captures_iter(content))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

fn extension(file_name: &str) -> Option<&str> {
    Path::new(file_name).extension().and_then(|e| e.to_str())
}

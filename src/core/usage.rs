//! Source tree walk that collects every referenced translation key.

use std::{
    collections::{BTreeSet, HashSet},
    fs,
    path::{Path, PathBuf},
};

use glob::Pattern;
use rayon::prelude::*;
use walkdir::{DirEntry, WalkDir};

use crate::core::{
    data::UsedKeySet,
    scanners::{Scanner, SourceScanner},
};

pub const DEFAULT_IGNORE: &[&str] = &["vendor", "node_modules", "storage", "bootstrap/cache"];

pub const DEFAULT_FILE_PATTERNS: &[&str] = &[
    "*.php",
    "*.blade.php",
    "*.vue",
    "*.js",
    "*.ts",
    "*.jsx",
    "*.tsx",
];

#[derive(Debug, Clone)]
pub struct UsageScanner {
    scanners: Vec<Scanner>,
    ignore: Vec<String>,
    file_patterns: Vec<Pattern>,
}

impl UsageScanner {
    /// `ignore` holds directory names (`vendor`) or slash-separated directory
    /// paths (`bootstrap/cache`). `file_patterns` are file name globs; invalid
    /// ones are dropped. An empty scanner list falls back to the defaults.
    pub fn new(scanners: Vec<Scanner>, ignore: Vec<String>, file_patterns: &[String]) -> Self {
        let scanners = if scanners.is_empty() {
            Scanner::defaults()
        } else {
            scanners
        };
        let ignore = ignore
            .iter()
            .map(|dir| dir.trim_matches('/').to_string())
            .filter(|dir| !dir.is_empty())
            .collect();
        let file_patterns = file_patterns
            .iter()
            .filter_map(|p| match Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::debug!("Invalid file pattern '{}': {}", p, e);
                    None
                }
            })
            .collect();

        Self {
            scanners,
            ignore,
            file_patterns,
        }
    }

    /// Scanner with the built-in scanners, ignore list and file patterns.
    pub fn with_defaults() -> Self {
        Self::new(
            Scanner::defaults(),
            DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
            &DEFAULT_FILE_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>(),
        )
    }

    /// Keys referenced in any matching file below `paths`.
    ///
    /// Paths that are not existing directories are dropped. Unreadable
    /// directories and files are skipped.
    pub fn scan(&self, paths: &[PathBuf]) -> UsedKeySet {
        let roots = existing_dirs(paths);
        if roots.is_empty() {
            return UsedKeySet::new();
        }

        let files = self.collect_files(&roots);
        tracing::debug!("Scanning {} source files", files.len());

        files
            .par_iter()
            .map(|file| self.scan_file(file))
            .reduce(UsedKeySet::new, |mut acc, keys| {
                acc.extend(keys);
                acc
            })
    }

    fn collect_files(&self, roots: &[PathBuf]) -> BTreeSet<PathBuf> {
        let mut files = BTreeSet::new();

        for root in roots {
            let walker = WalkDir::new(root)
                .into_iter()
                .filter_entry(|entry| entry.depth() == 0 || !self.is_excluded(root, entry));

            for entry in walker {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        tracing::debug!("Cannot access path: {}", e);
                        continue;
                    }
                };
                let path = entry.path();
                if path.is_file() && self.matches_file_pattern(&entry) {
                    files.insert(path.to_path_buf());
                }
            }
        }

        files
    }

    fn is_excluded(&self, root: &Path, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') {
            return true;
        }
        if !entry.file_type().is_dir() {
            return false;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        self.ignore.iter().any(|ignored| {
            if ignored.contains('/') {
                relative == *ignored || relative.ends_with(&format!("/{}", ignored))
            } else {
                name == ignored.as_str()
            }
        })
    }

    fn matches_file_pattern(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        self.file_patterns.iter().any(|p| p.matches(&name))
    }

    fn scan_file(&self, file: &Path) -> HashSet<String> {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let scanners: Vec<&Scanner> = self
            .scanners
            .iter()
            .filter(|s| s.can_handle(&name))
            .collect();
        if scanners.is_empty() {
            tracing::trace!("No scanner for {}", file.display());
            return HashSet::new();
        }

        let bytes = match fs::read(file) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!("Failed to read {}: {}", file.display(), e);
                return HashSet::new();
            }
        };
        let content = String::from_utf8_lossy(&bytes);

        tracing::trace!(
            "Scanning {} with [{}]",
            file.display(),
            scanners
                .iter()
                .map(|s| s.name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        scanners
            .into_iter()
            .flat_map(|scanner| scanner.scan(&content))
            .collect()
    }
}

impl Default for UsageScanner {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Existing directories among `paths`, first occurrence wins.
fn existing_dirs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    paths
        .iter()
        .filter(|p| p.is_dir())
        .filter(|p| seen.insert(p.to_path_buf()))
        .cloned()
        .collect()
}

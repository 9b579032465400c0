//! Reconciliation of defined keys against referenced keys.
//!
//! [`Pruner::scan`] diffs the catalog against the keys found in source and
//! [`Pruner::prune`] deletes what the scan reported.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::{
    data::{Catalog, UsedKeySet, count_entries},
    loaders::StorageLoader,
    repository::TranslationRepository,
    usage::UsageScanner,
    utils::{ExclusionPattern, matches_any},
};

pub const DEFAULT_EXCLUDE: &[&str] = &[
    "validation.*",
    "auth.*",
    "pagination.*",
    "passwords.*",
    "filament.*",
    "nova.*",
];

/// Result of [`Pruner::scan`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Number of distinct keys in the catalog.
    pub total: usize,
    /// Catalog keys referenced in source.
    pub used: usize,
    /// Keys in `unused_keys`.
    pub unused: usize,
    /// Unreferenced, unprotected keys with their per-locale entries.
    pub unused_keys: Catalog,
}

impl ScanReport {
    /// Number of (key, locale) pairs a real prune would try to remove.
    pub fn unused_entries(&self) -> usize {
        count_entries(&self.unused_keys)
    }
}

#[derive(Debug, Clone)]
pub struct Pruner {
    repository: TranslationRepository,
    usage: UsageScanner,
    exclude: Vec<ExclusionPattern>,
    paths: Vec<PathBuf>,
    project_root: PathBuf,
}

impl Pruner {
    /// `paths` are the configured source directories; `project_root` provides
    /// the `app` + `resources` fallback when neither explicit nor configured
    /// paths exist.
    pub fn new(
        repository: TranslationRepository,
        usage: UsageScanner,
        exclude: Vec<ExclusionPattern>,
        paths: Vec<PathBuf>,
        project_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            repository,
            usage,
            exclude,
            paths,
            project_root: project_root.into(),
        }
    }

    pub fn repository(&self) -> &TranslationRepository {
        &self.repository
    }

    /// Source directories a scan with `explicit` paths would walk.
    ///
    /// Each tier is used only if the previous one has no existing directory:
    /// explicit paths, configured paths, then `<root>/app` and `<root>/resources`.
    pub fn resolve_paths(&self, explicit: &[PathBuf]) -> Vec<PathBuf> {
        let fallback = [
            self.project_root.join("app"),
            self.project_root.join("resources"),
        ];

        [explicit, self.paths.as_slice(), fallback.as_slice()]
            .into_iter()
            .map(existing_dirs)
            .find(|dirs| !dirs.is_empty())
            .unwrap_or_default()
    }

    pub fn scan(&self, paths: &[PathBuf]) -> ScanReport {
        let catalog = self.repository.all();

        let roots = self.resolve_paths(paths);
        tracing::debug!(
            "Scanning source paths: {}",
            roots
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        let used_keys = self.usage.scan(&roots);

        self.reconcile(catalog, &used_keys)
    }

    /// Split `catalog` into used and unused keys, dropping protected ones.
    pub fn reconcile(&self, catalog: Catalog, used_keys: &UsedKeySet) -> ScanReport {
        let total = catalog.len();
        let used = catalog.keys().filter(|k| used_keys.contains(*k)).count();

        let unused_keys: Catalog = catalog
            .into_iter()
            .filter(|(key, _)| !used_keys.contains(key))
            .filter(|(key, _)| {
                let protected = matches_any(&self.exclude, key);
                if protected {
                    tracing::trace!("Protected key: {}", key);
                }
                !protected
            })
            .collect();

        ScanReport {
            total,
            used,
            unused: unused_keys.len(),
            unused_keys,
        }
    }

    /// Remove every (key, locale) entry of `unused_keys` from storage.
    ///
    /// With `dry_run` nothing is touched and the entry count is returned.
    /// Otherwise returns how many entries were actually removed; entries
    /// without a file, without a matching loader, or already gone count 0.
    pub fn prune(&self, unused_keys: &Catalog, dry_run: bool) -> usize {
        if dry_run {
            return count_entries(unused_keys);
        }

        let mut deleted = 0;

        for (key, locales) in unused_keys {
            for (locale, entry) in locales {
                let Some(file) = entry.file() else {
                    tracing::debug!("Skipping {} ({}): no file", key, locale);
                    continue;
                };
                let Some(loader) = self.repository.loader_for(file) else {
                    tracing::debug!("Skipping {} ({}): no loader for {}", key, locale, file.display());
                    continue;
                };

                let target = entry.key_path.as_deref().unwrap_or(key);
                if loader.remove(file, target, entry.group()) {
                    deleted += 1;
                } else {
                    tracing::debug!("Nothing removed for {} in {}", key, file.display());
                }
            }
        }

        deleted
    }
}

fn existing_dirs(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|p| p.is_dir())
        .cloned()
        .collect()
}

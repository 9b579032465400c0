use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::{
    loaders::Loader,
    pruner::{DEFAULT_EXCLUDE, Pruner},
    repository::TranslationRepository,
    scanners::Scanner,
    usage::{DEFAULT_FILE_PATTERNS, DEFAULT_IGNORE, UsageScanner},
    utils::ExclusionPattern,
};

pub const CONFIG_FILE_NAME: &str = ".langprunerc.json";

/// Source directories written by `init`.
const STARTER_PATHS: &[&str] = &["app", "resources/views", "resources/js"];

/// Contents of `.langprunerc.json`.
///
/// Every field is optional and read leniently: a value of the wrong type
/// counts as not configured, and non-string list items are dropped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub ignore: Option<Vec<String>>,
    #[serde(
        default,
        alias = "file_patterns",
        deserialize_with = "lenient_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_patterns: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub loaders: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub scanners: Option<Vec<String>>,
    #[serde(
        default,
        alias = "lang_path",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub lang_path: Option<String>,
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(None);
    };
    if items.is_empty() {
        return Ok(Some(Vec::new()));
    }

    let kept: Vec<String> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        })
        .collect();
    // A list with nothing usable in it is invalid, not empty.
    Ok((!kept.is_empty()).then_some(kept))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Validated configuration, ready to build a [`Pruner`].
#[derive(Debug, Clone)]
pub struct Settings {
    pub project_root: PathBuf,
    pub lang_path: PathBuf,
    pub paths: Vec<PathBuf>,
    pub exclude: Vec<ExclusionPattern>,
    pub ignore: Vec<String>,
    pub file_patterns: Vec<String>,
    pub loaders: Vec<Loader>,
    pub scanners: Vec<Scanner>,
    /// Entries dropped during resolution.
    pub warnings: Vec<String>,
}

impl Settings {
    pub fn pruner(&self) -> Pruner {
        Pruner::new(
            TranslationRepository::new(&self.lang_path, self.loaders.clone()),
            UsageScanner::new(self.scanners.clone(), self.ignore.clone(), &self.file_patterns),
            self.exclude.clone(),
            self.paths.clone(),
            &self.project_root,
        )
    }
}

impl Config {
    /// Configuration written by `langprune init`.
    pub fn starter() -> Self {
        Self {
            paths: Some(strings(STARTER_PATHS)),
            exclude: Some(strings(DEFAULT_EXCLUDE)),
            ignore: Some(strings(DEFAULT_IGNORE)),
            file_patterns: Some(strings(DEFAULT_FILE_PATTERNS)),
            loaders: Some(Loader::defaults().iter().map(|l| l.name().to_string()).collect()),
            scanners: Some(Scanner::defaults().iter().map(|s| s.name().to_string()).collect()),
            lang_path: Some("lang".to_string()),
        }
    }

    /// Fill in defaults and drop invalid entries.
    ///
    /// Relative paths are resolved against `project_root`; `cwd` is the last
    /// resort for the lang directory.
    pub fn resolve(&self, project_root: &Path, cwd: &Path) -> Settings {
        let mut warnings = Vec::new();

        let loaders = resolve_names(
            self.loaders.as_deref(),
            Loader::from_name,
            Loader::defaults,
            "loader",
            &mut warnings,
        );
        let scanners = resolve_names(
            self.scanners.as_deref(),
            Scanner::from_name,
            Scanner::defaults,
            "scanner",
            &mut warnings,
        );

        let configured: Option<Vec<ExclusionPattern>> = self.exclude.as_ref().map(|patterns| {
            patterns
                .iter()
                .filter_map(|p| match ExclusionPattern::new(p) {
                    Ok(pattern) => Some(pattern),
                    Err(e) => {
                        warnings.push(format!("Invalid exclude pattern '{}': {}", p, e));
                        None
                    }
                })
                .collect()
        });
        let exclude = match configured {
            // only an explicit `[]` turns protection off
            Some(valid) if !valid.is_empty() || self.exclude.as_ref().is_some_and(Vec::is_empty) => {
                valid
            }
            _ => DEFAULT_EXCLUDE
                .iter()
                .filter_map(|p| ExclusionPattern::new(p).ok())
                .collect(),
        };

        let ignore = match &self.ignore {
            Some(dirs) if !dirs.is_empty() => dirs.clone(),
            _ => strings(DEFAULT_IGNORE),
        };

        let valid_patterns: Vec<String> = self
            .file_patterns
            .iter()
            .flatten()
            .filter(|p| match Pattern::new(p) {
                Ok(_) => true,
                Err(e) => {
                    warnings.push(format!("Invalid file pattern '{}': {}", p, e));
                    false
                }
            })
            .cloned()
            .collect();
        let file_patterns = if valid_patterns.is_empty() {
            strings(DEFAULT_FILE_PATTERNS)
        } else {
            valid_patterns
        };

        let paths = self
            .paths
            .iter()
            .flatten()
            .map(|p| project_root.join(p))
            .collect();

        Settings {
            project_root: project_root.to_path_buf(),
            lang_path: self.resolve_lang_path(project_root, cwd),
            paths,
            exclude,
            ignore,
            file_patterns,
            loaders,
            scanners,
            warnings,
        }
    }

    fn resolve_lang_path(&self, project_root: &Path, cwd: &Path) -> PathBuf {
        if let Some(configured) = &self.lang_path {
            return project_root.join(configured);
        }
        [project_root.join("lang"), project_root.join("resources/lang")]
            .into_iter()
            .find(|p| p.is_dir())
            .unwrap_or_else(|| cwd.join("lang"))
    }
}

/// Map configured names to known variants, falling back to `defaults` when
/// nothing valid is configured.
fn resolve_names<T>(
    names: Option<&[String]>,
    lookup: impl Fn(&str) -> Option<T>,
    defaults: impl Fn() -> Vec<T>,
    kind: &str,
    warnings: &mut Vec<String>,
) -> Vec<T> {
    let resolved: Vec<T> = names
        .unwrap_or_default()
        .iter()
        .filter_map(|name| {
            let found = lookup(name);
            if found.is_none() {
                warnings.push(format!("Unknown {} '{}'", kind, name));
            }
            found
        })
        .collect();

    if resolved.is_empty() {
        defaults()
    } else {
        resolved
    }
}

pub fn default_config_json() -> Result<String> {
    serde_json::to_string_pretty(&Config::starter()).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// File the config was read from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    /// Directory holding the config file, else `fallback`.
    pub fn project_root(&self, fallback: &Path) -> PathBuf {
        self.path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| fallback.to_path_buf())
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}

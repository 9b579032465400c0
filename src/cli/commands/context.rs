use std::{env, path::PathBuf};

use anyhow::{Context as _, Result};
use colored::Colorize;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, load_config},
    core::Pruner,
};

/// Resolved configuration and engine for `scan` and `prune`.
pub struct CommandContext {
    pub cwd: PathBuf,
    pub pruner: Pruner,
    /// `--path` values, resolved against the working directory.
    pub paths: Vec<PathBuf>,
}

impl CommandContext {
    pub fn new(args: &CommonArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to read current directory")?;
        let root = args.root.as_ref().map(|r| cwd.join(r));

        let config_result = load_config(root.as_deref().unwrap_or(&cwd))?;
        match &config_result.path {
            Some(path) => tracing::debug!("Using config file {}", path.display()),
            None if args.verbose => {
                eprintln!("Note: No {} found, using default configuration", CONFIG_FILE_NAME)
            }
            None => {}
        }

        let project_root = root.unwrap_or_else(|| config_result.project_root(&cwd));
        let settings = config_result.config.resolve(&project_root, &cwd);

        if args.verbose {
            for warning in &settings.warnings {
                eprintln!("{} {}", "warning:".bold().yellow(), warning);
            }
        }

        let paths: Vec<PathBuf> = args.paths.iter().map(|p| cwd.join(p)).collect();
        if args.verbose {
            for path in paths.iter().filter(|p| !p.is_dir()) {
                eprintln!(
                    "{} Scan path does not exist: {}",
                    "warning:".bold().yellow(),
                    path.display()
                );
            }
        }

        tracing::debug!("Project root: {}", settings.project_root.display());
        tracing::debug!("Lang directory: {}", settings.lang_path.display());

        Ok(Self {
            pruner: settings.pruner(),
            cwd,
            paths,
        })
    }
}

use std::{env, fs};

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, InitSummary};
use crate::{
    cli::exit_status::ExitStatus,
    config::{CONFIG_FILE_NAME, default_config_json},
};

pub fn init() -> Result<CommandResult> {
    let path = env::current_dir()
        .context("Failed to read current directory")?
        .join(CONFIG_FILE_NAME);

    if path.exists() {
        return Ok(CommandResult {
            summary: CommandSummary::Init(InitSummary {
                created: false,
                path,
            }),
            status: ExitStatus::Failure,
        });
    }

    let mut json = default_config_json()?;
    json.push('\n');
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(CommandResult::success(CommandSummary::Init(InitSummary {
        created: true,
        path,
    })))
}

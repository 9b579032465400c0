use std::fs;

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, ScanSummary, context::CommandContext};
use crate::cli::args::ScanCommand;

pub fn scan(cmd: ScanCommand) -> Result<CommandResult> {
    let ctx = CommandContext::new(&cmd.common)?;
    let report = ctx.pruner.scan(&ctx.paths);

    let saved_to = match &cmd.save {
        Some(save) => {
            let path = ctx.cwd.join(save);
            let mut json =
                serde_json::to_string_pretty(&report).context("Failed to serialize scan report")?;
            json.push('\n');
            fs::write(&path, json)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            Some(save.clone())
        }
        None => None,
    };

    Ok(CommandResult::success(CommandSummary::Scan(ScanSummary {
        report,
        saved_to,
    })))
}

use anyhow::Result;

use super::{CommandResult, CommandSummary, PruneSummary, context::CommandContext};
use crate::cli::args::PruneCommand;

pub fn prune(cmd: PruneCommand) -> Result<CommandResult> {
    let ctx = CommandContext::new(&cmd.common)?;
    let report = ctx.pruner.scan(&ctx.paths);

    let entry_count = ctx.pruner.prune(&report.unused_keys, true);
    let deleted = if cmd.apply && entry_count > 0 {
        Some(ctx.pruner.prune(&report.unused_keys, false))
    } else {
        None
    };

    Ok(CommandResult::success(CommandSummary::Prune(PruneSummary {
        unused_keys: report.unused_keys,
        entry_count,
        deleted,
    })))
}

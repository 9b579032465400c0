use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, init::init, prune::prune, scan::scan},
    exit_status::ExitStatus,
    report,
};
use crate::logging;

/// Main entry point for the langprune CLI.
///
/// Returns the exit status of the command, or `Err` when it failed
/// (unreadable config, unwritable report file, ...).
pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    logging::init(args.verbose());

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let result = run(args)?;
    report::print(&result);

    Ok(result.status)
}

fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::Prune(cmd)) => prune(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

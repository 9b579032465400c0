pub mod context;
pub mod init;
pub mod prune;
pub mod scan;

use std::path::PathBuf;

use super::exit_status::ExitStatus;
use crate::core::{Catalog, ScanReport};

#[derive(Debug)]
pub enum CommandSummary {
    Scan(ScanSummary),
    Prune(PruneSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ScanSummary {
    pub report: ScanReport,
    /// Where `--save` wrote the report.
    pub saved_to: Option<PathBuf>,
}

#[derive(Debug)]
pub struct PruneSummary {
    pub unused_keys: Catalog,
    /// (key, locale) entries selected for removal.
    pub entry_count: usize,
    /// Entries actually removed; `None` on a dry run.
    pub deleted: Option<usize>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub path: PathBuf,
}

/// Result of running a langprune command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub status: ExitStatus,
}

impl CommandResult {
    pub fn success(summary: CommandSummary) -> Self {
        Self {
            summary,
            status: ExitStatus::Success,
        }
    }
}

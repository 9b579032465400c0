//! Report formatting and printing utilities.
//!
//! Separate from core logic to allow langprune to be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, InitSummary, PruneSummary, ScanSummary,
};
use crate::core::{Catalog, ScanReport};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

const BULLET: &str = "\u{2022}"; // •

pub fn print(result: &CommandResult) {
    match &result.summary {
        CommandSummary::Scan(summary) => print_scan_to(summary, &mut io::stdout().lock()),
        CommandSummary::Prune(summary) => print_prune_to(summary, &mut io::stdout().lock()),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_scan_to<W: Write>(summary: &ScanSummary, writer: &mut W) {
    let report = &summary.report;
    let _ = write!(writer, "{}", metrics_table(report));

    if report.unused_keys.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "No unused translations found!".green()
        );
    } else {
        let _ = writeln!(writer);
        let _ = writeln!(writer, "{}", "Unused translations:".bold());
        print_keys_to(&report.unused_keys, writer);
    }

    if let Some(path) = &summary.saved_to {
        let _ = writeln!(writer, "Results saved to: {}", path.display());
    }
}

fn print_prune_to<W: Write>(summary: &PruneSummary, writer: &mut W) {
    if summary.unused_keys.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "No unused translations to remove!".green()
        );
        return;
    }

    let _ = writeln!(
        writer,
        "Found {} unused translation {}:",
        summary.entry_count,
        if summary.entry_count == 1 { "entry" } else { "entries" }
    );
    print_keys_to(&summary.unused_keys, writer);

    match summary.deleted {
        Some(deleted) => {
            let _ = writeln!(
                writer,
                "{} {} unused translation {}.",
                "Deleted".green().bold(),
                deleted,
                if deleted == 1 { "entry" } else { "entries" }
            );
            if deleted < summary.entry_count {
                let _ = writeln!(
                    writer,
                    "{} {} {} could not be removed (use {} for details)",
                    "warning:".bold().yellow(),
                    summary.entry_count - deleted,
                    if summary.entry_count - deleted == 1 { "entry" } else { "entries" },
                    "-v".cyan()
                );
            }
        }
        None => {
            let _ = writeln!(
                writer,
                "{} {} {}.",
                "Would delete".yellow().bold(),
                summary.entry_count,
                if summary.entry_count == 1 { "entry" } else { "entries" }
            );
            let _ = writeln!(writer, "Run with {} to delete these keys.", "--apply".cyan());
        }
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", summary.path.display()).green()
        );
    } else {
        eprintln!(
            "{} {} already exists",
            FAILURE_MARK.red(),
            summary.path.display()
        );
    }
}

/// `  • key (en, fr)` for every key, in key order.
fn print_keys_to<W: Write>(keys: &Catalog, writer: &mut W) {
    for (key, locales) in keys {
        let locales = locales.keys().map(String::as_str).collect::<Vec<_>>().join(", ");
        let _ = writeln!(writer, "  {} {} {}", BULLET, key, format!("({})", locales).dimmed());
    }
}

fn metrics_table(report: &ScanReport) -> String {
    render_table(
        &["Metric", "Count"],
        &[
            ["Total translations".to_string(), report.total.to_string()],
            ["Used translations".to_string(), report.used.to_string()],
            ["Unused translations".to_string(), report.unused.to_string()],
        ],
    )
}

/// Bordered two-column table, padded by display width.
fn render_table(headers: &[&str; 2], rows: &[[String; 2]]) -> String {
    let width = |col: usize| {
        rows.iter()
            .map(|row| UnicodeWidthStr::width(row[col].as_str()))
            .chain(std::iter::once(UnicodeWidthStr::width(headers[col])))
            .max()
            .unwrap_or(0)
    };
    let widths = [width(0), width(1)];

    let border = format!(
        "+{}+{}+\n",
        "-".repeat(widths[0] + 2),
        "-".repeat(widths[1] + 2)
    );
    let line = |cells: [&str; 2]| {
        let mut out = String::from("|");
        for (cell, w) in cells.iter().zip(widths) {
            let pad = w - UnicodeWidthStr::width(*cell);
            out.push_str(&format!(" {}{} |", cell, " ".repeat(pad)));
        }
        out.push('\n');
        out
    };

    let mut table = border.clone();
    table.push_str(&line(*headers));
    table.push_str(&border);
    for row in rows {
        table.push_str(&line([row[0].as_str(), row[1].as_str()]));
    }
    table.push_str(&border);
    table
}

// ============================================================
// Tests
// ============================================================

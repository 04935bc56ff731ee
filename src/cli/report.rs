//! Report formatting and printing utilities.
//!
//! This module provides functions to display issues in cargo-style format
//! and the per-command summaries. Separate from core logic to allow tsglot
//! to be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, FmtSummary, InitSummary, LookupSummary, StatsSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::CatalogStats;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format.
///
/// Issues are sorted by location and followed by a problem count.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    // Calculate max line number width for alignment
    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} catalogue {} - no issues found",
            files,
            if files == 1 { "file" } else { "files" }
        )
        .green()
    );
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();

    // Print severity and message (cargo-style)
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Print clickable location: --> path:line:col
    if loc.line() > 0 {
        let _ = writeln!(
            writer,
            "  {} {}:{}:{}",
            "-->".blue(),
            loc.file_path(),
            loc.line(),
            loc.col()
        );
    } else {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), loc.file_path());
    }

    if let ReportLocation::Message(ctx) = &loc {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "context:".bold(),
            ctx.context_name,
            width = max_line_width
        );
    }

    // Print details if present (cargo-style note)
    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    // Print hint if present
    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .map(|i| i.location().line())
        .filter(|line| *line > 0)
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

pub fn print(result: &CommandResult) {
    let stdout = &mut io::stdout().lock();

    match &result.summary {
        CommandSummary::Check => {
            if result.issues.is_empty() {
                print_success_to(result.files_checked, stdout);
            }
        }
        CommandSummary::Stats(summary) => print_stats_to(summary, stdout),
        CommandSummary::Lookup(summary) => print_lookup_to(summary, stdout),
        CommandSummary::Fmt(summary) => print_fmt_to(summary, stdout),
        CommandSummary::Init(summary) => print_init_to(summary, stdout),
    }

    report_to(&result.issues, stdout);
}

// ============================================================
// Command Summaries
// ============================================================

const STATS_HEADERS: [&str; 6] = [
    "File",
    "Language",
    "Finished",
    "Unfinished",
    "Obsolete",
    "Complete",
];

fn print_stats_to<W: Write>(summary: &StatsSummary, writer: &mut W) {
    if summary.rows.is_empty() {
        let _ = writeln!(writer, "No catalogue files found.");
        return;
    }

    let mut rows: Vec<[String; 6]> = summary
        .rows
        .iter()
        .map(|row| {
            stats_cells(
                row.file_path.clone(),
                row.language.clone().unwrap_or_else(|| "-".to_string()),
                &row.stats,
            )
        })
        .collect();
    if summary.rows.len() > 1 {
        rows.push(stats_cells(
            "Total".to_string(),
            String::new(),
            &summary.total(),
        ));
    }

    let mut widths = STATS_HEADERS.map(UnicodeWidthStr::width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let header: Vec<String> = STATS_HEADERS.iter().map(|h| h.to_string()).collect();
    let _ = writeln!(
        writer,
        "{}",
        format_stats_line(&header, &widths).bold()
    );
    for row in &rows {
        let _ = writeln!(writer, "{}", format_stats_line(row, &widths));
    }
}

fn stats_cells(file: String, language: String, stats: &CatalogStats) -> [String; 6] {
    [
        file,
        language,
        stats.finished.to_string(),
        stats.unfinished.to_string(),
        stats.obsolete.to_string(),
        format!("{:.1}%", stats.percent_complete()),
    ]
}

/// Text columns are left-aligned, numeric ones right-aligned.
fn format_stats_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, width))| {
            let padding = " ".repeat(width.saturating_sub(UnicodeWidthStr::width(cell.as_str())));
            if i < 2 {
                format!("{}{}", cell, padding)
            } else {
                format!("{}{}", padding, cell)
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn print_lookup_to<W: Write>(summary: &LookupSummary, writer: &mut W) {
    let _ = writeln!(writer, "{}", summary.text);
}

fn print_fmt_to<W: Write>(summary: &FmtSummary, writer: &mut W) {
    if summary.changed_files.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "{} catalogue file(s) already formatted",
                summary.unchanged_count
            )
            .green()
        );
        return;
    }

    if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {} file(s):",
            "Reformatted".green().bold(),
            summary.changed_files.len()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} file(s):",
            "Would reformat".yellow().bold(),
            summary.changed_files.len()
        );
    }
    for file in &summary.changed_files {
        let _ = writeln!(writer, "  - {}", file);
    }
    if !summary.is_apply {
        let _ = writeln!(
            writer,
            "Run with {} to rewrite these files.",
            "--apply".cyan()
        );
    }
}

fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
    if let Some(error) = &summary.error {
        let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), error);
    }
}

// ============================================================
// Tests
// ============================================================

//! Report formatting and printing utilities.
//!
//! This module provides functions to display issues in cargo-style
//! format. Separate from core logic to allow proplint to be used as a
//! library without printing side effects.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::commands::clean::group_by_file;
use crate::commands::{CleanSummary, CommandSummary, InitSummary, MergeSummary, RunResult};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
///
/// This is the main entry point for reporting. Issues are sorted and
/// displayed with severity, location, source context, and details.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
///
/// Useful for testing or redirecting output.
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

/// Print a success message when no issues are found.
pub fn print_success(bundles: usize, files: usize) {
    print_success_to(bundles, files, &mut io::stdout().lock());
}

/// Print a success message to a custom writer.
pub fn print_success_to<W: Write>(bundles: usize, files: usize, writer: &mut W) {
    let msg = format!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} {} ({} {}) - no issues found",
            bundles,
            if bundles == 1 { "bundle" } else { "bundles" },
            files,
            if files == 1 { "file" } else { "files" }
        )
        .green()
    );
    let _ = writeln!(writer, "{}", msg);
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    // Print severity and message (cargo-style)
    let severity = issue.report_severity();
    let severity_str = match severity {
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
    let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);

    // Print source context if available
    if let Some(source_line) = source_line {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Caret pointing to the column (col is 1-based)
        let prefix = if col > 1 {
            source_line.chars().take(col - 1).collect::<String>()
        } else {
            String::new()
        };
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
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
            "\n{} {} problems ({} {}, {} {})",
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

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Property(ctx) => (ctx.file_path(), ctx.line(), ctx.col(), None),
        ReportLocation::Line(ctx) => {
            let source_line = if ctx.source_line.is_empty() {
                None
            } else {
                Some(ctx.source_line.as_str())
            };
            (ctx.file_path(), ctx.line(), ctx.col(), source_line)
        }
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .map(|i| {
            let loc = i.location();
            match loc {
                ReportLocation::Property(ctx) => ctx.line(),
                ReportLocation::Line(ctx) => ctx.line(),
            }
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// Command output
// ============================================================

pub fn print(result: &RunResult) {
    match &result.summary {
        CommandSummary::Check => {
            report(&result.issues);
            if result.issues.is_empty() {
                print_success(result.bundles_checked, result.files_checked);
            }
        }
        CommandSummary::Clean(summary) => print_clean(summary),
        CommandSummary::Merge(summary) => print_merge(summary),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

fn print_clean(summary: &CleanSummary) {
    if summary.orphan_issues.is_empty() {
        println!("{} {}", SUCCESS_MARK.green(), "No keys to clean.".green());
        return;
    }

    for (file_path, issues) in group_by_file(&summary.orphan_issues) {
        println!("{}:", file_path.blue());
        for issue in issues {
            println!(
                "  {} {}{}{}",
                "-".dimmed(),
                issue.context.key,
                format!(" (line {})", issue.context.line()).dimmed(),
                format!(" (\"{}\")", issue.context.value).dimmed()
            );
        }
        println!();
    }

    if summary.is_apply {
        println!(
            "{} {} orphan key(s) in {} file(s).",
            "Deleted".green().bold(),
            summary.applied_count,
            summary.file_count
        );
    } else {
        println!(
            "{} {} orphan key(s) in {} file(s).",
            "Would delete".yellow().bold(),
            summary.orphan_issues.len(),
            summary.file_count
        );
        println!("Run with {} to delete these keys.", "--apply".cyan());
    }
}

fn print_merge(summary: &MergeSummary) {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Merged {} bundle(s) for {} locale(s) into '{}' ({} {} file(s) written)",
            summary.bundles,
            summary.locales,
            summary.out_dir,
            summary.files_written,
            summary.format.extension()
        )
        .green()
    );

    if summary.unresolved_references > 0 {
        eprintln!(
            "{} {} unresolved reference(s) left as raw values (run {} for details)",
            "warning:".bold().yellow(),
            summary.unresolved_references,
            "proplint check".cyan()
        );
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

// ============================================================
// Tests
// ============================================================

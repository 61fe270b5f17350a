use anyhow::Result;
use colored::Colorize;

use crate::common::format;
use crate::organizer::pipeline::{Action, FileOutcome, RunReport, Stage};

/// Print the report for humans: one section per stage that ran, then a
/// summary line.
pub fn print_report(report: &RunReport, quiet: bool) {
    if !quiet {
        for stage in [Stage::Duplicates, Stage::ByType, Stage::ByDate] {
            print_stage(report, stage);
        }
    }

    println!();
    let verb = if report.dry_run { "Would move" } else { "Moved" };
    let moved = if report.dry_run {
        report.would_move()
    } else {
        report.moved()
    };
    println!(
        "  {} {} {}",
        "✓".green(),
        verb,
        format::format_count(moved)
    );

    if report.skipped() > 0 {
        println!(
            "  {} {} already in place",
            "·".dimmed(),
            format::format_count(report.skipped())
        );
    }

    if !report.errors.is_empty() {
        println!(
            "  {} {} error(s):",
            "✗".red(),
            report.errors.len()
        );
        for err in &report.errors {
            println!("    {} {}", "•".dimmed(), err.red());
        }
    }
    println!();
}

fn print_stage(report: &RunReport, stage: Stage) {
    let rows: Vec<&FileOutcome> = report
        .outcomes
        .iter()
        .filter(|o| o.stage == stage)
        .collect();
    if rows.is_empty() {
        return;
    }

    println!();
    println!("  {}", format!("[{}]", stage).bold());

    for outcome in rows {
        let name = outcome
            .original
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| outcome.original.display().to_string());

        match outcome.action {
            Action::Moved => {
                println!("    {} {} -> {}/", "✓".green(), name, outcome.label.cyan());
            }
            Action::WouldMove => {
                println!(
                    "    {} {} -> {}/ {}",
                    "·".dimmed(),
                    name,
                    outcome.label.cyan(),
                    "(dry run)".yellow()
                );
            }
            Action::Skipped => {
                println!("    {} {} {}", "·".dimmed(), name, "already in place".dimmed());
            }
            Action::Errored => {
                let reason = outcome.error.as_deref().unwrap_or("unknown error");
                println!("    {} {}: {}", "✗".red(), name, reason);
            }
        }
    }
}

/// Print the full report as pretty JSON.
pub fn print_report_json(report: &RunReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// One machine-friendly line: moved, would-move, skipped, errors.
pub fn print_report_quiet(report: &RunReport) {
    println!(
        "{}  {}  {}  {}",
        report.moved(),
        report.would_move(),
        report.skipped(),
        report.errored()
    );
}

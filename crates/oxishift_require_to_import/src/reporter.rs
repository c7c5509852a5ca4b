use std::io::{self, Write};

use colored::Colorize;
use log::debug;

use crate::types::{FileReport, RunResult};

pub fn print_clean_message<W: Write>(writer: &mut W) -> io::Result<()> {
    debug!("Nothing to convert");
    writeln!(writer, "{} No require() usage left to convert.", "✓".green().bold())?;
    writer.flush()?;
    Ok(())
}

/// Print per-file changes as a tree plus a summary block.
pub fn print_run_report<W: Write>(
    writer: &mut W,
    result: &RunResult,
    write: bool,
) -> io::Result<()> {
    debug!("Printing report for {} files", result.reports.len());

    writeln!(
        writer,
        "{} {} file(s) with require() usage\n",
        "⚠".yellow().bold(),
        result.reports.len().to_string().yellow()
    )?;

    for report in &result.reports {
        print_file_lines(writer, report)?;
    }

    print_summary(writer, result, write)?;

    writer.flush()?;
    Ok(())
}

fn print_file_lines<W: Write>(writer: &mut W, report: &FileReport) -> io::Result<()> {
    writeln!(writer, "{}", report.path.display().to_string().bright_white().bold())?;

    let mut lines: Vec<String> = Vec::new();
    if report.converted > 0 {
        lines.push(format!(
            "{} statement(s) converted to import",
            report.converted.to_string().green()
        ));
    }
    if report.skipped > 0 {
        lines.push(format!(
            "{} statement(s) left for manual conversion",
            report.skipped.to_string().red()
        ));
    }

    for (idx, line) in lines.iter().enumerate() {
        let is_last = idx == lines.len() - 1;
        let prefix = if is_last { "└──" } else { "├──" };
        writeln!(writer, "{}  {}", prefix.dimmed(), line)?;
    }
    writeln!(writer)?;
    Ok(())
}

fn print_summary<W: Write>(writer: &mut W, result: &RunResult, write: bool) -> io::Result<()> {
    writeln!(writer, "{}", "─".repeat(60).dimmed())?;
    writeln!(writer, "{}", "Summary".bold())?;
    writeln!(writer, "  Files scanned: {}", result.files_scanned.to_string().cyan())?;
    writeln!(writer, "  Files changed: {}", result.files_changed.to_string().yellow().bold())?;
    writeln!(
        writer,
        "  Imports added: {}",
        result.statements_converted.to_string().green().bold()
    )?;
    writeln!(
        writer,
        "  Manual conversions needed: {}",
        result.statements_skipped.to_string().red().bold()
    )?;
    if result.files_failed > 0 {
        writeln!(writer, "  Files skipped (errors): {}", result.files_failed.to_string().red())?;
    }

    if !write && result.files_changed > 0 {
        writeln!(writer, "\n  Dry run: pass {} to apply these changes.", "--write".bold())?;
    }
    Ok(())
}

//! Formatting utilities for sizes, durations and the run summary.

use super::{is_quiet, paint};
use console::Term;
use measure_core::summary::{ProjectSummary, RunSummary};
use measure_core::{ProjectConfig, ReportPaths, ScratchDir};
use owo_colors::Style;
use std::io::{self, Write};
use std::time::Duration;

/// Format file size in human-readable format.
///
/// # Examples
///
/// ```
/// use measure_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format duration in human-readable format (`50ms`, `1.50s`, `2m 30s`).
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// One decimal place, as in the summary's module list.
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

fn rule() -> String {
    let width = Term::stderr().size().1 as usize;
    "─".repeat(width.clamp(20, 60))
}

/// Print the end-of-run summary to stderr.
///
/// Every failed project is listed even with `--quiet`.
pub fn print_run_summary(summary: &RunSummary, reports: Option<&ReportPaths>, elapsed: Duration) {
    let mut stderr = io::stderr().lock();
    let _ = write_run_summary(&mut stderr, summary, reports, elapsed, is_quiet());
}

pub(crate) fn write_run_summary(
    out: &mut impl Write,
    summary: &RunSummary,
    reports: Option<&ReportPaths>,
    elapsed: Duration,
    quiet: bool,
) -> io::Result<()> {
    if quiet {
        for failed in &summary.failed {
            writeln!(out, "{}: {}", failed.name, failed.reason)?;
        }
        return Ok(());
    }

    let rule = rule();
    writeln!(out)?;
    writeln!(out, "{}", paint("Bundle Analysis Summary", Style::new().bold().underline()))?;
    writeln!(out, "{}", rule)?;

    writeln!(
        out,
        "  {} {}/{} builds succeeded in {}",
        paint("✓", Style::new().green()),
        summary.succeeded,
        summary.total(),
        format_duration(elapsed)
    )?;

    if summary.has_failures() {
        writeln!(
            out,
            "  {} {} failed",
            paint("✗", Style::new().red()),
            summary.failed.len()
        )?;
        for failed in &summary.failed {
            writeln!(
                out,
                "      - {}: {}",
                paint(&failed.name, Style::new().bold()),
                failed.reason
            )?;
        }
    }

    for project in &summary.projects {
        write_project(out, project)?;
    }

    if let Some(paths) = reports {
        writeln!(out)?;
        writeln!(out, "  Flat report:      {}", paths.flat.display())?;
        writeln!(out, "  Hierarchy report: {}", paths.tree.display())?;
    }

    writeln!(out, "{}", rule)
}

fn write_project(out: &mut impl Write, project: &ProjectSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "  {} {} {}",
        paint("▸", Style::new().blue()),
        paint(&project.name, Style::new().bright_white().bold()),
        paint(format!("({})", project.project_type), Style::new().dimmed())
    )?;
    writeln!(out, "    Total size:    {}", format_size(project.total_size))?;
    writeln!(out, "    Modules:       {}", project.module_count)?;
    writeln!(out, "    Third-party:   {}", project.third_party_count)?;
    writeln!(out, "    Project files: {}", project.project_file_count)?;

    if !project.largest.is_empty() {
        writeln!(out, "    Largest modules:")?;
        for module in &project.largest {
            writeln!(
                out,
                "      - {}: {} {}",
                module.module_name,
                format_size(module.size_raw),
                paint(
                    format!("({})", format_percent(module.percent_of_project)),
                    Style::new().dimmed()
                )
            )?;
        }
    }
    Ok(())
}

/// Print what a live run would do for each project.
pub fn print_dry_run_plan(projects: &[ProjectConfig], scratch: &ScratchDir) {
    let mut stderr = io::stderr().lock();
    let _ = write_dry_run_plan(&mut stderr, projects, scratch);
}

pub(crate) fn write_dry_run_plan(
    out: &mut impl Write,
    projects: &[ProjectConfig],
    scratch: &ScratchDir,
) -> io::Result<()> {
    for project in projects {
        writeln!(
            out,
            "  {} {} {}",
            paint("▸", Style::new().blue()),
            paint(&project.name, Style::new().bold()),
            paint(format!("({})", project.family), Style::new().dimmed())
        )?;
        writeln!(out, "    would run:  {}", project.build_command)?;
        writeln!(out, "    in:         {}", project.path.display())?;
        writeln!(out, "    stats file: {}", scratch.stats_path(&project.name).display())?;
    }
    Ok(())
}

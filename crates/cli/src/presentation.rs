// crates/cli/src/presentation.rs
use crate::error::{AppError, Result};
use crate::options::OutputFormat;
use apply_versions_engine::report::RunReport;
use std::io::Write;

pub fn print_report<W: Write>(
    out: &mut W,
    report: &RunReport,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(out, report)?,
        OutputFormat::Json => print_json(out, report)?,
    }
    out.flush()?;
    Ok(())
}

fn print_text<W: Write>(out: &mut W, report: &RunReport) -> Result<()> {
    if report.dry_run {
        for file in &report.files {
            let verb = if file.changed { "would rewrite" } else { "unchanged" };
            writeln!(
                out,
                "{verb}: {} ({} of {} lines matched)",
                file.path.display(),
                file.replaced,
                file.lines
            )?;
        }
        writeln!(out, "done! (dry run, nothing written)")?;
    } else {
        writeln!(out, "done!")?;
    }
    Ok(())
}

fn print_json<W: Write>(out: &mut W, report: &RunReport) -> Result<()> {
    let value = serde_json::json!({
        "version": crate::VERSION,
        "dry_run": report.dry_run,
        "replaced": report.replaced(),
        "files": report.files,
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    Ok(())
}

/// Human-readable failure line, e.g. `Error: No such file or directory: WingetUI.iss`.
#[must_use]
pub fn format_error(err: &AppError) -> String {
    format!("Error: {err}")
}

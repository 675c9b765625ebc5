// 🖥️ Presenter - verdict reports for the terminal
// Plain rendering always available; colors only with the `tui` feature

use crate::classifier::BatchReport;
use crate::item::Verdict;
use crate::parser::ParseWarning;
use anyhow::Result;
use std::io::{IsTerminal, Write};

#[cfg(feature = "tui")]
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

// ============================================================================
// PLAIN RENDERING
// ============================================================================

pub fn render_header(batch_number: u32) -> String {
    format!("=== Batch {} ===", batch_number)
}

pub fn render_verdict(verdict: &Verdict) -> String {
    format!(
        "Item {}: {} - {}",
        verdict.id,
        verdict.status_label(),
        verdict.reason
    )
}

pub fn render_warning(warning: &ParseWarning) -> String {
    format!("warning: {}", warning)
}

/// Header, one line per verdict in order, then the summary
pub fn render_report(report: &BatchReport) -> String {
    let mut lines = vec![render_header(report.batch_number)];
    if report.verdicts.is_empty() {
        lines.push("(no items)".to_string());
    }
    lines.extend(report.verdicts.iter().map(render_verdict));
    lines.push(report.summary().summary());
    lines.join("\n")
}

// ============================================================================
// TERMINAL OUTPUT
// ============================================================================

/// Whether status lines carry ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Always,
    Never,
}

impl ColorMode {
    /// Colors only when the stream is an interactive terminal
    pub fn for_stream<S: IsTerminal>(stream: &S) -> Self {
        if stream.is_terminal() {
            ColorMode::Always
        } else {
            ColorMode::Never
        }
    }
}

/// Write a report, coloring each verdict line by status
pub fn write_report<W: Write>(out: &mut W, report: &BatchReport, mode: ColorMode) -> Result<()> {
    writeln!(out, "{}", render_header(report.batch_number))?;

    if report.verdicts.is_empty() {
        writeln!(out, "(no items)")?;
    }

    for verdict in &report.verdicts {
        let color = if verdict.approved {
            StatusColor::Approved
        } else {
            StatusColor::Rejected
        };
        write_colored_line(out, &render_verdict(verdict), color, mode)?;
    }

    writeln!(out, "{}", report.summary().summary())?;
    out.flush()?;
    Ok(())
}

pub fn write_warning<W: Write>(out: &mut W, warning: &ParseWarning, mode: ColorMode) -> Result<()> {
    write_colored_line(out, &render_warning(warning), StatusColor::Warning, mode)?;
    out.flush()?;
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum StatusColor {
    Approved,
    Rejected,
    Warning,
}

/// Set the color, print, reset - the color never outlives the line
#[cfg(feature = "tui")]
fn write_colored_line<W: Write>(
    out: &mut W,
    line: &str,
    color: StatusColor,
    mode: ColorMode,
) -> Result<()> {
    if mode == ColorMode::Never {
        writeln!(out, "{}", line)?;
        return Ok(());
    }

    let color = match color {
        StatusColor::Approved => Color::Green,
        StatusColor::Rejected => Color::Red,
        StatusColor::Warning => Color::Yellow,
    };

    queue!(out, SetForegroundColor(color), Print(line), ResetColor, Print("\n"))?;
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn write_colored_line<W: Write>(
    out: &mut W,
    line: &str,
    _color: StatusColor,
    _mode: ColorMode,
) -> Result<()> {
    writeln!(out, "{}", line)?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

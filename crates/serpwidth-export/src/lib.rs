//! Export module for serpwidth
//!
//! Verdicts and batch reports become bytes here, either as a plain-text
//! table for people or as JSON for scripts.

use std::io::Write;

use serpwidth_core::{
    error::Result,
    traits::Exporter,
    BatchReport, BatchSummary, TextKind, Verdict,
};

pub mod json;

pub use json::JsonExporter;

/// Longest text shown in a report table before it is cut
pub const PREVIEW_CHARS: usize = 70;

/// First `max_chars` characters of `text`, with `...` when anything was cut
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

/// Plain-text report for terminals
#[derive(Debug, Default, Clone, Copy)]
pub struct TableExporter;

impl TableExporter {
    pub fn new() -> Self {
        Self
    }

    fn write_verdict(&self, out: &mut Vec<u8>, verdict: &Verdict) -> Result<()> {
        let status = if verdict.ok { "OK" } else { "OVER" };
        writeln!(
            out,
            "[{}] {}: {}px / {}px ({:+}px) | {} chars",
            status,
            verdict.kind.as_str().to_uppercase(),
            verdict.pixel_width,
            verdict.max_pixels,
            verdict.remaining_pixels,
            verdict.char_count
        )?;
        writeln!(out, "       {}", verdict.text)?;
        if verdict.missing_glyphs > 0 {
            writeln!(
                out,
                "       ({} characters missing from the {} font)",
                verdict.missing_glyphs, verdict.role
            )?;
        }
        Ok(())
    }

    fn write_summary(&self, out: &mut Vec<u8>, summary: &BatchSummary) -> Result<()> {
        let label = match summary.kind {
            TextKind::Title => "TITLES",
            TextKind::Description => "DESCRIPTIONS",
        };
        writeln!(
            out,
            "{}: {}/{} OK | {} over {}px limit",
            label,
            summary.ok,
            summary.total,
            summary.over(),
            summary.max_pixels
        )?;

        if !summary.overflowing.is_empty() {
            writeln!(out, "  {:<6} {:<10} {:<10} Text", "Row", "Pixels", "Over by")?;
            writeln!(out, "  {:<6} {:<10} {:<10} ----", "---", "------", "-------")?;
            for row in &summary.overflowing {
                writeln!(
                    out,
                    "  {:<6} {:<10} {:<10} {}",
                    row.row,
                    row.pixel_width,
                    format!("+{}px", row.over_by),
                    preview(&row.text, PREVIEW_CHARS)
                )?;
            }
        }
        if summary.missing_glyphs > 0 {
            writeln!(
                out,
                "  {} characters had no glyph in their font",
                summary.missing_glyphs
            )?;
        }
        Ok(())
    }
}

impl Exporter for TableExporter {
    fn name(&self) -> &'static str {
        "table"
    }

    fn export_verdicts(&self, verdicts: &[Verdict]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for verdict in verdicts {
            self.write_verdict(&mut out, verdict)?;
            writeln!(out)?;
        }
        Ok(out)
    }

    fn export_report(&self, report: &BatchReport) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        if let Some(source) = &report.source {
            writeln!(out, "File:  {source}")?;
        }
        if let Some(sheet) = &report.sheet {
            writeln!(out, "Sheet: {sheet}")?;
        }
        writeln!(out)?;

        for summary in report.summaries() {
            self.write_summary(&mut out, summary)?;
            writeln!(out)?;
        }
        Ok(out)
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn mime_type(&self) -> &'static str {
        "text/plain"
    }
}

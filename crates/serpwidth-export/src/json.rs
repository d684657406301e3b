//! JSON export format
//!
//! Field names are stable; counts and pixel values are always integers.

use serde::Serialize;

use serpwidth_core::{
    error::{ExportError, Result},
    traits::Exporter,
    BatchReport, BatchSummary, OverflowRow, Verdict,
};

/// JSON exporter for verdicts and batch reports
///
/// # Examples
///
/// ```
/// use serpwidth_core::{traits::Exporter, Budget, FontRole, TextKind, Verdict};
/// use serpwidth_export::JsonExporter;
///
/// let verdict = Verdict::new("Hi", TextKind::Title, FontRole::Default, 20, 0, Budget::TITLE);
/// let json = JsonExporter::new().export_verdicts(&[verdict]).unwrap();
/// assert!(String::from_utf8(json).unwrap().contains("\"pixel_width\":20"));
/// ```
pub struct JsonExporter {
    /// Whether to pretty-print the JSON
    pretty: bool,
}

impl JsonExporter {
    /// Create a new JSON exporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Create a JSON exporter with pretty-printing enabled
    pub fn with_pretty_print() -> Self {
        Self { pretty: true }
    }

    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        let json = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        }
        .map_err(|e| ExportError::EncodingFailed(e.to_string()))?;
        Ok(json)
    }
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for JsonExporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn export_verdicts(&self, verdicts: &[Verdict]) -> Result<Vec<u8>> {
        let records: Vec<VerdictRecord<'_>> = verdicts.iter().map(VerdictRecord::from).collect();
        self.encode(&records)
    }

    fn export_report(&self, report: &BatchReport) -> Result<Vec<u8>> {
        self.encode(&ReportRecord {
            source: report.source.as_deref(),
            sheet: report.sheet.as_deref(),
            title: report.title.as_ref().map(SummaryRecord::from),
            description: report.description.as_ref().map(SummaryRecord::from),
        })
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }
}

#[derive(Serialize)]
struct VerdictRecord<'a> {
    text: &'a str,
    kind: &'static str,
    role: &'static str,
    char_count: usize,
    pixel_width: u32,
    max_pixels: u32,
    remaining_pixels: i64,
    ok: bool,
    missing_glyphs: usize,
}

impl<'a> From<&'a Verdict> for VerdictRecord<'a> {
    fn from(verdict: &'a Verdict) -> Self {
        Self {
            text: &verdict.text,
            kind: verdict.kind.as_str(),
            role: verdict.role.as_str(),
            char_count: verdict.char_count,
            pixel_width: verdict.pixel_width,
            max_pixels: verdict.max_pixels,
            remaining_pixels: verdict.remaining_pixels,
            ok: verdict.ok,
            missing_glyphs: verdict.missing_glyphs,
        }
    }
}

#[derive(Serialize)]
struct ReportRecord<'a> {
    source: Option<&'a str>,
    sheet: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<SummaryRecord<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<SummaryRecord<'a>>,
}

#[derive(Serialize)]
struct SummaryRecord<'a> {
    kind: &'static str,
    total: usize,
    ok: usize,
    over: usize,
    max_pixels: u32,
    missing_glyphs: usize,
    overflowing: Vec<OverflowRecord<'a>>,
}

impl<'a> From<&'a BatchSummary> for SummaryRecord<'a> {
    fn from(summary: &'a BatchSummary) -> Self {
        Self {
            kind: summary.kind.as_str(),
            total: summary.total,
            ok: summary.ok,
            over: summary.over(),
            max_pixels: summary.max_pixels,
            missing_glyphs: summary.missing_glyphs,
            overflowing: summary.overflowing.iter().map(OverflowRecord::from).collect(),
        }
    }
}

#[derive(Serialize)]
struct OverflowRecord<'a> {
    row: u32,
    pixel_width: u32,
    over_by: u32,
    char_count: usize,
    text: &'a str,
}

impl<'a> From<&'a OverflowRow> for OverflowRecord<'a> {
    fn from(row: &'a OverflowRow) -> Self {
        Self {
            row: row.row,
            pixel_width: row.pixel_width,
            over_by: row.over_by,
            char_count: row.char_count,
            text: &row.text,
        }
    }
}

//! Verdicts and the reports that collect them

use crate::types::{Budget, FontRole, TextKind};

/// The pass/fail judgement for one string against one budget
///
/// Only [`Verdict::new`] builds one, so `remaining_pixels` and `ok` always
/// agree with `pixel_width` and `max_pixels`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub text: String,
    pub kind: TextKind,
    /// Font role the classifier picked for this text
    pub role: FontRole,
    /// Unicode scalar values, not bytes and not grapheme clusters
    pub char_count: usize,
    pub pixel_width: u32,
    pub max_pixels: u32,
    /// `max_pixels - pixel_width`; negative when the text overflows
    pub remaining_pixels: i64,
    pub ok: bool,
    pub missing_glyphs: usize,
}

impl Verdict {
    pub fn new(
        text: impl Into<String>,
        kind: TextKind,
        role: FontRole,
        pixel_width: u32,
        missing_glyphs: usize,
        budget: Budget,
    ) -> Self {
        let text = text.into();
        let max_pixels = budget.max_pixels;
        Self {
            char_count: text.chars().count(),
            text,
            kind,
            role,
            pixel_width,
            max_pixels,
            remaining_pixels: i64::from(max_pixels) - i64::from(pixel_width),
            ok: pixel_width <= max_pixels,
            missing_glyphs,
        }
    }

    /// How far past the budget the text runs (0 when it fits)
    pub fn over_by(&self) -> u32 {
        self.pixel_width.saturating_sub(self.max_pixels)
    }
}

/// A row that did not fit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverflowRow {
    pub row: u32,
    pub pixel_width: u32,
    pub over_by: u32,
    pub char_count: usize,
    pub text: String,
}

/// Running totals for one kind of text across a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub kind: TextKind,
    pub max_pixels: u32,
    pub total: usize,
    pub ok: usize,
    /// In scan order, which is ascending row id
    pub overflowing: Vec<OverflowRow>,
    pub missing_glyphs: usize,
}

impl BatchSummary {
    pub fn new(kind: TextKind, budget: Budget) -> Self {
        Self {
            kind,
            max_pixels: budget.max_pixels,
            total: 0,
            ok: 0,
            overflowing: Vec::new(),
            missing_glyphs: 0,
        }
    }

    pub fn over(&self) -> usize {
        self.overflowing.len()
    }

    /// Fold one verdict into the totals
    pub fn record(&mut self, row: u32, verdict: Verdict) {
        self.total += 1;
        self.missing_glyphs += verdict.missing_glyphs;
        if verdict.ok {
            self.ok += 1;
            return;
        }
        self.overflowing.push(OverflowRow {
            row,
            pixel_width: verdict.pixel_width,
            over_by: verdict.over_by(),
            char_count: verdict.char_count,
            text: verdict.text,
        });
    }

    /// Seal the summary; rows recorded out of order are put back in row order
    pub fn finish(mut self) -> Self {
        self.overflowing.sort_by_key(|row| row.row);
        self
    }
}

/// Everything a batch run found, per kind of text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub source: Option<String>,
    pub sheet: Option<String>,
    pub title: Option<BatchSummary>,
    pub description: Option<BatchSummary>,
}

impl BatchReport {
    pub fn summaries(&self) -> impl Iterator<Item = &BatchSummary> {
        self.title.iter().chain(self.description.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(px: u32) -> Verdict {
        Verdict::new("x", TextKind::Title, FontRole::Default, px, 0, Budget::TITLE)
    }

    #[test]
    fn test_exact_budget_is_ok() {
        let verdict = title(580);
        assert!(verdict.ok);
        assert_eq!(verdict.remaining_pixels, 0);
        assert_eq!(verdict.over_by(), 0);
    }

    #[test]
    fn test_one_pixel_over() {
        let verdict = title(581);
        assert!(!verdict.ok);
        assert_eq!(verdict.remaining_pixels, -1);
        assert_eq!(verdict.over_by(), 1);
    }

    #[test]
    fn test_char_count_counts_scalars() {
        let verdict = Verdict::new(
            "กข漢é",
            TextKind::Description,
            FontRole::Thai,
            10,
            0,
            Budget::DESCRIPTION,
        );
        assert_eq!(verdict.char_count, 4);
        assert_eq!(verdict.max_pixels, 990);
    }

    #[test]
    fn test_summary_records_and_orders() {
        let mut summary = BatchSummary::new(TextKind::Title, Budget::TITLE);
        summary.record(7, title(600));
        summary.record(3, title(100));
        summary.record(5, title(700));
        let summary = summary.finish();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.ok, 1);
        assert_eq!(summary.over(), 2);
        let rows: Vec<u32> = summary.overflowing.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![5, 7]);
        assert_eq!(summary.overflowing[0].over_by, 120);
    }
}

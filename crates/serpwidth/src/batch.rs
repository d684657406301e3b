//! Column-at-a-time checking for spreadsheets full of titles and descriptions

use serpwidth_core::{
    error::{Result, SerpError},
    traits::RowSource,
    BatchReport, BatchSummary, Row, TextKind, Verdict,
};

use crate::checker::WidthChecker;

/// Which columns to check and where the data starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    /// 0-based column holding titles
    pub title_column: Option<usize>,
    /// 0-based column holding descriptions
    pub description_column: Option<usize>,
    /// 1-based first data row; row 1 is usually a header
    pub start_row: u32,
}

impl Default for BatchPlan {
    fn default() -> Self {
        Self {
            title_column: None,
            description_column: None,
            start_row: 2,
        }
    }
}

impl BatchPlan {
    pub fn with_title_column(mut self, column: usize) -> Self {
        self.title_column = Some(column);
        self
    }

    pub fn with_description_column(mut self, column: usize) -> Self {
        self.description_column = Some(column);
        self
    }

    pub fn with_start_row(mut self, start_row: u32) -> Self {
        self.start_row = start_row;
        self
    }

    /// A plan must name at least one column and start at row 1 or later
    pub fn validate(&self) -> Result<()> {
        if self.title_column.is_none() && self.description_column.is_none() {
            return Err(SerpError::InvalidInput(
                "Specify at least one of --title-col or --desc-col".into(),
            ));
        }
        if self.start_row == 0 {
            return Err(SerpError::InvalidInput(
                "Start row is 1-based; row 0 does not exist".into(),
            ));
        }
        Ok(())
    }

    fn columns(&self) -> impl Iterator<Item = (TextKind, usize)> {
        let title = self.title_column.map(|col| (TextKind::Title, col));
        let description = self.description_column.map(|col| (TextKind::Description, col));
        title.into_iter().chain(description)
    }
}

/// Runs a [`BatchPlan`] through a [`WidthChecker`]
pub struct BatchEvaluator<'a> {
    checker: &'a WidthChecker,
    parallel: bool,
}

impl<'a> BatchEvaluator<'a> {
    pub fn new(checker: &'a WidthChecker) -> Self {
        Self {
            checker,
            parallel: false,
        }
    }

    /// Spread rows over the rayon pool; results keep row order either way
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check every column the plan names
    ///
    /// The plan is validated before the source is touched. A font that
    /// cannot be found or loaded aborts the run with the failing row attached.
    pub fn run(&self, source: &dyn RowSource, plan: &BatchPlan) -> Result<BatchReport> {
        plan.validate()?;

        let mut report = BatchReport {
            source: source.describe(),
            sheet: source.sheet(),
            ..Default::default()
        };

        for (kind, column) in plan.columns() {
            log::info!("Checking {} column {} from row {}", kind, column, plan.start_row);
            let rows = source.column(column, plan.start_row)?;
            let summary = if self.parallel {
                self.evaluate_parallel(rows.collect(), kind)?
            } else {
                self.evaluate(rows, kind)?
            };
            log::info!(
                "{}: {} checked, {} ok, {} over {}px",
                kind,
                summary.total,
                summary.ok,
                summary.over(),
                summary.max_pixels
            );

            match kind {
                TextKind::Title => report.title = Some(summary),
                TextKind::Description => report.description = Some(summary),
            }
        }

        Ok(report)
    }

    /// Check rows one after another; empty cells are skipped
    pub fn evaluate<I>(&self, rows: I, kind: TextKind) -> Result<BatchSummary>
    where
        I: IntoIterator<Item = Row>,
    {
        let mut summary = BatchSummary::new(kind, self.checker.config().budget(kind));
        for row in rows {
            if let Some(verdict) = self.check_row(&row, kind)? {
                summary.record(row.id, verdict);
            }
        }
        Ok(summary.finish())
    }

    /// Check rows concurrently
    #[cfg(feature = "parallel")]
    pub fn evaluate_parallel(&self, rows: Vec<Row>, kind: TextKind) -> Result<BatchSummary> {
        use rayon::prelude::*;

        let verdicts = rows
            .into_par_iter()
            .map(|row| {
                self.check_row(&row, kind)
                    .map(|verdict| verdict.map(|verdict| (row.id, verdict)))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut summary = BatchSummary::new(kind, self.checker.config().budget(kind));
        for (row, verdict) in verdicts.into_iter().flatten() {
            summary.record(row, verdict);
        }
        Ok(summary.finish())
    }

    #[cfg(not(feature = "parallel"))]
    pub fn evaluate_parallel(&self, rows: Vec<Row>, kind: TextKind) -> Result<BatchSummary> {
        log::warn!("Built without the `parallel` feature; checking rows sequentially");
        self.evaluate(rows, kind)
    }

    fn check_row(&self, row: &Row, kind: TextKind) -> Result<Option<Verdict>> {
        let Some(text) = row.text() else {
            return Ok(None);
        };
        self.checker
            .check(text, kind)
            .map(Some)
            .map_err(|err| err.at_row(row.id))
    }
}

//! Batch command implementation
//!
//! Checks one or two columns of a spreadsheet and prints a summary.

use anyhow::{Context, Result};

use serpwidth::{BatchEvaluator, BatchPlan, WidthChecker};
use serpwidth_input::{column_index, Spreadsheet};

use crate::cli::BatchArgs;

/// Columns and start row, checked before the workbook is opened
pub fn plan(args: &BatchArgs) -> Result<BatchPlan> {
    let mut plan = BatchPlan::default().with_start_row(args.start_row);
    if let Some(letters) = &args.title_col {
        plan = plan.with_title_column(column_index(letters)?);
    }
    if let Some(letters) = &args.desc_col {
        plan = plan.with_description_column(column_index(letters)?);
    }
    plan.validate()?;
    Ok(plan)
}

pub fn run(args: &BatchArgs, checker: &WidthChecker) -> Result<()> {
    let plan = plan(args)?;

    let sheet = Spreadsheet::open(&args.file, &args.sheet)
        .with_context(|| format!("Reading {}", args.file.display()))?;
    log::info!(
        "{} sheet '{}': rows {}..={}",
        args.file.display(),
        args.sheet,
        plan.start_row,
        sheet.last_row()
    );

    let report = BatchEvaluator::new(checker)
        .parallel(args.parallel)
        .run(&sheet, &plan)?;

    if checker.missing_glyph_count() > 0 {
        log::warn!(
            "{} characters had no glyph; install fonts for every script in the sheet",
            checker.missing_glyph_count()
        );
    }

    let bytes = super::exporter(args.json).export_report(&report)?;
    super::emit(&bytes, args.json)?;
    Ok(())
}

//! serpwidth - will it fit in the search result?
//!
//! Search engines cut titles and descriptions by rendered width, not by
//! character count. serpwidth shapes text with a real font and compares the
//! pixel width against the budgets search results allow:
//!
//! 1. Script classification picks a font role (Latin, Thai, CJK, Korean)
//! 2. Font resolution finds and loads that role's font, once
//! 3. Shaping turns the text into glyph advances
//! 4. The width is judged against the title or description budget
//!
//! # Example
//!
//! ```no_run
//! use serpwidth::prelude::*;
//!
//! let checker = WidthChecker::from_config(CheckerConfig::from_env());
//! let verdict = checker.check_description("Free shipping on every order.")?;
//! assert!(verdict.ok);
//! # Ok::<(), SerpError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default): batch rows may be checked on the rayon pool

pub mod batch;
pub mod checker;

pub use batch::{BatchEvaluator, BatchPlan};
pub use checker::WidthChecker;

pub use serpwidth_core::{
    error, traits, types, Budget, CheckerConfig, FontRole, Measurement, MeasurementRequest, Result,
    SerpError, TextKind, Verdict,
};
pub use serpwidth_core::{BatchReport, BatchSummary, OverflowRow};

pub use serpwidth_fontdb as fontdb;
pub use serpwidth_shape_hr as shape_hr;
pub use serpwidth_unicode as unicode;

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{BatchEvaluator, BatchPlan, WidthChecker};
    pub use serpwidth_core::{
        error::{Result, SerpError},
        traits::{Exporter, FontResolver, RowSource, Shaper},
        BatchReport, Budget, CheckerConfig, FontRole, Row, TextKind, Verdict,
    };
}

//! Command implementations

use std::io::Write;

use serpwidth_core::traits::Exporter;
use serpwidth_export::{JsonExporter, TableExporter};

pub mod batch;
pub mod check;

/// JSON is pretty-printed; people read it too
fn exporter(json: bool) -> Box<dyn Exporter> {
    if json {
        Box::new(JsonExporter::with_pretty_print())
    } else {
        Box::new(TableExporter::new())
    }
}

/// Write a finished report to stdout in one go
fn emit(bytes: &[u8], trailing_newline: bool) -> std::io::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(bytes)?;
    if trailing_newline {
        out.write_all(b"\n")?;
    }
    out.flush()
}

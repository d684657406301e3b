//! Where the rows come from
//!
//! Batch checks read one column at a time. Anything that can hand out
//! `(row, cell)` pairs for a column implements [`RowSource`]:
//!
//! - [`Spreadsheet`] - a sheet of an `.xlsx`, `.xls`, `.xlsb` or `.ods` file
//! - [`MemorySheet`] - cells built in code, for tests and library callers
//!
//! Row ids are 1-based sheet row numbers, the same numbers a spreadsheet
//! application shows in its margin.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader};

use serpwidth_core::{
    error::{Result, SerpError},
    traits::RowSource,
    Row,
};

/// Convert a column letter (`A`, `Z`, `AA`, ...) to a 0-based index
///
/// ```
/// use serpwidth_input::column_index;
///
/// assert_eq!(column_index("E").unwrap(), 4);
/// assert_eq!(column_index("aa").unwrap(), 26);
/// ```
pub fn column_index(letters: &str) -> Result<usize> {
    let letters = letters.trim();
    if letters.is_empty() {
        return Err(SerpError::InvalidInput("Column letter is empty".into()));
    }

    let mut index = 0usize;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return Err(SerpError::InvalidInput(format!(
                "Invalid column '{letters}': use letters like E or AB"
            )));
        }
        let digit = (ch.to_ascii_uppercase() as usize) - ('A' as usize) + 1;
        index = index
            .checked_mul(26)
            .and_then(|i| i.checked_add(digit))
            .ok_or_else(|| SerpError::InvalidInput(format!("Column '{letters}' is out of range")))?;
    }
    Ok(index - 1)
}

/// One sheet of a workbook, read fully into memory on open
pub struct Spreadsheet {
    path: PathBuf,
    sheet: String,
    range: Range<Data>,
}

impl Spreadsheet {
    /// Open `sheet` of the workbook at `path`; the format follows the extension
    pub fn open(path: impl AsRef<Path>, sheet: &str) -> Result<Self> {
        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path).map_err(|e| {
            SerpError::RowSource(format!("Cannot open {}: {e}", path.display()))
        })?;

        let range = workbook.worksheet_range(sheet).map_err(|e| {
            let names = workbook.sheet_names().join(", ");
            SerpError::RowSource(format!(
                "Sheet '{sheet}' not readable in {} ({e}); available: {names}",
                path.display()
            ))
        })?;

        log::debug!(
            "Opened {} sheet '{}' ({} rows x {} columns)",
            path.display(),
            sheet,
            range.height(),
            range.width()
        );

        Ok(Self {
            path: path.to_path_buf(),
            sheet: sheet.to_string(),
            range,
        })
    }

    /// Last 1-based row that holds any cell, 0 for an empty sheet
    pub fn last_row(&self) -> u32 {
        self.range.end().map(|(row, _)| row + 1).unwrap_or(0)
    }
}

impl RowSource for Spreadsheet {
    fn column(&self, column: usize, start_row: u32) -> Result<Box<dyn Iterator<Item = Row> + '_>> {
        let column = u32::try_from(column)
            .map_err(|_| SerpError::InvalidInput(format!("Column {column} is out of range")))?;
        let first = start_row.max(1);

        let rows = (first..=self.last_row()).map(move |id| {
            match self.range.get_value((id - 1, column)) {
                Some(Data::String(text)) => Row::new(id, text.as_str()),
                _ => Row::empty(id),
            }
        });
        Ok(Box::new(rows))
    }

    fn describe(&self) -> Option<String> {
        Some(self.path.display().to_string())
    }

    fn sheet(&self) -> Option<String> {
        Some(self.sheet.clone())
    }
}

/// A cell of a [`MemorySheet`]
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
}

/// A sheet that lives in memory
///
/// ```
/// use serpwidth_core::traits::RowSource;
/// use serpwidth_input::MemorySheet;
///
/// let sheet = MemorySheet::new("Sheet1").with_column(0, ["Title", "Hello"]);
/// let rows: Vec<_> = sheet.column(0, 2).unwrap().collect();
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].text(), Some("Hello"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    name: String,
    cells: BTreeMap<(usize, u32), Cell>,
    last_row: u32,
}

impl MemorySheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Fill `column` from row 1 downwards
    pub fn with_column<I, S>(mut self, column: usize, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (row, text) in (1u32..).zip(cells) {
            self.set(column, row, Cell::Text(text.into()));
        }
        self
    }

    pub fn with_text(mut self, column: usize, row: u32, text: impl Into<String>) -> Self {
        self.set(column, row, Cell::Text(text.into()));
        self
    }

    pub fn with_number(mut self, column: usize, row: u32, value: f64) -> Self {
        self.set(column, row, Cell::Number(value));
        self
    }

    pub fn set(&mut self, column: usize, row: u32, cell: Cell) {
        self.last_row = self.last_row.max(row);
        self.cells.insert((column, row), cell);
    }

    pub fn last_row(&self) -> u32 {
        self.last_row
    }
}

impl RowSource for MemorySheet {
    fn column(&self, column: usize, start_row: u32) -> Result<Box<dyn Iterator<Item = Row> + '_>> {
        let rows = (start_row.max(1)..=self.last_row).map(move |id| {
            match self.cells.get(&(column, id)) {
                Some(Cell::Text(text)) => Row::new(id, text.as_str()),
                _ => Row::empty(id),
            }
        });
        Ok(Box::new(rows))
    }

    fn sheet(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

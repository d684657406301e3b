//! Error types for serpwidth

use std::path::PathBuf;

use thiserror::Error;

use crate::types::FontRole;

pub type Result<T> = std::result::Result<T, SerpError>;

/// Main error type for serpwidth
#[derive(Debug, Error)]
pub enum SerpError {
    #[error(transparent)]
    FontNotFound(#[from] FontNotFoundError),

    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Shaping failed: {0}")]
    Shaping(#[from] ShapingError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Row source error: {0}")]
    RowSource(String),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Row {row}: {source}")]
    AtRow {
        row: u32,
        #[source]
        source: Box<SerpError>,
    },
}

impl SerpError {
    /// Attach the batch row that was being checked
    pub fn at_row(self, row: u32) -> Self {
        SerpError::AtRow {
            row,
            source: Box::new(self),
        }
    }

    /// The missing-font error behind this one, if any
    pub fn font_not_found(&self) -> Option<&FontNotFoundError> {
        match self {
            SerpError::FontNotFound(err) => Some(err),
            SerpError::AtRow { source, .. } => source.font_not_found(),
            _ => None,
        }
    }
}

/// No font file could be located for a role that the input needs
#[derive(Debug, Error)]
#[error("No font found for role '{role}' ({} candidate paths searched)", searched.len())]
pub struct FontNotFoundError {
    pub role: FontRole,
    pub searched: Vec<PathBuf>,
}

impl FontNotFoundError {
    pub fn new(role: FontRole, searched: Vec<PathBuf>) -> Self {
        Self { role, searched }
    }

    /// Guidance printed once alongside the error
    pub fn remediation(&self) -> String {
        let mut text = String::new();
        if !self.searched.is_empty() {
            text.push_str("Searched:\n");
            for path in &self.searched {
                text.push_str(&format!("  {}\n", path.display()));
            }
        }
        if cfg!(target_os = "linux") && self.role == FontRole::Default {
            text.push_str("Install Arial with: sudo apt install ttf-mscorefonts-installer\n");
            text.push_str("Or Liberation Sans: sudo apt install fonts-liberation\n");
        }
        text.push_str(&format!(
            "Point to a font file with {} or the {} environment variable.",
            self.role.cli_flag(),
            self.role.env_var()
        ));
        text
    }
}

/// Font loading errors, always naming the file they came from
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Font file too large: {size} bytes (max: {max} bytes) at {}", path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Failed to read font {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid font data in {source_name}: {reason}")]
    InvalidData { source_name: String, reason: String },
}

/// Shaping errors
#[derive(Debug, Error)]
pub enum ShapingError {
    #[error("Font {0} cannot be shaped: {1}")]
    UnusableFont(String, String),

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),
}

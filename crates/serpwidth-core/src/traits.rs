//! The contracts that bind every stage together
//!
//! - [`FontRef`] - Your window into font data and metrics
//! - [`Shaper`] - Where characters become glyph advances
//! - [`FontResolver`] - Where a font role becomes a font file
//! - [`RowSource`] - Where batch text comes from
//! - [`Exporter`] - Where verdicts become bytes

use std::path::{Path, PathBuf};

use crate::{
    error::{FontLoadError, FontNotFoundError, Result},
    scale::scale_to_pixels,
    types::{FontRole, GlyphId, Measurement, Row, ShapingResult},
    verdict::{BatchReport, Verdict},
};

/// Your key to unlocking font secrets
///
/// ```ignore
/// struct MyFont {
///     data: Vec<u8>,
/// }
///
/// impl FontRef for MyFont {
///     fn data(&self) -> &[u8] {
///         &self.data
///     }
///
///     fn units_per_em(&self) -> u16 {
///         2048
///     }
///
///     fn glyph_id(&self, ch: char) -> Option<GlyphId> {
///         Some(42)
///     }
///
///     fn advance_width(&self, glyph_id: GlyphId) -> i32 {
///         1233
///     }
/// }
/// ```
pub trait FontRef: Send + Sync {
    /// Raw font bytes as they live in the file
    ///
    /// Empty for synthetic fonts that only answer metric queries.
    fn data(&self) -> &[u8];

    /// Which face of a collection these bytes describe
    fn face_index(&self) -> u32 {
        0
    }

    /// The font's internal coordinate system scale
    ///
    /// Type 1 fonts use 1000, TrueType often uses 2048.
    fn units_per_em(&self) -> u16;

    /// Find the glyph that represents this character
    ///
    /// Returns None when the font doesn't contain this character.
    fn glyph_id(&self, ch: char) -> Option<GlyphId>;

    /// How wide this glyph stands in font units
    fn advance_width(&self, glyph_id: GlyphId) -> i32;

    /// Where the font came from, for logs and errors
    fn source(&self) -> &str {
        "<memory>"
    }
}

/// Where characters learn how much room they take
pub trait Shaper: Send + Sync {
    /// Identify yourself in logs and error messages
    fn name(&self) -> &'static str;

    /// Shape `text` with the font's own substitution and positioning rules
    ///
    /// Advances stay in font design units. Characters the font cannot map
    /// come back as `.notdef` and are counted, never rejected.
    fn shape(&self, text: &str, font: &dyn FontRef) -> Result<ShapingResult>;

    /// Shape and scale to whole pixels at `font_size`
    fn measure(&self, text: &str, font_size: u32, font: &dyn FontRef) -> Result<Measurement> {
        let shaped = self.shape(text, font)?;
        Ok(Measurement {
            pixel_width: scale_to_pixels(shaped.advance_units, font_size, shaped.units_per_em),
            advance_units: shaped.advance_units,
            glyph_count: shaped.glyphs.len(),
            missing_glyphs: shaped.missing_glyphs,
        })
    }
}

/// Turns a logical font role into font program bytes
///
/// Split in two so the caller can cache by path: `locate` is cheap and
/// `read` is the one trip to the disk.
pub trait FontResolver: Send + Sync {
    /// Which file holds the font for `role`
    fn locate(&self, role: FontRole) -> std::result::Result<PathBuf, FontNotFoundError>;

    /// Read the font program at `path`
    fn read(&self, path: &Path) -> std::result::Result<Vec<u8>, FontLoadError>;
}

/// A column of cells that can be read from the top as often as needed
pub trait RowSource {
    /// Cells of the 0-based `column`, starting at 1-based `start_row`
    fn column(&self, column: usize, start_row: u32) -> Result<Box<dyn Iterator<Item = Row> + '_>>;

    /// Human-readable origin, e.g. a file path
    fn describe(&self) -> Option<String> {
        None
    }

    /// Sheet name when the source has several
    fn sheet(&self) -> Option<String> {
        None
    }
}

/// The final step: verdicts become bytes
pub trait Exporter: Send + Sync {
    /// Who are you?
    fn name(&self) -> &'static str;

    /// Encode single-string verdicts
    fn export_verdicts(&self, verdicts: &[Verdict]) -> Result<Vec<u8>>;

    /// Encode a batch report
    fn export_report(&self, report: &BatchReport) -> Result<Vec<u8>>;

    /// What file extension should be used?
    fn extension(&self) -> &'static str;

    /// What MIME type identifies your format?
    fn mime_type(&self) -> &'static str;
}

//! Serpwidth Core: the vocabulary shared by every stage of a width check
//!
//! A string travels through four stages before it gets a verdict:
//!
//! 1. **Script classification** - the first qualifying code point picks a [`FontRole`]
//! 2. **Font resolution** - the role turns into a font file, parsed once and cached
//! 3. **Shaping** - the font's own rules turn characters into glyph advances
//! 4. **Judgement** - advances scale to pixels and meet the [`Budget`]
//!
//! This crate holds the types that flow between those stages, the traits
//! that let each stage be swapped out, and the scaling math that turns
//! font design units into whole pixels.
//!
//! ```
//! use serpwidth_core::{Budget, TextKind, Verdict, FontRole};
//!
//! let verdict = Verdict::new("Hello", TextKind::Title, FontRole::Default, 580, 0, Budget::TITLE);
//! assert!(verdict.ok);
//! assert_eq!(verdict.remaining_pixels, 0);
//! ```

pub mod config;
pub mod error;
pub mod scale;
pub mod traits;
pub mod verdict;

pub use config::CheckerConfig;
pub use error::{Result, SerpError};
pub use scale::{apply_correction, scale_to_pixels};
pub use traits::{Exporter, FontRef, FontResolver, RowSource, Shaper};
pub use types::{Budget, FontRole, Measurement, MeasurementRequest, Row, TextKind};
pub use verdict::{BatchReport, BatchSummary, OverflowRow, Verdict};

/// The data structures that move between stages
pub mod types {
    use std::fmt;
    use std::str::FromStr;

    /// Unique identifier for a glyph within a font
    pub type GlyphId = u32;

    /// The `.notdef` glyph every font carries at index 0
    pub const NOTDEF: GlyphId = 0;

    /// Which logical font measures a string
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub enum FontRole {
        /// Latin and everything without a dedicated fallback
        Default,
        Thai,
        Cjk,
        Korean,
    }

    impl FontRole {
        pub const ALL: [FontRole; 4] = [
            FontRole::Default,
            FontRole::Thai,
            FontRole::Cjk,
            FontRole::Korean,
        ];

        pub fn as_str(&self) -> &'static str {
            match self {
                Self::Default => "default",
                Self::Thai => "thai",
                Self::Cjk => "cjk",
                Self::Korean => "korean",
            }
        }

        /// Environment variable that overrides the font for this role
        pub fn env_var(&self) -> &'static str {
            match self {
                Self::Default => "SERP_FONT_PATH",
                Self::Thai => "SERP_FONT_PATH_THAI",
                Self::Cjk => "SERP_FONT_PATH_CJK",
                Self::Korean => "SERP_FONT_PATH_KOREAN",
            }
        }

        /// Command-line flag that overrides the font for this role
        pub fn cli_flag(&self) -> &'static str {
            match self {
                Self::Default => "--font",
                Self::Thai => "--thai-font",
                Self::Cjk => "--cjk-font",
                Self::Korean => "--korean-font",
            }
        }
    }

    impl fmt::Display for FontRole {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    impl FromStr for FontRole {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.to_ascii_lowercase().as_str() {
                "default" | "latin" => Ok(Self::Default),
                "thai" => Ok(Self::Thai),
                "cjk" => Ok(Self::Cjk),
                "korean" => Ok(Self::Korean),
                other => Err(format!("unknown font role: {other}")),
            }
        }
    }

    /// What a string is going to be on the results page
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum TextKind {
        Title,
        Description,
    }

    impl TextKind {
        pub fn as_str(&self) -> &'static str {
            match self {
                Self::Title => "title",
                Self::Description => "description",
            }
        }
    }

    impl fmt::Display for TextKind {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    /// Font size and pixel allowance for one kind of text
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Budget {
        /// Rendering size in pixels per em
        pub font_size: u32,
        /// Widest the text may be before it gets truncated
        pub max_pixels: u32,
        /// Multiplier applied to the measured width (1.0 = none)
        pub correction: f32,
    }

    impl Budget {
        pub const TITLE: Budget = Budget {
            font_size: 20,
            max_pixels: 580,
            correction: 1.0,
        };

        pub const DESCRIPTION: Budget = Budget {
            font_size: 14,
            max_pixels: 990,
            correction: 1.0,
        };
    }

    /// One string to measure at one size with one font role
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MeasurementRequest<'a> {
        pub text: &'a str,
        pub font_size: u32,
        pub role: FontRole,
    }

    /// How wide a string came out
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Measurement {
        pub pixel_width: u32,
        /// Sum of horizontal advances in font design units
        pub advance_units: i64,
        pub glyph_count: usize,
        /// Glyphs that fell back to `.notdef`
        pub missing_glyphs: usize,
    }

    /// A glyph and the room it takes, in font units
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ShapedGlyph {
        pub id: GlyphId,
        pub x_advance: i32,
        pub cluster: u32,
    }

    /// What emerges after shaping, before any scaling to pixels
    #[derive(Debug, Clone, Default)]
    pub struct ShapingResult {
        pub glyphs: Vec<ShapedGlyph>,
        pub advance_units: i64,
        pub units_per_em: u16,
        pub missing_glyphs: usize,
    }

    /// One cell pulled from a row source
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Row {
        /// 1-based row number as the spreadsheet shows it
        pub id: u32,
        /// `None` for empty or non-text cells
        pub value: Option<String>,
    }

    impl Row {
        pub fn new(id: u32, value: impl Into<String>) -> Self {
            Self {
                id,
                value: Some(value.into()),
            }
        }

        pub fn empty(id: u32) -> Self {
            Self { id, value: None }
        }

        /// The trimmed text, or `None` when nothing is left to measure
        pub fn text(&self) -> Option<&str> {
            self.value
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
        }
    }
}

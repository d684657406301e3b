//! Where fonts come to life: discovery, loading and caching for serpwidth
//!
//! Three pieces live here:
//!
//! - [`Font`] - a parsed font program plus the units-per-em it measures in
//! - [`FontCache`] - the process-wide, path-keyed cache that guarantees each
//!   font file is parsed at most once
//! - [`SystemFontResolver`] - the per-platform table of places a font for
//!   each role might live
//!
//! ## Memory Management
//!
//! Fonts store their raw data and create a `FontRef` on demand for parsing.
//! This keeps `Font` free of self-references and supports TTC collections
//! through the face index.

use std::path::Path;

use read_fonts::{FontRef as ReadFontRef, TableProvider};

use serpwidth_core::{
    error::FontLoadError,
    traits::FontRef as SerpFontRef,
    types::GlyphId,
};

pub mod font_cache;
pub mod resolver;

pub use font_cache::{CacheStats, FontCache};
pub use resolver::{Platform, SystemFontResolver, MAX_FONT_SIZE};

/// A font that's been brought into memory, ready to shape text
///
/// Immutable once built; share it behind an `Arc`.
pub struct Font {
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
    glyph_count: u32,
    source: String,
}

impl Font {
    /// Turns raw font bytes into something we can work with
    pub fn from_data(data: Vec<u8>, source: impl Into<String>) -> Result<Self, FontLoadError> {
        Self::from_data_index(data, 0, source)
    }

    /// Turns raw font bytes into a specific face (for TTC collections)
    pub fn from_data_index(
        data: Vec<u8>,
        face_index: u32,
        source: impl Into<String>,
    ) -> Result<Self, FontLoadError> {
        let source = source.into();
        let font_ref = ReadFontRef::from_index(&data, face_index).map_err(|e| {
            FontLoadError::InvalidData {
                source_name: source.clone(),
                reason: e.to_string(),
            }
        })?;

        // Without a usable cmap nothing can be measured
        font_ref.cmap().map_err(|e| FontLoadError::InvalidData {
            source_name: source.clone(),
            reason: format!("missing cmap table: {e}"),
        })?;

        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);
        let glyph_count = font_ref
            .maxp()
            .map(|maxp| u32::from(maxp.num_glyphs()))
            .unwrap_or(0);

        log::debug!(
            "Parsed font {} (face {}, {} UPM, {} glyphs)",
            source,
            face_index,
            units_per_em,
            glyph_count
        );

        Ok(Font {
            data,
            face_index,
            units_per_em,
            glyph_count,
            source,
        })
    }

    /// Opens a font file from disk without going through a cache
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FontLoadError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FontLoadError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => FontLoadError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        Self::from_data(data, path.display().to_string())
    }

    /// Creates a FontRef on demand for parsing operations
    fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::from_index(&self.data, self.face_index).ok()
    }

    /// Counts how many different glyphs this font contains
    pub fn glyph_count(&self) -> u32 {
        self.glyph_count
    }
}

impl SerpFontRef for Font {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn face_index(&self) -> u32 {
        self.face_index
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        self.font_ref()
            .and_then(|font| font.cmap().ok()?.map_codepoint(ch).map(|gid| gid.to_u32()))
            .filter(|gid| *gid != 0)
    }

    fn advance_width(&self, glyph_id: GlyphId) -> i32 {
        self.font_ref()
            .and_then(|font| {
                let hmtx = font.hmtx().ok()?;
                let glyph = read_fonts::types::GlyphId::new(glyph_id);
                hmtx.advance(glyph).map(i32::from)
            })
            .unwrap_or(0)
    }

    fn source(&self) -> &str {
        &self.source
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("source", &self.source)
            .field("face_index", &self.face_index)
            .field("units_per_em", &self.units_per_em)
            .field("glyph_count", &self.glyph_count)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_from_garbage() {
        let result = Font::from_data(vec![0; 100], "garbage.ttf");
        match result {
            Err(FontLoadError::InvalidData { source_name, .. }) => {
                assert_eq!(source_name, "garbage.ttf")
            },
            other => panic!("expected InvalidData, got {other:?}"),
        }
    }

    #[test]
    fn test_font_from_missing_file() {
        let result = Font::from_file("/definitely/not/here.ttf");
        assert!(matches!(result, Err(FontLoadError::FileNotFound { .. })));
    }
}

//! Pure Rust text measurement using harfrust
//!
//! Harfrust is a pure Rust port of HarfBuzz. Running the font's own GSUB
//! and GPOS rules means ligatures and kerning count exactly as a browser
//! would count them, instead of a naive sum of per-character widths.
//!
//! Results stay in font design units; [`Shaper::measure`] scales them to
//! pixels.

use harfrust::{Direction as HrDirection, FontRef as HrFontRef, GlyphBuffer, ShaperData, UnicodeBuffer};

use serpwidth_core::{
    error::{Result, ShapingError},
    traits::{FontRef, Shaper},
    types::{ShapedGlyph, ShapingResult, NOTDEF},
};

/// Pure Rust text shaping powered by harfrust
#[derive(Debug, Default, Clone, Copy)]
pub struct HarfrustShaper;

impl HarfrustShaper {
    /// Creates a new harfrust shaper ready to handle any script
    pub fn new() -> Self {
        Self
    }

    /// Nominal shaping for fonts that carry metrics but no font program
    ///
    /// One glyph per character, cmap lookup and hmtx advance, `.notdef`
    /// advance for unmapped characters.
    fn nominal_shape(&self, text: &str, font: &dyn FontRef) -> ShapingResult {
        let mut glyphs = Vec::new();
        let mut advance_units = 0i64;
        let mut missing_glyphs = 0usize;

        for (cluster, ch) in text.char_indices() {
            let id = match font.glyph_id(ch) {
                Some(id) => id,
                None => {
                    missing_glyphs += 1;
                    NOTDEF
                },
            };
            let x_advance = font.advance_width(id);
            advance_units += i64::from(x_advance);
            glyphs.push(ShapedGlyph {
                id,
                x_advance,
                cluster: cluster as u32,
            });
        }

        ShapingResult {
            glyphs,
            advance_units,
            units_per_em: font.units_per_em(),
            missing_glyphs,
        }
    }

    /// Extract advances from harfrust's GlyphBuffer
    fn extract_glyphs(buffer: &GlyphBuffer) -> (Vec<ShapedGlyph>, i64, usize) {
        let mut glyphs = Vec::new();
        let mut advance_units = 0i64;
        let mut missing_glyphs = 0usize;

        let positions = buffer.glyph_positions();
        let infos = buffer.glyph_infos();

        for (info, pos) in infos.iter().zip(positions.iter()) {
            if info.glyph_id == NOTDEF {
                missing_glyphs += 1;
            }
            advance_units += i64::from(pos.x_advance);
            glyphs.push(ShapedGlyph {
                id: info.glyph_id,
                x_advance: pos.x_advance,
                cluster: info.cluster,
            });
        }

        (glyphs, advance_units, missing_glyphs)
    }
}

impl Shaper for HarfrustShaper {
    fn name(&self) -> &'static str {
        "Harfrust"
    }

    fn shape(&self, text: &str, font: &dyn FontRef) -> Result<ShapingResult> {
        if text.is_empty() {
            return Ok(ShapingResult {
                units_per_em: font.units_per_em(),
                ..Default::default()
            });
        }

        let font_data = font.data();
        if font_data.is_empty() {
            return Ok(self.nominal_shape(text, font));
        }

        let hr_font = HrFontRef::from_index(font_data, font.face_index()).map_err(|e| {
            ShapingError::UnusableFont(font.source().to_string(), e.to_string())
        })?;

        // ShaperData caches lookup tables; it lives for this call only
        let shaper_data = ShaperData::new(&hr_font);
        let shaper = shaper_data.shaper(&hr_font).build();

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.set_direction(HrDirection::LeftToRight);
        buffer.guess_segment_properties();

        let output = shaper.shape(buffer, &[]);
        let (glyphs, advance_units, missing_glyphs) = Self::extract_glyphs(&output);

        if missing_glyphs > 0 {
            log::warn!(
                "{} of {} glyphs missing from {}; measured with .notdef",
                missing_glyphs,
                glyphs.len(),
                font.source()
            );
        }

        Ok(ShapingResult {
            glyphs,
            advance_units,
            units_per_em: font.units_per_em(),
            missing_glyphs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serpwidth_core::types::GlyphId;

    struct TestFont;

    impl FontRef for TestFont {
        fn data(&self) -> &[u8] {
            &[]
        }

        fn units_per_em(&self) -> u16 {
            1000
        }

        fn glyph_id(&self, ch: char) -> Option<GlyphId> {
            ch.is_ascii().then_some(ch as u32)
        }

        fn advance_width(&self, glyph_id: GlyphId) -> i32 {
            if glyph_id == NOTDEF {
                750
            } else {
                500
            }
        }
    }

    #[test]
    fn test_empty_text() {
        let result = HarfrustShaper::new().shape("", &TestFont).unwrap();
        assert!(result.glyphs.is_empty());
        assert_eq!(result.advance_units, 0);
        assert_eq!(result.units_per_em, 1000);
    }

    #[test]
    fn test_simple_text_no_font_data() {
        let result = HarfrustShaper::new().shape("Hi", &TestFont).unwrap();
        assert_eq!(result.glyphs.len(), 2);
        assert_eq!(result.advance_units, 1000);
        assert_eq!(result.missing_glyphs, 0);
    }

    #[test]
    fn test_unmapped_chars_use_notdef_advance() {
        let result = HarfrustShaper::new().shape("a漢b", &TestFont).unwrap();
        assert_eq!(result.glyphs.len(), 3);
        assert_eq!(result.glyphs[1].id, NOTDEF);
        assert_eq!(result.advance_units, 500 + 750 + 500);
        assert_eq!(result.missing_glyphs, 1);
        // Clusters are byte offsets
        assert_eq!(result.glyphs[2].cluster, 4);
    }

    #[test]
    fn test_measure_scales_to_pixels() {
        // 10 glyphs * 500 units * 20px / 1000 UPM
        let measurement = HarfrustShaper::new()
            .measure("abcdefghij", 20, &TestFont)
            .unwrap();
        assert_eq!(measurement.pixel_width, 100);
        assert_eq!(measurement.glyph_count, 10);
    }

    #[test]
    fn test_font_size_variations() {
        let shaper = HarfrustShaper::new();
        for (size, expected) in [(10, 5), (14, 7), (20, 10)] {
            let measurement = shaper.measure("M", size, &TestFont).unwrap();
            assert_eq!(measurement.pixel_width, expected);
        }
    }
}

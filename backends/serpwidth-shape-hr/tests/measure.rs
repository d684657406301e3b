//! Measurements against real font programs
//!
//! DejaVu Sans Mono advances every spacing glyph (and `.notdef`) by 1233
//! units on a 2048 UPM grid, and applies no Latin kerning, so its pixel
//! widths can be worked out by hand: `round(n * 1233 * size / 2048)`.

use std::path::PathBuf;

use serpwidth_core::{
    traits::{FontRef, Shaper},
    types::GlyphId,
    SerpError,
};
use serpwidth_fontdb::Font;
use serpwidth_shape_hr::HarfrustShaper;

const MONO_ADVANCE: i64 = 1233;

fn test_font(name: &str) -> Font {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fonts")
        .join(name);
    Font::from_file(&path).expect("load test font")
}

#[test]
fn test_known_title_width() {
    let font = test_font("DejaVuSansMono.ttf");
    let text = "Buy Running Shoes Online | Free Shipping";
    assert_eq!(text.chars().count(), 40);

    let measurement = HarfrustShaper::new().measure(text, 20, &font).unwrap();
    assert_eq!(measurement.advance_units, 40 * MONO_ADVANCE);
    // 40 * 1233 * 20 / 2048 = 481.64
    assert_eq!(measurement.pixel_width, 482);
    assert_eq!(measurement.missing_glyphs, 0);
}

#[test]
fn test_description_size() {
    let font = test_font("DejaVuSansMono.ttf");
    let text = "x".repeat(100);
    let measurement = HarfrustShaper::new().measure(&text, 14, &font).unwrap();
    // 100 * 1233 * 14 / 2048 = 842.87
    assert_eq!(measurement.pixel_width, 843);
}

#[test]
fn test_measure_is_deterministic() {
    let font = test_font("DejaVuSans.ttf");
    let shaper = HarfrustShaper::new();
    let text = "Waffle Irons & Toasters – Today's Deals";

    let first = shaper.measure(text, 20, &font).unwrap();
    for _ in 0..5 {
        assert_eq!(shaper.measure(text, 20, &font).unwrap(), first);
    }
}

#[test]
fn test_missing_glyphs_fall_back_to_notdef() {
    let font = test_font("DejaVuSansMono.ttf");
    let measurement = HarfrustShaper::new().measure("漢字", 20, &font).unwrap();

    assert_eq!(measurement.missing_glyphs, 2);
    assert_eq!(measurement.advance_units, 2 * MONO_ADVANCE);
    // 2466 * 20 / 2048 = 24.08
    assert_eq!(measurement.pixel_width, 24);
}

#[test]
fn test_prefix_is_never_wider_for_latin() {
    let font = test_font("DejaVuSans.ttf");
    let shaper = HarfrustShaper::new();
    let text = "Summer Sale: AVAILABLE Today Only | Free Returns";

    let mut previous = 0;
    for (end, _) in text.char_indices().skip(1) {
        let width = shaper.measure(&text[..end], 20, &font).unwrap().pixel_width;
        assert!(width >= previous, "prefix {:?} shrank", &text[..end]);
        previous = width;
    }
    assert!(shaper.measure(text, 20, &font).unwrap().pixel_width >= previous);
}

#[test]
fn test_kerning_is_applied() {
    let font = test_font("DejaVuSans.ttf");
    let text = "AVAVAV To Ta Ty Yo LT WAVE";

    let shaped = HarfrustShaper::new().shape(text, &font).unwrap();
    let nominal: i64 = text
        .chars()
        .map(|ch| {
            let gid: GlyphId = font.glyph_id(ch).unwrap_or(0);
            i64::from(font.advance_width(gid))
        })
        .sum();

    assert!(
        shaped.advance_units < nominal,
        "shaped {} should be tighter than nominal {}",
        shaped.advance_units,
        nominal
    );
}

#[test]
fn test_garbage_font_data_is_an_error() {
    struct Junk;

    impl FontRef for Junk {
        fn data(&self) -> &[u8] {
            b"this is not an OpenType font"
        }

        fn units_per_em(&self) -> u16 {
            1000
        }

        fn glyph_id(&self, _: char) -> Option<GlyphId> {
            None
        }

        fn advance_width(&self, _: GlyphId) -> i32 {
            0
        }

        fn source(&self) -> &str {
            "junk.ttf"
        }
    }

    let err = HarfrustShaper::new().shape("abc", &Junk).unwrap_err();
    assert!(matches!(err, SerpError::Shaping(_)));
    assert!(err.to_string().contains("junk.ttf"));
}

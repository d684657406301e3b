//! Fuzz font loading and measuring with malformed font files
//!
//! Arbitrary bytes go through the same path a font from disk takes:
//! parse, then shape a few strings across scripts. Errors are fine;
//! panics and hangs are not.

#![no_main]

use libfuzzer_sys::fuzz_target;
use serpwidth_core::traits::{FontRef, Shaper};
use serpwidth_fontdb::Font;
use serpwidth_shape_hr::HarfrustShaper;

const SAMPLES: [&str; 4] = [
    "Buy Running Shoes Online | Free Shipping",
    "สวัสดีครับ",
    "漢字とかな",
    "안녕하세요",
];

fuzz_target!(|data: &[u8]| {
    // Skip very large inputs to avoid timeouts
    if data.len() < 12 || data.len() > 1_000_000 {
        return;
    }

    let Ok(font) = Font::from_data(data.to_vec(), "fuzz") else {
        return;
    };

    let _ = font.units_per_em();
    for gid in 0..10u32 {
        let _ = font.advance_width(gid);
    }

    let shaper = HarfrustShaper::new();
    for text in SAMPLES {
        let _ = shaper.measure(text, 20, &font);
    }
});

//! From font design units to whole pixels
//!
//! `pixels = units * size / units_per_em`, rounded half to even. The
//! division is done on integers so boundary cases such as exactly
//! 580.5px land the same way on every platform.

/// Scale an advance total in font units to whole pixels
///
/// Ties round to the even neighbour. Negative totals, which only a
/// pathological font can produce, clamp to zero.
pub fn scale_to_pixels(units: i64, font_size: u32, units_per_em: u16) -> u32 {
    if units <= 0 || font_size == 0 {
        return 0;
    }
    let upem = i128::from(units_per_em.max(1));
    let numerator = i128::from(units) * i128::from(font_size);

    let quotient = numerator / upem;
    let twice_remainder = (numerator % upem) * 2;
    let rounded = match twice_remainder.cmp(&upem) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + (quotient & 1),
    };

    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Apply a budget's correction factor to a measured width
pub fn apply_correction(pixels: u32, correction: f32) -> u32 {
    if correction == 1.0 || !correction.is_finite() || correction <= 0.0 {
        return pixels;
    }
    let corrected = (f64::from(pixels) * f64::from(correction)).round_ties_even();
    corrected.clamp(0.0, f64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exact_division() {
        // 1000 units at 20px on a 1000 UPM grid
        assert_eq!(scale_to_pixels(1000, 20, 1000), 20);
        assert_eq!(scale_to_pixels(2048, 14, 2048), 14);
    }

    #[test]
    fn test_ties_round_to_even() {
        // 25 * 20 / 1000 = 0.5 -> 0
        assert_eq!(scale_to_pixels(25, 20, 1000), 0);
        // 75 * 20 / 1000 = 1.5 -> 2
        assert_eq!(scale_to_pixels(75, 20, 1000), 2);
        // 125 * 20 / 1000 = 2.5 -> 2
        assert_eq!(scale_to_pixels(125, 20, 1000), 2);
    }

    #[test]
    fn test_non_ties_round_to_nearest() {
        // 40 monospace glyphs of 1233 units at 20px on 2048 UPM = 481.64
        assert_eq!(scale_to_pixels(40 * 1233, 20, 2048), 482);
        // 1233 * 14 / 2048 = 8.43
        assert_eq!(scale_to_pixels(1233, 14, 2048), 8);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(scale_to_pixels(0, 20, 1000), 0);
        assert_eq!(scale_to_pixels(-500, 20, 1000), 0);
        assert_eq!(scale_to_pixels(500, 0, 1000), 0);
        // A zero UPM is treated as 1 rather than dividing by zero
        assert_eq!(scale_to_pixels(3, 2, 0), 6);
    }

    #[test]
    fn test_correction() {
        assert_eq!(apply_correction(500, 1.0), 500);
        assert_eq!(apply_correction(500, 0.98), 490);
        assert_eq!(apply_correction(5, 0.5), 2);
        assert_eq!(apply_correction(7, 0.5), 4);
        assert_eq!(apply_correction(500, f32::NAN), 500);
        assert_eq!(apply_correction(500, -2.0), 500);
    }

    proptest! {
        #[test]
        fn prop_scaling_is_monotonic(a in 0i64..10_000_000, b in 0i64..10_000_000, size in 1u32..200) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(scale_to_pixels(lo, size, 2048) <= scale_to_pixels(hi, size, 2048));
        }

        #[test]
        fn prop_scaling_within_half_pixel(units in 0i64..10_000_000, size in 1u32..200, upem in 16u16..4096) {
            let exact = units as f64 * size as f64 / upem as f64;
            let px = scale_to_pixels(units, size, upem) as f64;
            prop_assert!((px - exact).abs() <= 0.5 + 1e-9);
        }
    }
}

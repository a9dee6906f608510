//! 8-bit RGB to HSV conversion.
//!
//! Uses the compact byte encoding common in vision tooling: hue is stored as
//! degrees / 2 (0..=179) so it fits a byte, saturation and value span
//! 0..=255.

/// Converts one RGB pixel to `[h, s, v]`.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = (max - min) as f32;

    let v = max;
    let s = if max == 0 {
        0
    } else {
        (diff * 255.0 / max as f32).round() as u8
    };

    if diff == 0.0 {
        return [0, s, v];
    }

    let (r, g, b) = (r as f32, g as f32, b as f32);
    let mut hue_deg = if max as f32 == r {
        60.0 * (g - b) / diff
    } else if max as f32 == g {
        120.0 + 60.0 * (b - r) / diff
    } else {
        240.0 + 60.0 * (r - g) / diff
    };
    if hue_deg < 0.0 {
        hue_deg += 360.0;
    }
    let h = ((hue_deg / 2.0).round() as u16 % 180) as u8;
    [h, s, v]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::red((255, 0, 0), [0, 255, 255])]
    #[case::yellow((255, 255, 0), [30, 255, 255])]
    #[case::green((0, 255, 0), [60, 255, 255])]
    #[case::cyan((0, 255, 255), [90, 255, 255])]
    #[case::blue((0, 0, 255), [120, 255, 255])]
    #[case::magenta((255, 0, 255), [150, 255, 255])]
    #[case::black((0, 0, 0), [0, 0, 0])]
    #[case::gray((128, 128, 128), [0, 0, 128])]
    #[case::white((255, 255, 255), [0, 0, 255])]
    fn test_primary_colors(#[case] rgb: (u8, u8, u8), #[case] expected: [u8; 3]) {
        assert_eq!(rgb_to_hsv(rgb.0, rgb.1, rgb.2), expected);
    }

    #[test]
    fn test_skin_tone() {
        // max 220, min 150, hue = 60 * 30 / 70 = 25.7 deg
        assert_eq!(rgb_to_hsv(220, 180, 150), [13, 81, 220]);
    }

    #[test]
    fn test_hue_wraps_below_180() {
        // Almost-red with a hint of blue lands just under 360 degrees.
        let [h, _, _] = rgb_to_hsv(255, 0, 1);
        assert!(h < 180);
        assert!(h == 0 || h >= 179);
    }
}

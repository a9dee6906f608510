use serde::{Deserialize, Serialize};

pub const MAX_HUE: u8 = 179;
pub const MAX_SATURATION: u8 = 255;
pub const MAX_VALUE: u8 = 255;

/// Inclusive HSV acceptance range for skin pixels.
///
/// Hue follows the 8-bit convention (degrees / 2, so 0..=179). The value is
/// supplied fresh for every frame and may change between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub low_h: u8,
    pub high_h: u8,
    pub low_s: u8,
    pub high_s: u8,
    pub low_v: u8,
    pub high_v: u8,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            low_h: 0,
            high_h: MAX_HUE,
            low_s: 0,
            high_s: MAX_SATURATION,
            low_v: 165,
            high_v: MAX_VALUE,
        }
    }
}

impl ThresholdConfig {
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        let [h, s, v] = hsv;
        (self.low_h..=self.high_h).contains(&h)
            && (self.low_s..=self.high_s).contains(&s)
            && (self.low_v..=self.high_v).contains(&v)
    }

    /// Checks that both hue bounds fit the 0..=179 range.
    ///
    /// Saturation and value cover the whole byte range, and `low > high`
    /// is allowed (it simply matches nothing).
    pub fn validate(&self) -> Result<(), String> {
        for (name, v) in [("low_h", self.low_h), ("high_h", self.high_h)] {
            if v > MAX_HUE {
                return Err(format!("{name} must be between 0 and {MAX_HUE}, got {v}"));
            }
        }
        Ok(())
    }
}

use image::{GrayImage, Luma};

use crate::segmentation::domain::hsv::rgb_to_hsv;
use crate::shared::binary_mask::{BinaryMask, FOREGROUND};
use crate::shared::error::InputError;
use crate::shared::frame::Frame;
use crate::shared::threshold_config::ThresholdConfig;

/// Thresholds a color frame into a skin mask in HSV space.
///
/// Stateless: the threshold range is passed per call so an operator can retune
/// it between frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkinSegmenter;

impl SkinSegmenter {
    pub fn new() -> Self {
        Self
    }

    /// Marks a pixel foreground iff its H, S and V all sit inside `cfg`.
    pub fn segment(&self, frame: &Frame, cfg: &ThresholdConfig) -> Result<BinaryMask, InputError> {
        frame.validate()?;

        let mut mask = GrayImage::new(frame.width(), frame.height());
        let pixels = frame.as_ndarray();
        for (y, row) in pixels.outer_iter().enumerate() {
            for (x, px) in row.outer_iter().enumerate() {
                if cfg.contains(rgb_to_hsv(px[0], px[1], px[2])) {
                    mask.put_pixel(x as u32, y as u32, Luma([FOREGROUND]));
                }
            }
        }

        let mask = BinaryMask::from_image(mask);
        log::debug!(
            "frame {}: {} skin pixels",
            frame.index(),
            mask.foreground_count()
        );
        Ok(mask)
    }
}

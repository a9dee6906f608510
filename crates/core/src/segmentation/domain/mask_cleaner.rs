use imageproc::distance_transform::Norm;
use imageproc::filter::median_filter;
use imageproc::morphology::{close, open};

use crate::shared::binary_mask::BinaryMask;
use crate::shared::error::InputError;

/// 7x7 median window.
pub const DEFAULT_MEDIAN_RADIUS: u32 = 3;
/// 5x5 structuring element.
pub const DEFAULT_MORPH_RADIUS: u8 = 2;

/// Removes speckle noise and fills pinholes in a skin mask.
///
/// Runs, in this order: median filter, opening, closing. Opening deletes
/// foreground specks smaller than the structuring element, closing fills
/// background holes of the same scale.
#[derive(Clone, Copy, Debug)]
pub struct MaskCleaner {
    median_radius: u32,
    morph_radius: u8,
}

impl MaskCleaner {
    pub fn new(median_radius: u32, morph_radius: u8) -> Self {
        Self {
            median_radius,
            morph_radius,
        }
    }

    pub fn clean(&self, mask: &BinaryMask) -> Result<BinaryMask, InputError> {
        mask.validate()?;

        let smoothed = median_filter(mask.as_image(), self.median_radius, self.median_radius);
        // At radius 2 the L1 diamond and the L2 disc (distances rounded up) are
        // the same 13-pixel element.
        let opened = open(&smoothed, Norm::L1, self.morph_radius);
        let closed = close(&opened, Norm::L1, self.morph_radius);

        Ok(BinaryMask::from_image(closed))
    }
}

impl Default for MaskCleaner {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIAN_RADIUS, DEFAULT_MORPH_RADIUS)
    }
}

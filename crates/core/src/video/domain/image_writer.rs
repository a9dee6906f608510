use std::path::Path;

use crate::shared::binary_mask::BinaryMask;
use crate::shared::frame::Frame;

/// Persists annotated frames and diagnostic masks as image files.
pub trait ImageWriter: Send {
    fn write_frame(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    fn write_mask(&self, path: &Path, mask: &BinaryMask)
        -> Result<(), Box<dyn std::error::Error>>;
}

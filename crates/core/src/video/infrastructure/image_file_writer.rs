use std::path::Path;

use crate::shared::binary_mask::BinaryMask;
use crate::shared::frame::Frame;
use crate::video::domain::image_writer::ImageWriter;

/// Writes frames and masks with the `image` crate; the format follows the
/// file extension.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

impl ImageWriter for ImageFileWriter {
    fn write_frame(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        frame.validate()?;
        ensure_parent(path)?;
        let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or("Failed to create image from frame data")?;
        img.save(path)?;
        Ok(())
    }

    fn write_mask(
        &self,
        path: &Path,
        mask: &BinaryMask,
    ) -> Result<(), Box<dyn std::error::Error>> {
        mask.validate()?;
        ensure_parent(path)?;
        mask.as_image().save(path)?;
        Ok(())
    }
}

use std::path::Path;

use crate::shared::frame::{Frame, RGB_CHANNELS};
use crate::shared::stream_metadata::StreamMetadata;
use crate::video::domain::frame_source::FrameSource;

/// Adapts a single still image to the [`FrameSource`] interface.
///
/// The image is a one-frame stream with `fps=0` and `total_frames=1`, so a
/// photo of a hand goes through the same loop as a video.
pub struct ImageFileSource {
    frame: Option<Frame>,
}

impl ImageFileSource {
    pub fn new() -> Self {
        Self { frame: None }
    }
}

impl Default for ImageFileSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes any format the `image` crate knows into an RGB [`Frame`].
pub(crate) fn decode_rgb(path: &Path, index: usize) -> Result<Frame, Box<dyn std::error::Error>> {
    let rgb = image::open(path)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Frame::new(rgb.into_raw(), width, height, RGB_CHANNELS, index))
}

impl FrameSource for ImageFileSource {
    fn open(&mut self, path: &Path) -> Result<StreamMetadata, Box<dyn std::error::Error>> {
        let frame = decode_rgb(path, 0)?;
        let metadata = StreamMetadata {
            width: frame.width(),
            height: frame.height(),
            fps: 0.0,
            total_frames: 1,
            source_path: Some(path.to_path_buf()),
        };
        self.frame = Some(frame);
        Ok(metadata)
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        if self.frame.is_none() {
            return Box::new(std::iter::once(Err("ImageFileSource: not opened".into())));
        }
        Box::new(self.frame.take().into_iter().map(Ok))
    }

    fn close(&mut self) {
        self.frame = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_test_image(dir: &Path, width: u32, height: u32) -> PathBuf {
        let path = dir.join("hand.png");
        let mut img = image::RgbImage::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb([220, 180, 150]);
        }
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_open_returns_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), 64, 48);
        let mut source = ImageFileSource::new();
        let meta = source.open(&path).unwrap();
        assert_eq!(meta.width, 64);
        assert_eq!(meta.height, 48);
        assert!(meta.is_still_image());
        assert_eq!(meta.source_path, Some(path));
    }

    #[test]
    fn test_open_nonexistent_fails() {
        let mut source = ImageFileSource::new();
        assert!(source.open(Path::new("/nonexistent/hand.png")).is_err());
    }

    #[test]
    fn test_frames_yields_single_rgb_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), 64, 48);
        let mut source = ImageFileSource::new();
        source.open(&path).unwrap();

        let frames: Vec<_> = source.frames().map(|f| f.unwrap()).collect();
        assert_eq!(frames.len(), 1);
        let frame = &frames[0];
        assert_eq!(frame.index(), 0);
        assert_eq!(frame.channels(), 3);
        assert!(frame.validate().is_ok());
        assert_eq!(&frame.data()[..3], &[220, 180, 150]);
    }

    #[test]
    fn test_frames_without_open_returns_error() {
        let mut source = ImageFileSource::new();
        assert!(source.frames().next().unwrap().is_err());
    }

    #[test]
    fn test_grayscale_input_is_expanded_to_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        image::GrayImage::from_pixel(8, 8, image::Luma([90])).save(&path).unwrap();

        let frame = decode_rgb(&path, 3).unwrap();
        assert_eq!(frame.index(), 3);
        assert_eq!(frame.data().len(), 8 * 8 * 3);
        assert_eq!(&frame.data()[..3], &[90, 90, 90]);
    }

    #[test]
    fn test_close_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), 10, 10);
        let mut source = ImageFileSource::new();
        source.open(&path).unwrap();
        source.close();
        source.close();
    }
}

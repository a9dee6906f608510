use std::path::{Path, PathBuf};

use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;
use crate::shared::stream_metadata::StreamMetadata;
use crate::video::domain::frame_source::FrameSource;
use crate::video::infrastructure::image_file_source::decode_rgb;

/// Treats a directory of still images as a stream, in lexical file-name
/// order. Files are decoded lazily, one per frame.
pub struct ImageSequenceSource {
    files: Vec<PathBuf>,
    opened: bool,
}

impl ImageSequenceSource {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            opened: false,
        }
    }
}

impl Default for ImageSequenceSource {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn list_images(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_image_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

impl FrameSource for ImageSequenceSource {
    fn open(&mut self, path: &Path) -> Result<StreamMetadata, Box<dyn std::error::Error>> {
        let files = list_images(path)?;
        let first = files
            .first()
            .ok_or_else(|| format!("No images found in {}", path.display()))?;
        let (width, height) = image::image_dimensions(first)?;

        let metadata = StreamMetadata {
            width,
            height,
            fps: 0.0,
            total_frames: files.len(),
            source_path: Some(path.to_path_buf()),
        };
        log::debug!("Image sequence: {} files in {}", files.len(), path.display());
        self.files = files;
        self.opened = true;
        Ok(metadata)
    }

    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
        if !self.opened {
            return Box::new(std::iter::once(Err(
                "ImageSequenceSource: not opened".into()
            )));
        }
        Box::new(
            self.files
                .iter()
                .enumerate()
                .map(|(index, path)| decode_rgb(path, index)),
        )
    }

    fn close(&mut self) {
        self.files.clear();
        self.opened = false;
    }
}

use image::{GrayImage, Luma};

use crate::shared::error::InputError;

pub const FOREGROUND: u8 = 255;
pub const BACKGROUND: u8 = 0;

/// Single-channel foreground/background grid with the source frame's size.
///
/// Backed by an [`image::GrayImage`] so the `imageproc` operators can run on
/// it directly. Any nonzero value counts as foreground.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    image: GrayImage,
}

impl BinaryMask {
    /// All-background mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::new(width, height),
        }
    }

    /// Wraps an existing grayscale image, normalizing nonzero values to
    /// [`FOREGROUND`].
    pub fn from_image(mut image: GrayImage) -> Self {
        for p in image.pixels_mut() {
            if p[0] != BACKGROUND {
                p[0] = FOREGROUND;
            }
        }
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.width() == 0 || self.height() == 0 {
            return Err(InputError::EmptyMask {
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }

    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.image.get_pixel(x, y)[0] != BACKGROUND
    }

    pub fn set(&mut self, x: u32, y: u32, foreground: bool) {
        let v = if foreground { FOREGROUND } else { BACKGROUND };
        self.image.put_pixel(x, y, Luma([v]));
    }

    /// Marks the axis-aligned block `[x0, x1) x [y0, y1)` as foreground,
    /// clipped to the mask.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32) {
        for y in y0..y1.min(self.height()) {
            for x in x0..x1.min(self.width()) {
                self.image.put_pixel(x, y, Luma([FOREGROUND]));
            }
        }
    }

    pub fn row_has_foreground(&self, y: u32) -> bool {
        self.row(y).iter().any(|&v| v != BACKGROUND)
    }

    /// Blanks one full row. Out-of-range rows are ignored.
    pub fn clear_row(&mut self, y: u32) {
        if y >= self.height() {
            return;
        }
        let w = self.width() as usize;
        let start = y as usize * w;
        let raw: &mut [u8] = &mut self.image;
        raw[start..start + w].fill(BACKGROUND);
    }

    /// Blanks every row from `y` down to the bottom edge.
    pub fn clear_rows_from(&mut self, y: u32) {
        let w = self.width() as usize;
        let start = (y.min(self.height()) as usize) * w;
        let raw: &mut [u8] = &mut self.image;
        raw[start..].fill(BACKGROUND);
    }

    /// Index of the first row holding any foreground, scanning top-down.
    pub fn top_foreground_row(&self) -> Option<u32> {
        (0..self.height()).find(|&y| self.row_has_foreground(y))
    }

    pub fn foreground_count(&self) -> usize {
        self.image.as_raw().iter().filter(|&&v| v != BACKGROUND).count()
    }

    pub fn is_blank(&self) -> bool {
        self.image.as_raw().iter().all(|&v| v == BACKGROUND)
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }

    fn row(&self, y: u32) -> &[u8] {
        let w = self.width() as usize;
        let start = y as usize * w;
        &self.image.as_raw()[start..start + w]
    }
}

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// Bottom rows the CLI blanks before palm removal to drop the wrist.
pub const DEFAULT_WRIST_BAND_ROWS: u32 = 150;

/// File-name stems for per-frame output images.
pub const ANNOTATED_FRAME_PREFIX: &str = "frame";
pub const MASK_FRAME_PREFIX: &str = "mask";

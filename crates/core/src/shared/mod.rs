pub mod binary_mask;
pub mod constants;
pub mod contour;
pub mod error;
pub mod frame;
pub mod oriented_rect;
pub mod stream_metadata;
pub mod threshold_config;

use thiserror::Error;

/// Input-validation failures. Raised before any stage produces output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("frame is empty ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },
    #[error("frame has {0} channels, expected 3")]
    UnsupportedChannels(u8),
    #[error("frame data has {actual} bytes, expected {expected}")]
    DataLength { expected: usize, actual: usize },
    #[error("mask is empty ({width}x{height})")]
    EmptyMask { width: u32, height: u32 },
}

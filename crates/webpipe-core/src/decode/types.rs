//! Core types for WebP decoding.

use thiserror::Error;

/// Bytes per decoded pixel (RGBA).
pub const BYTES_PER_PIXEL: usize = 4;

/// Error types for decoding operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The data does not start with a recognizable WebP header.
    #[error("Invalid or unsupported WebP header")]
    BadHeader,

    /// The bitstream is corrupt or truncated.
    #[error("Corrupted or incomplete WebP bitstream")]
    DecodeFailed,

    /// The output buffer cannot hold `stride * height` bytes.
    #[error("Output buffer holds {actual} bytes, {required} required")]
    BufferTooSmall { required: usize, actual: usize },

    /// The output stride is narrower than one row of RGBA pixels.
    #[error("Output stride {stride} is smaller than the row size {minimum}")]
    StrideTooSmall { stride: usize, minimum: usize },
}

/// Bytes needed for `height` rows at `stride`.
pub fn required_len(stride: usize, height: u32) -> Option<usize> {
    stride.checked_mul(height as usize)
}

//! Error types for the encode pipeline.

use std::fmt;

use thiserror::Error;

use super::EncodeStage;

/// Native encoder failure codes, as reported on the codec's picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingErrorCode {
    OutOfMemory,
    BitstreamOutOfMemory,
    NullParameter,
    InvalidConfiguration,
    BadDimension,
    PartitionZeroOverflow,
    PartitionOverflow,
    BadWrite,
    FileTooBig,
    UserAbort,
    /// A code outside the documented table.
    Unknown(i32),
}

impl EncodingErrorCode {
    /// Map a native error code to its variant.
    pub fn from_native(code: i32) -> Self {
        match code {
            1 => EncodingErrorCode::OutOfMemory,
            2 => EncodingErrorCode::BitstreamOutOfMemory,
            3 => EncodingErrorCode::NullParameter,
            4 => EncodingErrorCode::InvalidConfiguration,
            5 => EncodingErrorCode::BadDimension,
            6 => EncodingErrorCode::PartitionZeroOverflow,
            7 => EncodingErrorCode::PartitionOverflow,
            8 => EncodingErrorCode::BadWrite,
            9 => EncodingErrorCode::FileTooBig,
            10 => EncodingErrorCode::UserAbort,
            other => EncodingErrorCode::Unknown(other),
        }
    }

    /// The native numeric code.
    pub fn native(self) -> i32 {
        match self {
            EncodingErrorCode::OutOfMemory => 1,
            EncodingErrorCode::BitstreamOutOfMemory => 2,
            EncodingErrorCode::NullParameter => 3,
            EncodingErrorCode::InvalidConfiguration => 4,
            EncodingErrorCode::BadDimension => 5,
            EncodingErrorCode::PartitionZeroOverflow => 6,
            EncodingErrorCode::PartitionOverflow => 7,
            EncodingErrorCode::BadWrite => 8,
            EncodingErrorCode::FileTooBig => 9,
            EncodingErrorCode::UserAbort => 10,
            EncodingErrorCode::Unknown(code) => code,
        }
    }

    /// Human-readable reason for the code.
    pub fn message(self) -> &'static str {
        match self {
            EncodingErrorCode::OutOfMemory => "out of memory allocating objects",
            EncodingErrorCode::BitstreamOutOfMemory => "out of memory flushing bits",
            EncodingErrorCode::NullParameter => "a required pointer parameter was null",
            EncodingErrorCode::InvalidConfiguration => "configuration is invalid",
            EncodingErrorCode::BadDimension => "picture has invalid width or height",
            EncodingErrorCode::PartitionZeroOverflow => "partition is bigger than 512k",
            EncodingErrorCode::PartitionOverflow => "partition is bigger than 16M",
            EncodingErrorCode::BadWrite => "error while flushing bytes",
            EncodingErrorCode::FileTooBig => "file is bigger than 4G",
            EncodingErrorCode::UserAbort => "abort request by user",
            EncodingErrorCode::Unknown(_) => "unknown encoder error",
        }
    }
}

impl fmt::Display for EncodingErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Errors that can occur while encoding an image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The configuration failed validation.
    #[error("Invalid encode configuration: {0}")]
    ConfigInvalid(String),

    /// The native picture or output sink could not be obtained.
    #[error("Failed to allocate codec resources: {0}")]
    AllocationFailed(String),

    /// The pixel layout is outside the recognized set or violates its
    /// buffer invariants.
    #[error("Unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),

    /// The target dimensions were degenerate or the codec refused to rescale.
    #[error("Resize to {width}x{height} failed: {reason}")]
    ResizeFailed {
        width: u32,
        height: u32,
        reason: String,
    },

    /// The codec reported a failure.
    #[error("Encoding failed: {code} (code {})", .code.native())]
    EncodeFailed { code: EncodingErrorCode },

    /// The destination rejected the encoded bytes.
    #[error("Failed to write encoded output: {0}")]
    WriteFailed(#[source] std::io::Error),

    /// A PNG/JPEG input could not be decoded.
    #[error("Failed to decode source image: {0}")]
    SourceDecode(#[from] image::ImageError),
}

impl EncodeError {
    /// The pipeline stage associated with this class of error.
    pub fn stage(&self) -> EncodeStage {
        match self {
            EncodeError::SourceDecode(_) => EncodeStage::Init,
            EncodeError::ConfigInvalid(_) => EncodeStage::ConfigValidated,
            EncodeError::AllocationFailed(_) => EncodeStage::PictureAllocated,
            EncodeError::UnsupportedPixelFormat(_) => EncodeStage::PixelsImported,
            EncodeError::ResizeFailed { .. } => EncodeStage::Resized,
            EncodeError::EncodeFailed { .. } => EncodeStage::Encoded,
            EncodeError::WriteFailed(_) => EncodeStage::Flushed,
        }
    }
}

//! WebP decoding through libwebp.
//!
//! Decoding is all-or-nothing: a corrupt or truncated bitstream fails the
//! whole call and the caller's buffer is left untouched.

use std::ffi::c_int;

use image::RgbaImage;
use libwebp_sys as sys;
use tracing::debug;

use super::types::{required_len, DecodeError, BYTES_PER_PIXEL};

/// Read the canvas dimensions from a WebP header.
///
/// # Errors
///
/// Returns `DecodeError::BadHeader` if `data` is not a WebP bitstream.
pub fn probe(data: &[u8]) -> Result<(u32, u32), DecodeError> {
    if data.is_empty() {
        return Err(DecodeError::BadHeader);
    }

    let mut width: c_int = 0;
    let mut height: c_int = 0;
    if unsafe { sys::WebPGetInfo(data.as_ptr(), data.len(), &mut width, &mut height) } == 0 {
        return Err(DecodeError::BadHeader);
    }

    debug!(width, height, bytes = data.len(), "probed WebP header");
    Ok((width as u32, height as u32))
}

/// Decode `data` as RGBA into `buffer`, one row every `stride` bytes.
///
/// `stride` must be at least `width * 4` and `buffer` must hold
/// `stride * height` bytes. Bytes between the end of a row and the next
/// stride boundary are not written.
///
/// # Errors
///
/// Returns `BadHeader` if the header cannot be read, `StrideTooSmall` or
/// `BufferTooSmall` if the buffer contract is violated, and `DecodeFailed`
/// if the bitstream is corrupt.
pub fn decode_into<'b>(
    data: &[u8],
    buffer: &'b mut [u8],
    stride: usize,
) -> Result<&'b mut [u8], DecodeError> {
    let (width, height) = probe(data)?;

    let row_bytes = width as usize * BYTES_PER_PIXEL;
    if stride < row_bytes {
        return Err(DecodeError::StrideTooSmall {
            stride,
            minimum: row_bytes,
        });
    }
    let required = required_len(stride, height).ok_or(DecodeError::BufferTooSmall {
        required: usize::MAX,
        actual: buffer.len(),
    })?;
    if buffer.len() < required {
        return Err(DecodeError::BufferTooSmall {
            required,
            actual: buffer.len(),
        });
    }

    // Decode into scratch space so a failure cannot leave partial rows behind.
    let mut scratch = vec![0u8; row_bytes * height as usize];
    let decoded = unsafe {
        sys::WebPDecodeRGBAInto(
            data.as_ptr(),
            data.len(),
            scratch.as_mut_ptr(),
            scratch.len(),
            row_bytes as c_int,
        )
    };
    if decoded.is_null() {
        debug!(width, height, "WebP bitstream failed to decode");
        return Err(DecodeError::DecodeFailed);
    }

    for (row, pixels) in scratch.chunks_exact(row_bytes).enumerate() {
        let start = row * stride;
        buffer[start..start + row_bytes].copy_from_slice(pixels);
    }

    debug!(width, height, stride, "decoded WebP bitstream");
    Ok(buffer)
}

/// Decode `data` into a new RGBA image.
pub fn decode(data: &[u8]) -> Result<RgbaImage, DecodeError> {
    let (width, height) = probe(data)?;
    let stride = width as usize * BYTES_PER_PIXEL;
    let mut buffer = vec![0u8; stride * height as usize];
    decode_into(data, &mut buffer, stride)?;
    RgbaImage::from_raw(width, height, buffer).ok_or(DecodeError::DecodeFailed)
}

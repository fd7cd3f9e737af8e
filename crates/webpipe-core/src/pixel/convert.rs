//! Colorspace conversion for layouts the codec cannot import directly.
//!
//! Planar luma/chroma with any subsampling other than 4:2:0 and single
//! channel grayscale are expanded into packed interleaved buffers here.
//! The luma/chroma transform is BT.601 full range in 16.16 fixed point, so
//! the same input always produces byte-identical output.

use super::{AdaptedImage, ChromaSubsampling, PixelLayout, Plane};
use crate::encode::EncodeError;

// BT.601 full-range coefficients scaled by 65536.
const CR_TO_R: i32 = 91_881;
const CB_TO_G: i32 = 22_554;
const CR_TO_G: i32 = 46_802;
const CB_TO_B: i32 = 116_130;

/// Convert one full-range Y'CbCr sample to RGB.
///
/// Neutral chroma (128, 128) maps every luma value to the identical gray.
#[inline]
pub fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> [u8; 3] {
    // y * 0x10101 is y / 255 in 16.16 fixed point, which keeps 255 at 255.
    let luma = i32::from(y) * 0x10101;
    let cb = i32::from(cb) - 128;
    let cr = i32::from(cr) - 128;

    [
        clamp_channel(luma + CR_TO_R * cr),
        clamp_channel(luma - CB_TO_G * cb - CR_TO_G * cr),
        clamp_channel(luma + CB_TO_B * cb),
    ]
}

#[inline]
fn clamp_channel(value: i32) -> u8 {
    (value.clamp(0, 0x00ff_ffff) >> 16) as u8
}

/// Replicate each luma sample into the R, G and B channels.
pub(crate) fn gray_to_rgb(luma: &Plane<'_>, width: usize, height: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for &value in luma.row(y, width) {
            out.extend_from_slice(&[value, value, value]);
        }
    }
    out
}

/// Expand planar luma/chroma into packed RGB, or RGBA when `alpha` is set.
///
/// Planes must already satisfy `PixelLayout::validate`.
pub(crate) fn planar_to_packed(
    y: &Plane<'_>,
    u: &Plane<'_>,
    v: &Plane<'_>,
    alpha: Option<&Plane<'_>>,
    subsampling: ChromaSubsampling,
    width: usize,
    height: usize,
) -> Vec<u8> {
    let (fx, fy) = subsampling.factors();
    let channels = if alpha.is_some() { 4 } else { 3 };
    let mut out = Vec::with_capacity(width * height * channels);

    for row in 0..height {
        let luma = y.row(row, width);
        let cb_row = (row / fy) * u.stride;
        let cr_row = (row / fy) * v.stride;
        let alpha_row = alpha.map(|a| a.row(row, width));

        for (col, &l) in luma.iter().enumerate() {
            let cx = col / fx;
            out.extend_from_slice(&ycbcr_to_rgb(l, u.data[cb_row + cx], v.data[cr_row + cx]));
            if let Some(a) = alpha_row {
                out.push(a[col]);
            }
        }
    }
    out
}

/// Validate an adapted image and convert it into a layout the codec imports
/// natively.
///
/// Packed RGBA, packed RGB and planar 4:2:0 pass through untouched (still
/// borrowed). Grayscale becomes packed RGB; other planar subsamplings
/// become packed RGB or RGBA.
pub fn canonicalize(image: AdaptedImage<'_>) -> Result<AdaptedImage<'_>, EncodeError> {
    image.layout.validate(image.width, image.height)?;

    let (width, height) = (image.width as usize, image.height as usize);
    let layout = match image.layout {
        PixelLayout::Grayscale(plane) => {
            PixelLayout::PackedRgb(Plane::owned(gray_to_rgb(&plane, width, height), width * 3))
        }
        PixelLayout::PlanarYuv {
            y,
            u,
            v,
            alpha,
            subsampling,
        } if subsampling != ChromaSubsampling::S420 => {
            let packed = planar_to_packed(&y, &u, &v, alpha.as_ref(), subsampling, width, height);
            if alpha.is_some() {
                PixelLayout::PackedRgba(Plane::owned(packed, width * 4))
            } else {
                PixelLayout::PackedRgb(Plane::owned(packed, width * 3))
            }
        }
        native => native,
    };

    Ok(AdaptedImage {
        width: image.width,
        height: image.height,
        layout,
    })
}

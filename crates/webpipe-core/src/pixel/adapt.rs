//! Classification of source images into pixel layouts.
//!
//! Layouts the codec can read directly (packed RGBA/RGB and planar 4:2:0)
//! are exposed as borrowed planes. Every other `image` color type goes
//! through a per-pixel resample into a freshly allocated packed buffer.

use image::{DynamicImage, GenericImageView};
use tracing::warn;

use super::{AdaptedImage, PixelLayout, Plane, RawPixels, SourceImage, YCbCrImage};
use crate::encode::EncodeError;

/// Classify a source image into a [`PixelLayout`].
///
/// # Errors
///
/// Only [`SourceImage::Raw`] can fail: a component count other than 1, 3
/// or 4 returns `EncodeError::UnsupportedPixelFormat`. Unrecognized `image`
/// color types never fail; they fall back to the generic per-pixel path.
pub fn adapt(source: SourceImage<'_>) -> Result<AdaptedImage<'_>, EncodeError> {
    match source {
        SourceImage::Dynamic(image) => Ok(adapt_dynamic(image)),
        SourceImage::YCbCr(image) => Ok(adapt_ycbcr(image)),
        SourceImage::Raw(raw) => adapt_raw(raw),
    }
}

fn adapt_dynamic(image: &DynamicImage) -> AdaptedImage<'_> {
    let (width, height) = image.dimensions();
    let w = width as usize;

    let layout = match image {
        DynamicImage::ImageRgba8(buf) => PixelLayout::PackedRgba(Plane::borrowed(buf.as_raw(), w * 4)),
        DynamicImage::ImageRgb8(buf) => PixelLayout::PackedRgb(Plane::borrowed(buf.as_raw(), w * 3)),
        DynamicImage::ImageLuma8(buf) => PixelLayout::Grayscale(Plane::borrowed(buf.as_raw(), w)),
        other => resample_generic(other),
    };

    AdaptedImage {
        width,
        height,
        layout,
    }
}

/// Resample every pixel through `GenericImageView::get_pixel`.
///
/// Produces packed RGBA when the color type carries alpha, packed RGB
/// otherwise.
fn resample_generic(image: &DynamicImage) -> PixelLayout<'static> {
    let (width, height) = image.dimensions();
    let color = image.color();
    warn!(
        color_type = ?color,
        width,
        height,
        "no direct layout for color type, resampling per pixel"
    );

    let channels = if color.has_alpha() { 4 } else { 3 };
    let mut buf = Vec::with_capacity(width as usize * height as usize * channels);
    for (_, _, pixel) in image.pixels() {
        buf.extend_from_slice(&pixel.0[..channels]);
    }

    let stride = width as usize * channels;
    if channels == 4 {
        PixelLayout::PackedRgba(Plane::owned(buf, stride))
    } else {
        PixelLayout::PackedRgb(Plane::owned(buf, stride))
    }
}

fn adapt_ycbcr(image: &YCbCrImage) -> AdaptedImage<'_> {
    AdaptedImage {
        width: image.width,
        height: image.height,
        layout: PixelLayout::PlanarYuv {
            y: Plane::borrowed(&image.y, image.y_stride),
            u: Plane::borrowed(&image.cb, image.c_stride),
            v: Plane::borrowed(&image.cr, image.c_stride),
            alpha: image
                .alpha
                .as_deref()
                .map(|a| Plane::borrowed(a, image.a_stride)),
            subsampling: image.subsampling,
        },
    }
}

fn adapt_raw(raw: RawPixels<'_>) -> Result<AdaptedImage<'_>, EncodeError> {
    let w = raw.width as usize;
    let layout = match raw.components {
        4 => PixelLayout::PackedRgba(Plane::borrowed(raw.data, w * 4)),
        3 => PixelLayout::PackedRgb(Plane::borrowed(raw.data, w * 3)),
        1 => PixelLayout::Grayscale(Plane::borrowed(raw.data, w)),
        n => {
            return Err(EncodeError::UnsupportedPixelFormat(format!(
                "{n} components per pixel"
            )))
        }
    };

    Ok(AdaptedImage {
        width: raw.width,
        height: raw.height,
        layout,
    })
}

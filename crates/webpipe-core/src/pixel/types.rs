//! Core types describing source images and their pixel layouts.

use std::borrow::Cow;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::encode::EncodeError;

/// Chroma subsampling ratio of a planar luma/chroma image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChromaSubsampling {
    /// Full chroma resolution.
    S444,
    /// Half horizontal chroma resolution.
    S422,
    /// Half horizontal and half vertical chroma resolution.
    #[default]
    S420,
    /// Half vertical chroma resolution.
    S440,
    /// Quarter horizontal chroma resolution.
    S411,
    /// Quarter horizontal and half vertical chroma resolution.
    S410,
}

impl ChromaSubsampling {
    /// Horizontal and vertical divisors applied to luma coordinates.
    #[inline]
    pub fn factors(self) -> (usize, usize) {
        match self {
            ChromaSubsampling::S444 => (1, 1),
            ChromaSubsampling::S422 => (2, 1),
            ChromaSubsampling::S420 => (2, 2),
            ChromaSubsampling::S440 => (1, 2),
            ChromaSubsampling::S411 => (4, 1),
            ChromaSubsampling::S410 => (4, 2),
        }
    }

    /// Size of each chroma plane for a luma plane of `width x height`.
    pub fn chroma_dimensions(self, width: usize, height: usize) -> (usize, usize) {
        let (fx, fy) = self.factors();
        (width.div_ceil(fx), height.div_ceil(fy))
    }
}

/// One plane of pixel data with its row stride in bytes.
///
/// The data is borrowed when it points straight into the caller's image and
/// owned when it was produced by a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane<'a> {
    pub data: Cow<'a, [u8]>,
    pub stride: usize,
}

impl<'a> Plane<'a> {
    pub fn borrowed(data: &'a [u8], stride: usize) -> Self {
        Self {
            data: Cow::Borrowed(data),
            stride,
        }
    }

    pub fn owned(data: Vec<u8>, stride: usize) -> Self {
        Self {
            data: Cow::Owned(data),
            stride,
        }
    }

    /// Returns true if the plane references the caller's memory.
    pub fn is_borrowed(&self) -> bool {
        matches!(self.data, Cow::Borrowed(_))
    }

    /// The first `len` bytes of row `y`.
    #[inline]
    pub fn row(&self, y: usize, len: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + len]
    }

    /// Check the plane invariants: `stride >= row_bytes` and
    /// `data.len() >= stride * rows`.
    pub(crate) fn check(&self, name: &str, row_bytes: usize, rows: usize) -> Result<(), EncodeError> {
        if self.stride < row_bytes {
            return Err(EncodeError::UnsupportedPixelFormat(format!(
                "{name} stride {} is smaller than the row size {row_bytes}",
                self.stride
            )));
        }
        let required = self.stride.checked_mul(rows).ok_or_else(|| {
            EncodeError::UnsupportedPixelFormat(format!("{name} plane size overflows"))
        })?;
        if self.data.len() < required {
            return Err(EncodeError::UnsupportedPixelFormat(format!(
                "{name} plane holds {} bytes, expected at least {required}",
                self.data.len()
            )));
        }
        Ok(())
    }
}

/// The closed set of pixel layouts the encoder understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelLayout<'a> {
    /// Interleaved 8-bit RGBA, non-premultiplied.
    PackedRgba(Plane<'a>),
    /// Interleaved 8-bit RGB.
    PackedRgb(Plane<'a>),
    /// Planar luma/chroma (JFIF full range) with an optional alpha plane.
    PlanarYuv {
        y: Plane<'a>,
        u: Plane<'a>,
        v: Plane<'a>,
        alpha: Option<Plane<'a>>,
        subsampling: ChromaSubsampling,
    },
    /// Single-channel 8-bit luma.
    Grayscale(Plane<'a>),
}

impl PixelLayout<'_> {
    /// Number of components per pixel after import.
    pub fn components(&self) -> usize {
        match self {
            PixelLayout::PackedRgba(_) => 4,
            PixelLayout::PackedRgb(_) => 3,
            PixelLayout::PlanarYuv { alpha, .. } => {
                if alpha.is_some() {
                    4
                } else {
                    3
                }
            }
            PixelLayout::Grayscale(_) => 1,
        }
    }

    pub fn has_alpha(&self) -> bool {
        match self {
            PixelLayout::PackedRgba(_) => true,
            PixelLayout::PlanarYuv { alpha, .. } => alpha.is_some(),
            PixelLayout::PackedRgb(_) | PixelLayout::Grayscale(_) => false,
        }
    }

    /// Returns true if the codec can import this layout without conversion.
    pub fn is_native(&self) -> bool {
        match self {
            PixelLayout::PackedRgba(_) | PixelLayout::PackedRgb(_) => true,
            PixelLayout::PlanarYuv { subsampling, .. } => *subsampling == ChromaSubsampling::S420,
            PixelLayout::Grayscale(_) => false,
        }
    }

    /// Returns true if every plane references the caller's memory.
    pub fn is_zero_copy(&self) -> bool {
        match self {
            PixelLayout::PackedRgba(p) | PixelLayout::PackedRgb(p) | PixelLayout::Grayscale(p) => {
                p.is_borrowed()
            }
            PixelLayout::PlanarYuv { y, u, v, alpha, .. } => {
                y.is_borrowed()
                    && u.is_borrowed()
                    && v.is_borrowed()
                    && alpha.as_ref().map_or(true, Plane::is_borrowed)
            }
        }
    }

    /// Check buffer lengths and strides against the image dimensions.
    ///
    /// Planar 4:2:0 must share one chroma stride since the codec reads both
    /// chroma planes with it.
    pub fn validate(&self, width: u32, height: u32) -> Result<(), EncodeError> {
        let (width, height) = (width as usize, height as usize);
        match self {
            PixelLayout::PackedRgba(plane) => plane.check("RGBA", width * 4, height),
            PixelLayout::PackedRgb(plane) => plane.check("RGB", width * 3, height),
            PixelLayout::Grayscale(plane) => plane.check("luma", width, height),
            PixelLayout::PlanarYuv {
                y,
                u,
                v,
                alpha,
                subsampling,
            } => {
                y.check("Y", width, height)?;
                let (cw, ch) = subsampling.chroma_dimensions(width, height);
                u.check("Cb", cw, ch)?;
                v.check("Cr", cw, ch)?;
                if *subsampling == ChromaSubsampling::S420 && u.stride != v.stride {
                    return Err(EncodeError::UnsupportedPixelFormat(format!(
                        "Cb stride {} differs from Cr stride {}",
                        u.stride, v.stride
                    )));
                }
                if let Some(alpha) = alpha {
                    alpha.check("alpha", width, height)?;
                }
                Ok(())
            }
        }
    }
}

/// A source image classified into a [`PixelLayout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdaptedImage<'a> {
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout<'a>,
}

/// An in-memory planar luma/chroma image, optionally with alpha.
///
/// Samples use the JFIF full-range convention (0-255 for every channel,
/// chroma centered on 128).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YCbCrImage {
    pub width: u32,
    pub height: u32,
    pub subsampling: ChromaSubsampling,
    pub y: Vec<u8>,
    pub cb: Vec<u8>,
    pub cr: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
    pub y_stride: usize,
    pub c_stride: usize,
    pub a_stride: usize,
}

impl YCbCrImage {
    /// Create a black image with tightly packed planes.
    pub fn new(width: u32, height: u32, subsampling: ChromaSubsampling) -> Self {
        let (w, h) = (width as usize, height as usize);
        let (cw, ch) = subsampling.chroma_dimensions(w, h);
        Self {
            width,
            height,
            subsampling,
            y: vec![0; w * h],
            cb: vec![128; cw * ch],
            cr: vec![128; cw * ch],
            alpha: None,
            y_stride: w,
            c_stride: cw,
            a_stride: 0,
        }
    }

    /// Add a fully opaque alpha plane.
    pub fn with_alpha(mut self) -> Self {
        let w = self.width as usize;
        self.alpha = Some(vec![255; w * self.height as usize]);
        self.a_stride = w;
        self
    }

    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }

    /// Index of the luma sample for pixel `(x, y)`.
    #[inline]
    pub fn y_offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.y_stride + x as usize
    }

    /// Index of the chroma samples covering pixel `(x, y)`.
    #[inline]
    pub fn c_offset(&self, x: u32, y: u32) -> usize {
        let (fx, fy) = self.subsampling.factors();
        (y as usize / fy) * self.c_stride + x as usize / fx
    }
}

/// A raw interleaved buffer with an explicit component count.
///
/// Recognized counts are 4 (RGBA), 3 (RGB) and 1 (grayscale).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPixels<'a> {
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
    pub components: u8,
}

impl<'a> RawPixels<'a> {
    pub fn new(data: &'a [u8], width: u32, height: u32, components: u8) -> Self {
        Self {
            data,
            width,
            height,
            components,
        }
    }
}

/// Any image value the encoder accepts.
#[derive(Debug, Clone, Copy)]
pub enum SourceImage<'a> {
    /// An image decoded by the `image` crate.
    Dynamic(&'a DynamicImage),
    /// A planar luma/chroma image.
    YCbCr(&'a YCbCrImage),
    /// A raw interleaved buffer.
    Raw(RawPixels<'a>),
}

impl SourceImage<'_> {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            SourceImage::Dynamic(image) => (image.width(), image.height()),
            SourceImage::YCbCr(image) => (image.width, image.height),
            SourceImage::Raw(raw) => (raw.width, raw.height),
        }
    }
}

impl<'a> From<&'a DynamicImage> for SourceImage<'a> {
    fn from(image: &'a DynamicImage) -> Self {
        SourceImage::Dynamic(image)
    }
}

impl<'a> From<&'a YCbCrImage> for SourceImage<'a> {
    fn from(image: &'a YCbCrImage) -> Self {
        SourceImage::YCbCr(image)
    }
}

impl<'a> From<RawPixels<'a>> for SourceImage<'a> {
    fn from(raw: RawPixels<'a>) -> Self {
        SourceImage::Raw(raw)
    }
}

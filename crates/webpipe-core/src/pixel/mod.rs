//! Pixel source adaptation and colorspace conversion.
//!
//! This module provides functionality for:
//! - Classifying an image into one of a fixed set of pixel layouts
//! - Borrowing the source buffers when the codec can read them directly
//! - Converting grayscale and non-4:2:0 planar images into packed buffers
//!
//! # Examples
//!
//! ```ignore
//! use webpipe_core::pixel::{adapt, canonicalize, SourceImage};
//!
//! let img = image::open("photo.png").unwrap();
//! let adapted = canonicalize(adapt(SourceImage::from(&img)).unwrap()).unwrap();
//! assert!(adapted.layout.is_native());
//! ```

mod adapt;
mod convert;
mod types;

pub use adapt::adapt;
pub use convert::{canonicalize, ycbcr_to_rgb};
pub use types::{
    AdaptedImage, ChromaSubsampling, PixelLayout, Plane, RawPixels, SourceImage, YCbCrImage,
};

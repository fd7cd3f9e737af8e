//! WebP decoding.
//!
//! `probe` reads the canvas size from the header, `decode_into` fills a
//! caller-supplied RGBA buffer with an explicit stride, and `decode` wraps
//! both into a freshly allocated image.
//!
//! # Examples
//!
//! ```ignore
//! use webpipe_core::decode::{decode_into, probe};
//!
//! let data = std::fs::read("photo.webp").unwrap();
//! let (width, height) = probe(&data).unwrap();
//! let stride = width as usize * 4;
//! let mut pixels = vec![0u8; stride * height as usize];
//! decode_into(&data, &mut pixels, stride).unwrap();
//! ```

mod types;
mod webp;

pub use types::{required_len, DecodeError, BYTES_PER_PIXEL};
pub use webp::{decode, decode_into, probe};

//! WebP encoding pipeline.
//!
//! This module provides functionality for:
//! - Building and validating encoder configurations from presets
//! - Resolving resize requests against source dimensions
//! - Driving the native codec through a fixed sequence of stages with
//!   guaranteed release of every native handle
//!
//! # Examples
//!
//! ```ignore
//! use webpipe_core::encode::{encode, EncodeConfig, Preset};
//!
//! let img = image::open("photo.jpg").unwrap();
//! let config = EncodeConfig::with_preset(Preset::Photo, 82.0)
//!     .unwrap()
//!     .with_resize_scale(0.5);
//! let webp = encode(&img, &config).unwrap();
//! std::fs::write("photo.webp", webp.as_bytes()).unwrap();
//! ```

mod codec;
mod config;
mod error;
mod libwebp;
mod pipeline;
mod resize;

pub use codec::Codec;
pub use config::{
    EncodeConfig, FilterSettings, Preset, DEFAULT_QUALITY, MAX_FILTER_SHARPNESS,
    MAX_FILTER_STRENGTH, MAX_SNS_STRENGTH, MAX_THREAD_LEVEL,
};
pub use error::{EncodeError, EncodingErrorCode};
pub use libwebp::{LibWebp, MemorySink, Picture, MAX_DIMENSION};
pub use pipeline::{encode, encode_bytes, encode_to, EncodeStage, EncodedImage, Encoder};
pub use resize::ResizeRequest;

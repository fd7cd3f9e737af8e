//! Webpipe Core - WebP encoding and decoding library
//!
//! This crate normalizes in-memory images from several pixel layouts into a
//! form the bundled libwebp encoder accepts, drives the encoder with a
//! validated configuration, and decodes WebP bitstreams back into RGBA.

pub mod decode;
pub mod encode;
pub mod pixel;

pub use decode::{decode, decode_into, probe, DecodeError};
pub use encode::{
    encode, encode_bytes, encode_to, EncodeConfig, EncodeError, EncodedImage, Encoder, Preset,
    ResizeRequest,
};
pub use pixel::{ChromaSubsampling, RawPixels, SourceImage, YCbCrImage};

//! The encode orchestrator.
//!
//! One call walks `Init -> ConfigValidated -> PictureAllocated ->
//! PixelsImported -> [Resized] -> Encoded -> Flushed -> Released`. Native
//! handles are owned locals of the stage runner, so they are dropped
//! (released) exactly once on every exit path.

use std::fmt;
use std::io::Write;

use tracing::debug;

use super::{Codec, EncodeConfig, EncodeError, LibWebp};
use crate::pixel::{adapt, canonicalize, AdaptedImage, SourceImage};

/// States of one encode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodeStage {
    Init,
    ConfigValidated,
    PictureAllocated,
    PixelsImported,
    Resized,
    Encoded,
    Flushed,
    Released,
}

impl fmt::Display for EncodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EncodeStage::Init => "init",
            EncodeStage::ConfigValidated => "config-validated",
            EncodeStage::PictureAllocated => "picture-allocated",
            EncodeStage::PixelsImported => "pixels-imported",
            EncodeStage::Resized => "resized",
            EncodeStage::Encoded => "encoded",
            EncodeStage::Flushed => "flushed",
            EncodeStage::Released => "released",
        };
        f.write_str(name)
    }
}

/// A finished bitstream with the dimensions it was encoded at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Drives a [`Codec`] through the encode state machine.
#[derive(Debug, Clone, Default)]
pub struct Encoder<C = LibWebp> {
    codec: C,
}

impl Encoder<LibWebp> {
    pub fn new() -> Self {
        Self { codec: LibWebp }
    }
}

impl<C: Codec> Encoder<C> {
    pub fn with_codec(codec: C) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Encode `source` and return the bitstream.
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that fails. Nothing is allocated
    /// when the configuration is invalid.
    pub fn encode<'a>(
        &self,
        source: impl Into<SourceImage<'a>>,
        config: &EncodeConfig,
    ) -> Result<EncodedImage, EncodeError> {
        self.encode_with(source.into(), config, |bytes, width, height| {
            Ok(EncodedImage {
                width,
                height,
                bytes: bytes.to_vec(),
            })
        })
    }

    /// Encode `source` straight from the native buffer into `writer`.
    ///
    /// Returns the number of bytes written.
    pub fn encode_to<'a, W: Write + ?Sized>(
        &self,
        writer: &mut W,
        source: impl Into<SourceImage<'a>>,
        config: &EncodeConfig,
    ) -> Result<usize, EncodeError> {
        self.encode_with(source.into(), config, |bytes, _, _| {
            writer.write_all(bytes).map_err(EncodeError::WriteFailed)?;
            writer.flush().map_err(EncodeError::WriteFailed)?;
            Ok(bytes.len())
        })
    }

    fn encode_with<T>(
        &self,
        source: SourceImage<'_>,
        config: &EncodeConfig,
        flush: impl FnOnce(&[u8], u32, u32) -> Result<T, EncodeError>,
    ) -> Result<T, EncodeError> {
        let (width, height) = source.dimensions();
        debug!(stage = %EncodeStage::Init, width, height);

        config.validate()?;
        let image = canonicalize(adapt(source)?)?;
        self.run(&image, config, flush)
    }

    /// Run the native stages on a canonical image.
    ///
    /// The configuration is validated here as well; buffer invariants are
    /// checked by the codec on import.
    pub fn run<T>(
        &self,
        image: &AdaptedImage<'_>,
        config: &EncodeConfig,
        flush: impl FnOnce(&[u8], u32, u32) -> Result<T, EncodeError>,
    ) -> Result<T, EncodeError> {
        config.validate()?;
        let result = self.run_stages(image, config, flush);
        debug!(stage = %EncodeStage::Released, ok = result.is_ok());
        result
    }

    fn run_stages<T>(
        &self,
        image: &AdaptedImage<'_>,
        config: &EncodeConfig,
        flush: impl FnOnce(&[u8], u32, u32) -> Result<T, EncodeError>,
    ) -> Result<T, EncodeError> {
        let mut native = self.codec.configure(config)?;
        debug!(
            stage = %EncodeStage::ConfigValidated,
            preset = config.preset.name(),
            quality = config.quality,
            lossless = config.lossless
        );

        let mut sink = self.codec.alloc_sink()?;
        let mut picture = self.codec.alloc_picture()?;
        debug!(stage = %EncodeStage::PictureAllocated);

        self.codec.import(&mut picture, image)?;
        debug!(
            stage = %EncodeStage::PixelsImported,
            width = image.width,
            height = image.height,
            components = image.layout.components(),
            zero_copy = image.layout.is_zero_copy()
        );

        if let Some((width, height)) = config.resize.resolve(image.width, image.height)? {
            if (width, height) != (image.width, image.height) {
                self.codec.rescale(&mut picture, width, height)?;
                let (width, height) = self.codec.dimensions(&picture);
                debug!(stage = %EncodeStage::Resized, width, height);
            }
        }

        self.codec.encode(&mut native, &mut picture, &mut sink)?;
        let (width, height) = self.codec.dimensions(&picture);
        let bytes = self.codec.output(&sink);
        debug!(stage = %EncodeStage::Encoded, width, height, bytes = bytes.len());

        let out = flush(bytes, width, height)?;
        debug!(stage = %EncodeStage::Flushed, bytes = bytes.len());
        Ok(out)
    }
}

/// Encode `source` with the bundled libwebp.
pub fn encode<'a>(
    source: impl Into<SourceImage<'a>>,
    config: &EncodeConfig,
) -> Result<EncodedImage, EncodeError> {
    Encoder::new().encode(source, config)
}

/// Encode `source` into `writer` with the bundled libwebp.
pub fn encode_to<'a, W: Write + ?Sized>(
    writer: &mut W,
    source: impl Into<SourceImage<'a>>,
    config: &EncodeConfig,
) -> Result<usize, EncodeError> {
    Encoder::new().encode_to(writer, source, config)
}

/// Decode a PNG or JPEG byte buffer and encode it into `writer`.
///
/// The configuration is validated before the container is decoded.
pub fn encode_bytes<W: Write + ?Sized>(
    writer: &mut W,
    data: &[u8],
    config: &EncodeConfig,
) -> Result<usize, EncodeError> {
    config.validate()?;
    let image = image::load_from_memory(data)?;
    encode_to(writer, &image, config)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io;
    use std::marker::PhantomData;
    use std::rc::Rc;

    use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    use super::*;
    use crate::decode;
    use crate::encode::{EncodingErrorCode, ResizeRequest};
    use crate::pixel::{ycbcr_to_rgb, ChromaSubsampling, RawPixels, YCbCrImage};

    #[derive(Default)]
    struct Counters {
        live: Cell<i32>,
        allocations: Cell<u32>,
        configured: Cell<u32>,
    }

    struct Handle {
        counters: Rc<Counters>,
    }

    impl Handle {
        fn new(counters: &Rc<Counters>) -> Self {
            counters.live.set(counters.live.get() + 1);
            counters.allocations.set(counters.allocations.get() + 1);
            Self {
                counters: Rc::clone(counters),
            }
        }
    }

    impl Drop for Handle {
        fn drop(&mut self) {
            self.counters.live.set(self.counters.live.get() - 1);
        }
    }

    struct FakePicture<'p> {
        _handle: Handle,
        size: (u32, u32),
        _pixels: PhantomData<&'p [u8]>,
    }

    struct FakeSink {
        _handle: Handle,
        bytes: Vec<u8>,
    }

    /// Counts live native handles and fails on request at one stage.
    struct FaultyCodec {
        fail_at: Option<EncodeStage>,
        counters: Rc<Counters>,
    }

    impl FaultyCodec {
        fn new(fail_at: Option<EncodeStage>) -> Self {
            Self {
                fail_at,
                counters: Rc::default(),
            }
        }

        fn fails_at(&self, stage: EncodeStage) -> bool {
            self.fail_at == Some(stage)
        }
    }

    impl Codec for FaultyCodec {
        type Config = ();
        type Picture<'p> = FakePicture<'p>;
        type Sink = FakeSink;

        fn configure(&self, _config: &EncodeConfig) -> Result<(), EncodeError> {
            self.counters.configured.set(self.counters.configured.get() + 1);
            if self.fails_at(EncodeStage::ConfigValidated) {
                return Err(EncodeError::ConfigInvalid("injected".to_string()));
            }
            Ok(())
        }

        fn alloc_picture<'p>(&self) -> Result<FakePicture<'p>, EncodeError> {
            if self.fails_at(EncodeStage::PictureAllocated) {
                return Err(EncodeError::AllocationFailed("injected".to_string()));
            }
            Ok(FakePicture {
                _handle: Handle::new(&self.counters),
                size: (0, 0),
                _pixels: PhantomData,
            })
        }

        fn alloc_sink(&self) -> Result<FakeSink, EncodeError> {
            Ok(FakeSink {
                _handle: Handle::new(&self.counters),
                bytes: Vec::new(),
            })
        }

        fn import<'p>(
            &self,
            picture: &mut FakePicture<'p>,
            image: &'p AdaptedImage<'_>,
        ) -> Result<(), EncodeError> {
            if self.fails_at(EncodeStage::PixelsImported) {
                return Err(EncodeError::UnsupportedPixelFormat("injected".to_string()));
            }
            picture.size = (image.width, image.height);
            Ok(())
        }

        fn dimensions(&self, picture: &FakePicture<'_>) -> (u32, u32) {
            picture.size
        }

        fn rescale(
            &self,
            picture: &mut FakePicture<'_>,
            width: u32,
            height: u32,
        ) -> Result<(), EncodeError> {
            if self.fails_at(EncodeStage::Resized) {
                return Err(EncodeError::ResizeFailed {
                    width,
                    height,
                    reason: "injected".to_string(),
                });
            }
            picture.size = (width, height);
            Ok(())
        }

        fn encode(
            &self,
            _config: &mut (),
            _picture: &mut FakePicture<'_>,
            sink: &mut FakeSink,
        ) -> Result<(), EncodeError> {
            if self.fails_at(EncodeStage::Encoded) {
                return Err(EncodeError::EncodeFailed {
                    code: EncodingErrorCode::UserAbort,
                });
            }
            sink.bytes.extend_from_slice(b"RIFF");
            Ok(())
        }

        fn output<'s>(&self, sink: &'s FakeSink) -> &'s [u8] {
            &sink.bytes
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn test_image() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(8, 4, |x, y| {
            Rgba([x as u8 * 30, y as u8 * 60, 90, 255])
        }))
    }

    fn lossless() -> EncodeConfig {
        EncodeConfig::lossless().with_quality(50.0)
    }

    #[test]
    fn test_fake_codec_success_releases_everything() {
        let encoder = Encoder::with_codec(FaultyCodec::new(None));
        let encoded = encoder.encode(&test_image(), &EncodeConfig::new()).unwrap();

        assert_eq!(encoded.as_bytes(), b"RIFF");
        assert_eq!((encoded.width, encoded.height), (8, 4));
        let counters = &encoder.codec().counters;
        assert_eq!(counters.allocations.get(), 2);
        assert_eq!(counters.live.get(), 0);
    }

    #[test]
    fn test_every_failing_stage_releases_handles() {
        let image = test_image();
        let config = EncodeConfig::new().with_resize_scale(0.5);

        for stage in [
            EncodeStage::ConfigValidated,
            EncodeStage::PictureAllocated,
            EncodeStage::PixelsImported,
            EncodeStage::Resized,
            EncodeStage::Encoded,
        ] {
            let encoder = Encoder::with_codec(FaultyCodec::new(Some(stage)));
            let err = encoder.encode(&image, &config).unwrap_err();
            assert_eq!(err.stage(), stage, "{err}");
            assert_eq!(encoder.codec().counters.live.get(), 0, "leak at {stage}");
        }
    }

    #[test]
    fn test_write_failure_releases_handles() {
        let encoder = Encoder::with_codec(FaultyCodec::new(None));
        let err = encoder
            .encode_to(&mut FailingWriter, &test_image(), &EncodeConfig::new())
            .unwrap_err();

        assert!(matches!(err, EncodeError::WriteFailed(_)));
        assert_eq!(err.stage(), EncodeStage::Flushed);
        assert_eq!(encoder.codec().counters.allocations.get(), 2);
        assert_eq!(encoder.codec().counters.live.get(), 0);
    }

    #[test]
    fn test_invalid_quality_allocates_nothing() {
        for quality in [-1.0, 101.0] {
            let encoder = Encoder::with_codec(FaultyCodec::new(None));
            let config = EncodeConfig::new().with_quality(quality);
            let err = encoder.encode(&test_image(), &config).unwrap_err();

            assert!(matches!(err, EncodeError::ConfigInvalid(_)));
            let counters = &encoder.codec().counters;
            assert_eq!(counters.configured.get(), 0);
            assert_eq!(counters.allocations.get(), 0);
        }
    }

    #[test]
    fn test_unsupported_raw_layout_allocates_nothing() {
        let data = [0u8; 8];
        let encoder = Encoder::with_codec(FaultyCodec::new(None));
        let err = encoder
            .encode(RawPixels::new(&data, 2, 2, 2), &EncodeConfig::new())
            .unwrap_err();

        assert!(matches!(err, EncodeError::UnsupportedPixelFormat(_)));
        assert_eq!(encoder.codec().counters.allocations.get(), 0);
    }

    #[test]
    fn test_resize_to_source_size_is_skipped() {
        let encoder = Encoder::with_codec(FaultyCodec::new(Some(EncodeStage::Resized)));
        let config = EncodeConfig::new().with_resize_dimensions(8, 4);
        assert!(encoder.encode(&test_image(), &config).is_ok());
    }

    #[test]
    fn test_lossless_rgba_roundtrip() {
        let img = RgbaImage::from_fn(16, 9, |x, y| {
            let alpha = 1 + ((x * 16 + y) * 7 % 255) as u8;
            Rgba([(x * 13) as u8, (y * 29) as u8, (x * y) as u8, alpha])
        });
        let source = DynamicImage::ImageRgba8(img.clone());
        let encoded = encode(&source, &lossless()).unwrap();

        assert_eq!((encoded.width, encoded.height), (16, 9));
        let decoded = decode::decode(encoded.as_bytes()).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_lossless_rgb_roundtrip() {
        let img = RgbImage::from_fn(10, 10, |x, y| Rgb([(x * 20) as u8, (y * 20) as u8, 77]));
        let encoded = encode(&DynamicImage::ImageRgb8(img.clone()), &lossless()).unwrap();
        let decoded = decode::decode(encoded.as_bytes()).unwrap();

        for (src, dst) in img.pixels().zip(decoded.pixels()) {
            assert_eq!(&dst.0[..3], &src.0);
            assert_eq!(dst.0[3], 255);
        }
    }

    #[test]
    fn test_grayscale_is_expanded() {
        let img = GrayImage::from_fn(6, 5, |x, y| Luma([(x * 40 + y) as u8]));
        let encoded = encode(&DynamicImage::ImageLuma8(img.clone()), &lossless()).unwrap();
        let decoded = decode::decode(encoded.as_bytes()).unwrap();

        for (src, dst) in img.pixels().zip(decoded.pixels()) {
            let v = src.0[0];
            assert_eq!(dst.0, [v, v, v, 255]);
        }
    }

    #[test]
    fn test_raw_single_component_is_expanded() {
        let data: Vec<u8> = (0..12).map(|i| i * 20).collect();
        let encoded = encode(RawPixels::new(&data, 4, 3, 1), &lossless()).unwrap();
        let decoded = decode::decode(encoded.as_bytes()).unwrap();

        for (i, px) in decoded.pixels().enumerate() {
            assert_eq!(px.0, [data[i], data[i], data[i], 255]);
        }
    }

    #[test]
    fn test_ycbcr_444_is_converted() {
        let mut yuv = YCbCrImage::new(4, 4, ChromaSubsampling::S444);
        for i in 0..16 {
            yuv.y[i] = (i * 15) as u8;
            yuv.cb[i] = 100 + i as u8;
            yuv.cr[i] = 160 - i as u8;
        }
        let encoded = encode(&yuv, &lossless()).unwrap();
        let decoded = decode::decode(encoded.as_bytes()).unwrap();

        for (i, px) in decoded.pixels().enumerate() {
            assert_eq!(&px.0[..3], &ycbcr_to_rgb(yuv.y[i], yuv.cb[i], yuv.cr[i]));
        }
    }

    #[test]
    fn test_rgb16_fallback_roundtrip() {
        let img: ImageBuffer<Rgb<u16>, Vec<u16>> =
            ImageBuffer::from_fn(5, 3, |x, y| Rgb([257 * x as u16 * 50, 257 * y as u16 * 80, 257 * 3]));
        let encoded = encode(&DynamicImage::ImageRgb16(img), &lossless()).unwrap();
        let decoded = decode::decode(encoded.as_bytes()).unwrap();

        for (x, y, px) in decoded.enumerate_pixels() {
            assert_eq!(px.0, [x as u8 * 50, y as u8 * 80, 3, 255]);
        }
    }

    #[test]
    fn test_ycbcr_420_with_alpha() {
        let mut yuv = YCbCrImage::new(16, 16, ChromaSubsampling::S420).with_alpha();
        yuv.y.fill(180);
        if let Some(alpha) = yuv.alpha.as_mut() {
            alpha[16 * 8..].fill(64);
        }
        let before = yuv.clone();

        let encoded = encode(&yuv, &EncodeConfig::new().with_quality(90.0)).unwrap();
        assert_eq!(yuv, before, "borrowed planes must not be modified");

        let decoded = decode::decode(encoded.as_bytes()).unwrap();
        assert_eq!(decoded.dimensions(), (16, 16));
        assert_eq!(decoded.get_pixel(3, 2).0[3], 255);
        assert_eq!(decoded.get_pixel(3, 12).0[3], 64);
    }

    #[test]
    fn test_ycbcr_420_with_alpha_rescaled_keeps_source() {
        let mut yuv = YCbCrImage::new(32, 32, ChromaSubsampling::S420).with_alpha();
        yuv.y.fill(200);
        if let Some(alpha) = yuv.alpha.as_mut() {
            alpha.fill(64);
        }
        let before = yuv.clone();

        let config = EncodeConfig::new().with_resize_dimensions(16, 16);
        let encoded = encode(&yuv, &config).unwrap();

        assert_eq!((encoded.width, encoded.height), (16, 16));
        assert_eq!(yuv, before, "borrowed planes must not be modified");
    }

    #[test]
    fn test_run_rejects_short_buffer() {
        let data = [7u8; 4];
        let image = AdaptedImage {
            width: 2048,
            height: 2048,
            layout: crate::pixel::PixelLayout::PackedRgba(crate::pixel::Plane::borrowed(&data, 8192)),
        };
        let err = Encoder::new()
            .run(&image, &EncodeConfig::new(), |bytes, _, _| Ok(bytes.len()))
            .unwrap_err();
        assert!(matches!(err, EncodeError::UnsupportedPixelFormat(_)));
    }

    #[test]
    fn test_run_validates_config() {
        let data = [0u8; 16];
        let image = AdaptedImage {
            width: 2,
            height: 2,
            layout: crate::pixel::PixelLayout::PackedRgba(crate::pixel::Plane::borrowed(&data, 8)),
        };
        let encoder = Encoder::with_codec(FaultyCodec::new(None));
        let mut config = EncodeConfig::new();
        config.resize.scale = -2.0;

        let err = encoder.run(&image, &config, |bytes, _, _| Ok(bytes.len())).unwrap_err();
        assert!(matches!(err, EncodeError::ConfigInvalid(_)));
        assert_eq!(encoder.codec().counters.configured.get(), 0);
        assert_eq!(encoder.codec().counters.allocations.get(), 0);
    }

    #[test]
    fn test_ycbcr_420_rescaled() {
        let yuv = YCbCrImage::new(32, 16, ChromaSubsampling::S420);
        let config = EncodeConfig::new().with_resize_dimensions(16, 0);
        let encoded = encode(&yuv, &config).unwrap();
        assert_eq!((encoded.width, encoded.height), (16, 8));
    }

    #[test]
    fn test_zero_sized_image() {
        let img = DynamicImage::new_rgba8(0, 0);
        let err = encode(&img, &EncodeConfig::new()).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::EncodeFailed {
                code: EncodingErrorCode::BadDimension
            }
        ));
    }

    #[test]
    fn test_scale_resize() {
        let img = DynamicImage::new_rgb8(100, 50);
        let config = EncodeConfig::new().with_resize_scale(0.5);
        let encoded = encode(&img, &config).unwrap();

        assert_eq!((encoded.width, encoded.height), (50, 25));
        assert_eq!(decode::probe(encoded.as_bytes()).unwrap(), (50, 25));
    }

    #[test]
    fn test_explicit_dimensions_ignore_stale_scale() {
        let img = DynamicImage::new_rgb8(600, 300);
        let mut config = EncodeConfig::new();
        config.resize = ResizeRequest {
            width: 300,
            height: 0,
            scale: 0.5,
        };
        let encoded = encode(&img, &config).unwrap();
        assert_eq!(decode::probe(encoded.as_bytes()).unwrap(), (300, 150));
    }

    #[test]
    fn test_scale_to_zero_fails() {
        let img = DynamicImage::new_rgb8(4, 100);
        let err = encode(&img, &EncodeConfig::new().with_resize_scale(0.1)).unwrap_err();
        assert!(matches!(err, EncodeError::ResizeFailed { .. }));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let img = test_image();
        let config = EncodeConfig::with_preset(crate::encode::Preset::Photo, 80.0).unwrap();
        let first = encode(&img, &config).unwrap();
        let second = encode(&img, &config).unwrap();
        assert_eq!(
            decode::decode(first.as_bytes()).unwrap(),
            decode::decode(second.as_bytes()).unwrap()
        );
    }

    #[test]
    fn test_encode_to_matches_encode() {
        let img = test_image();
        let config = EncodeConfig::new();
        let mut out = Vec::new();
        let written = encode_to(&mut out, &img, &config).unwrap();

        assert_eq!(written, out.len());
        assert_eq!(out, encode(&img, &config).unwrap().into_bytes());
    }

    #[test]
    fn test_encode_bytes_from_png() {
        let img = RgbaImage::from_fn(7, 3, |x, y| Rgba([x as u8 * 9, y as u8 * 50, 1, 200]));
        let mut png = Vec::new();
        DynamicImage::ImageRgba8(img.clone())
            .write_to(&mut io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let mut out = Vec::new();
        encode_bytes(&mut out, &png, &lossless()).unwrap();
        assert_eq!(decode::decode(&out).unwrap(), img);
    }

    #[test]
    fn test_encode_bytes_rejects_garbage() {
        let mut out = Vec::new();
        let err = encode_bytes(&mut out, b"not an image", &EncodeConfig::new()).unwrap_err();
        assert!(matches!(err, EncodeError::SourceDecode(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_encode_bytes_validates_config_first() {
        let mut out = Vec::new();
        let config = EncodeConfig::new().with_quality(200.0);
        let err = encode_bytes(&mut out, b"not an image", &config).unwrap_err();
        assert!(matches!(err, EncodeError::ConfigInvalid(_)));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(EncodeStage::PixelsImported.to_string(), "pixels-imported");
        assert_eq!(EncodeStage::Released.to_string(), "released");
    }
}

//! libwebp backend for the encode pipeline.
//!
//! Packed RGB/RGBA buffers are copied into the picture by libwebp's import
//! functions. Planar 4:2:0 images are attached as a view: the picture points
//! at the caller's planes and owns no pixel memory until a rescale detaches
//! it into an owned copy.

use std::ffi::c_int;
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr;

use libwebp_sys as sys;
use tracing::trace;

use super::{Codec, EncodeConfig, EncodeError, EncodingErrorCode, Preset};
use crate::pixel::{AdaptedImage, ChromaSubsampling, PixelLayout, Plane};

/// Largest width or height the format can store.
pub const MAX_DIMENSION: u32 = 16383;

/// The bundled libwebp encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibWebp;

impl LibWebp {
    pub fn new() -> Self {
        Self
    }
}

fn native_preset(preset: Preset) -> sys::WebPPreset {
    match preset {
        Preset::Default => sys::WebPPreset::WEBP_PRESET_DEFAULT,
        Preset::Picture => sys::WebPPreset::WEBP_PRESET_PICTURE,
        Preset::Photo => sys::WebPPreset::WEBP_PRESET_PHOTO,
        Preset::Drawing => sys::WebPPreset::WEBP_PRESET_DRAWING,
        Preset::Icon => sys::WebPPreset::WEBP_PRESET_ICON,
        Preset::Text => sys::WebPPreset::WEBP_PRESET_TEXT,
    }
}

/// A native `WebPPicture`, freed on drop.
///
/// `'p` is the lifetime of the pixel planes a view picture points into.
pub struct Picture<'p> {
    raw: Box<sys::WebPPicture>,
    view: bool,
    _pixels: PhantomData<&'p [u8]>,
}

impl Picture<'_> {
    /// Returns true if the picture references external planes.
    pub fn is_view(&self) -> bool {
        self.view
    }
}

impl Drop for Picture<'_> {
    fn drop(&mut self) {
        // A view owns no pixel memory, so this only resets its fields.
        unsafe { sys::WebPPictureFree(&mut *self.raw) };
        trace!(view = self.view, "released native picture");
    }
}

/// A native `WebPMemoryWriter`, cleared on drop.
pub struct MemorySink {
    raw: Box<sys::WebPMemoryWriter>,
}

impl Drop for MemorySink {
    fn drop(&mut self) {
        unsafe { sys::WebPMemoryWriterClear(&mut *self.raw) };
        trace!("released native memory sink");
    }
}

fn to_c_int(value: usize, what: &str) -> Result<c_int, EncodeError> {
    c_int::try_from(value)
        .map_err(|_| EncodeError::UnsupportedPixelFormat(format!("{what} {value} is too large")))
}

fn plane_ptr(plane: &Plane<'_>) -> *mut u8 {
    // Only read by the encoder with `exact` set. Anything that rewrites
    // planes in place must detach the view first.
    plane.data.as_ptr().cast_mut()
}

impl LibWebp {
    /// Replace a view picture with an owned copy of its planes.
    fn detach<'p>(&self, picture: &mut Picture<'p>) -> Result<(), EncodeError> {
        if !picture.view {
            return Ok(());
        }
        let mut owned: Picture<'p> = self.alloc_picture()?;
        if unsafe { sys::WebPPictureCopy(&*picture.raw, &mut *owned.raw) } == 0 {
            return Err(EncodeError::EncodeFailed {
                code: EncodingErrorCode::OutOfMemory,
            });
        }
        // The old view is released when `owned` drops.
        std::mem::swap(picture, &mut owned);
        trace!("detached view picture into owned planes");
        Ok(())
    }
}

impl Codec for LibWebp {
    type Config = sys::WebPConfig;
    type Picture<'p> = Picture<'p>;
    type Sink = MemorySink;

    fn configure(&self, config: &EncodeConfig) -> Result<sys::WebPConfig, EncodeError> {
        let mut native = sys::WebPConfig::new_with_preset(native_preset(config.preset), config.quality)
            .map_err(|()| {
                EncodeError::ConfigInvalid(format!(
                    "codec rejected preset {} at quality {}",
                    config.preset.name(),
                    config.quality
                ))
            })?;

        native.lossless = c_int::from(config.lossless);
        native.thread_level = c_int::from(config.thread_level);
        native.use_sharp_yuv = c_int::from(config.chroma_fidelity);
        if let Some(sns) = config.sns_strength {
            native.sns_strength = c_int::from(sns);
        }

        let filter = config.filter_settings();
        if let Some(strength) = filter.strength {
            native.filter_strength = c_int::from(strength);
        }
        if let Some(sharpness) = filter.sharpness {
            native.filter_sharpness = c_int::from(sharpness);
        }
        if let Some(strong) = filter.strong {
            native.filter_type = c_int::from(strong);
        }

        if unsafe { sys::WebPValidateConfig(&native) } == 0 {
            return Err(EncodeError::ConfigInvalid(
                "codec rejected the parameter combination".to_string(),
            ));
        }
        Ok(native)
    }

    fn alloc_picture<'p>(&self) -> Result<Picture<'p>, EncodeError> {
        let raw = sys::WebPPicture::new().map_err(|()| {
            EncodeError::AllocationFailed("picture initialization failed (ABI mismatch)".to_string())
        })?;
        trace!("allocated native picture");
        Ok(Picture {
            raw: Box::new(raw),
            view: false,
            _pixels: PhantomData,
        })
    }

    fn alloc_sink(&self) -> Result<MemorySink, EncodeError> {
        let mut writer = Box::new(MaybeUninit::<sys::WebPMemoryWriter>::uninit());
        unsafe { sys::WebPMemoryWriterInit(writer.as_mut_ptr()) };
        // SAFETY: WebPMemoryWriterInit initializes every field.
        let raw = unsafe { Box::from_raw(Box::into_raw(writer).cast::<sys::WebPMemoryWriter>()) };
        trace!("allocated native memory sink");
        Ok(MemorySink { raw })
    }

    fn import<'p>(
        &self,
        picture: &mut Picture<'p>,
        image: &'p AdaptedImage<'_>,
    ) -> Result<(), EncodeError> {
        if image.width == 0
            || image.height == 0
            || image.width > MAX_DIMENSION
            || image.height > MAX_DIMENSION
        {
            return Err(EncodeError::EncodeFailed {
                code: EncodingErrorCode::BadDimension,
            });
        }
        image.layout.validate(image.width, image.height)?;

        let pic = &mut *picture.raw;
        pic.width = image.width as c_int;
        pic.height = image.height as c_int;

        let imported = match &image.layout {
            PixelLayout::PackedRgba(plane) => {
                let stride = to_c_int(plane.stride, "RGBA stride")?;
                pic.use_argb = 1;
                unsafe { sys::WebPPictureImportRGBA(pic, plane.data.as_ptr(), stride) }
            }
            PixelLayout::PackedRgb(plane) => {
                let stride = to_c_int(plane.stride, "RGB stride")?;
                pic.use_argb = 1;
                unsafe { sys::WebPPictureImportRGB(pic, plane.data.as_ptr(), stride) }
            }
            PixelLayout::PlanarYuv {
                y,
                u,
                v,
                alpha,
                subsampling: ChromaSubsampling::S420,
            } => {
                pic.use_argb = 0;
                pic.y = plane_ptr(y);
                pic.u = plane_ptr(u);
                pic.v = plane_ptr(v);
                pic.y_stride = to_c_int(y.stride, "Y stride")?;
                pic.uv_stride = to_c_int(u.stride, "chroma stride")?;
                match alpha {
                    Some(a) => {
                        pic.colorspace = sys::WebPEncCSP::WEBP_YUV420A;
                        pic.a = plane_ptr(a);
                        pic.a_stride = to_c_int(a.stride, "alpha stride")?;
                    }
                    None => pic.colorspace = sys::WebPEncCSP::WEBP_YUV420,
                }
                picture.view = true;
                1
            }
            PixelLayout::PlanarYuv { subsampling, .. } => {
                return Err(EncodeError::UnsupportedPixelFormat(format!(
                    "planar {subsampling:?} must be converted before import"
                )));
            }
            PixelLayout::Grayscale(_) => {
                return Err(EncodeError::UnsupportedPixelFormat(
                    "grayscale must be expanded before import".to_string(),
                ));
            }
        };

        if imported == 0 {
            // Import only fails when the picture buffer cannot be allocated.
            let code = match picture.raw.error_code as i32 {
                0 => EncodingErrorCode::OutOfMemory,
                code => EncodingErrorCode::from_native(code),
            };
            return Err(EncodeError::EncodeFailed { code });
        }
        Ok(())
    }

    fn dimensions(&self, picture: &Picture<'_>) -> (u32, u32) {
        (picture.raw.width as u32, picture.raw.height as u32)
    }

    fn rescale(&self, picture: &mut Picture<'_>, width: u32, height: u32) -> Result<(), EncodeError> {
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(EncodeError::ResizeFailed {
                width,
                height,
                reason: format!("dimensions exceed {MAX_DIMENSION}"),
            });
        }
        // Rescaling premultiplies luma by alpha in place.
        self.detach(picture).map_err(|err| EncodeError::ResizeFailed {
            width,
            height,
            reason: err.to_string(),
        })?;
        if unsafe { sys::WebPPictureRescale(&mut *picture.raw, width as c_int, height as c_int) } == 0 {
            return Err(EncodeError::ResizeFailed {
                width,
                height,
                reason: "codec rejected the target dimensions".to_string(),
            });
        }
        Ok(())
    }

    fn encode(
        &self,
        config: &mut sys::WebPConfig,
        picture: &mut Picture<'_>,
        sink: &mut MemorySink,
    ) -> Result<(), EncodeError> {
        if picture.view {
            // Keep libwebp from rewriting transparent areas of borrowed planes.
            config.exact = 1;
        }

        let pic = &mut *picture.raw;
        pic.writer = Some(sys::WebPMemoryWrite);
        pic.custom_ptr = &mut *sink.raw as *mut sys::WebPMemoryWriter as *mut _;

        let ok = unsafe { sys::WebPEncode(&*config, pic) };

        pic.writer = None;
        pic.custom_ptr = ptr::null_mut();

        if ok == 0 {
            return Err(EncodeError::EncodeFailed {
                code: EncodingErrorCode::from_native(pic.error_code as i32),
            });
        }
        Ok(())
    }

    fn output<'s>(&self, sink: &'s MemorySink) -> &'s [u8] {
        if sink.raw.mem.is_null() || sink.raw.size == 0 {
            return &[];
        }
        // SAFETY: the writer owns `size` initialized bytes at `mem`.
        unsafe { std::slice::from_raw_parts(sink.raw.mem, sink.raw.size) }
    }
}

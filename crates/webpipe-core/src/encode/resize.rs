//! Resolution of resize requests against source dimensions.
//!
//! A request carries either explicit dimensions or a scale factor. Explicit
//! dimensions always win when both are present; a zero component in an
//! explicit request is passed through so the codec derives it from the
//! aspect ratio.

use serde::{Deserialize, Serialize};

use super::EncodeError;

/// Requested output size, as explicit dimensions or as a scale factor.
///
/// `width`/`height` of 0 and `scale` of 0.0 (or 1.0) mean "not set".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeRequest {
    pub width: u32,
    pub height: u32,
    pub scale: f32,
}

impl ResizeRequest {
    /// Resize to explicit dimensions; 0 in one component keeps aspect ratio.
    pub fn dimensions(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            scale: 0.0,
        }
    }

    /// Resize each dimension by `scale`.
    pub fn scale(scale: f32) -> Self {
        Self {
            width: 0,
            height: 0,
            scale,
        }
    }

    pub fn has_dimensions(&self) -> bool {
        self.width != 0 || self.height != 0
    }

    pub fn has_scale(&self) -> bool {
        self.scale != 0.0 && self.scale != 1.0
    }

    /// Returns true if no resize will take place.
    pub fn is_noop(&self) -> bool {
        !self.has_dimensions() && !self.has_scale()
    }

    pub(crate) fn validate(&self) -> Result<(), EncodeError> {
        if !self.scale.is_finite() || self.scale < 0.0 {
            return Err(EncodeError::ConfigInvalid(format!(
                "resize scale {} must be a finite, non-negative number",
                self.scale
            )));
        }
        Ok(())
    }

    /// Compute the target dimensions for a `src_width x src_height` source.
    ///
    /// Returns `Ok(None)` when no resize is requested.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::ResizeFailed` when a scale factor yields a zero
    /// dimension.
    pub fn resolve(&self, src_width: u32, src_height: u32) -> Result<Option<(u32, u32)>, EncodeError> {
        if self.has_dimensions() {
            return Ok(Some((self.width, self.height)));
        }
        if !self.has_scale() {
            return Ok(None);
        }

        let width = scale_dimension(src_width, self.scale);
        let height = scale_dimension(src_height, self.scale);
        if width == 0 || height == 0 {
            return Err(EncodeError::ResizeFailed {
                width,
                height,
                reason: format!(
                    "scale {} of {src_width}x{src_height} leaves a zero dimension",
                    self.scale
                ),
            });
        }
        Ok(Some((width, height)))
    }
}

/// floor(dimension * scale), saturating at `u32::MAX`.
fn scale_dimension(dimension: u32, scale: f32) -> u32 {
    (f64::from(dimension) * f64::from(scale)).floor() as u32
}

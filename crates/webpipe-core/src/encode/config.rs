//! Encoder configuration.
//!
//! A configuration starts from a content preset and a quality value, then
//! layers optional overrides on top. Defaults favor color fidelity: sharp
//! (chroma-accurate) RGB to YUV conversion is on unless disabled, which makes
//! output larger and encoding slower.
//!
//! Resolution order, applied by the codec backend:
//! 1. Preset defaults for `preset` at `quality`
//! 2. Explicit overrides (`filter_strength`, `filter_sharpness`, `sns_strength`)
//! 3. `max_fidelity`, which forces the strongest deblocking filter

use serde::{Deserialize, Serialize};

use super::{EncodeError, ResizeRequest};

/// Default quality when none is given.
pub const DEFAULT_QUALITY: f32 = 75.0;
/// Highest deblocking filter strength.
pub const MAX_FILTER_STRENGTH: u8 = 100;
/// Highest deblocking filter sharpness.
pub const MAX_FILTER_SHARPNESS: u8 = 7;
/// Highest spatial noise shaping strength.
pub const MAX_SNS_STRENGTH: u8 = 100;
/// Highest thread level.
pub const MAX_THREAD_LEVEL: u8 = 1;

/// Content-aware bundles of codec tuning defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Balanced for general use.
    #[default]
    Default,
    /// Digital picture, like portrait or indoor shot.
    Picture,
    /// Outdoor photograph with natural lighting.
    Photo,
    /// Hand or line drawing with high-contrast details.
    Drawing,
    /// Small-sized colorful images.
    Icon,
    /// Text-like content.
    Text,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::Default,
        Preset::Picture,
        Preset::Photo,
        Preset::Drawing,
        Preset::Icon,
        Preset::Text,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::Picture => "picture",
            Preset::Photo => "photo",
            Preset::Drawing => "drawing",
            Preset::Icon => "icon",
            Preset::Text => "text",
        }
    }
}

/// Deblocking filter values to apply after preset resolution.
///
/// `None` keeps the preset's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterSettings {
    pub strength: Option<u8>,
    pub sharpness: Option<u8>,
    /// `Some(true)` selects the strong filter type.
    pub strong: Option<bool>,
}

/// Encoding parameters for one or more encode calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    /// Content preset the remaining knobs are layered on.
    pub preset: Preset,
    /// 0-100. Lossy: size/quality trade-off. Lossless: compression effort.
    pub quality: f32,
    /// Reconstruct pixels exactly.
    pub lossless: bool,
    /// Deblocking filter strength override (0-100).
    pub filter_strength: Option<u8>,
    /// Deblocking filter sharpness override (0-7).
    pub filter_sharpness: Option<u8>,
    /// Spatial noise shaping strength override (0-100).
    pub sns_strength: Option<u8>,
    /// 0 runs the codec single-threaded, 1 lets it parallelize internally.
    pub thread_level: u8,
    /// Sharp RGB to YUV conversion; better color at a size and speed cost.
    pub chroma_fidelity: bool,
    /// Force maximum filter strength and sharpness with the strong filter.
    pub max_fidelity: bool,
    /// Output size.
    pub resize: ResizeRequest,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            preset: Preset::Default,
            quality: DEFAULT_QUALITY,
            lossless: false,
            filter_strength: None,
            filter_sharpness: None,
            sns_strength: None,
            thread_level: 0,
            chroma_fidelity: true,
            max_fidelity: false,
            resize: ResizeRequest::default(),
        }
    }
}

impl EncodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validated configuration from a preset and quality.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::ConfigInvalid` if `quality` is outside 0-100.
    pub fn with_preset(preset: Preset, quality: f32) -> Result<Self, EncodeError> {
        let config = Self {
            preset,
            quality,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a lossless configuration.
    pub fn lossless() -> Self {
        Self {
            lossless: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = quality;
        self
    }

    #[must_use]
    pub fn with_lossless(mut self, lossless: bool) -> Self {
        self.lossless = lossless;
        self
    }

    #[must_use]
    pub fn with_filter_strength(mut self, strength: u8) -> Self {
        self.filter_strength = Some(strength);
        self
    }

    #[must_use]
    pub fn with_filter_sharpness(mut self, sharpness: u8) -> Self {
        self.filter_sharpness = Some(sharpness);
        self
    }

    #[must_use]
    pub fn with_sns_strength(mut self, strength: u8) -> Self {
        self.sns_strength = Some(strength);
        self
    }

    #[must_use]
    pub fn with_thread_level(mut self, level: u8) -> Self {
        self.thread_level = level;
        self
    }

    #[must_use]
    pub fn with_chroma_fidelity(mut self, enable: bool) -> Self {
        self.chroma_fidelity = enable;
        self
    }

    #[must_use]
    pub fn with_max_fidelity(mut self, enable: bool) -> Self {
        self.max_fidelity = enable;
        self
    }

    /// Resize to explicit dimensions, clearing any scale factor.
    #[must_use]
    pub fn with_resize_dimensions(mut self, width: u32, height: u32) -> Self {
        self.resize = ResizeRequest::dimensions(width, height);
        self
    }

    /// Resize by a scale factor, clearing any explicit dimensions.
    #[must_use]
    pub fn with_resize_scale(mut self, scale: f32) -> Self {
        self.resize = ResizeRequest::scale(scale);
        self
    }

    /// Check every knob against its documented range.
    pub fn validate(&self) -> Result<(), EncodeError> {
        if !(0.0..=100.0).contains(&self.quality) {
            return Err(EncodeError::ConfigInvalid(format!(
                "quality {} is outside 0-100",
                self.quality
            )));
        }
        check_max("filter strength", self.filter_strength, MAX_FILTER_STRENGTH)?;
        check_max("filter sharpness", self.filter_sharpness, MAX_FILTER_SHARPNESS)?;
        check_max("sns strength", self.sns_strength, MAX_SNS_STRENGTH)?;
        check_max("thread level", Some(self.thread_level), MAX_THREAD_LEVEL)?;
        self.resize.validate()
    }

    /// Filter values to apply on top of the preset.
    pub fn filter_settings(&self) -> FilterSettings {
        if self.max_fidelity {
            return FilterSettings {
                strength: Some(MAX_FILTER_STRENGTH),
                sharpness: Some(MAX_FILTER_SHARPNESS),
                strong: Some(true),
            };
        }
        FilterSettings {
            strength: self.filter_strength,
            sharpness: self.filter_sharpness,
            strong: None,
        }
    }
}

fn check_max(name: &str, value: Option<u8>, max: u8) -> Result<(), EncodeError> {
    match value {
        Some(v) if v > max => Err(EncodeError::ConfigInvalid(format!(
            "{name} {v} is outside 0-{max}"
        ))),
        _ => Ok(()),
    }
}

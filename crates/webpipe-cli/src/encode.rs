//! The `encode` subcommand.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use webpipe_core::{encode_bytes, EncodeConfig};

use crate::types::PresetArg;

/// Arguments for the `encode` subcommand.
#[derive(Parser, Debug)]
pub struct EncodeArgs {
    /// PNG or JPEG input file.
    pub input: PathBuf,

    /// WebP output file.
    pub output: PathBuf,

    /// JSON encode configuration. Flags override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    // --- Quality ---
    /// Content preset.
    #[arg(short, long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Quality (0-100).
    #[arg(short, long)]
    pub quality: Option<f32>,

    /// Encode losslessly.
    #[arg(long)]
    pub lossless: bool,

    // --- Sizing ---
    /// Target width in pixels (0 or omitted keeps aspect ratio).
    #[arg(short = 'w', long)]
    pub width: Option<u32>,

    /// Target height in pixels (0 or omitted keeps aspect ratio).
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    /// Scale factor. Ignored when --width or --height is given.
    #[arg(long)]
    pub scale: Option<f32>,

    // --- Tuning ---
    /// Deblocking filter strength (0-100).
    #[arg(long)]
    pub filter_strength: Option<u8>,

    /// Deblocking filter sharpness (0-7).
    #[arg(long)]
    pub filter_sharpness: Option<u8>,

    /// Spatial noise shaping strength (0-100).
    #[arg(long)]
    pub sns_strength: Option<u8>,

    /// Let the codec use extra threads.
    #[arg(long)]
    pub threads: bool,

    /// Disable sharp RGB to YUV conversion (smaller, faster, less accurate color).
    #[arg(long)]
    pub no_sharp_yuv: bool,

    /// Force the strongest deblocking filter.
    #[arg(long)]
    pub max_fidelity: bool,
}

impl EncodeArgs {
    /// Merge the configuration file (if any) with the command-line flags.
    pub fn build_config(&self) -> anyhow::Result<EncodeConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => EncodeConfig::default(),
        };

        if let Some(preset) = self.preset {
            config.preset = preset.into();
        }
        if let Some(quality) = self.quality {
            config.quality = quality;
        }
        if self.lossless {
            config.lossless = true;
        }
        if let Some(strength) = self.filter_strength {
            config.filter_strength = Some(strength);
        }
        if let Some(sharpness) = self.filter_sharpness {
            config.filter_sharpness = Some(sharpness);
        }
        if let Some(sns) = self.sns_strength {
            config.sns_strength = Some(sns);
        }
        if self.threads {
            config.thread_level = 1;
        }
        if self.no_sharp_yuv {
            config.chroma_fidelity = false;
        }
        if self.max_fidelity {
            config.max_fidelity = true;
        }

        // Dimensions are applied last so they win over --scale.
        if let Some(scale) = self.scale {
            config = config.with_resize_scale(scale);
        }
        if self.width.is_some() || self.height.is_some() {
            config = config.with_resize_dimensions(self.width.unwrap_or(0), self.height.unwrap_or(0));
        }

        config.validate().context("invalid encode configuration")?;
        Ok(config)
    }
}

fn load_config(path: &Path) -> anyhow::Result<EncodeConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
}

pub fn run(args: &EncodeArgs) -> anyhow::Result<()> {
    let config = args.build_config()?;
    let data = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let mut webp = Vec::new();
    encode_bytes(&mut webp, &data, &config)
        .with_context(|| format!("failed to encode {}", args.input.display()))?;
    fs::write(&args.output, &webp)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        input_bytes = data.len(),
        output_bytes = webp.len(),
        "encoded"
    );
    println!(
        "{} -> {} ({} bytes)",
        args.input.display(),
        args.output.display(),
        webp.len()
    );
    Ok(())
}

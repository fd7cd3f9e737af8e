//! The `decode` and `info` subcommands.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

/// Arguments for the `decode` subcommand.
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// WebP input file.
    pub input: PathBuf,

    /// Output file; the format follows its extension.
    pub output: PathBuf,
}

/// Arguments for the `info` subcommand.
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// WebP input file.
    pub input: PathBuf,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run_decode(args: &DecodeArgs) -> anyhow::Result<()> {
    let data = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let image = webpipe_core::decode(&data)
        .with_context(|| format!("failed to decode {}", args.input.display()))?;
    image
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        width = image.width(),
        height = image.height(),
        "decoded"
    );
    println!(
        "{} -> {} ({}x{})",
        args.input.display(),
        args.output.display(),
        image.width(),
        image.height()
    );
    Ok(())
}

pub fn run_info(args: &InfoArgs) -> anyhow::Result<()> {
    let data = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let (width, height) = webpipe_core::probe(&data)
        .with_context(|| format!("failed to probe {}", args.input.display()))?;

    if args.json {
        let summary = serde_json::json!({
            "path": args.input.display().to_string(),
            "width": width,
            "height": height,
            "bytes": data.len(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}: {width}x{height} ({} bytes)", args.input.display(), data.len());
    }
    Ok(())
}

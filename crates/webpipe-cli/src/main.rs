//! webpipe: WebP encoder and decoder.
//!
//! Encodes PNG/JPEG files to WebP with presets, resizing and fidelity
//! controls, decodes WebP back to any format the `image` crate writes, and
//! prints WebP dimensions.

mod decode;
mod encode;
mod types;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::decode::{DecodeArgs, InfoArgs};
use crate::encode::EncodeArgs;

#[derive(Parser, Debug)]
#[command(name = "webpipe", version, about = "WebP encoder and decoder")]
struct Cli {
    /// Log every pipeline stage to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a PNG or JPEG file to WebP.
    Encode(Box<EncodeArgs>),

    /// Decode a WebP file.
    Decode(DecodeArgs),

    /// Print WebP dimensions without decoding.
    Info(InfoArgs),
}

/// `RUST_LOG` wins unless --verbose is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Encode(args) => encode::run(&args),
        Command::Decode(args) => decode::run_decode(&args),
        Command::Info(args) => decode::run_info(&args),
    }
}

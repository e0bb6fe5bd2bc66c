//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Safety margin is a percentage slider from 0 to 30
fn parse_safety_margin(s: &str) -> Result<i32, String> {
    clap_num::number_range(s, 0, 30)
}

/// Arguments for the bitrate command
#[derive(Args, Debug)]
pub struct BitrateArgs {
    /// Target file size in MB (default from config: 3)
    #[arg(short, long)]
    pub size: Option<f64>,

    /// Video duration in seconds (default from config: 5)
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Safety buffer in percent, 0-30 (default from config: 10)
    #[arg(short, long, value_parser = parse_safety_margin)]
    pub margin: Option<i32>,

    /// Encoder preset, ultrafast to veryslow (default from config: medium)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Output format (text, json, yaml)
    #[arg(long, default_value = "text")]
    pub format: String,
}

/// Arguments for the upload command
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// File to publish
    #[arg(short, long)]
    pub input: PathBuf,

    /// Declared media type (default: guessed from the extension)
    #[arg(long)]
    pub media_type: Option<String>,

    /// Per-attempt deadline in seconds, 0 to wait on the transport
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Output format (text, json, yaml)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Show every provider attempt
    #[arg(short, long)]
    pub verbose: bool,

    /// Keep a local preview alive until Ctrl-C
    #[arg(long)]
    pub hold: bool,
}

/// Arguments for the providers command
#[derive(Args, Debug)]
pub struct ProvidersArgs {
    /// Output format (text, json, yaml)
    #[arg(long, default_value = "text")]
    pub format: String,
}

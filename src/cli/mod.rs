//! CLI module for Hotlink
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

pub use args::{BitrateArgs, ProvidersArgs, UploadArgs};

/// Hotlink CLI
///
/// Computes a target bitrate for WebM alerts and publishes finished files to
/// a public hotlink, falling back across providers and finally to a local
/// preview.
#[derive(Parser, Debug)]
#[command(name = "hotlink")]
#[command(about = "Hotlink - WebM bitrate calculator and fault-tolerant hotlink uploader")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level
    #[arg(long, default_value = "info", global = true, env = "HOTLINK_LOG_LEVEL")]
    pub log_level: String,

    /// Log format (pretty, compact, json)
    #[arg(long, default_value = "compact", global = true)]
    pub log_format: String,

    /// Configuration file (default: hotlink.toml or config/hotlink.toml)
    #[arg(long, global = true, env = "HOTLINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute a bitrate that fits a target file size
    Bitrate(BitrateArgs),
    /// Publish a file to the first provider that accepts it
    Upload(UploadArgs),
    /// List configured providers in try order
    Providers(ProvidersArgs),
}

//! Hotlink CLI
//!
//! Bitrate calculator and fault-tolerant hotlink uploader for WebM alerts.
//!
//! # Features
//!
//! - Target-size bitrate calculation with a safety buffer
//! - Ordered provider fallback (first success wins)
//! - Session-local preview when every provider refuses the file
//!
//! # Usage
//!
//! ```bash
//! hotlink bitrate --size 3 --duration 5 --margin 10 --preset medium
//! hotlink upload --input alert.webm
//! hotlink providers --format json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use hotlink_cli::cli::{commands, Cli, Commands};
use hotlink_cli::config_initialization::initialize_configuration_hierarchy;
use hotlink_cli::utils::{init_logging, LogFormat, LogLevel};

/// Main entry point for the Hotlink CLI application
#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(LogLevel::parse(&cli.log_level)?, LogFormat::parse(&cli.log_format)?)?;

    info!("Starting Hotlink CLI");
    let config = initialize_configuration_hierarchy(&cli)?;

    // Execute the requested command
    match cli.command {
        Commands::Bitrate(args) => {
            info!("Executing bitrate command");
            commands::bitrate(args, &config)?;
        }
        Commands::Upload(args) => {
            info!("Executing upload command");
            commands::upload(args, &config).await?;
        }
        Commands::Providers(args) => {
            info!("Executing providers command");
            commands::providers(args, &config)?;
        }
    }

    info!("Hotlink CLI completed successfully");
    Ok(())
}

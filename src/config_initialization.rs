//! Configuration initialization and hierarchy management

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::{AppConfig, TomlConfigAdapter};
use crate::cli::{Cli, Commands};
use crate::domain::errors::DomainError;
use crate::domain::model::EncoderPreset;

/// Environment variables that override file configuration
pub const ENV_ATTEMPT_TIMEOUT: &str = "HOTLINK_ATTEMPT_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "HOTLINK_USER_AGENT";
pub const ENV_PRESET: &str = "HOTLINK_PRESET";

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> Result<AppConfig> {
    info!("Initializing configuration hierarchy");

    // Steps 1 and 2: defaults, then the first configuration file found
    let (mut config, source) =
        TomlConfigAdapter::discover(cli.config.as_deref()).context("Failed to load configuration")?;
    match source {
        Some(path) => info!("Configuration file: {}", path.display()),
        None => info!("No config file loaded, using defaults"),
    }

    // Step 3: environment variables
    let env_overrides = apply_environment_overrides(&mut config, |key| std::env::var(key).ok())?;
    if env_overrides > 0 {
        info!("Applied {} environment variable overrides", env_overrides);
    }

    // Step 4: command-line arguments
    let cli_overrides = apply_cli_configuration_overrides(&mut config, cli);
    if cli_overrides > 0 {
        info!("Applied {} CLI configuration overrides", cli_overrides);
    }

    config.validate()?;
    info!("Configuration hierarchy initialized successfully");
    Ok(config)
}

/// Apply environment overrides read through `lookup`; returns how many applied
pub fn apply_environment_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<usize, DomainError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut applied = 0;

    if let Some(value) = lookup(ENV_ATTEMPT_TIMEOUT) {
        config.upload.attempt_timeout_secs = value.trim().parse().map_err(|e| {
            DomainError::ConfigInvalid(format!("{} must be a whole number of seconds: {}", ENV_ATTEMPT_TIMEOUT, e))
        })?;
        info!("Found environment override: {} = {}", ENV_ATTEMPT_TIMEOUT, value);
        applied += 1;
    }

    if let Some(value) = lookup(ENV_USER_AGENT).filter(|value| !value.trim().is_empty()) {
        info!("Found environment override: {} = {}", ENV_USER_AGENT, value);
        config.upload.user_agent = value;
        applied += 1;
    }

    if let Some(value) = lookup(ENV_PRESET) {
        config.bitrate.preset = EncoderPreset::parse(&value)
            .map_err(|e| DomainError::ConfigInvalid(format!("{}: {}", ENV_PRESET, e)))?;
        info!("Found environment override: {} = {}", ENV_PRESET, value);
        applied += 1;
    }

    Ok(applied)
}

/// Apply CLI argument overrides to configuration; returns how many applied
fn apply_cli_configuration_overrides(config: &mut AppConfig, cli: &Cli) -> usize {
    let mut cli_overrides = 0;

    if let Commands::Upload(args) = &cli.command {
        if let Some(timeout) = args.timeout {
            info!("CLI override: attempt_timeout_secs = {}", timeout);
            config.upload.attempt_timeout_secs = timeout;
            cli_overrides += 1;
        }
    }

    cli_overrides
}

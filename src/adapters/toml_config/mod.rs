// TOML config adapter - Configuration management using TOML files

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::error::{HotlinkError, HotlinkResult};

/// Upload behaviour settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Per-attempt deadline in seconds; 0 disables it
    pub attempt_timeout_secs: u64,
    pub user_agent: String,
}

impl UploadSettings {
    pub fn attempt_timeout(&self) -> Option<Duration> {
        (self.attempt_timeout_secs > 0).then(|| Duration::from_secs(self.attempt_timeout_secs))
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            attempt_timeout_secs: 60,
            user_agent: format!("hotlink-cli/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Values used when the bitrate command omits an argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BitrateDefaults {
    pub target_size_mb: f64,
    pub duration_sec: f64,
    pub safety_margin: i32,
    pub preset: EncoderPreset,
}

impl Default for BitrateDefaults {
    fn default() -> Self {
        let params = BitrateParameters::default();
        Self {
            target_size_mb: params.target_size_mb,
            duration_sec: params.duration_sec,
            safety_margin: params.safety_margin_percent,
            preset: EncoderPreset::default(),
        }
    }
}

/// Effective application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub upload: UploadSettings,
    pub container: ContainerPolicy,
    pub bitrate: BitrateDefaults,
    pub providers: Vec<ProviderSpec>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upload: UploadSettings::default(),
            container: ContainerPolicy::default(),
            bitrate: BitrateDefaults::default(),
            providers: ProviderSpec::builtin(),
        }
    }
}

impl AppConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.providers.is_empty() {
            return Err(DomainError::ConfigInvalid(
                "At least one provider must be configured".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for provider in &self.providers {
            provider.validate()?;
            if !names.insert(provider.name.as_str()) {
                return Err(DomainError::ConfigInvalid(format!(
                    "Duplicate provider name: {}",
                    provider.name
                )));
            }
        }

        if self.container.extension.trim().is_empty() || self.container.media_type.trim().is_empty() {
            return Err(DomainError::ConfigInvalid(
                "Container extension and media type cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Providers sorted into try order
    pub fn providers_by_priority(&self) -> Vec<ProviderSpec> {
        let mut providers = self.providers.clone();
        providers.sort_by_key(|provider| provider.priority);
        providers
    }
}

/// TOML configuration loader
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Files tried, in order, when no explicit path is given
    pub const SEARCH_PATHS: [&'static str; 2] = ["hotlink.toml", "config/hotlink.toml"];

    /// Parse configuration text; `origin` names the source in errors
    pub fn parse(content: &str, origin: &str) -> HotlinkResult<AppConfig> {
        let config: AppConfig = toml::from_str(content).map_err(|source| HotlinkError::ConfigParse {
            path: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file
    pub fn load_file(path: &Path) -> HotlinkResult<AppConfig> {
        if !path.exists() {
            return Err(DomainError::FileNotFound(format!(
                "Config file does not exist: {}",
                path.display()
            ))
            .into());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content, &path.to_string_lossy())?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Load the explicit file, else the first search path that exists, else defaults
    pub fn discover(explicit: Option<&Path>) -> HotlinkResult<(AppConfig, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load_file(path)?, Some(path.to_path_buf())));
        }

        for candidate in Self::SEARCH_PATHS {
            let path = PathBuf::from(candidate);
            if path.exists() {
                return Ok((Self::load_file(&path)?, Some(path)));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok((AppConfig::default(), None))
    }
}

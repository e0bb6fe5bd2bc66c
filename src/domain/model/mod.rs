// Domain models - Core types and data structures

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// A single file selection ready to be published.
///
/// Built once per selection and never mutated; cloning only bumps the
/// reference count on the payload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    bytes: Arc<[u8]>,
    media_type: String,
    filename: String,
}

impl UploadRequest {
    /// Create a new upload request
    pub fn new(
        bytes: impl Into<Arc<[u8]>>,
        media_type: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
            filename: filename.into(),
        }
    }

    /// Create a request whose media type is guessed from the filename
    pub fn with_guessed_type(bytes: impl Into<Arc<[u8]>>, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        let media_type = guess_media_type(&filename);
        Self::new(bytes, media_type, filename)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the payload, for stores that outlive the request
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Lowercased filename extension, if any
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.filename)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }
}

/// Guess a media type from a filename extension
pub fn guess_media_type(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());

    match extension.as_deref() {
        Some("webm") => "video/webm",
        Some("mp4") | Some("m4v") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Static descriptor of one remote storage backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSpec {
    /// Identity used in logs and outcomes
    pub name: String,
    /// Lower is tried first
    pub priority: u32,
    /// Multipart POST target
    pub endpoint: String,
    /// Form field carrying the file
    pub file_field: String,
    /// JSON Pointer to the boolean success flag
    pub success_path: String,
    /// JSON Pointer to the resulting hotlink
    pub url_path: String,
}

impl ProviderSpec {
    /// Pomf node: `files[]` field, `{success, files: [{url}]}` response
    pub fn pomf() -> Self {
        Self {
            name: "pomf".to_string(),
            priority: 0,
            endpoint: "https://pomf2.lain.la/upload.php".to_string(),
            file_field: "files[]".to_string(),
            success_path: "/success".to_string(),
            url_path: "/files/0/url".to_string(),
        }
    }

    /// File.io: `file` field, `{success, link}` response
    pub fn file_io() -> Self {
        Self {
            name: "fileio".to_string(),
            priority: 1,
            endpoint: "https://file.io".to_string(),
            file_field: "file".to_string(),
            success_path: "/success".to_string(),
            url_path: "/link".to_string(),
        }
    }

    /// Built-in provider list in priority order
    pub fn builtin() -> Vec<Self> {
        vec![Self::pomf(), Self::file_io()]
    }

    /// Check the descriptor is usable
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::ConfigInvalid(
                "Provider name cannot be empty".to_string(),
            ));
        }
        if self.endpoint.trim().is_empty() {
            return Err(DomainError::ConfigInvalid(format!(
                "Provider {} has no endpoint",
                self.name
            )));
        }
        if self.file_field.trim().is_empty() {
            return Err(DomainError::ConfigInvalid(format!(
                "Provider {} has no file field",
                self.name
            )));
        }
        for (label, pointer) in [("success_path", &self.success_path), ("url_path", &self.url_path)] {
            if !pointer.starts_with('/') {
                return Err(DomainError::ConfigInvalid(format!(
                    "Provider {} {} must be a JSON pointer starting with '/': {}",
                    self.name, label, pointer
                )));
            }
        }
        Ok(())
    }
}

/// Result of a single provider trial
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttemptOutcome {
    Success { url: String },
    Rejected { reason: String },
    TransportError { reason: String },
}

impl AttemptOutcome {
    /// Stable tag used in logs
    pub fn reason_tag(&self) -> &'static str {
        match self {
            AttemptOutcome::Success { .. } => "success",
            AttemptOutcome::Rejected { .. } => "rejected",
            AttemptOutcome::TransportError { .. } => "transport_error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Success { .. })
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            AttemptOutcome::Success { url } => Some(url),
            _ => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            AttemptOutcome::Rejected { reason } | AttemptOutcome::TransportError { reason } => {
                Some(reason)
            }
            AttemptOutcome::Success { .. } => None,
        }
    }
}

/// Transient record of one provider trial
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadAttempt {
    pub provider: String,
    pub outcome: AttemptOutcome,
    pub timestamp: DateTime<Utc>,
}

impl UploadAttempt {
    pub fn new(provider: impl Into<String>, outcome: AttemptOutcome) -> Self {
        Self {
            provider: provider.into(),
            outcome,
            timestamp: Utc::now(),
        }
    }

    pub fn success(provider: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(provider, AttemptOutcome::Success { url: url.into() })
    }

    pub fn rejected(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(
            provider,
            AttemptOutcome::Rejected {
                reason: reason.into(),
            },
        )
    }

    pub fn transport_error(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(
            provider,
            AttemptOutcome::TransportError {
                reason: reason.into(),
            },
        )
    }

    /// Domain error equivalent of a failed attempt
    pub fn failure(&self) -> Option<DomainError> {
        match &self.outcome {
            AttemptOutcome::Success { .. } => None,
            AttemptOutcome::Rejected { reason } => Some(DomainError::ProviderRejected {
                provider: self.provider.clone(),
                reason: reason.clone(),
            }),
            AttemptOutcome::TransportError { reason } => Some(DomainError::TransportError {
                provider: self.provider.clone(),
                reason: reason.clone(),
            }),
        }
    }
}

/// Session-scoped reference to file bytes held in this process
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LocalHandle {
    pub id: u64,
    pub uri: String,
    pub filename: String,
    pub size: usize,
}

impl fmt::Display for LocalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri)
    }
}

/// Terminal result of an upload run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UploadOutcome {
    RemoteHosted { url: String, provider: String },
    LocalOnly { handle: LocalHandle },
}

impl UploadOutcome {
    /// Link to hand to the overlay tool
    pub fn link(&self) -> &str {
        match self {
            UploadOutcome::RemoteHosted { url, .. } => url,
            UploadOutcome::LocalOnly { handle } => &handle.uri,
        }
    }

    pub fn provider(&self) -> Option<&str> {
        match self {
            UploadOutcome::RemoteHosted { provider, .. } => Some(provider),
            UploadOutcome::LocalOnly { .. } => None,
        }
    }

    pub fn local_handle(&self) -> Option<&LocalHandle> {
        match self {
            UploadOutcome::LocalOnly { handle } => Some(handle),
            UploadOutcome::RemoteHosted { .. } => None,
        }
    }

    pub fn is_local_only(&self) -> bool {
        matches!(self, UploadOutcome::LocalOnly { .. })
    }
}

/// Outcome plus the attempts that led to it
#[derive(Debug, Clone, Serialize)]
pub struct UploadRun {
    pub outcome: UploadOutcome,
    pub attempts: Vec<UploadAttempt>,
}

/// Inputs of the bitrate calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BitrateParameters {
    pub target_size_mb: f64,
    pub duration_sec: f64,
    /// Expected in [0, 30] but not enforced here
    pub safety_margin_percent: i32,
}

impl BitrateParameters {
    pub fn new(target_size_mb: f64, duration_sec: f64, safety_margin_percent: i32) -> Self {
        Self {
            target_size_mb,
            duration_sec,
            safety_margin_percent,
        }
    }
}

impl Default for BitrateParameters {
    fn default() -> Self {
        Self::new(3.0, 5.0, 10)
    }
}

/// x264/x265-style speed preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncoderPreset {
    Ultrafast,
    Superfast,
    Veryfast,
    Faster,
    Fast,
    #[default]
    Medium,
    Slow,
    Slower,
    Veryslow,
}

impl EncoderPreset {
    pub const ALL: [EncoderPreset; 9] = [
        EncoderPreset::Ultrafast,
        EncoderPreset::Superfast,
        EncoderPreset::Veryfast,
        EncoderPreset::Faster,
        EncoderPreset::Fast,
        EncoderPreset::Medium,
        EncoderPreset::Slow,
        EncoderPreset::Slower,
        EncoderPreset::Veryslow,
    ];

    /// Parse preset from string
    pub fn parse(preset_str: &str) -> Result<Self, DomainError> {
        let wanted = preset_str.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|preset| preset.as_str() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|p| p.as_str()).collect();
                DomainError::BadArgs(format!(
                    "Invalid preset: {}. Valid presets: {}",
                    preset_str,
                    valid.join(", ")
                ))
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EncoderPreset::Ultrafast => "ultrafast",
            EncoderPreset::Superfast => "superfast",
            EncoderPreset::Veryfast => "veryfast",
            EncoderPreset::Faster => "faster",
            EncoderPreset::Fast => "fast",
            EncoderPreset::Medium => "medium",
            EncoderPreset::Slow => "slow",
            EncoderPreset::Slower => "slower",
            EncoderPreset::Veryslow => "veryslow",
        }
    }
}

impl fmt::Display for EncoderPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation strings derived from a computed bitrate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncoderHint {
    pub command: String,
    pub rate_control: String,
}

/// Container format accepted for upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerPolicy {
    pub extension: String,
    pub media_type: String,
}

impl Default for ContainerPolicy {
    fn default() -> Self {
        Self {
            extension: "webm".to_string(),
            media_type: "video/webm".to_string(),
        }
    }
}

/// Rendering of command results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn parse(format_str: &str) -> Result<Self, DomainError> {
        match format_str.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid output format: {}. Valid formats: text, json, yaml",
                format_str
            ))),
        }
    }
}

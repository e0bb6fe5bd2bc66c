// Structured rendering shared by interactors and commands

use serde::Serialize;

use crate::domain::errors::DomainError;
use crate::domain::model::OutputFormat;

/// Render as JSON or YAML; `None` means the caller formats text itself
pub fn render_structured<T: Serialize>(
    value: &T,
    format: OutputFormat,
) -> Result<Option<String>, DomainError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(Some)
            .map_err(|e| DomainError::InternalError(format!("JSON serialization failed: {}", e))),
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map(Some)
            .map_err(|e| DomainError::InternalError(format!("YAML serialization failed: {}", e))),
        OutputFormat::Text => Ok(None),
    }
}

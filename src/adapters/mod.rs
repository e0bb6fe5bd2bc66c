// Adapters - External system implementations

pub mod http_provider;
pub mod preview_memory;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use http_provider::HttpProviderAdapter;
pub use preview_memory::SessionPreviewStore;
pub use toml_config::{AppConfig, BitrateDefaults, TomlConfigAdapter, UploadSettings};
pub use tracing_log::TracingStatusAdapter;

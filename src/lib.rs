//! Hotlink CLI Library
//!
//! Computes a target bitrate for WebM stream alerts and publishes finished
//! files to a public hotlink, trying remote providers in priority order and
//! degrading to a session-local preview when all of them fail.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{
    AttemptOutcome, BitrateParameters, ContainerPolicy, EncoderPreset, LocalHandle, ProviderSpec,
    UploadAttempt, UploadOutcome, UploadRequest, UploadRun,
};
pub use domain::rules::{BitrateModel, FileAdmission};
pub use error::{HotlinkError, HotlinkResult};

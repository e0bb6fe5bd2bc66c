//! Utility modules for Hotlink

pub mod logging;

pub use logging::{init_logging, LogFormat, LogLevel};

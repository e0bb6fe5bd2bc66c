// Tracing status adapter - Advisory progress text through the tracing crate

use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use crate::ports::*;

/// Logs each status line and remembers the latest one for the caller
#[derive(Debug, Default)]
pub struct TracingStatusAdapter {
    latest: Mutex<Option<String>>,
}

impl TracingStatusAdapter {
    /// Create new tracing status adapter
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusPort for TracingStatusAdapter {
    fn report(&self, status: &str) {
        info!(status = %status, "Upload status");
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(status.to_string());
    }

    fn clear(&self) {
        debug!("Upload status cleared");
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn latest(&self) -> Option<String> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

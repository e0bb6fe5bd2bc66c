// Session preview store - In-process handles for files no provider accepted

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::domain::model::*;
use crate::ports::*;

/// Keeps preview bytes in memory for the lifetime of the process.
///
/// Handles are never valid outside this process and must be released
/// when the user discards the upload or picks another file.
#[derive(Debug, Default)]
pub struct SessionPreviewStore {
    next_id: AtomicU64,
    entries: Mutex<HashMap<u64, Arc<[u8]>>>,
}

impl SessionPreviewStore {
    /// Create new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes behind a handle while it is live
    pub fn resolve(&self, handle: &LocalHandle) -> Option<Arc<[u8]>> {
        self.entries().get(&handle.id).cloned()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<u64, Arc<[u8]>>> {
        // Entries stay consistent even if a holder panicked
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreviewPort for SessionPreviewStore {
    fn create_local_handle(&self, request: &UploadRequest) -> LocalHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.entries().insert(id, request.shared_bytes());

        let handle = LocalHandle {
            id,
            uri: format!("blob:hotlink/{}/{}", id, request.filename()),
            filename: request.filename().to_string(),
            size: request.size(),
        };
        debug!(handle = %handle, bytes = handle.size, "Created local preview handle");
        handle
    }

    fn release(&self, handle: &LocalHandle) {
        if self.entries().remove(&handle.id).is_some() {
            debug!(handle = %handle, "Released local preview handle");
        }
    }

    fn live_handles(&self) -> usize {
        self.entries().len()
    }
}

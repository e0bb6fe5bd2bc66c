// Ports - Interface definitions (contracts)

use crate::domain::model::*;
use async_trait::async_trait;

/// Port for one remote storage backend
#[async_trait]
pub trait ProviderPort: Send + Sync {
    /// Static descriptor this adapter was built from
    fn spec(&self) -> &ProviderSpec;

    /// Try to publish the request.
    ///
    /// Always resolves: transport failures are reported as
    /// `AttemptOutcome::TransportError`, never as an error or panic.
    async fn attempt(&self, request: &UploadRequest) -> UploadAttempt;
}

/// Port for session-local previews used when no provider accepts the file
pub trait PreviewPort: Send + Sync {
    /// Register the request bytes and hand back a session-scoped handle.
    /// Infallible: this is the last resort of an upload run.
    fn create_local_handle(&self, request: &UploadRequest) -> LocalHandle;

    /// Release a handle. Releasing twice is a no-op.
    fn release(&self, handle: &LocalHandle);

    /// Number of handles currently held
    fn live_handles(&self) -> usize;
}

/// Port for advisory, human-readable progress text
pub trait StatusPort: Send + Sync {
    /// Publish a new status line
    fn report(&self, status: &str);

    /// Clear the current status line
    fn clear(&self);

    /// Most recently published status line, if not cleared
    fn latest(&self) -> Option<String>;
}

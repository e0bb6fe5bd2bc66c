// Upload session - Caller-owned "current upload" state

use std::sync::Arc;

use tracing::info;

use crate::app::upload_orchestrator::UploadOrchestrator;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::FileAdmission;
use crate::ports::*;

/// The front end's view of one file selection at a time.
///
/// Starting a new upload replaces the previous outcome and releases its
/// local preview handle, if any. Dropping the session releases it too.
pub struct UploadSession {
    orchestrator: Arc<UploadOrchestrator>,
    preview_port: Arc<dyn PreviewPort>,
    status_port: Arc<dyn StatusPort>,
    policy: ContainerPolicy,
    current: Option<UploadOutcome>,
}

impl UploadSession {
    /// Create new session with injected collaborators
    pub fn new(
        orchestrator: Arc<UploadOrchestrator>,
        preview_port: Arc<dyn PreviewPort>,
        status_port: Arc<dyn StatusPort>,
        policy: ContainerPolicy,
    ) -> Self {
        Self {
            orchestrator,
            preview_port,
            status_port,
            policy,
            current: None,
        }
    }

    /// Begin an upload for a new file selection.
    ///
    /// Files outside the container policy are refused with
    /// `DomainError::InvalidInput` before any provider is contacted, and the
    /// current outcome is left untouched.
    pub async fn begin(&mut self, request: UploadRequest) -> Result<UploadRun, DomainError> {
        FileAdmission::admit(&self.policy, &request)?;
        self.discard();

        info!(
            file = request.filename(),
            media_type = request.media_type(),
            bytes = request.size(),
            "Starting upload"
        );
        let run = self.orchestrator.run(&request).await;
        self.current = Some(run.outcome.clone());
        Ok(run)
    }

    /// Forget the current outcome and release its local handle
    pub fn discard(&mut self) {
        if let Some(outcome) = self.current.take() {
            if let Some(handle) = outcome.local_handle() {
                self.preview_port.release(handle);
            }
        }
        self.status_port.clear();
    }

    pub fn outcome(&self) -> Option<&UploadOutcome> {
        self.current.as_ref()
    }

    /// Advisory status text, e.g. the degraded-mode notice
    pub fn status(&self) -> Option<String> {
        self.status_port.latest()
    }

    pub fn is_local_only(&self) -> bool {
        self.current
            .as_ref()
            .map(UploadOutcome::is_local_only)
            .unwrap_or(false)
    }
}

impl Drop for UploadSession {
    fn drop(&mut self) {
        self.discard();
    }
}

// Upload orchestrator - Sequential provider fallback ending in a local preview

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Status shown once every remote provider has failed
pub const LOCAL_FALLBACK_STATUS: &str = "Cloud unreachable. Using local preview.";

/// Drives provider adapters in priority order until one hosts the file.
///
/// Runs share nothing: every call to [`UploadOrchestrator::run`] starts at
/// the highest-priority provider, tries each provider at most once and
/// returns the attempts it made instead of keeping them.
pub struct UploadOrchestrator {
    providers: Vec<Arc<dyn ProviderPort>>,
    preview_port: Arc<dyn PreviewPort>,
    status_port: Arc<dyn StatusPort>,
    attempt_timeout: Option<Duration>,
}

impl UploadOrchestrator {
    /// Create new orchestrator; providers are ordered by priority once, here
    pub fn new(
        mut providers: Vec<Arc<dyn ProviderPort>>,
        preview_port: Arc<dyn PreviewPort>,
        status_port: Arc<dyn StatusPort>,
    ) -> Self {
        // Stable sort keeps declaration order for equal priorities
        providers.sort_by_key(|provider| provider.spec().priority);
        Self {
            providers,
            preview_port,
            status_port,
            attempt_timeout: None,
        }
    }

    /// Bound every attempt by a deadline; `None` waits on the transport
    pub fn with_attempt_timeout(mut self, attempt_timeout: Option<Duration>) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    /// Provider names in try order
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers
            .iter()
            .map(|provider| provider.spec().name.as_str())
            .collect()
    }

    /// Publish the request, degrading to a local preview if every provider fails
    pub async fn run(&self, request: &UploadRequest) -> UploadRun {
        let total = self.providers.len();
        let mut attempts = Vec::with_capacity(total);
        let mut previous: Option<&str> = None;

        for (index, provider) in self.providers.iter().enumerate() {
            let name = provider.spec().name.as_str();
            let status = match previous {
                None => format!("Uploading to {} ({}/{})...", name, index + 1, total),
                Some(failed) => format!(
                    "{} unavailable. Routing to {} ({}/{})...",
                    failed,
                    name,
                    index + 1,
                    total
                ),
            };
            self.status_port.report(&status);

            let attempt = self.try_provider(provider.as_ref(), request).await;

            if let AttemptOutcome::Success { url } = &attempt.outcome {
                info!(provider = name, url = %url, attempt = index + 1, "Upload hosted remotely");
                let outcome = UploadOutcome::RemoteHosted {
                    url: url.clone(),
                    provider: name.to_string(),
                };
                attempts.push(attempt);
                self.status_port.clear();
                return UploadRun { outcome, attempts };
            }

            if let Some(error) = attempt.failure() {
                warn!(
                    provider = name,
                    reason_tag = attempt.outcome.reason_tag(),
                    attempt = index + 1,
                    "{}",
                    error
                );
            }
            attempts.push(attempt);
            previous = Some(name);
        }

        self.fall_back_to_local(request, attempts)
    }

    async fn try_provider(&self, provider: &dyn ProviderPort, request: &UploadRequest) -> UploadAttempt {
        let Some(limit) = self.attempt_timeout else {
            return provider.attempt(request).await;
        };

        match tokio::time::timeout(limit, provider.attempt(request)).await {
            Ok(attempt) => attempt,
            Err(_) => UploadAttempt::transport_error(
                provider.spec().name.as_str(),
                format!("timed out after {:?}", limit),
            ),
        }
    }

    fn fall_back_to_local(&self, request: &UploadRequest, attempts: Vec<UploadAttempt>) -> UploadRun {
        let exhausted = DomainError::AllProvidersExhausted {
            attempts: attempts.len(),
        };
        warn!(file = request.filename(), "{}; falling back to local preview", exhausted);

        self.status_port.report(LOCAL_FALLBACK_STATUS);
        let handle = self.preview_port.create_local_handle(request);

        UploadRun {
            outcome: UploadOutcome::LocalOnly { handle },
            attempts,
        }
    }
}

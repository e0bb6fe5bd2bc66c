use std::sync::Arc;

use crate::adapters::{AppConfig, HttpProviderAdapter, SessionPreviewStore, TracingStatusAdapter};
use crate::app::{session::UploadSession, upload_orchestrator::UploadOrchestrator};
use crate::domain::model::ContainerPolicy;
use crate::error::HotlinkResult;
use crate::ports::{PreviewPort, ProviderPort, StatusPort};

pub trait AppContainer: Send + Sync {
    fn upload_orchestrator(&self) -> Arc<UploadOrchestrator>;
    fn upload_session(&self) -> UploadSession;
}

pub struct DefaultAppContainer {
    upload_orchestrator: Arc<UploadOrchestrator>,
    preview_store: Arc<SessionPreviewStore>,
    status_port: Arc<TracingStatusAdapter>,
    policy: ContainerPolicy,
}

impl DefaultAppContainer {
    /// Wire HTTP adapters for every configured provider
    pub fn new(config: &AppConfig) -> HotlinkResult<Self> {
        config.validate()?;

        let client = HttpProviderAdapter::build_client(&config.upload.user_agent)?;
        let providers: Vec<Arc<dyn ProviderPort>> = config
            .providers
            .iter()
            .cloned()
            .map(|spec| Arc::new(HttpProviderAdapter::new(spec, client.clone())) as Arc<dyn ProviderPort>)
            .collect();

        Ok(Self::with_providers(config, providers))
    }

    /// Wire the given provider adapters, e.g. fakes in tests
    pub fn with_providers(config: &AppConfig, providers: Vec<Arc<dyn ProviderPort>>) -> Self {
        let preview_store = Arc::new(SessionPreviewStore::new());
        let status_port = Arc::new(TracingStatusAdapter::new());

        let upload_orchestrator = Arc::new(
            UploadOrchestrator::new(
                providers,
                Arc::clone(&preview_store) as Arc<dyn PreviewPort>,
                Arc::clone(&status_port) as Arc<dyn StatusPort>,
            )
            .with_attempt_timeout(config.upload.attempt_timeout()),
        );

        Self {
            upload_orchestrator,
            preview_store,
            status_port,
            policy: config.container.clone(),
        }
    }

    /// Store backing local previews
    pub fn preview_store(&self) -> Arc<SessionPreviewStore> {
        Arc::clone(&self.preview_store)
    }
}

impl AppContainer for DefaultAppContainer {
    fn upload_orchestrator(&self) -> Arc<UploadOrchestrator> {
        Arc::clone(&self.upload_orchestrator)
    }

    fn upload_session(&self) -> UploadSession {
        UploadSession::new(
            Arc::clone(&self.upload_orchestrator),
            Arc::clone(&self.preview_store) as Arc<dyn PreviewPort>,
            Arc::clone(&self.status_port) as Arc<dyn StatusPort>,
            self.policy.clone(),
        )
    }
}

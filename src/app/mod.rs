// Application layer - Use case interactors

pub mod bitrate_interactor;
pub mod container;
pub mod render;
pub mod session;
pub mod upload_orchestrator;

// Re-export interactors
pub use bitrate_interactor::{BitrateInteractor, BitrateReport, BitrateRequest, BitrateResponse};
pub use container::{AppContainer, DefaultAppContainer};
pub use session::UploadSession;
pub use upload_orchestrator::UploadOrchestrator;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hotlink_cli::adapters::{AppConfig, SessionPreviewStore, TracingStatusAdapter};
use hotlink_cli::app::upload_orchestrator::LOCAL_FALLBACK_STATUS;
use hotlink_cli::app::{AppContainer, DefaultAppContainer, UploadOrchestrator};
use hotlink_cli::ports::{PreviewPort, ProviderPort, StatusPort};
use hotlink_cli::*;

/// Test utilities for scripted providers
mod test_utils {
    use super::*;

    /// What a fake provider answers with
    #[derive(Clone)]
    pub enum Script {
        Succeed(&'static str),
        Reject(&'static str),
        Fail(&'static str),
        Stall,
    }

    /// Provider that replays a fixed outcome and counts its calls
    pub struct FakeProvider {
        spec: ProviderSpec,
        script: Script,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        pub fn new(name: &str, priority: u32, script: Script) -> Arc<Self> {
            Arc::new(Self {
                spec: ProviderSpec {
                    name: name.to_string(),
                    priority,
                    endpoint: format!("https://{}.invalid/upload", name),
                    file_field: "file".to_string(),
                    success_path: "/success".to_string(),
                    url_path: "/url".to_string(),
                },
                script,
                calls: AtomicUsize::new(0),
            })
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProviderPort for FakeProvider {
        fn spec(&self) -> &ProviderSpec {
            &self.spec
        }

        async fn attempt(&self, _request: &UploadRequest) -> UploadAttempt {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.script {
                Script::Succeed(url) => UploadAttempt::success(&self.spec.name, *url),
                Script::Reject(reason) => UploadAttempt::rejected(&self.spec.name, *reason),
                Script::Fail(reason) => UploadAttempt::transport_error(&self.spec.name, *reason),
                Script::Stall => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    UploadAttempt::transport_error(&self.spec.name, "stalled")
                }
            }
        }
    }

    pub fn as_ports(fakes: &[Arc<FakeProvider>]) -> Vec<Arc<dyn ProviderPort>> {
        fakes
            .iter()
            .map(|fake| Arc::clone(fake) as Arc<dyn ProviderPort>)
            .collect()
    }

    pub fn orchestrator(
        fakes: &[Arc<FakeProvider>],
    ) -> (UploadOrchestrator, Arc<SessionPreviewStore>, Arc<TracingStatusAdapter>) {
        let preview = Arc::new(SessionPreviewStore::new());
        let status = Arc::new(TracingStatusAdapter::new());
        let orchestrator = UploadOrchestrator::new(
            as_ports(fakes),
            Arc::clone(&preview) as Arc<dyn PreviewPort>,
            Arc::clone(&status) as Arc<dyn StatusPort>,
        );
        (orchestrator, preview, status)
    }

    pub fn webm(name: &str) -> UploadRequest {
        UploadRequest::new(b"\x1a\x45\xdf\xa3 webm".to_vec(), "video/webm", name)
    }
}

use test_utils::*;

#[tokio::test]
async fn test_first_provider_success_records_one_attempt() {
    let fakes = [
        FakeProvider::new("pomf", 0, Script::Succeed("https://pomf/a.webm")),
        FakeProvider::new("fileio", 1, Script::Succeed("https://fileio/a")),
    ];
    let (orchestrator, preview, status) = orchestrator(&fakes);

    let run = orchestrator.run(&webm("a.webm")).await;

    assert_eq!(
        run.outcome,
        UploadOutcome::RemoteHosted {
            url: "https://pomf/a.webm".to_string(),
            provider: "pomf".to_string(),
        }
    );
    assert_eq!(run.attempts.len(), 1);
    assert_eq!(fakes[1].calls(), 0);
    assert_eq!(preview.live_handles(), 0);
    assert_eq!(status.latest(), None);
}

#[tokio::test]
async fn test_kth_provider_success_stops_the_chain() {
    let fakes = [
        FakeProvider::new("a", 0, Script::Fail("status 502 Bad Gateway")),
        FakeProvider::new("b", 1, Script::Reject("provider reported failure")),
        FakeProvider::new("c", 2, Script::Succeed("https://c/x.webm")),
        FakeProvider::new("d", 3, Script::Succeed("https://d/x.webm")),
    ];
    let (orchestrator, preview, _) = orchestrator(&fakes);

    let run = orchestrator.run(&webm("x.webm")).await;

    assert_eq!(run.outcome.provider(), Some("c"));
    assert_eq!(run.outcome.link(), "https://c/x.webm");
    assert_eq!(run.attempts.len(), 3);
    let tags: Vec<&str> = run.attempts.iter().map(|a| a.outcome.reason_tag()).collect();
    assert_eq!(tags, vec!["transport_error", "rejected", "success"]);
    assert_eq!(
        fakes.iter().map(|f| f.calls()).collect::<Vec<_>>(),
        vec![1, 1, 1, 0]
    );
    assert_eq!(preview.live_handles(), 0);
}

#[tokio::test]
async fn test_all_providers_fail_falls_back_to_local() {
    let fakes = [
        FakeProvider::new("a", 0, Script::Reject("malformed response")),
        FakeProvider::new("b", 1, Script::Fail("connection failed")),
        FakeProvider::new("c", 2, Script::Fail("status 500")),
    ];
    let (orchestrator, preview, status) = orchestrator(&fakes);

    let run = orchestrator.run(&webm("alert.webm")).await;

    assert!(run.outcome.is_local_only());
    assert_eq!(run.attempts.len(), 3);
    assert!(fakes.iter().all(|f| f.calls() == 1));

    let handle = run.outcome.local_handle().unwrap();
    assert!(handle.uri.starts_with("blob:hotlink/"));
    assert!(handle.uri.ends_with("/alert.webm"));
    assert_eq!(preview.live_handles(), 1);
    assert!(preview.resolve(handle).is_some());
    assert_eq!(status.latest().as_deref(), Some(LOCAL_FALLBACK_STATUS));
}

#[tokio::test]
async fn test_providers_are_tried_by_priority_not_declaration() {
    let fakes = [
        FakeProvider::new("late", 9, Script::Succeed("https://late/x")),
        FakeProvider::new("early", 1, Script::Fail("status 503")),
    ];
    let (orchestrator, _, _) = orchestrator(&fakes);
    assert_eq!(orchestrator.provider_names(), vec!["early", "late"]);

    let run = orchestrator.run(&webm("x.webm")).await;

    assert_eq!(run.attempts[0].provider, "early");
    assert_eq!(run.outcome.provider(), Some("late"));
}

#[tokio::test]
async fn test_each_run_starts_fresh() {
    let fakes = [
        FakeProvider::new("a", 0, Script::Fail("status 500")),
        FakeProvider::new("b", 1, Script::Succeed("https://b/x")),
    ];
    let (orchestrator, _, _) = orchestrator(&fakes);

    let first = orchestrator.run(&webm("one.webm")).await;
    let second = orchestrator.run(&webm("two.webm")).await;

    assert_eq!(first.attempts.len(), 2);
    assert_eq!(second.attempts.len(), 2);
    assert_eq!(fakes[0].calls(), 2);
}

#[tokio::test]
async fn test_stalled_provider_is_bounded_by_deadline() {
    let fakes = [
        FakeProvider::new("slow", 0, Script::Stall),
        FakeProvider::new("fast", 1, Script::Succeed("https://fast/x")),
    ];
    let (orchestrator, _, _) = orchestrator(&fakes);
    let orchestrator = orchestrator.with_attempt_timeout(Some(Duration::from_millis(50)));

    let run = orchestrator.run(&webm("x.webm")).await;

    assert_eq!(run.attempts[0].outcome.reason_tag(), "transport_error");
    assert!(run.attempts[0].outcome.reason().unwrap().contains("timed out"));
    assert_eq!(run.outcome.provider(), Some("fast"));
}

#[tokio::test]
async fn test_no_providers_goes_straight_to_local() {
    let (orchestrator, preview, _) = orchestrator(&[]);

    let run = orchestrator.run(&webm("x.webm")).await;

    assert!(run.outcome.is_local_only());
    assert!(run.attempts.is_empty());
    assert_eq!(preview.live_handles(), 1);
}

#[tokio::test]
async fn test_session_rejects_wrong_container_before_any_attempt() {
    let fake = FakeProvider::new("pomf", 0, Script::Succeed("https://pomf/x"));
    let container = DefaultAppContainer::with_providers(&AppConfig::default(), as_ports(&[Arc::clone(&fake)]));
    let mut session = container.upload_session();

    let result = session
        .begin(UploadRequest::new(b"mp4".to_vec(), "video/mp4", "clip.mp4"))
        .await;

    assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    assert_eq!(fake.calls(), 0);
    assert!(session.outcome().is_none());
}

#[tokio::test]
async fn test_session_discard_releases_local_handle() {
    let fake = FakeProvider::new("pomf", 0, Script::Fail("status 500"));
    let container = DefaultAppContainer::with_providers(&AppConfig::default(), as_ports(&[fake]));
    let store = container.preview_store();
    let mut session = container.upload_session();

    let run = session.begin(webm("a.webm")).await.unwrap();
    assert!(run.outcome.is_local_only());
    assert!(session.is_local_only());
    assert_eq!(session.status().as_deref(), Some(LOCAL_FALLBACK_STATUS));
    assert_eq!(store.live_handles(), 1);

    session.discard();
    assert!(session.outcome().is_none());
    assert!(session.status().is_none());
    assert_eq!(store.live_handles(), 0);
}

#[tokio::test]
async fn test_new_selection_supersedes_previous_handle() {
    let fake = FakeProvider::new("pomf", 0, Script::Reject("provider reported failure"));
    let container = DefaultAppContainer::with_providers(&AppConfig::default(), as_ports(&[fake]));
    let store = container.preview_store();
    let mut session = container.upload_session();

    let first = session.begin(webm("first.webm")).await.unwrap();
    let second = session.begin(webm("second.webm")).await.unwrap();

    assert_eq!(store.live_handles(), 1);
    let first_handle = first.outcome.local_handle().unwrap();
    let second_handle = second.outcome.local_handle().unwrap();
    assert!(store.resolve(first_handle).is_none());
    assert!(store.resolve(second_handle).is_some());

    drop(session);
    assert_eq!(store.live_handles(), 0);
}

#[tokio::test]
async fn test_rejected_selection_keeps_current_outcome() {
    let fake = FakeProvider::new("pomf", 0, Script::Succeed("https://pomf/keep.webm"));
    let container = DefaultAppContainer::with_providers(&AppConfig::default(), as_ports(&[fake]));
    let mut session = container.upload_session();

    session.begin(webm("keep.webm")).await.unwrap();
    let rejected = session
        .begin(UploadRequest::new(Vec::new(), "image/gif", "meme.gif"))
        .await;

    assert!(rejected.is_err());
    assert_eq!(session.outcome().map(|o| o.link()), Some("https://pomf/keep.webm"));
}

#[test]
fn test_bitrate_example_through_public_api() {
    let params = BitrateParameters::new(3.0, 5.0, 10);
    assert_eq!(BitrateModel::compute_bitrate_kbps(&params), 4423);
    assert_eq!(
        BitrateModel::compute_bitrate_kbps(&BitrateParameters::new(3.0, 0.0, 10)),
        0
    );
}

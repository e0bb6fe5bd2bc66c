// HTTP provider adapter - Multipart upload to a remote file host

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use crate::domain::model::*;
use crate::domain::rules::ResponseContract;
use crate::error::HotlinkResult;
use crate::ports::*;

/// Generic adapter driven entirely by a `ProviderSpec`
pub struct HttpProviderAdapter {
    spec: ProviderSpec,
    client: reqwest::Client,
}

impl HttpProviderAdapter {
    /// Create new adapter sharing the given client
    pub fn new(spec: ProviderSpec, client: reqwest::Client) -> Self {
        Self { spec, client }
    }

    /// Build the client shared by all provider adapters
    pub fn build_client(user_agent: &str) -> HotlinkResult<reqwest::Client> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(client)
    }

    /// Multipart body with the file under the provider's field name
    fn build_form(&self, request: &UploadRequest) -> Form {
        Form::new().part(self.spec.file_field.clone(), Self::payload_part(request))
    }

    fn payload_part(request: &UploadRequest) -> Part {
        let part = || Part::bytes(request.bytes().to_vec()).file_name(request.filename().to_string());

        if request.media_type().is_empty() {
            return part();
        }

        match part().mime_str(request.media_type()) {
            Ok(part) => part,
            Err(e) => {
                warn!(
                    media_type = request.media_type(),
                    "Ignoring unparseable media type: {}", e
                );
                part()
            }
        }
    }

    fn describe_transport_error(error: &reqwest::Error) -> String {
        if error.is_timeout() {
            format!("request timed out: {}", error)
        } else if error.is_connect() {
            format!("connection failed: {}", error)
        } else {
            error.to_string()
        }
    }
}

#[async_trait]
impl ProviderPort for HttpProviderAdapter {
    fn spec(&self) -> &ProviderSpec {
        &self.spec
    }

    async fn attempt(&self, request: &UploadRequest) -> UploadAttempt {
        let name = self.spec.name.as_str();
        debug!(
            provider = name,
            endpoint = %self.spec.endpoint,
            field = %self.spec.file_field,
            bytes = request.size(),
            "Posting multipart upload"
        );

        let response = match self
            .client
            .post(&self.spec.endpoint)
            .multipart(self.build_form(request))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return UploadAttempt::transport_error(name, Self::describe_transport_error(&e)),
        };

        let status = response.status();
        if !status.is_success() {
            return UploadAttempt::transport_error(name, format!("status {}", status));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return UploadAttempt::transport_error(
                    name,
                    format!("failed to read response body: {}", e),
                )
            }
        };

        UploadAttempt::new(name, ResponseContract::evaluate(&self.spec, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn request() -> UploadRequest {
        UploadRequest::new(b"fake webm payload".to_vec(), "video/webm", "alert.webm")
    }

    fn adapter_for(spec: ProviderSpec, server: &mockito::ServerGuard, path: &str) -> HttpProviderAdapter {
        let spec = ProviderSpec {
            endpoint: format!("{}{}", server.url(), path),
            ..spec
        };
        HttpProviderAdapter::new(spec, reqwest::Client::new())
    }

    #[tokio::test]
    async fn test_pomf_success_uses_files_field() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/upload.php")
            .match_header("content-type", Matcher::Regex("multipart/form-data".to_string()))
            .match_body(Matcher::Regex(r#"name="files\[\]"; filename="alert.webm""#.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": true, "files": [{"url": "https://pomf2.lain.la/f/x.webm"}]}"#)
            .create_async()
            .await;

        let adapter = adapter_for(ProviderSpec::pomf(), &server, "/upload.php");
        let attempt = adapter.attempt(&request()).await;

        mock.assert_async().await;
        assert_eq!(attempt.provider, "pomf");
        assert_eq!(attempt.outcome.url(), Some("https://pomf2.lain.la/f/x.webm"));
    }

    #[tokio::test]
    async fn test_file_io_success_uses_file_field() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::Regex(r#"name="file"; filename="alert.webm""#.to_string()))
            .with_status(200)
            .with_body(r#"{"success": true, "link": "https://file.io/abc"}"#)
            .create_async()
            .await;

        let adapter = adapter_for(ProviderSpec::file_io(), &server, "/");
        let attempt = adapter.attempt(&request()).await;

        mock.assert_async().await;
        assert_eq!(attempt.outcome.url(), Some("https://file.io/abc"));
    }

    #[tokio::test]
    async fn test_failure_flag_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/upload.php")
            .with_status(200)
            .with_body(r#"{"success": false, "description": "No input file(s)"}"#)
            .create_async()
            .await;

        let adapter = adapter_for(ProviderSpec::pomf(), &server, "/upload.php");
        let attempt = adapter.attempt(&request()).await;

        assert_eq!(attempt.outcome.reason_tag(), "rejected");
        assert!(attempt.outcome.reason().unwrap().contains("No input file(s)"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/upload.php")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let adapter = adapter_for(ProviderSpec::pomf(), &server, "/upload.php");
        let attempt = adapter.attempt(&request()).await;

        assert_eq!(attempt.outcome.reason_tag(), "rejected");
    }

    #[tokio::test]
    async fn test_error_status_is_transport_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/upload.php")
            .with_status(503)
            .with_body(r#"{"success": true, "files": [{"url": "ignored"}]}"#)
            .create_async()
            .await;

        let adapter = adapter_for(ProviderSpec::pomf(), &server, "/upload.php");
        let attempt = adapter.attempt(&request()).await;

        assert_eq!(attempt.outcome.reason_tag(), "transport_error");
        assert!(attempt.outcome.reason().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let spec = ProviderSpec {
            endpoint: "http://127.0.0.1:9/upload.php".to_string(),
            ..ProviderSpec::pomf()
        };
        let adapter = HttpProviderAdapter::new(spec, reqwest::Client::new());

        let attempt = adapter.attempt(&request()).await;

        assert_eq!(attempt.outcome.reason_tag(), "transport_error");
    }
}

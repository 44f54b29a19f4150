//! Injected transport capability for string-table payloads.

use async_trait::async_trait;
use polyglot_core::{LocalizeError, Result};
use std::path::PathBuf;

/// Minimal response surface the loader needs from a transport.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    status: u16,
    body: String,
}

impl FetchResponse {
    /// A response with an explicit status code.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A successful (200) response.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// Status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Response payload.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport capability for retrieving string-table payloads.
///
/// The engine never talks to a network stack directly; the host injects
/// whatever transport fits its environment. Connection-level failures are
/// [`LocalizeError::Transport`] errors; protocol-level failures come back as
/// a response with a non-2xx status.
#[async_trait]
pub trait StringFetcher: Send + Sync {
    /// Retrieve the payload at `endpoint`.
    async fn fetch(&self, endpoint: &str) -> Result<FetchResponse>;
}

/// HTTP transport backed by reqwest.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    /// Fetcher over a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetcher over a pre-configured client (timeouts, proxies, TLS).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl StringFetcher for HttpFetcher {
    async fn fetch(&self, endpoint: &str) -> Result<FetchResponse> {
        let response = self.client.get(endpoint).send().await.map_err(|e| {
            LocalizeError::Transport {
                endpoint: endpoint.to_string(),
                status: e.status().map(|s| s.as_u16()),
                reason: e.to_string(),
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| LocalizeError::Transport {
                endpoint: endpoint.to_string(),
                status: Some(status),
                reason: e.to_string(),
            })?;
        Ok(FetchResponse::new(status, body))
    }
}

/// Filesystem transport resolving endpoints relative to a root directory.
///
/// Serves deployments where tables ship as local files next to the
/// application, and doubles as the deterministic test transport. A missing
/// file maps to a 404 response, other I/O failures to transport errors.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    /// Fetcher resolving endpoints under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl StringFetcher for FileFetcher {
    async fn fetch(&self, endpoint: &str) -> Result<FetchResponse> {
        let path = self.root.join(endpoint);
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(FetchResponse::ok(body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(FetchResponse::new(404, String::new()))
            }
            Err(e) => Err(LocalizeError::Transport {
                endpoint: endpoint.to_string(),
                status: None,
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_fetcher_reads_tables() {
        let dir = tempfile::tempdir().unwrap();
        let locales = dir.path().join("locales");
        std::fs::create_dir(&locales).unwrap();
        std::fs::write(locales.join("en_US.json"), r#"{"helloString":"Hello"}"#).unwrap();

        let fetcher = FileFetcher::new(dir.path());
        let response = fetcher.fetch("locales/en_US.json").await.unwrap();
        assert!(response.is_success());
        assert_eq!(response.body(), r#"{"helloString":"Hello"}"#);
    }

    #[tokio::test]
    async fn test_file_fetcher_maps_missing_file_to_404() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FileFetcher::new(dir.path());
        let response = fetcher.fetch("locales/fr_FR.json").await.unwrap();
        assert_eq!(response.status(), 404);
        assert!(!response.is_success());
    }
}

#[cfg(all(test, feature = "http"))]
mod http_tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_http_fetcher_returns_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/locales/en_US.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"helloString":"Hello"}"#),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new();
        let response = fetcher
            .fetch(&format!("{}/locales/en_US.json", server.uri()))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.body(), r#"{"helloString":"Hello"}"#);
    }

    #[tokio::test]
    async fn test_http_fetcher_passes_error_status_through() {
        let server = MockServer::start().await;
        let fetcher = HttpFetcher::new();
        let response = fetcher
            .fetch(&format!("{}/locales/missing.json", server.uri()))
            .await
            .unwrap();
        assert_eq!(response.status(), 404);
        assert!(!response.is_success());
    }
}

//! Upstream search fetcher.
//!
//! Issues one unauthenticated GET against the multi-section search endpoint
//! with the query percent-encoded as the single `q` parameter, buffers the
//! whole body, and decodes it into a [`SearchPayload`]. No retries, no
//! pagination, no caching.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use songseek_core::SearchPayload;

use crate::config::Config;
use crate::error::{FetchError, FetchResult};

/// Default search endpoint.
pub const GENIUS_SEARCH_ENDPOINT: &str = "https://genius.com/api/search/multi";

const SOURCE_NAME: &str = "Genius";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default user-agent header.
pub const DEFAULT_USER_AGENT: &str = concat!("songseek/", env!("CARGO_PKG_VERSION"));

/// Retrieves a raw search payload for a query.
///
/// Implement this trait to substitute the network in tests.
#[async_trait]
pub trait Fetcher: Send + Sync + fmt::Debug {
    async fn fetch(&self, query: &str) -> FetchResult<SearchPayload>;
}

/// Client for the Genius multi-section search endpoint.
#[derive(Debug, Clone)]
pub struct GeniusClient {
    http: Client,
    endpoint: String,
}

impl GeniusClient {
    /// Create a client for the public endpoint with default settings.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new() -> FetchResult<Self> {
        Self::with_settings(GENIUS_SEARCH_ENDPOINT, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &Config) -> FetchResult<Self> {
        Self::with_settings(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
            &config.user_agent,
        )
    }

    /// Create a client for an arbitrary endpoint.
    pub fn with_settings(
        endpoint: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> FetchResult<Self> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Full request URL for `query`.
    pub fn search_url(&self, query: &str) -> String {
        format!("{}?q={}", self.endpoint, urlencoding::encode(query))
    }
}

#[async_trait]
impl Fetcher for GeniusClient {
    async fn fetch(&self, query: &str) -> FetchResult<SearchPayload> {
        let url = self.search_url(query);
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| FetchError::Http {
                source_name: SOURCE_NAME.to_string(),
                message: e.to_string(),
            })?;

        let body = response.bytes().await?;
        let payload = SearchPayload::from_slice(&body).map_err(|e| FetchError::Parse {
            source_name: SOURCE_NAME.to_string(),
            message: e.to_string(),
        })?;

        check_status(&payload)?;
        Ok(payload)
    }
}

/// Reject envelopes whose `meta.status` is present and not 2xx.
fn check_status(payload: &SearchPayload) -> FetchResult<()> {
    match payload.status() {
        Some(status) if !(200..300).contains(&status) => Err(FetchError::UpstreamStatus {
            source_name: SOURCE_NAME.to_string(),
            status,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer one request on a loopback port with `status_line` and `body`.
    async fn loopback_client(status_line: &'static str, body: &'static str) -> GeniusClient {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        GeniusClient::with_settings(
            format!("http://{addr}/api/search/multi"),
            Duration::from_secs(5),
            DEFAULT_USER_AGENT,
        )
        .unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = GeniusClient::new().unwrap();
        assert_eq!(client.endpoint(), GENIUS_SEARCH_ENDPOINT);
    }

    #[test]
    fn test_client_from_config() {
        let config = Config {
            endpoint: "http://localhost:8080/search".to_string(),
            ..Config::default()
        };
        let client = GeniusClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/search");
    }

    #[test]
    fn test_search_url_percent_encodes_query() {
        let client = GeniusClient::new().unwrap();
        assert_eq!(
            client.search_url("Bohemian Rhapsody"),
            "https://genius.com/api/search/multi?q=Bohemian%20Rhapsody"
        );
        assert_eq!(
            client.search_url("AC/DC & friends?"),
            "https://genius.com/api/search/multi?q=AC%2FDC%20%26%20friends%3F"
        );
    }

    #[test]
    fn test_user_agent_format() {
        assert!(DEFAULT_USER_AGENT.starts_with("songseek/"));
    }

    #[test]
    fn test_check_status_accepts_success_and_absent() {
        let ok = SearchPayload::from_value(json!({"meta": {"status": 200}})).unwrap();
        assert!(check_status(&ok).is_ok());

        let absent = SearchPayload::from_value(json!({})).unwrap();
        assert!(check_status(&absent).is_ok());
    }

    #[test]
    fn test_check_status_rejects_failure() {
        let payload = SearchPayload::from_value(json!({"meta": {"status": 404}})).unwrap();
        match check_status(&payload) {
            Err(FetchError::UpstreamStatus { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected upstream status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_request_error() {
        // Port 9 (discard) on loopback is not expected to be listening.
        let client = GeniusClient::with_settings(
            "http://127.0.0.1:9/api/search/multi",
            Duration::from_secs(5),
            DEFAULT_USER_AGENT,
        )
        .unwrap();

        let result = client.fetch("anything").await;
        assert!(matches!(result, Err(FetchError::Request(_))));
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_http_error() {
        let client = loopback_client("500 Internal Server Error", "").await;

        match client.fetch("anything").await {
            Err(FetchError::Http { message, .. }) => assert!(message.contains("500")),
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_non_json_body_is_parse_error() {
        let client = loopback_client("200 OK", "<html>maintenance</html>").await;

        let result = client.fetch("anything").await;
        assert!(matches!(result, Err(FetchError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_fetch_envelope_failure_status() {
        let client = loopback_client("200 OK", r#"{"meta":{"status":404}}"#).await;

        match client.fetch("anything").await {
            Err(FetchError::UpstreamStatus { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected upstream status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_decodes_payload() {
        let client = loopback_client(
            "200 OK",
            r#"{"meta":{"status":200},"response":{"sections":[{"type":"song","hits":[]}]}}"#,
        )
        .await;

        let payload = client.fetch("anything").await.unwrap();
        assert_eq!(payload.status(), Some(200));
        assert_eq!(payload.sections()[0].kind, "song");
    }
}

//! reqwest-backed catalog client

use super::{CatalogClient, UpstreamRequest};
use crate::config::UpstreamConfig;
use crate::core::error::{ProxyError, ProxyResult};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

/// HTTP client for the upstream catalog
///
/// Each call is bounded by the configured timeout and never retried.
#[derive(Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
}

impl HttpCatalogClient {
    /// Create a client using the timeout from configuration
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch(&self, request: &UpstreamRequest) -> ProxyResult<Value> {
        tracing::debug!(url = %request.url, params = ?request.params, "fetching from upstream");

        let response = self
            .http
            .get(&request.url)
            .query(&request.params)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %request.url, error = %e, "upstream unreachable");
                ProxyError::UpstreamUnavailable {
                    reason: e.to_string(),
                }
            })?;

        let status = response.status();
        classify_status(status)?;

        response.json::<Value>().await.map_err(|e| {
            tracing::warn!(url = %request.url, error = %e, "upstream returned an unreadable body");
            // A timeout while streaming the body is still a transport failure
            if e.is_timeout() {
                ProxyError::UpstreamUnavailable {
                    reason: e.to_string(),
                }
            } else {
                ProxyError::InvalidUpstreamBody {
                    reason: e.to_string(),
                }
            }
        })
    }
}

/// Map an upstream status to the error taxonomy; Ok for anything below 400
fn classify_status(status: StatusCode) -> ProxyResult<()> {
    if status == StatusCode::NOT_FOUND {
        return Err(ProxyError::NotFound);
    }

    if status.as_u16() >= 400 {
        tracing::warn!(status = status.as_u16(), "upstream returned an error status");
        return Err(ProxyError::UpstreamError {
            status: status.as_u16(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ResourceType;
    use crate::upstream::build_request;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> HttpCatalogClient {
        HttpCatalogClient::new(&UpstreamConfig::default()).expect("should build client")
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(StatusCode::OK), Ok(()));
        assert_eq!(classify_status(StatusCode::NOT_FOUND), Err(ProxyError::NotFound));
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            Err(ProxyError::UpstreamError { status: 500 })
        );
        assert_eq!(
            classify_status(StatusCode::BAD_REQUEST),
            Err(ProxyError::UpstreamError { status: 400 })
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/people/"))
            .and(query_param("search", "luke"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 1,
                "results": [{"name": "Luke Skywalker"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let request = build_request(
            &mock_server.uri(),
            ResourceType::People,
            None,
            Some("luke"),
            None,
        );
        let body = client().fetch(&request).await.expect("should fetch");

        assert_eq!(body["count"], 1);
        assert_eq!(body["results"][0]["name"], "Luke Skywalker");
    }

    #[tokio::test]
    async fn test_fetch_maps_404_to_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/films/99/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let request = build_request(&mock_server.uri(), ResourceType::Films, Some("99"), None, None);
        let err = client().fetch(&request).await.unwrap_err();

        assert_eq!(err, ProxyError::NotFound);
    }

    #[tokio::test]
    async fn test_fetch_maps_server_error_without_retry() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/planets/"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let request = build_request(&mock_server.uri(), ResourceType::Planets, None, None, None);
        let err = client().fetch(&request).await.unwrap_err();

        assert_eq!(err, ProxyError::UpstreamError { status: 503 });
        assert_eq!(err.to_string(), "SWAPI error 503");
    }

    #[tokio::test]
    async fn test_fetch_non_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/vehicles/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let request = build_request(&mock_server.uri(), ResourceType::Vehicles, None, None, None);
        let err = client().fetch(&request).await.unwrap_err();

        assert!(matches!(err, ProxyError::InvalidUpstreamBody { .. }));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_upstream() {
        // Nothing listens on port 9 (discard) on test hosts
        let request = build_request("http://127.0.0.1:9", ResourceType::People, None, None, None);
        let err = client().fetch(&request).await.unwrap_err();

        assert!(matches!(err, ProxyError::UpstreamUnavailable { .. }));
        assert_eq!(err.error_code(), "UPSTREAM_UNAVAILABLE");
    }
}

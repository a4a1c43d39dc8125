//! Storage API client with request/response handling.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::error::ApiErrorCode;
use crate::config::Site;
use crate::error::{BcError, Result};
use crate::http::{HttpClient, Method, Request, Transport};

/// Authenticated client for one site.
///
/// Cheap to clone; clones share the underlying transport.
#[derive(Debug, Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    site: Site,
}

impl ApiClient {
    /// Create a client backed by a fresh [`HttpClient`].
    pub fn new(site: Site) -> Self {
        Self::with_transport(site, Arc::new(HttpClient::new()))
    }

    /// Create a client that routes requests through an HTTP proxy.
    ///
    /// # Arguments
    /// * `proxy` - Proxy URL (e.g., "http://proxy:8080" or "socks5://proxy:1080")
    pub fn with_proxy(site: Site, proxy: &str) -> Result<Self> {
        Ok(Self::with_transport(site, Arc::new(HttpClient::with_proxy(proxy)?)))
    }

    /// Create a client over any [`Transport`].
    pub fn with_transport(site: Site, transport: Arc<dyn Transport>) -> Self {
        Self { transport, site }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    /// Authentication headers attached to every request.
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![("Authorization".to_string(), self.site.token.clone())]
    }

    /// Send a request and return the body of a successful response.
    ///
    /// Non-2xx statuses become [`BcError::ApiError`] (or
    /// [`BcError::HttpError`] for statuses without a known meaning). Nothing
    /// is retried.
    pub async fn send(&self, mut request: Request) -> Result<Bytes> {
        request.headers.extend(self.headers());

        let method = request.method.clone();
        let url = request.url.clone();
        debug!(
            %method,
            %url,
            body_len = request.body.as_ref().map_or(0, |b| b.len()),
            "storage api request"
        );

        let response = timeout(
            Duration::from_secs(self.site.timeout_secs),
            self.transport.send(request),
        )
        .await
        .map_err(|_| BcError::Timeout)??;

        debug!(%method, %url, status = response.status, bytes = response.body.len(), "storage api response");

        if !response.is_success() {
            warn!(%method, %url, status = response.status, "storage api request failed");
            let code = ApiErrorCode::from(response.status);
            if code == ApiErrorCode::Unknown {
                return Err(BcError::HttpError(response.status));
            }
            return Err(BcError::ApiError {
                code: response.status,
                message: code.description().to_string(),
            });
        }

        Ok(response.body)
    }

    /// GET a JSON document.
    pub async fn get_json(&self, url: &str) -> Result<Value> {
        let body = self.send(Request::new(Method::GET, url)).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// PUT a JSON document, returning the parsed response body if any.
    pub async fn put_json(&self, url: &str, value: &Value) -> Result<Option<Value>> {
        let request = Request::new(Method::PUT, url)
            .header("Content-Type", "application/json")
            .body(serde_json::to_vec(value)?);
        let body = self.send(request).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&body)?))
    }

    /// PUT raw bytes, unprocessed.
    pub async fn put_bytes(&self, url: &str, data: Bytes) -> Result<()> {
        let request = Request::new(Method::PUT, url)
            .header("Content-Type", "application/octet-stream")
            .body(data);
        self.send(request).await?;
        Ok(())
    }

    /// PUT without a body.
    pub async fn put_empty(&self, url: &str) -> Result<()> {
        self.send(Request::new(Method::PUT, url)).await?;
        Ok(())
    }

    /// GET raw bytes.
    pub async fn get_bytes(&self, url: &str) -> Result<Bytes> {
        self.send(Request::new(Method::GET, url)).await
    }

    /// DELETE a resource.
    pub async fn delete(&self, url: &str) -> Result<()> {
        self.send(Request::new(Method::DELETE, url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockTransport;

    fn client() -> (ApiClient, Arc<MockTransport>) {
        let mock = Arc::new(MockTransport::new());
        let client = ApiClient::with_transport(Site::new("http://site", "tok"), mock.clone());
        (client, mock)
    }

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new(Site::new("http://site", "tok"));
        assert_eq!(client.site().root_url, "http://site");
        assert_eq!(
            client.headers(),
            vec![("Authorization".to_string(), "tok".to_string())]
        );
    }

    #[test]
    fn test_proxy_creation() {
        let client = ApiClient::with_proxy(Site::new("", "tok"), "http://127.0.0.1:8080");
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_send_adds_auth_header() {
        let (client, mock) = client();
        client.delete("http://site/x").await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::DELETE);
        assert_eq!(requests[0].header_value("Authorization"), Some("tok"));
    }

    #[tokio::test]
    async fn test_error_status_mapping() {
        let (client, mock) = client();
        mock.push(404, "");
        mock.push(418, "");

        match client.get_bytes("http://site/a").await {
            Err(BcError::ApiError { code, message }) => {
                assert_eq!(code, 404);
                assert_eq!(message, "Resource does not exist");
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(
            client.get_bytes("http://site/a").await,
            Err(BcError::HttpError(418))
        ));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let (client, mock) = client();
        mock.push_error(BcError::Custom("connection reset".to_string()));

        let err = client.get_json("http://site/a").await.unwrap_err();
        assert_eq!(err.to_string(), "connection reset");
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_put_json_empty_response() {
        let (client, mock) = client();
        mock.push(200, "");
        mock.push_json(serde_json::json!({"name": "x"}));

        let body = serde_json::json!({"name": "x"});
        assert!(client.put_json("http://site/a", &body).await.unwrap().is_none());
        let parsed = client.put_json("http://site/a", &body).await.unwrap();
        assert_eq!(parsed, Some(body));

        let req = &mock.requests()[0];
        assert_eq!(req.header_value("Content-Type"), Some("application/json"));
        assert_eq!(req.body.as_deref(), Some(&br#"{"name":"x"}"#[..]));
    }
}

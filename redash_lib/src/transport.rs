//! Request-issuing collaborator used by [`crate::Client`].
//!
//! The client only needs three verbs against paths relative to a configured
//! host. [`HttpTransport`] is the reqwest-backed implementation; tests plug in
//! their own.

use crate::config::Config;
use crate::error::{Error, TransportError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::Client as HttpClient;
use serde_json::Value;

/// Issues GET/POST/DELETE against paths such as `/api/queries/7` and returns the raw body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str) -> Result<String, TransportError>;
    async fn post(&self, path: &str, body: String) -> Result<String, TransportError>;
    async fn delete(&self, path: &str) -> Result<String, TransportError>;
}

/// reqwest transport with the API key and JSON headers attached to every request.
#[derive(Clone)]
pub struct HttpTransport {
    config: Config,
    headers: HeaderMap,
    http: HttpClient,
}

impl HttpTransport {
    pub fn new(config: Config) -> Result<Self, Error> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Key {}", config.api_key))
                .map_err(|_| Error::Config("API key is not a valid header value".to_string()))?,
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("redash-cli/{}", crate::VERSION))
                .map_err(|e| Error::Config(e.to_string()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(Self {
            config,
            headers,
            http,
        })
    }

    async fn send(
        &self,
        method: &'static str,
        path: &str,
        req: reqwest::RequestBuilder,
    ) -> Result<String, TransportError> {
        tracing::debug!(method, path, "sending request");
        let res = req
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(|e| TransportError::network(e.to_string()))?;
        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| TransportError::network(e.to_string()))?;
        if status.is_success() {
            return Ok(body);
        }

        tracing::warn!(method, path, status = status.as_u16(), "request failed");
        let data: Option<Value> = serde_json::from_str(&body).ok();
        if matches!(status.as_u16(), 401 | 403) {
            return Err(TransportError::new(
                "Authentication failed. Check your API key.",
                Some(status.as_u16()),
                data,
            ));
        }
        let msg = data
            .as_ref()
            .and_then(|d| d.get("message"))
            .and_then(|m| m.as_str())
            .map(String::from)
            .unwrap_or_else(|| format!("API request failed with status {}", status));
        Err(TransportError::new(msg, Some(status.as_u16()), data))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<String, TransportError> {
        let url = self.config.endpoint(path);
        self.send("GET", path, self.http.get(&url)).await
    }

    async fn post(&self, path: &str, body: String) -> Result<String, TransportError> {
        let url = self.config.endpoint(path);
        let req = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        self.send("POST", path, req).await
    }

    async fn delete(&self, path: &str) -> Result<String, TransportError> {
        let url = self.config.endpoint(path);
        self.send("DELETE", path, self.http.delete(&url)).await
    }
}

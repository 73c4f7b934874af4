//! Resource client for the Redash REST API.
//!
//! Every accessor is one request/response cycle: build the path, call the
//! transport, decode the body. Errors propagate as-is with no retry.

use crate::config::Config;
use crate::error::Error;
use crate::transport::{HttpTransport, Transport};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Redash API client.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Create a client over the reqwest transport.
    pub fn new(config: Config) -> Result<Self, Error> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }

    /// Create a client over any transport (e.g. a recording one in tests).
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let body = self.transport.get(path).await?;
        decode(&body)
    }

    pub(crate) async fn submit<P, T>(&self, path: &str, payload: &P) -> Result<T, Error>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_string(payload).map_err(Error::Encode)?;
        tracing::debug!(path, bytes = body.len(), "submitting payload");
        let res = self.transport.post(path, body).await?;
        decode(&res)
    }

    /// POST with an empty body, discarding the response.
    pub(crate) async fn touch(&self, path: &str) -> Result<(), Error> {
        self.transport.post(path, String::new()).await?;
        Ok(())
    }

    pub(crate) async fn remove(&self, path: &str) -> Result<(), Error> {
        self.transport.delete(path).await?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(Error::Decode)
}

/// `collection/{id}`.
pub(crate) fn item_path(collection: &str, id: u64) -> String {
    format!("{}/{}", collection, id)
}

/// `collection?q={term}` with the term percent-encoded.
pub(crate) fn search_path(collection: &str, term: &str) -> String {
    format!("{}?q={}", collection, urlencoding::encode(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_path_uses_decimal_id() {
        assert_eq!(item_path("/api/queries", 0), "/api/queries/0");
        assert_eq!(item_path("/api/queries", 999), "/api/queries/999");
        assert_eq!(
            item_path("/api/dashboards", u64::MAX),
            format!("/api/dashboards/{}", u64::MAX)
        );
    }

    #[test]
    fn search_path_encodes_term() {
        assert_eq!(
            search_path("/api/queries", "daily signups&x"),
            "/api/queries?q=daily%20signups%26x"
        );
    }
}

//! In-memory transport that records every call and replays canned responses.

use crate::error::TransportError;
use crate::transport::Transport;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Option<String>,
}

/// Cloneable handle: keep one copy to inspect calls after handing the other to a `Client`.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    calls: Arc<Mutex<Vec<Call>>>,
    responses: Arc<Mutex<VecDeque<Result<String, TransportError>>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, body: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(body.into()));
        self
    }

    pub fn respond_json(self, body: serde_json::Value) -> Self {
        self.respond(body.to_string())
    }

    pub fn fail(self, err: TransportError) -> Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(
        &self,
        method: &'static str,
        path: &str,
        body: Option<String>,
    ) -> Result<String, TransportError> {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::network("no canned response left")))
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn get(&self, path: &str) -> Result<String, TransportError> {
        self.record("GET", path, None)
    }

    async fn post(&self, path: &str, body: String) -> Result<String, TransportError> {
        self.record("POST", path, Some(body))
    }

    async fn delete(&self, path: &str) -> Result<String, TransportError> {
        self.record("DELETE", path, None)
    }
}

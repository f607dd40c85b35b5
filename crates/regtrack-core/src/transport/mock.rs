//! Recording transport for tests

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::error::{TransportError, TransportResult};
use super::traits::{HttpMethod, QueryParams, RequestOptions, Transport};

/// One call observed by [`MockTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub path: String,
    pub query: QueryParams,
    pub method: HttpMethod,
    pub body: Option<Value>,
}

enum Scripted {
    Respond(Value),
    Fail { status: u16, message: String },
}

/// Mock transport for testing
///
/// Answers from per-path scripts, falling back to a default response, and
/// records every call it receives.
pub struct MockTransport {
    responses: Mutex<HashMap<String, Scripted>>,
    default_response: Value,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    /// Create a mock answering `{"ok": true}` to everything
    pub fn new() -> Self {
        Self::with_default(serde_json::json!({ "ok": true }))
    }

    /// Create a mock with a custom default response
    pub fn with_default(default_response: Value) -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            default_response,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer calls to `path` with `response`
    pub fn respond(self, path: impl Into<String>, response: Value) -> Self {
        self.responses.lock().insert(path.into(), Scripted::Respond(response));
        self
    }

    /// Fail calls to `path` with a status error
    pub fn fail(self, path: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        self.responses.lock().insert(
            path.into(),
            Scripted::Fail {
                status,
                message: message.into(),
            },
        );
        self
    }

    /// All calls received so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// The most recent call
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().last().cloned()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn call(&self, path: &str, query: &QueryParams, options: RequestOptions) -> TransportResult<Value> {
        self.calls.lock().push(RecordedCall {
            path: path.to_string(),
            query: query.clone(),
            method: options.method,
            body: options.body,
        });

        match self.responses.lock().get(path) {
            Some(Scripted::Respond(value)) => Ok(value.clone()),
            Some(Scripted::Fail { status, message }) => Err(TransportError::status(*status, message.clone())),
            None => Ok(self.default_response.clone()),
        }
    }
}

//! Transport trait definition

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::TransportResult;

/// Query string parameters, kept sorted for stable request URLs
pub type QueryParams = BTreeMap<String, String>;

/// HTTP method of a remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Method and optional JSON body of a remote call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub body: Option<Value>,
}

impl RequestOptions {
    /// Create options for the given method without a body
    pub fn new(method: HttpMethod) -> Self {
        Self { method, body: None }
    }

    /// Attach a JSON body
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Performs one remote call and returns the parsed response
///
/// Non-success responses must surface as [`TransportError::Status`] with the
/// remote message untouched. Implementations must not retry.
///
/// [`TransportError::Status`]: super::TransportError::Status
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, path: &str, query: &QueryParams, options: RequestOptions) -> TransportResult<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_display() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
    }

    #[test]
    fn test_method_serde() {
        let json = serde_json::to_string(&HttpMethod::Delete).unwrap();
        assert_eq!(json, "\"DELETE\"");
    }

    #[test]
    fn test_request_options_builder() {
        let options = RequestOptions::new(HttpMethod::Post).with_body(serde_json::json!([{"a": 1}]));
        assert_eq!(options.method, HttpMethod::Post);
        assert!(options.body.unwrap().is_array());
    }
}

//! Resolved remote call

use serde::Serialize;
use serde_json::Value;

use crate::transport::{HttpMethod, QueryParams, RequestOptions};

/// A concrete request produced by a transform rule
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCallSpec {
    pub path: String,
    pub method: HttpMethod,
    pub query: QueryParams,
    pub body: Option<Value>,
}

impl RemoteCallSpec {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            query: QueryParams::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Add a query parameter; `None` is omitted
    pub fn query<T: ToString>(mut self, key: &str, value: Option<T>) -> Self {
        if let Some(value) = value {
            self.query.insert(key.to_string(), value.to_string());
        }
        self
    }

    /// Attach a JSON body
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach a serializable body
    pub fn json_body<T: Serialize>(self, body: &T) -> Result<Self, serde_json::Error> {
        Ok(self.body(serde_json::to_value(body)?))
    }

    /// Split into the transport's call arguments
    pub fn into_parts(self) -> (String, QueryParams, RequestOptions) {
        let options = RequestOptions {
            method: self.method,
            body: self.body,
        };
        (self.path, self.query, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_omits_none() {
        let spec = RemoteCallSpec::get("/regulations")
            .query("jurisdiction", Some("EU"))
            .query::<u32>("page", None)
            .query("pageSize", Some(25));

        assert_eq!(spec.query.len(), 2);
        assert_eq!(spec.query["pageSize"], "25");
        assert!(!spec.query.contains_key("page"));
    }

    #[test]
    fn test_into_parts() {
        let spec = RemoteCallSpec::post("/tags").body(json!([{ "label": "privacy" }]));
        let (path, query, options) = spec.into_parts();
        assert_eq!(path, "/tags");
        assert!(query.is_empty());
        assert_eq!(options.method, HttpMethod::Post);
        assert_eq!(options.body, Some(json!([{ "label": "privacy" }])));
    }
}

//! reqwest-backed transport

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::config::ApiSettings;
use crate::logging::Logger;
use crate::{log_debug, log_warn};
use super::error::{TransportError, TransportResult};
use super::traits::{QueryParams, RequestOptions, Transport};

/// HTTP transport for the regulatory API
///
/// Appends each tool path to a base URL, sends the query string and JSON body
/// and parses the response. Authentication is a bearer token, when configured.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    logger: Arc<dyn Logger>,
}

impl HttpTransport {
    /// Create a transport with an explicit base URL and request timeout
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
        logger: Arc<dyn Logger>,
    ) -> TransportResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            api_key,
            logger,
        })
    }

    /// Build from loaded API settings
    pub fn from_settings(settings: &ApiSettings, logger: Arc<dyn Logger>) -> TransportResult<Self> {
        Self::new(
            settings.base_url.clone(),
            settings.api_key(),
            settings.timeout(),
            logger,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

/// Interpret a successful response body
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, path: &str, query: &QueryParams, options: RequestOptions) -> TransportResult<Value> {
        let url = self.url(path);
        log_debug!(self.logger, "[HttpTransport] {} {}", options.method, url);

        let mut request = self.client.request(options.method.into(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }
        if let Some(ref body) = options.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            log_warn!(
                self.logger,
                "[HttpTransport] {} {} failed with {}",
                options.method,
                path,
                status.as_u16()
            );
            let message = if text.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                text
            };
            return Err(TransportError::status(status.as_u16(), message));
        }

        Ok(parse_body(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use serde_json::json;

    fn transport(base: &str) -> HttpTransport {
        HttpTransport::new(base, None, Duration::from_secs(5), Arc::new(NoOpLogger::new())).unwrap()
    }

    #[test]
    fn test_url_joining() {
        let t = transport("https://regs.example.com/v1/");
        assert_eq!(t.base_url(), "https://regs.example.com/v1");
        assert_eq!(t.url("/regulations/7"), "https://regs.example.com/v1/regulations/7");
        assert_eq!(t.url("alerts"), "https://regs.example.com/v1/alerts");
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("  \n"), Value::Null);
        assert_eq!(parse_body(r#"{"name":"x"}"#), json!({"name": "x"}));
        assert_eq!(parse_body("accepted"), json!("accepted"));
    }

    #[test]
    fn test_from_settings() {
        let settings = ApiSettings {
            base_url: "https://regs.example.com".into(),
            api_key_env: None,
            timeout_secs: 10,
        };
        let t = HttpTransport::from_settings(&settings, Arc::new(NoOpLogger::new())).unwrap();
        assert_eq!(t.base_url(), "https://regs.example.com");
        assert!(t.api_key.is_none());
    }
}

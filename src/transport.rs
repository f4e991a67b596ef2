//! Request transport for the info endpoint

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde_json::Value;

use crate::error::{Error, Result};

/// Rate-limit weight of most info requests
pub const DEFAULT_WEIGHT: u32 = 2;

/// Rate-limit weight of heavier info requests (fills, frontend orders, rate limits)
pub const HEAVY_WEIGHT: u32 = 20;

/// Sends an info request and returns the parsed JSON response.
///
/// `weight` is a rate-limit hint; implementations may ignore it.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_info(&self, body: Value, weight: u32) -> Result<Value>;
}

/// [`Transport`] over HTTP using `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: ReqwestClient,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport posting to `<base_url>/info`
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(Error::Http)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the info endpoint URL
    pub fn info_url(&self) -> String {
        format!("{}/info", self.base_url)
    }

    /// Get the underlying HTTP client
    pub fn http(&self) -> &ReqwestClient {
        &self.http
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_info(&self, body: Value, weight: u32) -> Result<Value> {
        tracing::trace!(request = %body, weight, "posting info request");

        let response = self
            .http
            .post(self.info_url())
            .json(&body)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let text = response.text().await.map_err(Error::Http)?;

        if !status.is_success() {
            return Err(Error::Api(format!("HTTP {} - {}", status.as_u16(), text)));
        }

        let value: Value = serde_json::from_str(&text)?;
        if let Some(message) = error_message(&value) {
            return Err(Error::Api(message.to_string()));
        }
        Ok(value)
    }
}

/// An `{"error": "..."}` body with nothing else in it
fn error_message(value: &Value) -> Option<&str> {
    let object = value.as_object()?;
    if object.len() != 1 {
        return None;
    }
    object.get("error")?.as_str()
}

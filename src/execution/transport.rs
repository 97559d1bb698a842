//! HTTP transport abstraction.
//!
//! The pipeline talks to an injectable [`Transport`] that executes a
//! fully-assembled wire request and returns the status/headers/body tuple,
//! whatever the HTTP status. Transport errors are reserved for failures that
//! produced no HTTP response at all (connect, timeout); status
//! classification happens in the executor.

use crate::request::Payload;
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use reqwest::Method;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use thiserror::Error;

/// Wire-level request data.
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub method: Method,
    /// Absolute URL (base URI already joined).
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub payload: Payload,
    pub timeout: Duration,
    /// TLS certificate verification.
    pub verify: bool,
}

/// Wire-level response data.
#[derive(Debug, Clone)]
pub struct WireResponse {
    pub status: u16,
    /// Response headers (lowercased keys).
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Failure that produced no HTTP response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("connect: {0}")]
    Connect(String),
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Other(err.to_string())
        }
    }
}

/// Executes one wire request. Implementations own connection pooling, TLS
/// and redirects.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &WireRequest) -> Result<WireResponse, TransportError>;
}

/// Default transport on top of `reqwest`.
///
/// TLS verification is a client-level switch in `reqwest`, so a second,
/// non-verifying client is built lazily the first time a request asks for
/// `verify = false`.
#[derive(Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    insecure: OnceCell<reqwest::Client>,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn client_for(&self, verify: bool) -> Result<&reqwest::Client, TransportError> {
        if verify {
            return Ok(&self.client);
        }
        self.insecure.get_or_try_init(|| {
            reqwest::Client::builder()
                .danger_accept_invalid_certs(true)
                .build()
                .map_err(|e| TransportError::Other(e.to_string()))
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &WireRequest) -> Result<WireResponse, TransportError> {
        let client = self.client_for(request.verify)?;
        let mut builder = client
            .request(request.method.clone(), &request.url)
            .timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        builder = match &request.payload {
            Payload::None => builder,
            Payload::Query(map) => builder.query(&pairs(map)),
            Payload::Json(body) => builder.body(body.clone()),
            Payload::Raw(body) => builder.body(body.clone()),
            Payload::Form(map) => builder.form(&pairs(map)),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text().await?;

        Ok(WireResponse {
            status,
            headers,
            body,
        })
    }
}

/// Render body fields as string pairs for query/form encoding. Scalars keep
/// their natural textual form; nested values fall back to compact JSON.
pub(crate) fn pairs(map: &Map<String, Value>) -> Vec<(String, String)> {
    map.iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), rendered)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pairs_render_scalars_without_quotes() {
        let map = json!({"q": "x", "limit": 10, "strict": true})
            .as_object()
            .cloned()
            .unwrap();
        let rendered = pairs(&map);
        assert!(rendered.contains(&("q".into(), "x".into())));
        assert!(rendered.contains(&("limit".into(), "10".into())));
        assert!(rendered.contains(&("strict".into(), "true".into())));
    }
}

//! Request Specification Module
//!
//! [`RequestSpec`] is the immutable, fully-assembled description of one
//! outbound call: everything the executor needs, built once per invocation
//! by the builder and never mutated afterwards.

use crate::config::ServiceConfig;
use reqwest::Method;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Wire-level payload. At most one variant carries the adapter body; the
/// variant is chosen by HTTP method and declared content type.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No payload.
    None,
    /// GET: body fields become query parameters.
    Query(Map<String, Value>),
    /// JSON-encoded request body.
    Json(String),
    /// Raw request body (JSON encoding disabled on the provider).
    Raw(String),
    /// Form parameters (`application/x-www-form-urlencoded` declared).
    Form(Map<String, Value>),
}

impl Payload {
    /// JSON view of the payload for validation and debug logging.
    pub fn as_value(&self) -> Value {
        match self {
            Self::None => Value::Null,
            Self::Query(map) | Self::Form(map) => Value::Object(map.clone()),
            Self::Json(body) => {
                serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.clone()))
            }
            Self::Raw(body) => Value::String(body.clone()),
        }
    }
}

/// Immutable description of one outbound call.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// Resolved adapter name; doubles as the log/event/cache namespace.
    pub service_name: String,
    /// Endpoint URI, relative to the configured base URI.
    pub uri: String,
    pub method: Method,
    /// Whether the response body is decoded as JSON.
    pub json_response: bool,
    /// Ordered header set.
    pub headers: BTreeMap<String, String>,
    pub payload: Payload,
    /// Cache key declared by the adapter; `None` disables response caching.
    pub cache_key: Option<String>,
    /// Resolved configuration the call executes under.
    pub config: ServiceConfig,
    /// TLS certificate verification flag.
    pub verify: bool,
}

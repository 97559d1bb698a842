//! HTTP Executor
//!
//! Runs one assembled [`RequestSpec`] through a linear state machine: cache
//! probe, transport call, status classification, body decoding, cache
//! write-back. No retries at this layer.
//!
//! Logging policy: request/response/cache-hit details at info level when the
//! service has debug enabled (context redacted); a 404 is an expected
//! outcome and is only logged under debug; every other failure is logged at
//! error level before propagating.

use crate::cache::{BlobStore, ResponseCache, identifier};
use crate::error::RestError;
use crate::logging::redact;
use crate::request::{Payload, RequestSpec};
use crate::execution::transport::{Transport, WireRequest, WireResponse};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, info};

/// Pipeline engine executing assembled request specifications.
#[derive(Clone)]
pub struct HttpExecutor {
    transport: Arc<dyn Transport>,
    cache: ResponseCache,
}

impl HttpExecutor {
    pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn BlobStore>) -> Self {
        Self {
            transport,
            cache: ResponseCache::new(store),
        }
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_store(mut self, store: Arc<dyn BlobStore>) -> Self {
        self.cache = ResponseCache::new(store);
        self
    }

    /// Execute one call and classify its outcome.
    pub async fn request(&self, spec: &RequestSpec) -> Result<Value, RestError> {
        let debug = spec.config.is_debug_enabled();
        if debug {
            info!(
                service = %spec.service_name,
                context = %request_context(spec),
                "rest request"
            );
        }

        match self.dispatch(spec, debug).await {
            Ok(result) => Ok(result),
            Err(err) => {
                self.log_failure(spec, &err, debug);
                Err(err)
            }
        }
    }

    async fn dispatch(&self, spec: &RequestSpec, debug: bool) -> Result<Value, RestError> {
        if let Some(declared) = &spec.cache_key {
            let key = identifier::cache_key(&spec.service_name, declared);
            if let Some(result) = self.cache.load(&key).await? {
                if debug {
                    info!(service = %spec.service_name, "rest cache hit");
                }
                return Ok(result);
            }
        }

        let wire = build_wire_request(spec)?;
        let response = self
            .transport
            .execute(&wire)
            .await
            .map_err(|e| RestError::Service {
                service: spec.service_name.clone(),
                status: None,
                message: e.to_string(),
            })?;
        let response = classify_status(spec, response)?;
        let result = decode_body(spec, response.body)?;

        if let Some(declared) = &spec.cache_key {
            let key = identifier::cache_key(&spec.service_name, declared);
            self.cache
                .save(&key, &result, spec.config.cache_lifetime())
                .await?;
        }

        if debug {
            info!(
                service = %spec.service_name,
                status = response.status,
                headers = %redact(&json!(response.headers)),
                response = %redact(&result),
                "rest response"
            );
        }

        Ok(result)
    }

    fn log_failure(&self, spec: &RequestSpec, err: &RestError, debug: bool) {
        match err {
            RestError::NotFound { .. } => {
                if debug {
                    info!(service = %spec.service_name, %err, "rest not found");
                }
            }
            RestError::Internal(_) => {
                error!(service = %spec.service_name, %err, "rest internal failure");
            }
            _ => {
                error!(service = %spec.service_name, %err, "rest call failed");
            }
        }
    }
}

/// Assemble the wire request from the spec and its resolved configuration.
fn build_wire_request(spec: &RequestSpec) -> Result<WireRequest, RestError> {
    let base_uri = spec
        .config
        .base_uri()
        .ok_or_else(|| RestError::MissingBaseUri(spec.config.name().to_string()))?;

    Ok(WireRequest {
        method: spec.method.clone(),
        url: join_url(base_uri, &spec.uri),
        headers: spec.headers.clone(),
        payload: spec.payload.clone(),
        timeout: spec.config.timeout(),
        verify: spec.verify,
    })
}

fn join_url(base: &str, uri: &str) -> String {
    let base = base.trim_end_matches('/');
    let uri = uri.trim_start_matches('/');
    if uri.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{uri}")
    }
}

/// Map a non-success HTTP status to its taxonomy variant.
fn classify_status(spec: &RequestSpec, response: WireResponse) -> Result<WireResponse, RestError> {
    let status = response.status;
    if (200..300).contains(&status) {
        return Ok(response);
    }
    let service = spec.service_name.clone();
    if status == 404 {
        return Err(RestError::NotFound {
            service,
            body: response.body,
        });
    }
    if (400..500).contains(&status) && !response.body.is_empty() {
        return Err(RestError::Business {
            service,
            status,
            body: response.body,
        });
    }
    Err(RestError::Service {
        service,
        status: Some(status),
        message: format!("unexpected status {status}"),
    })
}

fn decode_body(spec: &RequestSpec, body: String) -> Result<Value, RestError> {
    if spec.json_response {
        serde_json::from_str(&body).map_err(|e| RestError::Unserialize {
            service: spec.service_name.clone(),
            message: e.to_string(),
        })
    } else {
        Ok(Value::String(body))
    }
}

fn request_context(spec: &RequestSpec) -> Value {
    let payload = match &spec.payload {
        Payload::None => Value::Null,
        other => other.as_value(),
    };
    redact(&json!({
        "base_uri": spec.config.base_uri(),
        "uri": spec.uri,
        "method": spec.method.as_str(),
        "headers": spec.headers,
        "payload": payload,
    }))
}

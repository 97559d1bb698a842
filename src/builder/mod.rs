//! API Builder Module
//!
//! [`ApiBuilder`] orchestrates one logical operation's calls: registry
//! lookup, before/after events, adapter projection, wire-option assembly,
//! configuration checks, schema validation and delegation to the executor.
//!
//! The memoization registry lives on the builder itself. Create one builder
//! per logical operation, or derive one with [`ApiBuilder::scoped`] to share
//! the collaborators under a fresh registry.

use crate::adapter::{CONTENT_FORM_URLENCODED, HEADER_CONTENT_TYPE};
use crate::cache::{BlobStore, InMemoryBlobStore, identifier};
use crate::config::{ConfigRepository, DEFAULT_CONFIG_NAME, ServiceConfig};
use crate::error::RestError;
use crate::events::{Event, EventSink, NoopEventSink};
use crate::execution::transport::pairs;
use crate::execution::{HttpExecutor, ReqwestTransport, Transport};
use crate::provider::ApiProvider;
use crate::registry::RequestRegistry;
use crate::request::{Payload, RequestSpec};
use reqwest::Method;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

/// Orchestrator for the calls of one logical operation.
pub struct ApiBuilder {
    config: Arc<ConfigRepository>,
    events: Arc<dyn EventSink>,
    executor: HttpExecutor,
    registry: RequestRegistry,
}

impl ApiBuilder {
    /// Builder with default collaborators: `reqwest` transport, in-memory
    /// blob store, no event sink.
    pub fn new(config: Arc<ConfigRepository>) -> Self {
        Self {
            config,
            events: Arc::new(NoopEventSink),
            executor: HttpExecutor::new(
                Arc::new(ReqwestTransport::new()),
                Arc::new(InMemoryBlobStore::new()),
            ),
            registry: RequestRegistry::new(),
        }
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.executor = self.executor.with_transport(transport);
        self
    }

    pub fn with_blob_store(mut self, store: Arc<dyn BlobStore>) -> Self {
        self.executor = self.executor.with_store(store);
        self
    }

    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Same collaborators, fresh memoization scope. One scope per logical
    /// operation.
    pub fn scoped(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            events: Arc::clone(&self.events),
            executor: self.executor.clone(),
            registry: RequestRegistry::new(),
        }
    }

    /// Execute one declarative call.
    ///
    /// Within this builder's scope, a repeated (provider, input) pair
    /// returns the memoized result without events, cache probe or transport
    /// call.
    pub async fn send_request(
        &self,
        provider: &ApiProvider,
        raw_data: Value,
    ) -> Result<Value, RestError> {
        let adapter_name = provider.adapter_name();
        let registry_key = identifier::registry_key(adapter_name, &raw_data);
        if let Some(result) = self.registry.get(&registry_key) {
            return Ok(result);
        }

        self.dispatch_event(&Event::SendBefore {
            adapter_name,
            raw_data: &raw_data,
        });

        let spec = self.build_spec(provider, &raw_data)?;
        let result = self.executor.request(&spec).await?;

        self.dispatch_event(&Event::SendAfter {
            spec: &spec,
            result: &result,
        });

        Ok(self.registry.insert(&registry_key, result))
    }

    fn build_spec(&self, provider: &ApiProvider, raw_data: &Value) -> Result<RequestSpec, RestError> {
        let mut adapter = provider.new_adapter();
        adapter.project(raw_data);

        let headers = adapter.headers();
        let payload = assemble_payload(
            adapter.body(),
            &headers,
            provider.is_json_request(),
            provider.method(),
        )?;
        let config = self.resolve_config(provider)?;

        if let Some(validator) = provider.validator() {
            match &payload {
                Payload::Json(_) | Payload::Raw(_) | Payload::Form(_) => {
                    validator
                        .validate(&payload.as_value())
                        .map_err(RestError::InvalidContract)?;
                }
                _ => {}
            }
        }

        Ok(RequestSpec {
            service_name: provider.adapter_name().to_string(),
            uri: adapter.uri(),
            method: provider.method().clone(),
            json_response: provider.is_json_response(),
            headers,
            payload,
            cache_key: adapter.cache_key(),
            config,
            verify: provider.is_verify(),
        })
    }

    fn resolve_config(&self, provider: &ApiProvider) -> Result<ServiceConfig, RestError> {
        if provider.config_name() == DEFAULT_CONFIG_NAME {
            return Err(RestError::Logic(format!(
                "config name is missing for {} and must be bound on the provider",
                provider.adapter_name()
            )));
        }
        let config = self.config.resolve(provider.config_name());
        if config.base_uri().is_none_or(str::is_empty) {
            return Err(RestError::MissingBaseUri(provider.config_name().to_string()));
        }
        Ok(config)
    }

    fn dispatch_event(&self, event: &Event<'_>) {
        if let Err(err) = self.events.dispatch(event) {
            warn!(event = %event.name(), error = %err, "event sink failed");
        }
    }
}

/// Choose the wire payload from method, content type and encoding flag.
///
/// A declared form-urlencoded content type wins over everything; GET turns
/// the body into query parameters; otherwise the body is JSON-encoded or
/// rendered raw (urlencoded pairs) per the provider flag.
fn assemble_payload(
    body: Map<String, Value>,
    headers: &BTreeMap<String, String>,
    json_request: bool,
    method: &Method,
) -> Result<Payload, RestError> {
    let content_type = headers.get(HEADER_CONTENT_TYPE).map(String::as_str);
    if content_type == Some(CONTENT_FORM_URLENCODED) {
        return Ok(Payload::Form(body));
    }
    if method == Method::GET {
        return Ok(Payload::Query(body));
    }
    if json_request {
        return Ok(Payload::Json(serde_json::to_string(&body)?));
    }
    Ok(Payload::Raw(render_raw(&body)))
}

fn render_raw(body: &Map<String, Value>) -> String {
    pairs(body)
        .iter()
        .map(|(key, value)| {
            format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
        })
        .collect::<Vec<_>>()
        .join("&")
}

//! Shared fixtures for the mock API tests.
#![allow(dead_code)]

use restbound::prelude::*;
use serde_json::{Map, Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// GET /v1/search?q=...
#[derive(Default)]
pub struct SearchAdapter {
    q: String,
}

impl RequestAdapter for SearchAdapter {
    fn project(&mut self, raw_data: &Value) {
        self.q = raw_data["q"].as_str().unwrap_or_default().to_string();
    }

    fn uri(&self) -> String {
        "/v1/search".into()
    }

    fn body(&self) -> Map<String, Value> {
        json!({"q": self.q}).as_object().cloned().unwrap()
    }
}

/// POST /v1/orders with the raw input as JSON body.
#[derive(Default)]
pub struct CreateOrderAdapter {
    order: Map<String, Value>,
}

impl RequestAdapter for CreateOrderAdapter {
    fn project(&mut self, raw_data: &Value) {
        self.order = raw_data.as_object().cloned().unwrap_or_default();
    }

    fn uri(&self) -> String {
        "/v1/orders".into()
    }

    fn body(&self) -> Map<String, Value> {
        self.order.clone()
    }
}

/// GET /v1/orders/{id}, cached under the order id.
#[derive(Default)]
pub struct GetOrderAdapter {
    order_id: String,
}

impl RequestAdapter for GetOrderAdapter {
    fn project(&mut self, raw_data: &Value) {
        self.order_id = raw_data["order_id"].as_str().unwrap_or_default().to_string();
    }

    fn uri(&self) -> String {
        format!("/v1/orders/{}", self.order_id)
    }

    fn cache_key(&self) -> Option<String> {
        Some(self.order_id.clone())
    }
}

/// POST /oauth/token as form parameters.
#[derive(Default)]
pub struct TokenAdapter;

impl RequestAdapter for TokenAdapter {
    fn project(&mut self, _raw_data: &Value) {}

    fn uri(&self) -> String {
        "/oauth/token".into()
    }

    fn body(&self) -> Map<String, Value> {
        json!({"grant_type": "client_credentials", "scope": "orders"})
            .as_object()
            .cloned()
            .unwrap()
    }

    fn headers(&self) -> std::collections::BTreeMap<String, String> {
        std::collections::BTreeMap::from([
            (
                restbound::adapter::HEADER_CONTENT_TYPE.to_string(),
                restbound::adapter::CONTENT_FORM_URLENCODED.to_string(),
            ),
        ])
    }
}

/// Config bound to the mock server under the `billing` namespace, with a
/// short timeout so delay-based tests stay fast.
pub fn config_for(base_uri: &str) -> ConfigRepository {
    let mut settings = ServiceSettings::default();
    settings.base_uri = Some(base_uri.to_string());
    settings.timeout = Some(Duration::from_millis(500));
    ConfigRepository::builder().service("billing", settings).build()
}

pub fn builder_for(base_uri: &str) -> ApiBuilder {
    ApiBuilder::new(Arc::new(config_for(base_uri)))
}

/// Same as [`builder_for`] but with request/response debug logging on.
pub fn debug_builder_for(base_uri: &str) -> ApiBuilder {
    let mut settings = ServiceSettings::default();
    settings.base_uri = Some(base_uri.to_string());
    settings.timeout = Some(Duration::from_millis(500));
    settings.debug = Some(true);
    ApiBuilder::new(Arc::new(
        ConfigRepository::builder().service("billing", settings).build(),
    ))
}

/// Sink recording the names of dispatched events.
#[derive(Default)]
pub struct RecordingSink {
    pub names: Mutex<Vec<String>>,
}

impl EventSink for RecordingSink {
    fn dispatch(&self, event: &Event<'_>) -> Result<(), restbound::events::SinkError> {
        self.names.lock().unwrap().push(event.name());
        Ok(())
    }
}

/// Sink that always fails; calls must survive it.
pub struct FailingSink;

impl EventSink for FailingSink {
    fn dispatch(&self, _event: &Event<'_>) -> Result<(), restbound::events::SinkError> {
        Err("sink exploded".into())
    }
}

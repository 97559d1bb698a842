//! API Pool Module
//!
//! Static registration table from adapter name to [`ApiProvider`], for hosts
//! that dispatch calls by name rather than by holding provider instances.
//! An unregistered adapter is a wiring error.

use crate::adapter::resolve_adapter_name;
use crate::builder::ApiBuilder;
use crate::error::RestError;
use crate::provider::ApiProvider;
use serde_json::Value;
use std::collections::HashMap;

/// Name-indexed provider table on top of an [`ApiBuilder`].
pub struct ApiPool {
    builder: ApiBuilder,
    providers: HashMap<String, ApiProvider>,
}

impl ApiPool {
    pub fn new(builder: ApiBuilder) -> Self {
        Self {
            builder,
            providers: HashMap::new(),
        }
    }

    /// Register a provider under its canonical adapter name.
    pub fn register(mut self, provider: ApiProvider) -> Self {
        self.providers
            .insert(provider.adapter_name().to_string(), provider);
        self
    }

    /// Execute the call bound to the given adapter identifier. Accepts raw
    /// type identifiers as well as already-canonical names.
    pub async fn execute(&self, adapter: &str, raw_data: Value) -> Result<Value, RestError> {
        let name = resolve_adapter_name(adapter);
        let provider = self.providers.get(&name).ok_or_else(|| {
            RestError::Logic(format!("no api provider registered for adapter {name}"))
        })?;
        self.builder.send_request(provider, raw_data).await
    }
}

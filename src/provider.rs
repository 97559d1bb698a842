//! API Provider Module
//!
//! An [`ApiProvider`] binds one [`RequestAdapter`] type to the call
//! parameters that never change per invocation: HTTP method, config name,
//! content-negotiation flags, TLS verification and an optional request
//! schema validator. Providers are built once at wiring time and reused for
//! every call.

use crate::adapter::{RequestAdapter, resolve_adapter_name};
use crate::config::DEFAULT_CONFIG_NAME;
use crate::validation::SchemaValidator;
use reqwest::Method;
use std::sync::Arc;

type AdapterFactory = Box<dyn Fn() -> Box<dyn RequestAdapter> + Send + Sync>;

/// Declarative binding of one endpoint adapter to its call parameters.
pub struct ApiProvider {
    factory: AdapterFactory,
    adapter_name: String,
    config_name: String,
    method: Method,
    verify: bool,
    json_request: bool,
    json_response: bool,
    validator: Option<Arc<dyn SchemaValidator>>,
}

impl ApiProvider {
    /// Start building a provider for the adapter type `A`. The canonical
    /// adapter name is resolved from the type path.
    pub fn builder<A>() -> ApiProviderBuilder
    where
        A: RequestAdapter + Default + 'static,
    {
        ApiProviderBuilder {
            factory: Box::new(|| Box::new(A::default())),
            adapter_name: resolve_adapter_name(std::any::type_name::<A>()),
            config_name: DEFAULT_CONFIG_NAME.to_string(),
            method: Method::GET,
            verify: true,
            json_request: true,
            json_response: true,
            validator: None,
        }
    }

    /// Canonical adapter name; cache/config/event namespace of this binding.
    pub fn adapter_name(&self) -> &str {
        &self.adapter_name
    }

    pub fn config_name(&self) -> &str {
        &self.config_name
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn is_verify(&self) -> bool {
        self.verify
    }

    pub fn is_json_request(&self) -> bool {
        self.json_request
    }

    pub fn is_json_response(&self) -> bool {
        self.json_response
    }

    pub(crate) fn new_adapter(&self) -> Box<dyn RequestAdapter> {
        (self.factory)()
    }

    pub(crate) fn validator(&self) -> Option<&Arc<dyn SchemaValidator>> {
        self.validator.as_ref()
    }
}

/// Builder for [`ApiProvider`].
pub struct ApiProviderBuilder {
    factory: AdapterFactory,
    adapter_name: String,
    config_name: String,
    method: Method,
    verify: bool,
    json_request: bool,
    json_response: bool,
    validator: Option<Arc<dyn SchemaValidator>>,
}

impl ApiProviderBuilder {
    /// Config namespace the calls execute under. Mandatory in practice:
    /// leaving the default namespace fails at send time.
    pub fn config_name<S: Into<String>>(mut self, name: S) -> Self {
        self.config_name = name.into();
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// TLS certificate verification (on by default).
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Whether the body is JSON-encoded (on by default).
    pub fn json_request(mut self, json_request: bool) -> Self {
        self.json_request = json_request;
        self
    }

    /// Whether the response body is decoded as JSON (on by default).
    pub fn json_response(mut self, json_response: bool) -> Self {
        self.json_response = json_response;
        self
    }

    /// Schema validation applied to the assembled body before dispatch.
    pub fn validator(mut self, validator: Arc<dyn SchemaValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn build(self) -> ApiProvider {
        ApiProvider {
            factory: self.factory,
            adapter_name: self.adapter_name,
            config_name: self.config_name,
            method: self.method,
            verify: self.verify,
            json_request: self.json_request,
            json_response: self.json_response,
            validator: self.validator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[derive(Default)]
    struct GetOrderAdapter;

    impl RequestAdapter for GetOrderAdapter {
        fn project(&mut self, _raw_data: &Value) {}
    }

    #[test]
    fn adapter_name_is_resolved_from_the_type_path() {
        let provider = ApiProvider::builder::<GetOrderAdapter>().build();
        assert!(provider.adapter_name().ends_with("get_order_adapter"));
    }

    #[test]
    fn defaults_match_the_contract() {
        let provider = ApiProvider::builder::<GetOrderAdapter>().build();
        assert_eq!(provider.config_name(), DEFAULT_CONFIG_NAME);
        assert_eq!(provider.method(), &Method::GET);
        assert!(provider.is_verify());
        assert!(provider.is_json_request());
        assert!(provider.is_json_response());
        assert!(provider.validator().is_none());
    }
}

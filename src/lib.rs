//! restbound
//!
//! A declarative outbound REST client pipeline: an endpoint is described by
//! a [`adapter::RequestAdapter`], bound to its call parameters by an
//! [`provider::ApiProvider`], and executed through an
//! [`builder::ApiBuilder`] which memoizes per operation, fires observer
//! events, validates the request contract, caches responses and classifies
//! every failure into the [`RestError`] taxonomy.
//!
//! ```rust,ignore
//! use restbound::prelude::*;
//! use serde_json::{Map, Value, json};
//!
//! #[derive(Default)]
//! struct GetOrderAdapter {
//!     order_id: String,
//! }
//!
//! impl RequestAdapter for GetOrderAdapter {
//!     fn project(&mut self, raw_data: &Value) {
//!         self.order_id = raw_data["order_id"].as_str().unwrap_or_default().into();
//!     }
//!
//!     fn uri(&self) -> String {
//!         format!("/v1/orders/{}", self.order_id)
//!     }
//!
//!     fn cache_key(&self) -> Option<String> {
//!         Some(self.order_id.clone())
//!     }
//! }
//!
//! # async fn example() -> Result<(), RestError> {
//! let config = ConfigRepository::builder()
//!     .service("billing", ServiceSettings {
//!         base_uri: Some("https://billing.example".into()),
//!         ..Default::default()
//!     })
//!     .build();
//! let builder = ApiBuilder::new(std::sync::Arc::new(config));
//! let provider = ApiProvider::builder::<GetOrderAdapter>()
//!     .config_name("billing")
//!     .build();
//! let order = builder.send_request(&provider, json!({"order_id": "A-1"})).await?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod adapter;
pub mod builder;
pub mod cache;
pub mod config;
pub mod error;
pub mod events;
pub mod execution;
pub mod logging;
pub mod pool;
pub mod provider;
pub mod registry;
pub mod request;
pub mod validation;

pub use error::{ErrorCategory, RestError};

/// Convenience re-exports for the common wiring path.
pub mod prelude {
    pub use crate::adapter::{RequestAdapter, resolve_adapter_name};
    pub use crate::builder::ApiBuilder;
    pub use crate::cache::identifier::raw_data;
    pub use crate::cache::{BlobStore, InMemoryBlobStore};
    pub use crate::config::{ConfigRepository, ServiceSettings};
    pub use crate::error::{ErrorCategory, RestError};
    pub use crate::events::{Event, EventSink};
    pub use crate::execution::{ReqwestTransport, Transport};
    pub use crate::pool::ApiPool;
    pub use crate::provider::ApiProvider;
    pub use crate::request::{Payload, RequestSpec};
    pub use crate::validation::{JsonSchemaValidator, SchemaValidator};
    pub use reqwest::Method;
}

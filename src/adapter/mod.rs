//! Request Adapter Module
//!
//! A [`RequestAdapter`] is the declarative description of one external
//! endpoint: it projects raw input data into a URI, a body, a header set and
//! an optional cache key. Adapters hold no I/O; the builder invokes
//! [`RequestAdapter::project`] exactly once per non-memoized call and reads
//! the projected fields afterwards.

mod name;

pub use name::resolve_adapter_name;

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// `Accept` header name.
pub const HEADER_ACCEPT: &str = "Accept";
/// `Content-Type` header name.
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
/// JSON content type.
pub const CONTENT_JSON: &str = "application/json";
/// Form-urlencoded content type. Declaring it on an adapter switches the
/// payload to form parameters.
pub const CONTENT_FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Default header set: JSON in both directions.
pub fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        (HEADER_ACCEPT.to_string(), CONTENT_JSON.to_string()),
        (HEADER_CONTENT_TYPE.to_string(), CONTENT_JSON.to_string()),
    ])
}

/// Declarative endpoint description, one implementation per external call.
///
/// `project` must be idempotent and side-effect-free beyond populating the
/// adapter's own fields.
pub trait RequestAdapter: Send {
    /// Project raw input data into the adapter's internal field state.
    fn project(&mut self, raw_data: &Value);

    /// Relative endpoint URI, resolved against the service base URI.
    fn uri(&self) -> String {
        String::new()
    }

    /// Request body fields. Becomes query parameters for GET, an encoded
    /// body otherwise.
    fn body(&self) -> Map<String, Value> {
        Map::new()
    }

    /// Header set for the call.
    fn headers(&self) -> BTreeMap<String, String> {
        default_headers()
    }

    /// Cache key declared by the endpoint. `None` disables response caching.
    fn cache_key(&self) -> Option<String> {
        None
    }
}

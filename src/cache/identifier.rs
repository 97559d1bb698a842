//! Key derivation for response caching and in-process memoization.
//!
//! Both keys are SHA-256 hex digests, deterministic across process runs so
//! that cached responses survive restarts. Input data reaches this boundary
//! as `serde_json::Value`; typed input structs are flattened into that form
//! through [`raw_data`] (the `serde` analog of a recursive to-map
//! conversion). `serde_json` keeps object keys in a stable order, which makes
//! the serialized form canonical.

use crate::error::RestError;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Derive the response cache key from the adapter name and the key the
/// adapter declared.
pub fn cache_key(adapter_name: &str, declared_key: &str) -> String {
    hash(&format!("{adapter_name}_{declared_key}"))
}

/// Derive the per-operation registry key from the adapter name and the raw
/// input data.
pub fn registry_key(adapter_name: &str, data: &Value) -> String {
    // Value serialization cannot fail.
    let serialized = data.to_string();
    hash(&format!("{adapter_name}_{serialized}"))
}

/// Flatten a typed input into the raw data form used for key derivation and
/// adapter projection. Fails fast on non-serializable input, which is a
/// caller programming error.
pub fn raw_data<T: Serialize>(input: &T) -> Result<Value, RestError> {
    serde_json::to_value(input).map_err(|e| RestError::Internal(e.to_string()))
}

fn hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

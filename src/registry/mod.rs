//! Request Registry Module
//!
//! In-process memoization of completed results, scoped to one logical
//! operation. The registry lives on an [`crate::builder::ApiBuilder`]; it is
//! never a process-wide singleton, so results cannot leak across independent
//! operations in a long-lived server.
//!
//! Check-then-insert is atomic per key and first-writer-wins: only completed
//! results are memoized, so concurrent duplicate calls may both reach the
//! transport.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// Per-operation memoization table keyed by registry key.
#[derive(Default)]
pub struct RequestRegistry {
    entries: Mutex<HashMap<String, Value>>,
}

impl RequestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Memoized result for the key, if a call already completed.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries
            .lock()
            .expect("registry poisoned")
            .get(key)
            .cloned()
    }

    /// Store a completed result. If a concurrent call won the race, the
    /// first write stands and its value is returned.
    pub fn insert(&self, key: &str, value: Value) -> Value {
        let mut entries = self.entries.lock().expect("registry poisoned");
        entries.entry(key.to_string()).or_insert(value).clone()
    }
}

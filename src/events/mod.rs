//! Event Sink Module
//!
//! Observer hooks fired around every non-memoized call. Dispatch is
//! synchronous and fire-and-forget: a failing sink is logged at warn level
//! and never aborts the call.

use crate::request::RequestSpec;
use serde_json::Value;

/// Error type a sink may surface; always swallowed by the builder.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Pipeline events, named `{adapter_name}_send_before` /
/// `{adapter_name}_send_after`.
#[derive(Debug)]
pub enum Event<'a> {
    /// Fired before adapter projection and request assembly.
    SendBefore {
        adapter_name: &'a str,
        raw_data: &'a Value,
    },
    /// Fired after the call completed successfully.
    SendAfter {
        spec: &'a RequestSpec,
        result: &'a Value,
    },
}

impl Event<'_> {
    /// Fully-qualified event name.
    pub fn name(&self) -> String {
        match self {
            Self::SendBefore { adapter_name, .. } => format!("{adapter_name}_send_before"),
            Self::SendAfter { spec, .. } => format!("{}_send_after", spec.service_name),
        }
    }
}

/// Synchronous observer the builder notifies around each call.
pub trait EventSink: Send + Sync {
    fn dispatch(&self, event: &Event<'_>) -> Result<(), SinkError>;
}

/// Sink that ignores every event. Default wiring.
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn dispatch(&self, _event: &Event<'_>) -> Result<(), SinkError> {
        Ok(())
    }
}

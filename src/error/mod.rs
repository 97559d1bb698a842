//! Error Handling Module
//!
//! Every failure of the request pipeline is expressed as a [`RestError`]
//! variant. Technical variants (wiring, configuration, contract) indicate a
//! defect that retrying cannot fix; external variants describe outcomes of
//! the remote call and are retryable at the caller's discretion. This layer
//! never retries by itself.

mod conversions;

use thiserror::Error;

/// Coarse error category used for retry decisions and logging policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Programming, wiring or configuration defect. Retrying fails identically.
    Technical,
    /// Outcome of the remote call (HTTP status, transport, decoding).
    External,
}

/// Error taxonomy of the request pipeline.
#[derive(Debug, Error)]
pub enum RestError {
    /// Wiring defect: missing adapter binding, missing config-name override,
    /// unregistered adapter.
    #[error("{0}")]
    Logic(String),

    /// Configuration incomplete: no base URI for the given config name.
    #[error("base URI is missing for {0}")]
    MissingBaseUri(String),

    /// Request body failed schema validation.
    #[error("invalid request contract: {0}")]
    InvalidContract(String),

    /// Remote returned 404. Expected, non-alerting outcome.
    #[error("{service} not found: {body}")]
    NotFound { service: String, body: String },

    /// Remote returned a structured 4xx rejection with a body.
    #[error("{service} error ({status}): {body}")]
    Business {
        service: String,
        status: u16,
        body: String,
    },

    /// Remote returned 5xx or an unexpected status, or the transport itself
    /// failed (connect, timeout).
    #[error("{service} service failure: {message}")]
    Service {
        service: String,
        status: Option<u16>,
        message: String,
    },

    /// Response body could not be decoded as declared.
    #[error("{service} response could not be decoded: {message}")]
    Unserialize { service: String, message: String },

    /// Catch-all for anything outside the taxonomy. Logged at the highest
    /// severity, never silently swallowed.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RestError {
    /// Category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Logic(_)
            | Self::MissingBaseUri(_)
            | Self::InvalidContract(_)
            | Self::Internal(_) => ErrorCategory::Technical,
            Self::NotFound { .. }
            | Self::Business { .. }
            | Self::Service { .. }
            | Self::Unserialize { .. } => ErrorCategory::External,
        }
    }

    /// Whether the caller may meaningfully retry this call.
    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::External
    }

    /// HTTP status associated with this error, when one exists.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Business { status, .. } => Some(*status),
            Self::Service { status, .. } => *status,
            _ => None,
        }
    }
}

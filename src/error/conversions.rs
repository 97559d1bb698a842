//! Type Conversions for RestError
//!
//! From implementations for converting common error types into RestError.

use super::RestError;

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

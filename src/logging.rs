//! Log context redaction.
//!
//! Debug logging includes the assembled request (headers, payload). Values
//! under credential-looking keys are replaced before anything reaches the
//! log output.

use serde_json::Value;

/// Placeholder written over redacted values.
pub const REDACTION_PLACEHOLDER: &str = "***REDACTED***";

const SENSITIVE_KEYS: &[&str] = &[
    "password",
    "username",
    "user",
    "token",
    "key",
    "secret",
    "hash",
    "hmac",
    "sha",
    "sign",
    "authorization",
    "jwt",
    "access",
    "auth",
    "sso",
    "passphrase",
    "ssh",
    "pin",
    "cvv",
    "ccv",
    "cvc",
    "card",
];

/// Recursively redact values of sensitive keys in a JSON structure.
pub fn redact(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, inner)| {
                    let redacted = if inner.is_object() || inner.is_array() {
                        redact(inner)
                    } else if is_sensitive(key) {
                        Value::String(REDACTION_PLACEHOLDER.to_string())
                    } else {
                        inner.clone()
                    };
                    (key.clone(), redacted)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        other => other.clone(),
    }
}

fn is_sensitive(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    SENSITIVE_KEYS.iter().any(|needle| key.contains(needle))
}

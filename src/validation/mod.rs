//! Request Schema Validation Module
//!
//! Optional validation of the assembled request body before dispatch. A
//! failing validation surfaces as [`RestError::InvalidContract`] wrapping the
//! validator's messages.

use crate::error::RestError;
use serde_json::Value;

/// Validates an assembled request body against a contract.
pub trait SchemaValidator: Send + Sync {
    /// Returns the violation messages on mismatch.
    fn validate(&self, body: &Value) -> Result<(), String>;
}

/// JSON Schema validator, compiled once at construction.
pub struct JsonSchemaValidator {
    validator: jsonschema::Validator,
}

impl JsonSchemaValidator {
    /// Compile a JSON Schema. An invalid schema is a wiring error.
    pub fn new(schema: &Value) -> Result<Self, RestError> {
        let validator = jsonschema::validator_for(schema)
            .map_err(|e| RestError::Logic(format!("invalid JSON Schema: {e}")))?;
        Ok(Self { validator })
    }
}

impl SchemaValidator for JsonSchemaValidator {
    fn validate(&self, body: &Value) -> Result<(), String> {
        if self.validator.validate(body).is_err() {
            let messages: Vec<String> = self
                .validator
                .iter_errors(body)
                .map(|err| format!("{} at {}", err, err.instance_path))
                .collect();
            return Err(messages.join("; "));
        }
        Ok(())
    }
}

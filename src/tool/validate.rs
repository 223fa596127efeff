//! JSON Schema validation of merged call arguments.

use super::error::BindError;
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use std::fmt;

/// A tool's parameter schema compiled for validation.
pub struct ArgumentValidator {
    schema: JSONSchema,
}

impl ArgumentValidator {
    pub fn compile(parameters: &Value) -> Result<Self, String> {
        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(parameters)
            .map_err(|e| format!("Failed to compile schema: {}", e))?;
        Ok(Self { schema })
    }

    pub fn check(&self, arguments: &Value) -> Result<(), BindError> {
        if let Err(errors) = self.schema.validate(arguments) {
            let error_msgs: Vec<String> = errors.map(|e| e.to_string()).collect();
            return Err(BindError::SchemaViolation(error_msgs.join("; ")));
        }
        Ok(())
    }
}

impl fmt::Debug for ArgumentValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentValidator").finish_non_exhaustive()
    }
}

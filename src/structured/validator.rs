//! Schema validation of extracted model output.

use crate::structured::error::ValidationError;
use crate::types::VocabInfoRecord;
use crate::{Error, ErrorContext, Result};
use jsonschema::{Draft, JSONSchema};
use schemars::schema_for;
use serde_json::Value;

/// JSON schema of [`VocabInfoRecord`], derived from the record types.
pub fn vocab_info_schema() -> Value {
    // RootSchema always serializes to an object.
    serde_json::to_value(schema_for!(VocabInfoRecord)).unwrap_or(Value::Null)
}

/// Compiled validator for vocabulary records.
pub struct RecordValidator {
    schema: JSONSchema,
}

impl RecordValidator {
    pub fn new() -> Result<Self> {
        let schema_value = vocab_info_schema();
        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema_value)
            .map_err(|e| {
                Error::configuration_with_context(
                    format!("failed to compile vocabulary schema: {}", e),
                    ErrorContext::new().with_source("structured"),
                )
            })?;
        Ok(Self { schema })
    }

    /// Check `value` against the schema and decode it into a typed record.
    ///
    /// Every violation is reported, not just the first.
    pub fn validate(&self, value: &Value) -> Result<VocabInfoRecord> {
        if let Err(errors) = self.schema.validate(value) {
            let errors: Vec<ValidationError> = errors
                .map(|e| {
                    let path = e.instance_path.to_string();
                    let path = if path.is_empty() { "/".to_string() } else { path };
                    ValidationError::with_path(e.to_string(), path)
                })
                .collect();
            return Err(Error::schema_invalid(errors));
        }

        serde_json::from_value(value.clone()).map_err(|e| {
            Error::schema_invalid(vec![ValidationError::without_path(e.to_string())])
        })
    }
}

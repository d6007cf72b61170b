use crate::converter::SchemaConverter;
use crate::error::ValidationError;
use crate::schema_error::{BodyKind, ContractViolation, SchemaError};
use crate::validation_helpers::build_validator;
use jsonschema::Validator;
use serde_json::Value;
use tracing::debug;

/// Validator for one body against one converted JSON Schema
pub struct BodyValidator {
    schema: Validator,
}

impl BodyValidator {
    /// Compiles an already converted schema
    pub fn new(schema_value: &Value, error_context: &str) -> Result<Self, ValidationError> {
        let schema = build_validator(schema_value, error_context)?;
        Ok(Self { schema })
    }

    /// Every violation, in the order the validator walked the body
    pub fn collect_errors(&self, instance: &Value) -> Vec<SchemaError> {
        if self.schema.is_valid(instance) {
            return Vec::new();
        }

        self.schema
            .iter_errors(instance)
            .map(|e| SchemaError::from(&e))
            .collect()
    }
}

/// What a request or response check needs besides the body itself.
pub(crate) struct BodyCheck<'a> {
    pub converter: &'a SchemaConverter,
    /// Converted `components`, embedded so that local `$ref`s resolve.
    pub components: Option<&'a Value>,
    pub kind: BodyKind,
}

impl BodyCheck<'_> {
    /// Converts `raw_schema`, parses `body` and validates one against the other.
    pub(crate) fn run(&self, raw_schema: &Value, body: &[u8]) -> Result<(), ValidationError> {
        let mut schema = self.converter.convert(raw_schema);
        if let (Value::Object(map), Some(components)) = (&mut schema, self.components) {
            map.insert("components".to_string(), components.clone());
        }
        debug!(kind = self.kind.as_str(), "schema converted");

        let instance: Value = serde_json::from_slice(body).map_err(ValidationError::MalformedBody)?;

        let context = match self.kind {
            BodyKind::Request => "request body",
            BodyKind::Response => "response body",
        };
        let errors = BodyValidator::new(&schema, context)?.collect_errors(&instance);

        if errors.is_empty() {
            debug!(kind = self.kind.as_str(), "body matches contract");
            return Ok(());
        }

        debug!(
            kind = self.kind.as_str(),
            violations = errors.len(),
            "body does not match contract"
        );
        let violation = ContractViolation::new(
            self.kind,
            String::from_utf8_lossy(body).into_owned(),
            raw_schema.clone(),
            errors,
        );

        Err(match self.kind {
            BodyKind::Request => ValidationError::InvalidRequest(violation),
            BodyKind::Response => ValidationError::InvalidResponse(violation),
        })
    }
}

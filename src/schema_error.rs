use crate::validation_helpers::{constraint_from_schema_path, format_property_path, format_schema_error};
use jsonschema::error::ValidationErrorKind;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// A single constraint violation reported against a request or response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaError {
    constraint: String,
    property: String,
    message: String,
}

impl SchemaError {
    pub fn new(
        constraint: impl Into<String>,
        property: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            constraint: constraint.into(),
            property: property.into(),
            message: message.into(),
        }
    }

    /// The keyword that failed, e.g. `required` or `type`.
    pub fn constraint(&self) -> &str {
        &self.constraint
    }

    /// Dotted path into the body, e.g. `items[0].name`. Empty for the root.
    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&jsonschema::ValidationError<'_>> for SchemaError {
    fn from(error: &jsonschema::ValidationError<'_>) -> Self {
        let location = format_property_path(&error.instance_path.to_string());

        // `required` failures are reported at the parent object; point at the missing member.
        let property = match &error.kind {
            ValidationErrorKind::Required { property } => {
                let name = property
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| property.to_string());
                if location.is_empty() {
                    name
                } else {
                    format!("{}.{}", location, name)
                }
            }
            _ => location,
        };

        Self {
            constraint: constraint_from_schema_path(&error.schema_path.to_string()),
            property,
            message: error.to_string(),
        }
    }
}

/// Which side of the exchange a body belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Request,
    Response,
}

impl BodyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "Request",
            Self::Response => "Response",
        }
    }
}

/// Everything needed to explain why a body failed its contract.
///
/// Carries the schema exactly as written in the OpenAPI document (before
/// dialect conversion) so the rendered report reads like the contract.
#[derive(Debug, Clone)]
pub struct ContractViolation {
    kind: BodyKind,
    body: String,
    schema: Value,
    errors: Vec<SchemaError>,
}

impl ContractViolation {
    pub fn new(kind: BodyKind, body: String, schema: Value, errors: Vec<SchemaError>) -> Self {
        Self {
            kind,
            body,
            schema,
            errors,
        }
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn errors(&self) -> &[SchemaError] {
        &self.errors
    }
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors: Vec<String> = self.errors.iter().map(format_schema_error).collect();
        let schema = serde_json::to_string_pretty(&self.schema).map_err(|_| fmt::Error)?;

        write!(
            f,
            "{}\n\nExpected Schema:\n{}\n\nActual {}:\n{}",
            errors.join("\n\n"),
            schema,
            self.kind.as_str(),
            self.body
        )
    }
}

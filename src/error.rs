use crate::schema_error::ContractViolation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Path \"{0}\" does not exist in schema")]
    PathNotFound(String),

    #[error("Method \"{method}\" does not exist in path \"{path}\"")]
    MethodNotFound { method: String, path: String },

    #[error("Response \"{status}\" not defined for \"{method} {path}\"")]
    ResponseNotFound {
        status: u16,
        method: String,
        path: String,
    },

    #[error("Content type \"{content_type}\" not found for \"{status} {method} - {path}\"")]
    ContentTypeNotFound {
        content_type: String,
        status: u16,
        method: String,
        path: String,
    },

    #[error("Request body not defined for \"{method} {path}\"")]
    RequestBodyNotFound { method: String, path: String },

    #[error("Content type \"{content_type}\" not found for request body of \"{method} {path}\"")]
    RequestContentTypeNotFound {
        content_type: String,
        method: String,
        path: String,
    },

    #[error("No schema defined for content type \"{content_type}\" of \"{method} {path}\"")]
    SchemaNotDefined {
        content_type: String,
        method: String,
        path: String,
    },

    #[error("Failed to resolve reference: {0}")]
    UnresolvableReference(String),

    #[error("Response does not match OpenAPI specification\n{0}")]
    InvalidResponse(ContractViolation),

    #[error("Request does not match OpenAPI specification\n{0}")]
    InvalidRequest(ContractViolation),

    #[error("Body is not valid JSON: {0}")]
    MalformedBody(#[source] serde_json::Error),

    #[error("Failed to load OpenAPI document: {0}")]
    DocumentLoad(String),

    #[error("Failed to compile JSON schema: {0}")]
    SchemaCompilationError(String),
}

impl ValidationError {
    /// Ordered constraint violations for body mismatches, empty for every other failure.
    pub fn schema_errors(&self) -> &[crate::schema_error::SchemaError] {
        match self {
            Self::InvalidResponse(violation) | Self::InvalidRequest(violation) => {
                violation.errors()
            }
            _ => &[],
        }
    }
}

use crate::error::ValidationError;
use crate::spec::{locate_response_schema, OpenApiDocument};
use crate::validation_helpers::strip_query;
use crate::validators::body::BodyCheck;
use tracing::debug;

/// Response without content; OpenAPI gives it no schema and the body is empty.
const NO_CONTENT: u16 = 204;

/// Validator for one response body against the schema its coordinates select
pub struct ResponseValidator<'a> {
    document: &'a OpenApiDocument,
    check: BodyCheck<'a>,
}

impl<'a> ResponseValidator<'a> {
    pub(crate) fn new(document: &'a OpenApiDocument, check: BodyCheck<'a>) -> Self {
        Self { document, check }
    }

    /// Validates response body against the schema for path, method, status and content type
    pub fn validate(
        &self,
        body: &[u8],
        path: &str,
        method: &str,
        status_code: u16,
        content_type: &str,
    ) -> Result<(), ValidationError> {
        if status_code == NO_CONTENT {
            debug!(path, method, "no content expected; skipping schema lookup");
            return Ok(());
        }

        let path = strip_query(path);
        debug!(path, method, status_code, content_type, "validating response");

        let schema = locate_response_schema(self.document, path, method, status_code, content_type)?;
        self.check.run(schema, body)
    }
}

use crate::error::ValidationError;
use crate::spec::{locate_request_schema, OpenApiDocument};
use crate::validation_helpers::strip_query;
use crate::validators::body::BodyCheck;
use tracing::debug;

/// Validator for a request body against the schema its coordinates select
pub struct RequestBodyValidator<'a> {
    document: &'a OpenApiDocument,
    check: BodyCheck<'a>,
}

impl<'a> RequestBodyValidator<'a> {
    pub(crate) fn new(document: &'a OpenApiDocument, check: BodyCheck<'a>) -> Self {
        Self { document, check }
    }

    /// Validates request body against the schema for path, method and content type
    pub fn validate(
        &self,
        body: &[u8],
        path: &str,
        method: &str,
        content_type: &str,
    ) -> Result<(), ValidationError> {
        let path = strip_query(path);
        debug!(path, method, content_type, "validating request");

        let schema = locate_request_schema(self.document, path, method, content_type)?;
        self.check.run(schema, body)
    }
}

use crate::converter::{ConversionOptions, SchemaConverter};
use crate::error::ValidationError;
use crate::schema_error::BodyKind;
use crate::spec::{load_openapi_document, OpenApiDocument};
use crate::validators::body::BodyCheck;
use crate::validators::{RequestBodyValidator, ResponseValidator};
use serde_json::Value;
use std::path::Path;

/// Content type assumed when a caller has no better answer.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Top-level validator that checks requests/responses against an OpenAPI document
///
/// The document and converter are fixed at construction; every call
/// resolves and converts its own schema, so one instance can be shared
/// across threads.
#[derive(Debug)]
pub struct OpenApiValidator {
    document: OpenApiDocument,
    converter: SchemaConverter,
    components: Option<Value>,
}

impl OpenApiValidator {
    pub fn new(document: OpenApiDocument, options: ConversionOptions) -> Self {
        let converter = SchemaConverter::new(options);
        let components = document
            .components()
            .map(|components| converter.convert_components(components));

        Self {
            document,
            converter,
            components,
        }
    }

    /// Loads the document at `path` (YAML or JSON) and builds a validator for it
    pub fn from_path(path: &Path, options: ConversionOptions) -> Result<Self, ValidationError> {
        let document = load_openapi_document(path)?;
        Ok(Self::new(document, options))
    }

    pub fn document(&self) -> &OpenApiDocument {
        &self.document
    }

    pub fn converter(&self) -> &SchemaConverter {
        &self.converter
    }

    fn body_check(&self, kind: BodyKind) -> BodyCheck<'_> {
        BodyCheck {
            converter: &self.converter,
            components: self.components.as_ref(),
            kind,
        }
    }

    /// Validates a response against the schema for `path`, `method`, `status_code` and `content_type`
    ///
    /// `status_code` is taken as given rather than read from the response, so a
    /// response can be checked against any documented status.
    pub fn validate_response<B: AsRef<[u8]>>(
        &self,
        response: &http::Response<B>,
        path: &str,
        method: &str,
        status_code: u16,
        content_type: &str,
    ) -> Result<(), ValidationError> {
        self.validate_response_body(response.body().as_ref(), path, method, status_code, content_type)
    }

    /// Same as [`validate_response`](Self::validate_response) for a raw body
    pub fn validate_response_body(
        &self,
        body: &[u8],
        path: &str,
        method: &str,
        status_code: u16,
        content_type: &str,
    ) -> Result<(), ValidationError> {
        ResponseValidator::new(&self.document, self.body_check(BodyKind::Response)).validate(
            body,
            path,
            method,
            status_code,
            content_type,
        )
    }

    /// Validates a request body against the schema for `path`, `method` and `content_type`
    pub fn validate_request<B: AsRef<[u8]>>(
        &self,
        request: &http::Request<B>,
        path: &str,
        method: &str,
        content_type: &str,
    ) -> Result<(), ValidationError> {
        self.validate_request_body(request.body().as_ref(), path, method, content_type)
    }

    /// Same as [`validate_request`](Self::validate_request) for a raw body
    pub fn validate_request_body(
        &self,
        body: &[u8],
        path: &str,
        method: &str,
        content_type: &str,
    ) -> Result<(), ValidationError> {
        RequestBodyValidator::new(&self.document, self.body_check(BodyKind::Request))
            .validate(body, path, method, content_type)
    }
}

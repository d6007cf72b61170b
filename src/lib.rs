pub mod api_validator;
pub mod converter;
pub mod error;
pub mod schema_error;
pub mod spec;
pub mod validation_helpers;
pub mod validators;

pub use api_validator::{OpenApiValidator, DEFAULT_CONTENT_TYPE};
pub use converter::{ConversionOptions, PatternPropertiesHandler, SchemaConverter};
pub use error::ValidationError;
pub use schema_error::{BodyKind, ContractViolation, SchemaError};
pub use spec::{
    load_openapi_document, locate_request_schema, locate_response_schema, parse_openapi_document,
    OpenApiDocument, ResolutionContext, ResolutionState,
};
pub use validation_helpers::{build_validator, format_property_path, strip_query};
pub use validators::{BodyValidator, RequestBodyValidator, ResponseValidator};

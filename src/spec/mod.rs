pub mod document;
pub mod loader;
pub mod locator;
pub mod reference_resolver;

pub use document::OpenApiDocument;
pub use loader::{load_openapi_document, parse_openapi_document};
pub use locator::{locate_request_schema, locate_response_schema, ResolutionContext, ResolutionState};
pub use reference_resolver::{ComponentKind, ResolveReference};

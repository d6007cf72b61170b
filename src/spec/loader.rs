use crate::error::ValidationError;
use crate::spec::document::OpenApiDocument;
use serde_json::Value;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Loads an OpenAPI document from a YAML or JSON file
pub fn load_openapi_document(path: &Path) -> Result<OpenApiDocument, ValidationError> {
    let file = File::open(path).map_err(|e| {
        ValidationError::DocumentLoad(format!("Failed to open spec file {}: {}", path.display(), e))
    })?;

    let root: Value = serde_yaml::from_reader(file).map_err(|e| {
        ValidationError::DocumentLoad(format!("Failed to parse OpenAPI spec: {}", e))
    })?;

    let document = OpenApiDocument::from_value(root)?;
    info!(
        path = %path.display(),
        title = %document.info().title,
        version = %document.info().version,
        "loaded OpenAPI document"
    );

    Ok(document)
}

/// Parses an OpenAPI document held in memory (YAML or JSON text)
pub fn parse_openapi_document(contents: &str) -> Result<OpenApiDocument, ValidationError> {
    let root: Value = serde_yaml::from_str(contents).map_err(|e| {
        ValidationError::DocumentLoad(format!("Failed to parse OpenAPI spec: {}", e))
    })?;

    OpenApiDocument::from_value(root)
}

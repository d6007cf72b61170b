use crate::error::ValidationError;
use openapiv3::Info;
use serde_json::Value;

/// A parsed OpenAPI v3 contract.
///
/// The whole document is kept as one untyped tree so that any schema node,
/// including vendor extensions the typed model would drop, can be handed to
/// the converter unchanged. Only the header is read through `openapiv3`.
#[derive(Debug, Clone)]
pub struct OpenApiDocument {
    root: Value,
    info: Info,
}

impl OpenApiDocument {
    /// Wraps a parsed tree, checking that it is an OpenAPI 3.x document
    pub fn from_value(root: Value) -> Result<Self, ValidationError> {
        let version = root
            .get("openapi")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ValidationError::DocumentLoad("Missing `openapi` version field".to_string())
            })?;

        if !version.starts_with("3.") {
            return Err(ValidationError::DocumentLoad(format!(
                "Unsupported OpenAPI version: {}",
                version
            )));
        }

        let info_value = root.get("info").cloned().unwrap_or(Value::Null);
        let info: Info = serde_json::from_value(info_value).map_err(|e| {
            ValidationError::DocumentLoad(format!("Invalid `info` section: {}", e))
        })?;

        Ok(Self { root, info })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    pub fn openapi_version(&self) -> &str {
        self.root
            .get("openapi")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn paths(&self) -> Option<&Value> {
        self.root.get("paths")
    }

    pub fn components(&self) -> Option<&Value> {
        self.root.get("components")
    }
}

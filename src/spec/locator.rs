//! Finds the schema a body must satisfy inside an OpenAPI document.
//!
//! Resolution walks `paths → {path} → {method} → responses → {status} →
//! content → {contentType} → schema` (or `requestBody` instead of
//! `responses → {status}` for requests). Each step either advances a
//! [`ResolutionContext`] or fails with an error naming the coordinate that
//! is missing, so an absent path is always reported as such even when every
//! deeper level would be missing too.

use crate::error::ValidationError;
use crate::spec::document::OpenApiDocument;
use crate::spec::reference_resolver::{ComponentKind, ResolveReference};
use serde_json::Value;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    Start,
    PathResolved,
    MethodResolved,
    StatusResolved,
    RequestBodyResolved,
    ContentTypeResolved,
}

/// Cursor over one resolution.
///
/// Steps take the context by value and hand back the advanced one, so two
/// resolutions never share a cursor.
#[derive(Debug, Clone)]
pub struct ResolutionContext<'d> {
    document: &'d Value,
    node: &'d Value,
    state: ResolutionState,
    current_path: Option<String>,
    current_method: Option<String>,
    current_status: Option<u16>,
    current_content_type: Option<String>,
}

impl<'d> ResolutionContext<'d> {
    pub fn new(document: &'d OpenApiDocument) -> Self {
        Self {
            document: document.root(),
            node: document.root(),
            state: ResolutionState::Start,
            current_path: None,
            current_method: None,
            current_status: None,
            current_content_type: None,
        }
    }

    pub fn state(&self) -> ResolutionState {
        self.state
    }

    pub fn current_path(&self) -> Option<&str> {
        self.current_path.as_deref()
    }

    pub fn current_method(&self) -> Option<&str> {
        self.current_method.as_deref()
    }

    pub fn current_status(&self) -> Option<u16> {
        self.current_status
    }

    pub fn current_content_type(&self) -> Option<&str> {
        self.current_content_type.as_deref()
    }

    /// The path and method resolved so far, for error messages.
    fn coordinates(&self) -> (String, String) {
        (
            self.current_method.clone().unwrap_or_default(),
            self.current_path.clone().unwrap_or_default(),
        )
    }

    fn advance(mut self, node: &'d Value, state: ResolutionState) -> Self {
        self.node = node;
        self.state = state;
        trace!(
            state = ?self.state,
            path = ?self.current_path,
            method = ?self.current_method,
            status = ?self.current_status,
            content_type = ?self.current_content_type,
            "resolution advanced"
        );
        self
    }

    fn with_path(mut self, path: &str) -> Result<Self, ValidationError> {
        let node = self
            .node
            .get("paths")
            .and_then(|paths| paths.get(path))
            .ok_or_else(|| ValidationError::PathNotFound(path.to_string()))?;

        self.current_path = Some(path.to_string());
        Ok(self.advance(node, ResolutionState::PathResolved))
    }

    fn with_method(mut self, method: &str) -> Result<Self, ValidationError> {
        let method = method.to_lowercase();
        let node = self.node.get(method.as_str()).ok_or_else(|| ValidationError::MethodNotFound {
            method: method.clone(),
            path: self.current_path.clone().unwrap_or_default(),
        })?;

        self.current_method = Some(method);
        Ok(self.advance(node, ResolutionState::MethodResolved))
    }

    fn with_status(mut self, status: u16) -> Result<Self, ValidationError> {
        let (method, path) = self.coordinates();
        let node = self
            .node
            .get("responses")
            .and_then(|responses| responses.get(status.to_string()))
            .ok_or(ValidationError::ResponseNotFound {
                status,
                method,
                path,
            })?
            .resolve(self.document, ComponentKind::Responses)?;

        self.current_status = Some(status);
        Ok(self.advance(node, ResolutionState::StatusResolved))
    }

    fn with_request_body(self) -> Result<Self, ValidationError> {
        let (method, path) = self.coordinates();
        let node = self
            .node
            .get("requestBody")
            .ok_or(ValidationError::RequestBodyNotFound { method, path })?
            .resolve(self.document, ComponentKind::RequestBodies)?;

        Ok(self.advance(node, ResolutionState::RequestBodyResolved))
    }

    fn with_content_type(mut self, content_type: &str) -> Result<Self, ValidationError> {
        let Some(node) = self
            .node
            .get("content")
            .and_then(|content| content.get(content_type))
        else {
            let (method, path) = self.coordinates();
            let content_type = content_type.to_string();
            return Err(match self.current_status {
                Some(status) => ValidationError::ContentTypeNotFound {
                    content_type,
                    status,
                    method,
                    path,
                },
                None => ValidationError::RequestContentTypeNotFound {
                    content_type,
                    method,
                    path,
                },
            });
        };

        self.current_content_type = Some(content_type.to_string());
        Ok(self.advance(node, ResolutionState::ContentTypeResolved))
    }

    fn into_schema(self) -> Result<&'d Value, ValidationError> {
        self.node.get("schema").ok_or_else(|| {
            let (method, path) = self.coordinates();
            ValidationError::SchemaNotDefined {
                content_type: self.current_content_type.clone().unwrap_or_default(),
                method,
                path,
            }
        })
    }
}

/// Finds the raw (unconverted) schema of a response body
pub fn locate_response_schema<'d>(
    document: &'d OpenApiDocument,
    path: &str,
    method: &str,
    status: u16,
    content_type: &str,
) -> Result<&'d Value, ValidationError> {
    ResolutionContext::new(document)
        .with_path(path)?
        .with_method(method)?
        .with_status(status)?
        .with_content_type(content_type)?
        .into_schema()
}

/// Finds the raw (unconverted) schema of a request body
pub fn locate_request_schema<'d>(
    document: &'d OpenApiDocument,
    path: &str,
    method: &str,
    content_type: &str,
) -> Result<&'d Value, ValidationError> {
    ResolutionContext::new(document)
        .with_path(path)?
        .with_method(method)?
        .with_request_body()?
        .with_content_type(content_type)?
        .into_schema()
}

use crate::error::ValidationError;
use serde_json::Value;

/// The component sections whose objects may stand behind a `$ref` on the
/// way down to a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Responses,
    RequestBodies,
}

impl ComponentKind {
    fn section(&self) -> &'static str {
        match self {
            Self::Responses => "responses",
            Self::RequestBodies => "requestBodies",
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Self::Responses => "#/components/responses/",
            Self::RequestBodies => "#/components/requestBodies/",
        }
    }
}

/// Resolves OpenAPI structure-level `$ref` to the component it names
///
/// This handles references to response and request body objects:
/// - `$ref: "#/components/responses/ErrorResponse"`
/// - `$ref: "#/components/requestBodies/CreateUser"`
///
/// References *inside* schemas are left alone: the structural validator
/// follows them against the converted `components` embedded next to the
/// schema being checked.
pub trait ResolveReference {
    fn resolve<'a>(&'a self, document: &'a Value, kind: ComponentKind) -> Result<&'a Value, ValidationError>;
}

impl ResolveReference for Value {
    fn resolve<'a>(&'a self, document: &'a Value, kind: ComponentKind) -> Result<&'a Value, ValidationError> {
        let Some(reference) = self.get("$ref").and_then(Value::as_str) else {
            return Ok(self);
        };

        let name = reference.strip_prefix(kind.prefix()).ok_or_else(|| {
            ValidationError::UnresolvableReference(format!(
                "Invalid reference: {}. Expected prefix: {}",
                reference,
                kind.prefix()
            ))
        })?;
        let name = name.replace("~1", "/").replace("~0", "~");

        document
            .get("components")
            .and_then(|components| components.get(kind.section()))
            .and_then(|section| section.get(&name))
            .ok_or_else(|| {
                ValidationError::UnresolvableReference(format!("Reference not found: {}", reference))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn inline_objects_resolve_to_themselves() {
        let document = json!({});
        let response = json!({"description": "ok"});
        assert_eq!(response.resolve(&document, ComponentKind::Responses).unwrap(), &response);
    }

    #[test]
    fn component_references_are_followed() {
        let document = json!({
            "components": {"responses": {"NotFound": {"description": "missing"}}}
        });
        let reference = json!({"$ref": "#/components/responses/NotFound"});

        let resolved = reference.resolve(&document, ComponentKind::Responses).unwrap();
        assert_eq!(resolved, &json!({"description": "missing"}));
    }

    #[test]
    fn foreign_and_dangling_references_fail() {
        let document = json!({"components": {"responses": {}}});

        let foreign = json!({"$ref": "#/components/schemas/Pet"});
        assert!(matches!(
            foreign.resolve(&document, ComponentKind::Responses),
            Err(ValidationError::UnresolvableReference(_))
        ));

        let dangling = json!({"$ref": "#/components/requestBodies/Missing"});
        assert!(matches!(
            dangling.resolve(&document, ComponentKind::RequestBodies),
            Err(ValidationError::UnresolvableReference(_))
        ));
    }
}

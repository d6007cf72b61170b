use crate::error::ValidationError;
use crate::schema_error::SchemaError;
use jsonschema::{Draft, Validator};
use serde_json::Value;

/// Builds a draft-04 JSON Schema validator for an already converted schema
pub fn build_validator(schema: &Value, error_context: &str) -> Result<Validator, ValidationError> {
    jsonschema::options()
        .with_draft(Draft::Draft4)
        .build(schema)
        .map_err(|e| {
            ValidationError::SchemaCompilationError(format!(
                "Failed to compile schema for {}: {}",
                error_context, e
            ))
        })
}

/// Drops the query string; lookups are keyed by the templated path only
pub fn strip_query(path: &str) -> &str {
    path.split_once('?').map_or(path, |(path, _)| path)
}

/// Formats one violation as an indented report block
pub fn format_schema_error(error: &SchemaError) -> String {
    format!(
        "\tError: \n\t\tConstraint: {}\n\t\tProperty: {}\n\t\tMessage: {}\n",
        error.constraint(),
        error.property(),
        error.message()
    )
}

/// Turns a JSON pointer such as `/items/0/name` into `items[0].name`
pub fn format_property_path(instance_path: &str) -> String {
    let mut rendered = String::new();

    for segment in instance_path.split('/').skip(1) {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        if segment.parse::<usize>().is_ok() {
            rendered.push('[');
            rendered.push_str(&segment);
            rendered.push(']');
        } else {
            if !rendered.is_empty() {
                rendered.push('.');
            }
            rendered.push_str(&segment);
        }
    }

    rendered
}

/// The failing keyword is the last non-index segment of the schema path
pub fn constraint_from_schema_path(schema_path: &str) -> String {
    schema_path
        .rsplit('/')
        .find(|segment| !segment.is_empty() && segment.parse::<usize>().is_err())
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .unwrap_or_else(|| "schema".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_is_removed() {
        assert_eq!(strip_query("/check/health?thisis=fine"), "/check/health");
        assert_eq!(strip_query("/check/health"), "/check/health");
        assert_eq!(strip_query("/a?b?c"), "/a");
    }

    #[test]
    fn pointers_render_as_dotted_paths() {
        assert_eq!(format_property_path(""), "");
        assert_eq!(format_property_path("/health"), "health");
        assert_eq!(format_property_path("/items/0/name"), "items[0].name");
        assert_eq!(format_property_path("/0"), "[0]");
        assert_eq!(format_property_path("/a~1b/c~0d"), "a/b.c~d");
    }

    #[test]
    fn constraint_is_last_keyword_in_schema_path() {
        assert_eq!(constraint_from_schema_path("/required"), "required");
        assert_eq!(constraint_from_schema_path("/properties/health/type"), "type");
        assert_eq!(constraint_from_schema_path("/items/0/type"), "type");
        assert_eq!(constraint_from_schema_path("/allOf/1"), "allOf");
        assert_eq!(constraint_from_schema_path(""), "schema");
    }
}

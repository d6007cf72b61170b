use openapi_contract_validator::{
    load_openapi_document, locate_response_schema, parse_openapi_document, ConversionOptions,
    OpenApiValidator, ValidationError, DEFAULT_CONTENT_TYPE,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;

const YAML_SPEC: &str = r#"
openapi: 3.0.3
info:
  title: Orders API
  version: 2.1.0
paths:
  /orders/{orderId}:
    get:
      responses:
        '200':
          description: One order
          content:
            application/json:
              schema:
                type: object
                required: [id, placedAt]
                properties:
                  id:
                    type: long
                  placedAt:
                    type: dateTime
                  note:
                    type: string
                    nullable: true
"#;

#[test]
fn test_loads_yaml_document() {
    let dir = tempfile::tempdir().unwrap();
    let spec_path = dir.path().join("openapi.yml");
    fs::write(&spec_path, YAML_SPEC).unwrap();

    let document = load_openapi_document(&spec_path).unwrap();

    assert_eq!(document.info().title, "Orders API");
    assert_eq!(document.info().version, "2.1.0");
    assert_eq!(document.openapi_version(), "3.0.3");

    let schema = locate_response_schema(&document, "/orders/{orderId}", "GET", 200, DEFAULT_CONTENT_TYPE).unwrap();
    assert_eq!(schema["properties"]["id"], json!({"type": "long"}));
}

#[test]
fn test_yaml_document_validates_bodies() {
    let dir = tempfile::tempdir().unwrap();
    let spec_path = dir.path().join("openapi.yaml");
    fs::write(&spec_path, YAML_SPEC).unwrap();

    let validator = OpenApiValidator::from_path(&spec_path, ConversionOptions::default()).unwrap();

    validator
        .validate_response_body(
            br#"{"id": 12, "placedAt": "2024-05-01T10:00:00Z", "note": null}"#,
            "/orders/{orderId}",
            "GET",
            200,
            DEFAULT_CONTENT_TYPE,
        )
        .unwrap();

    let err = validator
        .validate_response_body(br#"{"id": 1.5}"#, "/orders/{orderId}", "GET", 200, DEFAULT_CONTENT_TYPE)
        .unwrap_err();
    let constraints: Vec<&str> = err.schema_errors().iter().map(|e| e.constraint()).collect();
    assert!(constraints.contains(&"type"));
    assert!(constraints.contains(&"required"));
}

#[test]
fn test_parses_json_text() {
    let document = parse_openapi_document(
        r#"{"openapi": "3.1.0", "info": {"title": "Inline", "version": "0.1"}, "paths": {}}"#,
    )
    .unwrap();

    assert_eq!(document.info().title, "Inline");
    assert_eq!(document.paths(), Some(&json!({})));
    assert!(document.components().is_none());
}

#[test]
fn test_rejects_swagger_2() {
    let err = parse_openapi_document("swagger: '2.0'\ninfo: {title: Old, version: '1'}\n").unwrap_err();
    assert!(matches!(err, ValidationError::DocumentLoad(_)));

    let err = parse_openapi_document("openapi: 2.0.0\ninfo: {title: Old, version: '1'}\n").unwrap_err();
    assert!(matches!(err, ValidationError::DocumentLoad(ref message) if message.contains("2.0.0")));
}

#[test]
fn test_rejects_missing_info() {
    let err = parse_openapi_document("openapi: 3.0.0\npaths: {}\n").unwrap_err();
    assert!(matches!(err, ValidationError::DocumentLoad(_)));
}

#[test]
fn test_rejects_unparsable_file() {
    let dir = tempfile::tempdir().unwrap();
    let spec_path = dir.path().join("broken.yml");
    fs::write(&spec_path, "openapi: [3.0.0\n").unwrap();

    let err = load_openapi_document(&spec_path).unwrap_err();
    assert!(matches!(err, ValidationError::DocumentLoad(_)));
}

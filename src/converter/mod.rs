//! OpenAPI v3 schema objects rewritten as JSON Schema draft-04.
//!
//! OpenAPI's schema dialect is close to draft-04 but not identical: it has
//! type aliases (`long`, `dateTime`, ...), expresses nullability with a
//! `nullable` flag, and carries documentation keywords that a structural
//! validator either rejects or misreads. [`SchemaConverter`] walks a schema
//! tree and produces an equivalent draft-04 tree.

pub mod options;

pub use options::{collapse_additional_properties, ConversionOptions, PatternPropertiesHandler};

use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::trace;

pub const DRAFT4_SCHEMA_URI: &str = "http://json-schema.org/draft-04/schema#";

/// Keywords holding nested schemas, either one schema or a list of them.
const STRUCTS: [&str; 6] = [
    "allOf",
    "anyOf",
    "oneOf",
    "not",
    "items",
    "additionalProperties",
];

/// Keywords a draft-04 validator does not understand.
pub const NOT_SUPPORTED: [&str; 8] = [
    "nullable",
    "discriminator",
    "readOnly",
    "writeOnly",
    "xml",
    "externalDocs",
    "example",
    "deprecated",
];

#[derive(Debug, Clone)]
pub struct SchemaConverter {
    options: ConversionOptions,
    /// Flags that remove a property entirely when set to `true`.
    removal_flags: Vec<&'static str>,
    /// `NOT_SUPPORTED` minus `keep_not_supported`.
    stripped: Vec<&'static str>,
}

impl Default for SchemaConverter {
    fn default() -> Self {
        Self::new(ConversionOptions::default())
    }
}

impl SchemaConverter {
    pub fn new(options: ConversionOptions) -> Self {
        let mut removal_flags = Vec::new();
        if options.remove_read_only {
            removal_flags.push("readOnly");
        }
        if options.remove_write_only {
            removal_flags.push("writeOnly");
        }

        let stripped = NOT_SUPPORTED
            .iter()
            .copied()
            .filter(|keyword| !options.keep_not_supported.contains(*keyword))
            .collect();

        Self {
            options,
            removal_flags,
            stripped,
        }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Converts a standalone schema and stamps it with the draft-04 `$schema` URI.
    ///
    /// The input is left untouched; the result is a new tree.
    pub fn convert(&self, schema: &Value) -> Value {
        let mut converted = schema.clone();
        self.convert_schema(&mut converted);
        stamp_draft4(&mut converted);
        converted
    }

    /// Converts every schema found in a whole OpenAPI document.
    ///
    /// Entries of a `schemas` map are stamped as standalone schemas, values
    /// of a `schema` key are converted in place.
    pub fn convert_document(&self, document: &Value) -> Value {
        let mut converted = document.clone();
        self.convert_document_node(&mut converted, true);
        converted
    }

    /// Converts a `components` object without stamping `$schema`, for
    /// embedding next to a converted schema that references it.
    pub(crate) fn convert_components(&self, components: &Value) -> Value {
        let mut converted = components.clone();
        self.convert_document_node(&mut converted, false);
        converted
    }

    fn convert_document_node(&self, node: &mut Value, stamp: bool) {
        match node {
            Value::Object(map) => {
                for (key, value) in map.iter_mut() {
                    match key.as_str() {
                        "schemas" => self.convert_schemas(value, stamp),
                        "schema" => self.convert_schema(value),
                        _ => self.convert_document_node(value, stamp),
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.convert_document_node(item, stamp);
                }
            }
            _ => {}
        }
    }

    fn convert_schemas(&self, schemas: &mut Value, stamp: bool) {
        if let Value::Object(schemas) = schemas {
            for schema in schemas.values_mut() {
                self.convert_schema(schema);
                if stamp {
                    stamp_draft4(schema);
                }
            }
        }
    }

    fn convert_schema(&self, schema: &mut Value) {
        let Value::Object(map) = schema else {
            return;
        };

        for key in STRUCTS {
            match map.get_mut(key) {
                Some(Value::Array(nested)) => {
                    for item in nested {
                        self.convert_schema(item);
                    }
                }
                Some(nested) if nested.is_object() => self.convert_schema(nested),
                _ => {}
            }
        }

        self.convert_properties(map);
        self.convert_types(map);

        if self.options.support_pattern_properties {
            self.convert_pattern_properties(map);
        }

        for keyword in &self.stripped {
            map.remove(*keyword);
        }
    }

    fn convert_properties(&self, map: &mut Map<String, Value>) {
        let remaining: HashSet<String> = match map.get_mut("properties") {
            Some(Value::Object(properties)) => {
                properties.retain(|name, property| {
                    let removed = self
                        .removal_flags
                        .iter()
                        .any(|flag| property.get(*flag) == Some(&Value::Bool(true)));
                    if removed {
                        trace!(property = %name, "dropping property");
                    }
                    !removed
                });

                for property in properties.values_mut() {
                    self.convert_schema(property);
                }

                properties.keys().cloned().collect()
            }
            _ => return,
        };

        let required_emptied = match map.get_mut("required") {
            Some(Value::Array(required)) => {
                required.retain(|name| name.as_str().is_some_and(|name| remaining.contains(name)));
                required.is_empty()
            }
            _ => false,
        };

        if required_emptied {
            map.remove("required");
        }
        if remaining.is_empty() {
            map.remove("properties");
        }
    }

    fn convert_types(&self, map: &mut Map<String, Value>) {
        let original = match map.get("type") {
            None | Some(Value::Null) => return,
            Some(original) => original.clone(),
        };
        let convert_date = self.options.convert_date_to_date_time;

        if convert_date
            && original.as_str() == Some("string")
            && map.get("format").and_then(Value::as_str) == Some("date")
        {
            map.insert("format".to_string(), Value::from("date-time"));
        }

        let (new_type, new_format) = match original.as_str() {
            Some("integer") => (Value::from("integer"), None),
            Some("long") => (Value::from("integer"), Some("int64")),
            Some("float") => (Value::from("number"), Some("float")),
            Some("double") => (Value::from("number"), Some("double")),
            Some("byte") => (Value::from("string"), Some("byte")),
            Some("binary") => (Value::from("string"), Some("binary")),
            Some("date") => (
                Value::from("string"),
                Some(if convert_date { "date-time" } else { "date" }),
            ),
            Some("dateTime") => (Value::from("string"), Some("date-time")),
            Some("password") => (Value::from("string"), Some("password")),
            _ => (original.clone(), None),
        };

        map.insert("type".to_string(), new_type);
        if let Some(format) = new_format {
            map.insert("format".to_string(), Value::from(format));
        }
        if map.get("format").is_some_and(Value::is_null) {
            map.remove("format");
        }

        if map.get("nullable") == Some(&Value::Bool(true)) {
            if let Some(current) = map.get_mut("type") {
                make_nullable(current);
            }
        }
    }

    fn convert_pattern_properties(&self, map: &mut Map<String, Value>) {
        if !map.get("x-patternProperties").is_some_and(Value::is_object) {
            return;
        }
        let Some(mut patterns) = map.remove("x-patternProperties") else {
            return;
        };

        if let Value::Object(entries) = &mut patterns {
            for pattern in entries.values_mut() {
                self.convert_schema(pattern);
            }
        }
        map.insert("patternProperties".to_string(), patterns);

        self.options.pattern_properties_handler.apply(map);
    }
}

fn make_nullable(current: &mut Value) {
    match current {
        Value::Array(types) => {
            if !types.iter().any(|t| t.as_str() == Some("null")) {
                types.push(Value::from("null"));
            }
        }
        scalar => {
            let original = scalar.take();
            *scalar = Value::Array(vec![original, Value::from("null")]);
        }
    }
}

fn stamp_draft4(schema: &mut Value) {
    if let Value::Object(map) = schema {
        map.insert("$schema".to_string(), Value::from(DRAFT4_SCHEMA_URI));
    }
}

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

type HandlerFn = dyn Fn(&mut Map<String, Value>) + Send + Sync;

/// Post-processing step run on a schema after `x-patternProperties` has been
/// promoted to `patternProperties`.
#[derive(Clone)]
pub struct PatternPropertiesHandler(Arc<HandlerFn>);

impl PatternPropertiesHandler {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&mut Map<String, Value>) + Send + Sync + 'static,
    {
        Self(Arc::new(handler))
    }

    /// The default strategy, see [`collapse_additional_properties`].
    pub fn collapse_additional_properties() -> Self {
        Self::new(collapse_additional_properties)
    }

    pub(crate) fn apply(&self, schema: &mut Map<String, Value>) {
        (self.0)(schema)
    }
}

impl Default for PatternPropertiesHandler {
    fn default() -> Self {
        Self::collapse_additional_properties()
    }
}

impl fmt::Debug for PatternPropertiesHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PatternPropertiesHandler(..)")
    }
}

/// Disallows additional properties when `additionalProperties` only restates
/// one of the pattern property schemas.
pub fn collapse_additional_properties(schema: &mut Map<String, Value>) {
    let restated = match (schema.get("additionalProperties"), schema.get("patternProperties")) {
        (Some(additional), Some(Value::Object(patterns))) if additional.is_object() => {
            patterns.values().any(|pattern| pattern == additional)
        }
        _ => false,
    };

    if restated {
        schema.insert("additionalProperties".to_string(), Value::Bool(false));
    }
}

/// Options fixed when a [`SchemaConverter`](super::SchemaConverter) is built.
///
/// Every field defaults to off/empty, so a partial YAML or JSON document is
/// enough to configure a converter:
///
/// ```yaml
/// remove_read_only: true
/// keep_not_supported: [example]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Rewrite `date` formats to `date-time`.
    pub convert_date_to_date_time: bool,
    /// Promote `x-patternProperties` to `patternProperties`.
    pub support_pattern_properties: bool,
    /// Drop properties marked `readOnly: true`.
    pub remove_read_only: bool,
    /// Drop properties marked `writeOnly: true`.
    pub remove_write_only: bool,
    /// Keywords that would normally be stripped but should be kept.
    pub keep_not_supported: BTreeSet<String>,
    #[serde(skip)]
    pub pattern_properties_handler: PatternPropertiesHandler,
}

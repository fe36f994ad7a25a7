//! Schema descriptors attached to models
//!
//! A schema descriptor is an opaque value that can render itself as a
//! JSON-schema-like document. The registry embeds that document verbatim
//! in model metadata; nothing else in the crate looks inside it.

use std::fmt::Debug;
use std::sync::Arc;

use serde_json::{Map, Value, json};

/// Shared handle to a schema descriptor
pub type SchemaRef = Arc<dyn SchemaDescriptor>;

/// Anything that can describe the shape of a model's input or output
pub trait SchemaDescriptor: Send + Sync + Debug {
    /// Short name of the described type (e.g. "IrisInput")
    fn title(&self) -> &str;

    /// Render the descriptor as a JSON schema document
    fn to_json_schema(&self) -> Value;
}

/// Schema descriptor backed by a JSON schema document
#[derive(Debug, Clone, PartialEq)]
pub struct JsonSchema {
    title: String,
    schema: Value,
}

impl JsonSchema {
    /// Wrap an existing schema document
    pub fn new(title: impl Into<String>, schema: Value) -> Self {
        Self {
            title: title.into(),
            schema,
        }
    }

    /// Start an empty object schema
    pub fn object(title: impl Into<String>) -> Self {
        let title = title.into();
        let schema = json!({
            "title": title,
            "type": "object",
            "properties": {},
            "required": [],
        });
        Self { title, schema }
    }

    /// Copy another descriptor's document so it can be extended
    pub fn from_descriptor(descriptor: &dyn SchemaDescriptor) -> Self {
        Self::new(descriptor.title(), descriptor.to_json_schema())
    }

    /// Builder-style method to add a property to an object schema
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        property: Value,
        required: bool,
    ) -> Self {
        let name = name.into();

        if let Some(document) = self.schema.as_object_mut() {
            let properties = document
                .entry("properties")
                .or_insert_with(|| Value::Object(Map::new()));
            if let Some(properties) = properties.as_object_mut() {
                properties.insert(name.clone(), property);
            }

            if required {
                let list = document
                    .entry("required")
                    .or_insert_with(|| Value::Array(Vec::new()));
                if let Some(list) = list.as_array_mut() {
                    if !list.iter().any(|v| v.as_str() == Some(name.as_str())) {
                        list.push(Value::String(name));
                    }
                }
            }
        }

        self
    }

    pub fn into_ref(self) -> SchemaRef {
        Arc::new(self)
    }
}

impl SchemaDescriptor for JsonSchema {
    fn title(&self) -> &str {
        &self.title
    }

    fn to_json_schema(&self) -> Value {
        self.schema.clone()
    }
}

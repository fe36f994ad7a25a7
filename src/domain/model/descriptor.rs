//! Descriptor projections of a model, computed on demand

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// High level details of a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDetails {
    /// Display name of the model
    pub display_name: String,

    /// Qualified name of the model, its identity in the registry
    pub qualified_name: String,

    pub description: String,

    /// Code version of the model
    pub version: String,
}

/// Full details of a model, including rendered schemas where declared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    #[serde(flatten)]
    pub details: ModelDetails,

    /// Input schema rendered as JSON schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,

    /// Output schema rendered as JSON schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn details() -> ModelDetails {
        ModelDetails {
            display_name: "Iris Model".to_string(),
            qualified_name: "iris_model".to_string(),
            description: "Classifies iris flowers".to_string(),
            version: "1.0.0".to_string(),
        }
    }

    #[test]
    fn test_metadata_serializes_flat() {
        let metadata = ModelMetadata {
            details: details(),
            input_schema: Some(json!({"title": "IrisInput"})),
            output_schema: None,
        };

        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value["qualified_name"], "iris_model");
        assert_eq!(value["input_schema"]["title"], "IrisInput");
        assert!(value.get("output_schema").is_none());
    }

    #[test]
    fn test_details_serialize_without_schemas() {
        let value = serde_json::to_value(details()).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 4);
        assert!(value.get("input_schema").is_none());
    }
}

//! The capability contract every prediction component presents

use std::any::Any;
use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::descriptor::{ModelDetails, ModelMetadata};
use crate::domain::error::{ModelError, ModelResult};
use crate::domain::schema::SchemaRef;

/// Access to the concrete type behind a `dyn MlModel`
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Trait for prediction components (bare models and decorators alike)
///
/// Metadata accessors are fallible because a decorator that has not been
/// bound to a model yet cannot answer them. Bare models normally return
/// `Ok` unconditionally.
pub trait MlModel: AsAny + Send + Sync + Debug {
    /// Name suitable for user interfaces
    fn display_name(&self) -> ModelResult<String>;

    /// Unique, URL-safe identity of the model
    fn qualified_name(&self) -> ModelResult<String>;

    fn description(&self) -> ModelResult<String>;

    /// Code version of the model
    fn version(&self) -> ModelResult<String>;

    /// Schema accepted by `predict`, `None` when the model declares none
    fn input_schema(&self) -> ModelResult<Option<SchemaRef>>;

    /// Schema returned by `predict`, `None` when the model declares none
    fn output_schema(&self) -> ModelResult<Option<SchemaRef>>;

    /// Make a prediction
    fn predict(&self, input: Value) -> ModelResult<Value>;

    /// Human readable rendering, used to show the active decoration order
    fn repr(&self) -> String {
        short_type_name(std::any::type_name::<Self>()).to_string()
    }

    /// The model wrapped by this one, `None` for bare models
    fn inner_model(&self) -> Option<&dyn MlModel> {
        None
    }

    /// High level details (no schemas)
    fn details(&self) -> ModelResult<ModelDetails> {
        Ok(ModelDetails {
            display_name: self.display_name()?,
            qualified_name: self.qualified_name()?,
            description: self.description()?,
            version: self.version()?,
        })
    }

    /// Full descriptor with rendered schemas where present
    fn metadata(&self) -> ModelResult<ModelMetadata> {
        Ok(ModelMetadata {
            details: self.details()?,
            input_schema: self.input_schema()?.map(|s| s.to_json_schema()),
            output_schema: self.output_schema()?.map(|s| s.to_json_schema()),
        })
    }
}

/// Strip the module path and generic arguments from a type name
pub(crate) fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Find the first layer of a decorator chain whose concrete type is `T`
///
/// Members that are not part of the contract are only reachable through the
/// concrete type, so callers holding a decorated model use this to get back
/// to it.
pub fn find_model<T: MlModel + 'static>(model: &dyn MlModel) -> Option<&T> {
    let mut current = Some(model);

    while let Some(layer) = current {
        if let Some(found) = layer.as_any().downcast_ref::<T>() {
            return Some(found);
        }
        current = layer.inner_model();
    }

    None
}

/// Parse a JSON prediction input into a typed value
pub fn parse_input<T: DeserializeOwned>(input: Value) -> ModelResult<T> {
    serde_json::from_value(input).map_err(|e| ModelError::schema_validation(e.to_string()))
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::schema::JsonSchema;
    use serde_json::json;

    /// Configurable model used across unit tests
    #[derive(Debug)]
    pub struct MockModel {
        pub qualified_name: String,
        pub with_schemas: bool,
        pub error: Option<String>,
        pub extra: &'static str,
    }

    impl MockModel {
        pub fn new(qualified_name: impl Into<String>) -> Self {
            Self {
                qualified_name: qualified_name.into(),
                with_schemas: true,
                error: None,
                extra: "extra",
            }
        }

        pub fn without_schemas(mut self) -> Self {
            self.with_schemas = false;
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }
    }

    impl MlModel for MockModel {
        fn display_name(&self) -> ModelResult<String> {
            Ok("display_name".to_string())
        }

        fn qualified_name(&self) -> ModelResult<String> {
            Ok(self.qualified_name.clone())
        }

        fn description(&self) -> ModelResult<String> {
            Ok("description".to_string())
        }

        fn version(&self) -> ModelResult<String> {
            Ok("1.0.0".to_string())
        }

        fn input_schema(&self) -> ModelResult<Option<SchemaRef>> {
            Ok(self.with_schemas.then(|| {
                JsonSchema::object("MockInput")
                    .with_property("value", json!({"type": "number"}), true)
                    .into_ref()
            }))
        }

        fn output_schema(&self) -> ModelResult<Option<SchemaRef>> {
            Ok(self.with_schemas.then(|| {
                JsonSchema::object("MockOutput")
                    .with_property("result", json!({"type": "string"}), true)
                    .into_ref()
            }))
        }

        fn predict(&self, input: Value) -> ModelResult<Value> {
            if let Some(ref error) = self.error {
                return Err(ModelError::prediction(error.clone()));
            }
            Ok(json!({"result": "ok", "echo": input}))
        }
    }
}

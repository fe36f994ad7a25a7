//! Correlation id decorator

use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::domain::{
    Decorator, DecoratorConfig, DecoratorContext, JsonSchema, ModelError, ModelResult, SchemaRef,
};

const DEFAULT_FIELD: &str = "correlation_id";

/// Tags every prediction with a correlation id
///
/// The input schema gains a required uuid field; the caller's id is stripped
/// from the input before it reaches the wrapped model and echoed back in the
/// output, which becomes `{"<field>": id, "prediction": <model output>}`.
/// Inputs without an id get a fresh v4 uuid.
///
/// Configuration:
/// - `field`: name of the id field (default "correlation_id")
#[derive(Debug, Default, Clone, Copy)]
pub struct CorrelationId;

impl CorrelationId {
    fn field<'a>(ctx: &DecoratorContext<'a>) -> &'a str {
        ctx.configuration().get_str("field").unwrap_or(DEFAULT_FIELD)
    }

    fn take_id(field: &str, input: &mut Value) -> ModelResult<Uuid> {
        let supplied = input.as_object_mut().and_then(|map| map.remove(field));

        match supplied {
            None => Ok(Uuid::new_v4()),
            Some(Value::String(id)) => Uuid::parse_str(&id)
                .map_err(|e| ModelError::schema_validation(format!("{field}: {e}"))),
            Some(other) => Err(ModelError::schema_validation(format!(
                "{field} must be a uuid string, got {other}"
            ))),
        }
    }
}

impl Decorator for CorrelationId {
    fn default_configuration(&self) -> DecoratorConfig {
        DecoratorConfig::new().with("field", DEFAULT_FIELD)
    }

    fn input_schema(&self, ctx: &DecoratorContext<'_>) -> ModelResult<Option<SchemaRef>> {
        let field = Self::field(ctx);

        Ok(ctx.model().input_schema()?.map(|schema| {
            JsonSchema::from_descriptor(schema.as_ref())
                .with_property(field, json!({"type": "string", "format": "uuid"}), true)
                .into_ref()
        }))
    }

    fn output_schema(&self, ctx: &DecoratorContext<'_>) -> ModelResult<Option<SchemaRef>> {
        let field = Self::field(ctx);

        Ok(ctx.model().output_schema()?.map(|schema| {
            JsonSchema::object(schema.title())
                .with_property(field, json!({"type": "string", "format": "uuid"}), true)
                .with_property("prediction", schema.to_json_schema(), true)
                .into_ref()
        }))
    }

    fn predict(&self, ctx: &DecoratorContext<'_>, mut input: Value) -> ModelResult<Value> {
        let field = Self::field(ctx);
        let id = Self::take_id(field, &mut input)?;

        let prediction = ctx.model().predict(input)?;

        let mut output = Map::new();
        output.insert(field.to_string(), Value::String(id.to_string()));
        output.insert("prediction".to_string(), prediction);
        Ok(Value::Object(output))
    }
}

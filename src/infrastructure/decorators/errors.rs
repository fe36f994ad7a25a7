//! Decorators that intercept prediction failures

use serde_json::Value;
use tracing::error;

use crate::domain::{Decorator, DecoratorConfig, DecoratorContext, ModelError, ModelResult};

/// Logs prediction failures and returns the configured fallback instead
///
/// Configuration:
/// - `fallback`: value returned when the wrapped model fails (default `null`)
#[derive(Debug, Default, Clone, Copy)]
pub struct ExceptionLogging;

impl Decorator for ExceptionLogging {
    fn default_configuration(&self) -> DecoratorConfig {
        DecoratorConfig::new().with("fallback", Value::Null)
    }

    fn predict(&self, ctx: &DecoratorContext<'_>, input: Value) -> ModelResult<Value> {
        match ctx.model().predict(input) {
            Ok(output) => Ok(output),
            Err(e) => {
                let qualified_name = ctx
                    .model()
                    .qualified_name()
                    .unwrap_or_else(|_| "<unknown>".to_string());
                error!(qualified_name = %qualified_name, error = %e, "Prediction raised an error");

                Ok(ctx
                    .configuration()
                    .get("fallback")
                    .cloned()
                    .unwrap_or(Value::Null))
            }
        }
    }
}

/// Re-raises every prediction failure as `ModelError::Prediction`
#[derive(Debug, Default, Clone, Copy)]
pub struct CatchErrors;

impl Decorator for CatchErrors {
    fn predict(&self, ctx: &DecoratorContext<'_>, input: Value) -> ModelResult<Value> {
        ctx.model().predict(input).map_err(|e| match e {
            ModelError::Prediction { .. } => e,
            other => ModelError::prediction(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::mock::MockModel;
    use crate::domain::{MlModel, ModelDecorator};
    use crate::infrastructure::models::IrisModel;
    use serde_json::json;
    use std::sync::Arc;

    fn failing() -> Arc<dyn MlModel> {
        Arc::new(MockModel::new("qualified_name").with_error("Exception!"))
    }

    #[test]
    fn test_exception_logging_returns_null_by_default() {
        let decorator = ModelDecorator::wrapping(ExceptionLogging, failing());
        assert_eq!(decorator.predict(json!({})).unwrap(), Value::Null);
    }

    #[test]
    fn test_exception_logging_uses_configured_fallback() {
        let decorator = ModelDecorator::wrapping(ExceptionLogging, failing())
            .with_config("fallback", json!({"species": null}));

        assert_eq!(decorator.predict(json!({})).unwrap(), json!({"species": null}));
    }

    #[test]
    fn test_exception_logging_passes_success_through() {
        let decorator = ModelDecorator::wrapping(ExceptionLogging, Arc::new(MockModel::new("ok")));
        assert_eq!(decorator.predict(json!({})).unwrap()["result"], "ok");
    }

    #[test]
    fn test_catch_errors_converts_to_prediction_error() {
        let decorator = ModelDecorator::wrapping(CatchErrors, Arc::new(IrisModel::new()));

        let error = decorator
            .predict(json!({
                "sepal_length": 6.0,
                "sepal_width": 4.0,
                "petal_length": 2.0,
                "petal_width": "asdf"
            }))
            .unwrap_err();

        assert!(matches!(error, ModelError::Prediction { .. }));
        assert!(error.to_string().contains("invalid type"));
    }

    #[test]
    fn test_catch_errors_keeps_metadata() {
        let decorator = ModelDecorator::wrapping(CatchErrors, failing());

        assert!(decorator.predict(json!({})).is_err());
        assert_eq!(decorator.display_name().unwrap(), "display_name");
        assert_eq!(decorator.qualified_name().unwrap(), "qualified_name");
        assert_eq!(decorator.description().unwrap(), "description");
        assert_eq!(decorator.version().unwrap(), "1.0.0");
        assert!(decorator.input_schema().unwrap().is_some());
        assert!(decorator.output_schema().unwrap().is_some());
    }
}

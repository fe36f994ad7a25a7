//! Prediction logging decorator

use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::{Decorator, DecoratorConfig, DecoratorContext, ModelResult};

/// Emits a tracing event after every prediction with its outcome and duration
///
/// Configuration:
/// - `level`: "info" (default) or "debug"
#[derive(Debug, Default, Clone, Copy)]
pub struct PredictionLogging;

impl PredictionLogging {
    fn verbose(ctx: &DecoratorContext<'_>) -> bool {
        ctx.configuration().get_str("level") == Some("debug")
    }
}

impl Decorator for PredictionLogging {
    fn default_configuration(&self) -> DecoratorConfig {
        DecoratorConfig::new().with("level", "info")
    }

    fn predict(&self, ctx: &DecoratorContext<'_>, input: Value) -> ModelResult<Value> {
        let model = ctx.model();
        let qualified_name = model.qualified_name()?;
        let start = Instant::now();

        let result = model.predict(input);
        let duration_ms = start.elapsed().as_millis();

        match (&result, Self::verbose(ctx)) {
            (Ok(_), true) => {
                debug!(
                    qualified_name = %qualified_name,
                    duration_ms = %duration_ms,
                    "Prediction completed"
                )
            }
            (Ok(_), false) => {
                info!(
                    qualified_name = %qualified_name,
                    duration_ms = %duration_ms,
                    "Prediction completed"
                )
            }
            (Err(e), _) => {
                warn!(
                    qualified_name = %qualified_name,
                    duration_ms = %duration_ms,
                    error = %e,
                    "Prediction failed"
                )
            }
        }

        result
    }
}

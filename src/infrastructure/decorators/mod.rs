//! Cross-cutting decorators shipped with the crate

mod correlation;
mod errors;
mod logging;

pub use correlation::CorrelationId;
pub use errors::{CatchErrors, ExceptionLogging};
pub use logging::PredictionLogging;

use serde::Deserialize;

use crate::domain::{Decorator, ModelDecorator, ModelResult};
use crate::infrastructure::registry::ModelRegistry;

/// Decorators selectable by name from configuration and the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DecoratorKind {
    /// Log every prediction with its duration
    PredictionLogging,
    /// Log prediction failures and return a fallback value
    ExceptionLogging,
    /// Re-raise any prediction failure as a prediction error
    CatchErrors,
    /// Add a correlation id to schemas and predictions
    CorrelationId,
}

impl DecoratorKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PredictionLogging => "prediction-logging",
            Self::ExceptionLogging => "exception-logging",
            Self::CatchErrors => "catch-errors",
            Self::CorrelationId => "correlation-id",
        }
    }

    /// Wrap the registered model `qualified_name` with this decorator
    pub fn decorate(self, registry: &ModelRegistry, qualified_name: &str) -> ModelResult<()> {
        match self {
            Self::PredictionLogging => wrap(registry, qualified_name, PredictionLogging),
            Self::ExceptionLogging => wrap(registry, qualified_name, ExceptionLogging),
            Self::CatchErrors => wrap(registry, qualified_name, CatchErrors),
            Self::CorrelationId => wrap(registry, qualified_name, CorrelationId),
        }
    }
}

fn wrap<D: Decorator>(
    registry: &ModelRegistry,
    qualified_name: &str,
    decorator: D,
) -> ModelResult<()> {
    registry.add_decorator(qualified_name, ModelDecorator::new(decorator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModelError;
    use crate::infrastructure::models::IrisModel;
    use std::sync::Arc;

    #[test]
    fn test_decorate_builds_chain_in_order() {
        let registry = ModelRegistry::new();
        registry.add_model(Arc::new(IrisModel::new())).unwrap();

        for kind in [DecoratorKind::CatchErrors, DecoratorKind::PredictionLogging] {
            kind.decorate(&registry, IrisModel::QUALIFIED_NAME).unwrap();
        }

        let model = registry.get_model(IrisModel::QUALIFIED_NAME).unwrap();
        assert_eq!(model.repr(), "PredictionLogging(CatchErrors(IrisModel))");
    }

    #[test]
    fn test_decorate_unknown_model() {
        let registry = ModelRegistry::new();
        let error = DecoratorKind::CorrelationId
            .decorate(&registry, "missing")
            .unwrap_err();
        assert!(matches!(error, ModelError::NotFound { .. }));
    }

    #[test]
    fn test_kind_names_match_serde() {
        let kind: DecoratorKind = serde_json::from_str("\"exception-logging\"").unwrap();
        assert_eq!(kind, DecoratorKind::ExceptionLogging);
        assert_eq!(kind.name(), "exception-logging");
    }
}

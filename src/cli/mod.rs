//! CLI module for ml-base
//!
//! Provides subcommands that operate on the process-wide model registry:
//! - `models`: list registered models
//! - `metadata`: show one model's metadata and schemas
//! - `predict`: run a prediction, optionally through extra decorators

pub mod metadata;
pub mod models;
pub mod predict;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::registry::ModelRegistry;

/// ml-base - Serve ML models behind a uniform contract
#[derive(Parser)]
#[command(name = "ml-base")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the registered models
    Models,

    /// Show a model's metadata, including its schemas
    Metadata(metadata::MetadataArgs),

    /// Make a prediction with a registered model
    Predict(predict::PredictArgs),
}

/// Load configuration, install logging and populate the registry
fn bootstrap() -> anyhow::Result<(AppConfig, Arc<ModelRegistry>)> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let registry = ModelRegistry::instance();

    for reference in &config.registry.models {
        registry.load_model(reference)?;
    }

    for qualified_name in registry.qualified_names() {
        for kind in &config.registry.decorators {
            kind.decorate(&registry, &qualified_name)?;
        }
    }

    info!(models = registry.len(), "Registry ready");

    Ok((config, registry))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::decorators::DecoratorKind;

    #[test]
    fn test_parse_predict_arguments() {
        let cli = Cli::try_parse_from([
            "ml-base",
            "predict",
            "iris_model",
            "--input",
            "{}",
            "--decorate",
            "catch-errors",
            "--decorate",
            "prediction-logging",
        ])
        .unwrap();

        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(args.qualified_name, "iris_model");
        assert_eq!(args.input, "{}");
        assert_eq!(
            args.decorate,
            vec![DecoratorKind::CatchErrors, DecoratorKind::PredictionLogging]
        );
    }

    #[test]
    fn test_parse_metadata_arguments() {
        let cli = Cli::try_parse_from(["ml-base", "metadata", "iris_model"]).unwrap();

        let Command::Metadata(args) = cli.command else {
            panic!("expected metadata");
        };
        assert_eq!(args.qualified_name, "iris_model");
    }

    #[test]
    fn test_rejects_unknown_decorator() {
        let result = Cli::try_parse_from([
            "ml-base",
            "predict",
            "iris_model",
            "--input",
            "{}",
            "--decorate",
            "nope",
        ]);
        assert!(result.is_err());
    }
}

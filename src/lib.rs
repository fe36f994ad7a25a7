//! ml-base
//!
//! A uniform contract for deploying ML models, with support for:
//! - Self-describing models (identity, version and input/output schemas)
//! - Transparent decorators that stack around any model
//! - A process-wide registry that loads models by reference

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    Decorator, DecoratorConfig, DecoratorContext, MlModel, ModelDecorator, ModelError,
    ModelResult, ModelWrapper,
};
pub use infrastructure::registry::ModelRegistry;

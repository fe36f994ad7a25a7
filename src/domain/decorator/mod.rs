//! Decorator domain - transparent wrappers around prediction components

mod config;
mod wrapper;

pub use config::DecoratorConfig;
pub use wrapper::{Decorator, DecoratorContext, ModelDecorator, ModelWrapper};

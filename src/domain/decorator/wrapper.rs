//! Transparent decorator around an `MlModel`
//!
//! A concrete decorator implements [`Decorator`] and overrides only the hooks
//! it cares about; every other contract member forwards to the wrapped model.
//! [`ModelDecorator`] holds the wrapped model and the configuration, and is
//! itself an [`MlModel`], so decorators chain: `D2(D1(M))` runs D2's hook
//! first, which reaches D1 through `ctx.model()`, which reaches M.
//!
//! Members that are not part of the contract are not forwarded; callers use
//! [`find_model`](crate::domain::model::find_model) to reach the concrete type.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::DecoratorConfig;
use crate::domain::error::{ModelError, ModelResult};
use crate::domain::model::{MlModel, short_type_name};
use crate::domain::schema::SchemaRef;

/// What a decorator hook sees: the wrapped model and its own configuration
#[derive(Debug, Clone, Copy)]
pub struct DecoratorContext<'a> {
    model: &'a dyn MlModel,
    configuration: &'a DecoratorConfig,
}

impl<'a> DecoratorContext<'a> {
    /// The next layer down the chain
    pub fn model(&self) -> &'a dyn MlModel {
        self.model
    }

    pub fn configuration(&self) -> &'a DecoratorConfig {
        self.configuration
    }
}

/// Cross-cutting behaviour applied around a model
///
/// Every hook defaults to calling the same member on the wrapped model.
/// Overrides should build on the wrapped model's result rather than
/// synthesising independent data.
pub trait Decorator: Send + Sync + fmt::Debug + 'static {
    /// Name used when rendering the decoration chain
    fn name(&self) -> &str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Configuration values this decorator starts with; caller-supplied
    /// values are laid over them
    fn default_configuration(&self) -> DecoratorConfig {
        DecoratorConfig::new()
    }

    fn display_name(&self, ctx: &DecoratorContext<'_>) -> ModelResult<String> {
        ctx.model().display_name()
    }

    fn qualified_name(&self, ctx: &DecoratorContext<'_>) -> ModelResult<String> {
        ctx.model().qualified_name()
    }

    fn description(&self, ctx: &DecoratorContext<'_>) -> ModelResult<String> {
        ctx.model().description()
    }

    fn version(&self, ctx: &DecoratorContext<'_>) -> ModelResult<String> {
        ctx.model().version()
    }

    fn input_schema(&self, ctx: &DecoratorContext<'_>) -> ModelResult<Option<SchemaRef>> {
        ctx.model().input_schema()
    }

    fn output_schema(&self, ctx: &DecoratorContext<'_>) -> ModelResult<Option<SchemaRef>> {
        ctx.model().output_schema()
    }

    fn predict(&self, ctx: &DecoratorContext<'_>, input: Value) -> ModelResult<Value> {
        ctx.model().predict(input)
    }
}

/// A model that can be bound to the model it decorates
pub trait ModelWrapper: MlModel {
    /// Bind (or rebind) the wrapped model
    fn set_model(&mut self, model: Arc<dyn MlModel>);
}

/// Wrapper applying a [`Decorator`] to a (possibly absent) wrapped model
#[derive(Debug)]
pub struct ModelDecorator<D: Decorator> {
    decorator: D,
    model: Option<Arc<dyn MlModel>>,
    configuration: DecoratorConfig,
}

impl<D: Decorator> ModelDecorator<D> {
    /// Create an unbound decorator; contract access fails until `set_model`
    pub fn new(decorator: D) -> Self {
        let configuration = decorator.default_configuration();
        Self {
            decorator,
            model: None,
            configuration,
        }
    }

    /// Create a decorator already bound to `model`
    pub fn wrapping(decorator: D, model: Arc<dyn MlModel>) -> Self {
        let mut wrapper = Self::new(decorator);
        wrapper.model = Some(model);
        wrapper
    }

    /// Builder-style method to set a configuration value
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.configuration.insert(key, value);
        self
    }

    /// Builder-style method to lay a whole mapping over the defaults
    pub fn with_configuration(mut self, configuration: DecoratorConfig) -> Self {
        self.configuration.merge(configuration);
        self
    }

    /// Bind (or rebind) the wrapped model
    pub fn set_model(&mut self, model: Arc<dyn MlModel>) -> &mut Self {
        self.model = Some(model);
        self
    }

    pub fn model(&self) -> Option<&Arc<dyn MlModel>> {
        self.model.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.model.is_some()
    }

    pub fn decorator(&self) -> &D {
        &self.decorator
    }

    pub fn configuration(&self) -> &DecoratorConfig {
        &self.configuration
    }

    pub fn configuration_mut(&mut self) -> &mut DecoratorConfig {
        &mut self.configuration
    }

    fn context(&self, attribute: &'static str) -> ModelResult<DecoratorContext<'_>> {
        let model = self
            .model
            .as_deref()
            .ok_or_else(|| ModelError::unbound(self.decorator.name(), attribute))?;

        Ok(DecoratorContext {
            model,
            configuration: &self.configuration,
        })
    }
}

impl<D: Decorator> MlModel for ModelDecorator<D> {
    fn display_name(&self) -> ModelResult<String> {
        let ctx = self.context("display_name")?;
        self.decorator.display_name(&ctx)
    }

    fn qualified_name(&self) -> ModelResult<String> {
        let ctx = self.context("qualified_name")?;
        self.decorator.qualified_name(&ctx)
    }

    fn description(&self) -> ModelResult<String> {
        let ctx = self.context("description")?;
        self.decorator.description(&ctx)
    }

    fn version(&self) -> ModelResult<String> {
        let ctx = self.context("version")?;
        self.decorator.version(&ctx)
    }

    fn input_schema(&self) -> ModelResult<Option<SchemaRef>> {
        let ctx = self.context("input_schema")?;
        self.decorator.input_schema(&ctx)
    }

    fn output_schema(&self) -> ModelResult<Option<SchemaRef>> {
        let ctx = self.context("output_schema")?;
        self.decorator.output_schema(&ctx)
    }

    fn predict(&self, input: Value) -> ModelResult<Value> {
        let ctx = self.context("predict")?;
        self.decorator.predict(&ctx, input)
    }

    fn repr(&self) -> String {
        let inner = self
            .model
            .as_ref()
            .map(|m| m.repr())
            .unwrap_or_else(|| "None".to_string());
        format!("{}({})", self.decorator.name(), inner)
    }

    fn inner_model(&self) -> Option<&dyn MlModel> {
        self.model.as_deref()
    }
}

impl<D: Decorator> ModelWrapper for ModelDecorator<D> {
    fn set_model(&mut self, model: Arc<dyn MlModel>) {
        self.model = Some(model);
    }
}

impl<D: Decorator> fmt::Display for ModelDecorator<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

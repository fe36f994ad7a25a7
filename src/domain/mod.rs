//! Domain layer - the model contract, decorators and their errors

pub mod decorator;
pub mod error;
pub mod model;
pub mod schema;

pub use decorator::{Decorator, DecoratorConfig, DecoratorContext, ModelDecorator, ModelWrapper};
pub use error::{ModelError, ModelResult};
pub use model::{
    AsAny, MlModel, ModelDetails, ModelMetadata, find_model, parse_input, validate_qualified_name,
};
pub use schema::{JsonSchema, SchemaDescriptor, SchemaRef};

//! Model registry infrastructure - the process-wide registry and
//! load-by-reference catalog

pub mod catalog;
pub mod model_registry;

pub use catalog::{
    IRIS_MODEL_REFERENCE, ModelCatalog, ModelFactory, ModelResolver, validate_reference,
};
pub use model_registry::ModelRegistry;

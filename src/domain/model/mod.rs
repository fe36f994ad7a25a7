//! Model domain - the prediction capability contract and its descriptors

mod contract;
mod descriptor;
mod validation;

pub use contract::{AsAny, MlModel, find_model, parse_input};
pub(crate) use contract::short_type_name;
pub use descriptor::{ModelDetails, ModelMetadata};
pub use validation::{MAX_QUALIFIED_NAME_LENGTH, validate_qualified_name};

#[cfg(test)]
pub use contract::mock;

//! Infrastructure layer - concrete models, shipped decorators, the model
//! registry and process setup

pub mod decorators;
pub mod logging;
pub mod models;
pub mod registry;

//! Models shipped with the crate

mod iris;

pub use iris::{IrisInput, IrisModel, IrisOutput, Species};

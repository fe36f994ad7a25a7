//! Predict command - runs one prediction

use anyhow::Context;
use clap::Args;
use serde_json::Value;
use tracing::debug;

use super::{bootstrap, print_json};
use crate::infrastructure::decorators::DecoratorKind;

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Qualified name of the model
    pub qualified_name: String,

    /// Prediction input as a JSON document
    #[arg(long, short)]
    pub input: String,

    /// Decorators to apply before predicting, innermost first
    #[arg(long, short, value_enum)]
    pub decorate: Vec<DecoratorKind>,
}

pub fn run(args: PredictArgs) -> anyhow::Result<()> {
    let input: Value =
        serde_json::from_str(&args.input).context("--input is not a valid JSON document")?;

    let (_, registry) = bootstrap()?;

    for kind in &args.decorate {
        kind.decorate(&registry, &args.qualified_name)?;
    }

    let model = registry.get_model(&args.qualified_name)?;
    debug!(model = %model.repr(), "Predicting");

    print_json(&model.predict(input)?)
}

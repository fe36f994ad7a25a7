//! Metadata command - prints one model's metadata

use clap::Args;

use super::{bootstrap, print_json};

#[derive(Debug, Args)]
pub struct MetadataArgs {
    /// Qualified name of the model
    pub qualified_name: String,
}

pub fn run(args: MetadataArgs) -> anyhow::Result<()> {
    let (_, registry) = bootstrap()?;
    print_json(&registry.get_model_metadata(&args.qualified_name)?)
}

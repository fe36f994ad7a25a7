//! Models command - lists registered models

use super::{bootstrap, print_json};

pub fn run() -> anyhow::Result<()> {
    let (_, registry) = bootstrap()?;
    print_json(&registry.get_models()?)
}

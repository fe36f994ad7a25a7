use clap::Parser;
use ml_base::cli::{self, Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Models => cli::models::run(),
        Command::Metadata(args) => cli::metadata::run(args),
        Command::Predict(args) => cli::predict::run(args),
    }
}

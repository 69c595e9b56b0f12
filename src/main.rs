use anyhow::Result;
use clap::Parser;

use sheetstream::{Cli, Commands, commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Spec => commands::spec::run()?,
        Commands::Check(args) => commands::check::run(args).await?,
        Commands::Discover(args) => commands::discover::run(args).await?,
        Commands::Read(args) => commands::read::run(args).await?,
    };
    Ok(())
}

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod google;
pub mod model;
pub mod protocol;
pub mod records;
pub mod schema;
pub mod sheet;
pub mod sources;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the connector's connection specification.
    Spec,
    /// Verify connectivity and permissions for the configured resource.
    Check(ConnectionArgs),
    /// Discover the available streams and their schemas.
    Discover(ConnectionArgs),
    /// Read all records of the selected streams (full refresh).
    Read(ReadArgs),
}

#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Path to the JSON config file.
    #[arg(long)]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Path to the JSON config file.
    #[arg(long)]
    pub config: PathBuf,

    /// Path to the configured catalog selecting the streams to read.
    #[arg(long)]
    pub catalog: PathBuf,
}

//! structdiff CLI
//!
//! Command-line interface for structural diffs of JSON documents

use clap::{Parser, Subcommand};
use structdiff_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "structdiff")]
#[command(about = "structdiff - Structural diff of object graphs", long_about = None)]
struct Cli {
    /// Logging profile (dev, prod); logging stays off when omitted
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Diff two JSON documents
    Diff(commands::diff::DiffArgs),
    /// Run the built-in Person walk-through
    Demo(commands::demo::DemoArgs),
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(profile) = &cli.log {
        init(profile.parse::<Profile>()?);
    }

    match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Demo(args) => commands::demo::execute(args),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

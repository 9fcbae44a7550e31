//! docmap CLI - navigation YAML to DITA `BookMap` converter.
//!
//! Provides commands for:
//! - `convert`: Write `document.ditamap` for a navigation file

mod commands;
mod error;
mod output;

use std::error::Error as _;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::ConvertArgs;
use output::Output;

/// docmap - navigation YAML to DITA `BookMap` converter.
#[derive(Parser)]
#[command(name = "docmap", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a navigation file into a `BookMap`.
    Convert(ConvertArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Convert(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        let mut source = err.source();
        while let Some(cause) = source {
            output.error(&format!("  Caused by: {cause}"));
            source = cause.source();
        }
        std::process::exit(1);
    }
}

//! # sora CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros for argument parsing.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sora_cli::calc::{run_air, run_complete, run_ground, CalcArgs};
use sora_cli::reference::{run_reference, ReferenceArgs};

/// SORA Stack CLI
///
/// Offline access to the risk classification engines: ground risk, air
/// risk, the complete pipeline, and the static reference tables.
#[derive(Parser, Debug)]
#[command(name = "sora", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the ground risk engine on a JSON request.
    Ground(CalcArgs),

    /// Run the air risk engine on a JSON request.
    Air(CalcArgs),

    /// Run the complete classification pipeline on a JSON request.
    Complete(CalcArgs),

    /// Print a static regulatory reference table.
    Reference(ReferenceArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Ground(args) => run_ground(args),
        Commands::Air(args) => run_air(args),
        Commands::Complete(args) => run_complete(args),
        Commands::Reference(args) => run_reference(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

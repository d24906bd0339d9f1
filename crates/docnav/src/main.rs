//! docnav CLI - documentation site navigation resolver.
//!
//! Provides commands for:
//! - `check`: Validate the site configuration and every locale
//! - `resolve`: Print the navigation for a route as JSON
//! - `show`: Print the normalized configuration as JSON

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ResolveArgs, ShowArgs};
use output::Output;

/// docnav - documentation site navigation resolver.
#[derive(Parser)]
#[command(name = "docnav", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and all locales.
    Check(CheckArgs),
    /// Print navigation for a route.
    Resolve(ResolveArgs),
    /// Print the normalized configuration.
    Show(ShowArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(&output),
        Commands::Resolve(args) => args.execute(&output),
        Commands::Show(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

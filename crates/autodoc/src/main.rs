//! autodoc CLI - Documentation and diagram generator.
//!
//! Provides commands for:
//! - `run`: Generate documentation for a source file, preview it, and
//!   optionally publish it to Confluence
//! - `render`: Render a saved response as a preview without network access

mod commands;
mod error;
mod host;
mod output;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, RunArgs};
use output::Output;

/// autodoc - Documentation and diagram generator.
#[derive(Parser)]
#[command(name = "autodoc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate documentation for a source file.
    Run(RunArgs),
    /// Render a saved response as an HTML preview.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Run(args) => args.verbose,
        Commands::Render(args) => args.verbose,
    };

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
        Commands::Run(args) => args.execute(),
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        if err.is_notified() {
            info!("{err}");
        } else {
            output.error(&format!("Error: {err}"));
        }
        std::process::exit(1);
    }
}

//! Command-line interface for repo-flatten
//!
//! Provides `flatten`, `list`, and `completions` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod completions;
mod flatten;
mod list;
mod utils;

/// Flatten a GitHub repository subdirectory into a single text file
#[derive(Parser)]
#[command(name = "repo-flatten")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a repository snapshot and write the flat output file
    Flatten(Box<flatten::FlattenArgs>),

    /// List the files that would be written, without writing them
    List(list::ListArgs),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Flatten(args) => flatten::run(*args),
        Commands::List(args) => list::run(args),
        Commands::Completions(args) => completions::run(args),
    }
}

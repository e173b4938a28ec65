//! serpack CLI - package configuration resolver for BitSerializer

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("serpack=debug")
    } else {
        EnvFilter::new("serpack=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Requirements(args) => commands::requirements::execute(args),
        Commands::Components(args) => commands::components::execute(args),
        Commands::Releases(args) => commands::releases::execute(args),
        Commands::Fetch(args) => commands::fetch::execute(args),
        Commands::Build(args) => commands::build::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config;
use crate::output::OutputFormat;

/// Run the CLI application.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Resolve the policy file: flag/env first, platform default second
    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_path()?,
    };
    debug!(path = %config_path.display(), "using policy file");

    // Create context for commands
    let ctx = commands::Context {
        config_path,
        output_format: cli.output.unwrap_or(OutputFormat::Pretty),
        explain: cli.explain,
        verbose: cli.verbose,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Check(args) => commands::check::execute(&ctx, &args),
        Commands::Blocks(args) => commands::blocks::execute(&ctx, &args),
        Commands::Config(args) => commands::config::execute(&ctx, &args),
    }
}

/// Log to stderr; `RUST_LOG` wins, `-v` raises the default to debug.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Check IPv4 addresses against an allow/deny policy
///
/// The policy lists single addresses, address;mask pairs and from-to ranges.
/// Use --explain on any command to learn what it does.
#[derive(Parser, Debug)]
#[command(name = "ipfilter")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Policy file (defaults to the platform config directory)
    #[arg(short, long, env = "IPFILTER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Explain what this command does (educational mode)
    #[arg(long, global = true)]
    pub explain: bool,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decide whether addresses are permitted by the policy
    Check(CheckArgs),

    /// Show the CIDR blocks covering an address range
    Blocks(BlocksArgs),

    /// Manage the policy file
    Config(ConfigArgs),
}

// ============================================================================
// Check command
// ============================================================================

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Client addresses in dotted-decimal form
    #[arg(required = true)]
    pub addresses: Vec<String>,

    /// Settings keys are also looked up in the environment under this prefix
    #[arg(long, default_value = "IPFILTER_")]
    pub env_prefix: String,
}

// ============================================================================
// Blocks command
// ============================================================================

#[derive(Args, Debug)]
pub struct BlocksArgs {
    /// First address of the range
    pub from: String,

    /// Last address of the range (inclusive)
    pub to: String,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the loaded policy
    Show,

    /// Show policy file path
    Path,

    /// Write a starter policy file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

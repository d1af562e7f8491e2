//! # ipfilter-cli
//!
//! Command-line interface for IPv4 allow/deny policies.
//!
//! ## Features
//!
//! - **Policy checks**: `check` classifies addresses against a TOML policy
//! - **Range decomposition**: `blocks` shows the CIDR cover of any range
//! - **Educational mode**: `--explain` describes what a command computes
//! - **Multiple output formats**: Pretty, JSON, CSV, YAML

pub mod cli;
pub mod config;
pub mod education;
pub mod output;

pub use cli::run;

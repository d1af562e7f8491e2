//! ipfilter - IPv4 allow/deny policy checker
//!
//! Checks client addresses against a TOML policy and explains CIDR ranges.

use std::process::ExitCode;

fn main() -> ExitCode {
    match ipfilter_cli::run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

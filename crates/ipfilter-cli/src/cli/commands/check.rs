//! `ipfilter check` - Decide whether client addresses are permitted.

use anyhow::Result;
use colored::{ColoredString, Colorize};
use ipfilter::{AccessPolicy, Decision, EnvSettings};
use serde::Serialize;
use std::process::ExitCode;

use super::Context;
use crate::cli::args::CheckArgs;
use crate::config;
use crate::education::Explain;
use crate::output::{print_csv, OutputFormat};

/// One checked address, as rendered in every output format.
#[derive(Debug, Serialize)]
struct CheckRow {
    address: String,
    decision: Option<Decision>,
    permitted: Option<bool>,
    error: Option<String>,
}

pub fn execute(ctx: &Context, args: &CheckArgs) -> Result<ExitCode> {
    if ctx.explain {
        Explain::check(&args.env_prefix).print();
    }

    let config = config::load(&ctx.config_path)?;
    let settings = EnvSettings::with_prefix(args.env_prefix.as_str());
    let policy = AccessPolicy::from_config(&config, &settings)?;

    if ctx.verbose {
        eprintln!(
            "{} {} ({} allow / {} deny blocks, malformed input: {})",
            "Policy:".bold(),
            ctx.config_path.display(),
            policy.allow_list().len(),
            policy.deny_list().len(),
            policy.invalid_address_policy()
        );
    }

    let rows: Vec<CheckRow> = args
        .addresses
        .iter()
        .map(|address| evaluate(&policy, address))
        .collect();

    match ctx.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&rows)?),
        OutputFormat::Csv => print_csv(&rows)?,
        OutputFormat::Pretty => print_pretty(&rows),
    }

    Ok(exit_code(&rows))
}

fn evaluate(policy: &AccessPolicy, address: &str) -> CheckRow {
    let checked = policy.check(address);
    let decision = checked.as_ref().ok().copied();
    match policy.permits_decision(address, checked) {
        Ok(permitted) => CheckRow {
            address: address.to_string(),
            decision,
            permitted: Some(permitted),
            error: None,
        },
        Err(err) => CheckRow {
            address: address.to_string(),
            decision,
            permitted: None,
            error: Some(err.to_string()),
        },
    }
}

fn print_pretty(rows: &[CheckRow]) {
    let width = rows.iter().map(|r| r.address.len()).max().unwrap_or(0);

    for row in rows {
        let verdict = match (row.permitted, row.decision) {
            (None, _) => format!(
                "{} {}",
                "ERROR".red().bold(),
                row.error.as_deref().unwrap_or_default()
            ),
            (Some(true), Some(_)) => "PERMIT".green().bold().to_string(),
            (Some(true), None) => labelled("PERMIT".green(), "(malformed, failing open)"),
            (Some(false), Some(Decision::Denied)) => labelled("DENY".red(), "(deny list)"),
            (Some(false), Some(_)) => labelled("DENY".red(), "(not on allow list)"),
            (Some(false), None) => labelled("DENY".red(), "(malformed, failing closed)"),
        };
        println!("  {:<width$}  {}", row.address, verdict);
    }
}

fn labelled(label: ColoredString, reason: &str) -> String {
    format!("{} {}", label.bold(), reason.dimmed())
}

/// 0 when everything passed, 1 when something was refused, 2 on errors.
fn exit_code(rows: &[CheckRow]) -> ExitCode {
    if rows.iter().any(|r| r.permitted.is_none()) {
        ExitCode::from(2)
    } else if rows.iter().all(|r| r.permitted == Some(true)) {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

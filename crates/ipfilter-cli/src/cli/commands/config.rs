//! `ipfilter config` - Policy file management.

use anyhow::Result;
use colored::Colorize;
use ipfilter::{ListSources, PolicyConfig};
use std::process::ExitCode;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config;
use crate::output::OutputFormat;

pub fn execute(ctx: &Context, args: &ConfigArgs) -> Result<ExitCode> {
    match args.command {
        ConfigCommands::Show => show_config(ctx),
        ConfigCommands::Path => show_path(ctx),
        ConfigCommands::Init { force } => init_config(ctx, force),
    }
}

fn show_config(ctx: &Context) -> Result<ExitCode> {
    let policy = config::load(&ctx.config_path)?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&policy)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&policy)?);
        }
        OutputFormat::Csv => {
            anyhow::bail!(
                "CSV output is not available for `config show`; use json, yaml or pretty"
            );
        }
        OutputFormat::Pretty => print_pretty(ctx, &policy),
    }

    Ok(ExitCode::SUCCESS)
}

fn print_pretty(ctx: &Context, policy: &PolicyConfig) {
    println!("{} {}", "Policy file:".bold(), ctx.config_path.display());
    if !ctx.config_path.exists() {
        println!("  {}", "(file not found, using the empty policy)".dimmed());
    }
    println!();

    println!("  {} {}", "on_invalid_address:".bold(), policy.on_invalid_address);
    println!();

    print_sources("Allow", &policy.allow);
    print_sources("Deny", &policy.deny);

    if !policy.settings.is_empty() {
        println!("{}", "Settings:".bold());
        for (key, value) in &policy.settings {
            println!("  {} = {}", key.cyan(), value);
        }
    }
}

fn print_sources(title: &str, sources: &ListSources) {
    println!("{}", format!("{title}:").bold());
    if sources.is_empty() {
        println!("  {}", "(none)".dimmed());
    }

    let fields = [
        ("ips", &sources.ips),
        ("masked_ips", &sources.masked_ips),
        ("ranges", &sources.ranges),
        ("config_key_ips", &sources.config_key_ips),
        ("config_key_masked_ips", &sources.config_key_masked_ips),
    ];
    for (name, value) in fields {
        if let Some(value) = value {
            println!("  {} {}", format!("{name}:").bold(), value);
        }
    }
    println!();
}

fn show_path(ctx: &Context) -> Result<ExitCode> {
    println!("{}", ctx.config_path.display());
    Ok(ExitCode::SUCCESS)
}

fn init_config(ctx: &Context, force: bool) -> Result<ExitCode> {
    let path = &ctx.config_path;

    if path.exists() && !force {
        anyhow::bail!(
            "Policy file already exists: {}\n\n\
             Use --force to overwrite it.",
            path.display()
        );
    }

    config::write_template(path)?;
    println!(
        "{} Wrote starter policy to {}",
        "Success:".green().bold(),
        path.display().to_string().cyan()
    );
    println!();
    println!("Check an address with: {} check 127.0.0.1", "ipfilter".cyan());

    Ok(ExitCode::SUCCESS)
}

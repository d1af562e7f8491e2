//! `ipfilter blocks` - Show the CIDR cover of an address range.

use anyhow::Result;
use colored::Colorize;
use ipfilter::engine::{decompose, Address, Block};
use serde::Serialize;
use std::process::ExitCode;

use super::Context;
use crate::cli::args::BlocksArgs;
use crate::education::Explain;
use crate::output::{print_csv, OutputFormat};

#[derive(Debug, Serialize)]
struct BlockRow {
    cidr: String,
    first: Address,
    last: Address,
    prefix_len: u8,
    size: u64,
}

impl From<Block> for BlockRow {
    fn from(block: Block) -> Self {
        Self {
            cidr: block.to_string(),
            first: block.first(),
            last: block.last(),
            prefix_len: block.prefix_len(),
            size: block.size(),
        }
    }
}

pub fn execute(ctx: &Context, args: &BlocksArgs) -> Result<ExitCode> {
    let from: Address = args.from.parse()?;
    let to: Address = args.to.parse()?;

    if ctx.explain {
        Explain::blocks(from, to).print();
    }

    let rows: Vec<BlockRow> = decompose(from, to).into_iter().map(BlockRow::from).collect();

    match ctx.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&rows)?),
        OutputFormat::Csv => print_csv(&rows)?,
        OutputFormat::Pretty => {
            let (low, high) = if from <= to { (from, to) } else { (to, from) };
            let total: u64 = rows.iter().map(|r| r.size).sum();
            println!(
                "{} {} - {} ({} addresses, {} blocks)",
                "Range:".bold(),
                low.to_string().cyan(),
                high.to_string().cyan(),
                total,
                rows.len()
            );
            for row in &rows {
                println!("  {} {:>10}", format!("{:<18}", row.cidr).green(), row.size);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

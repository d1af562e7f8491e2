//! Educational features: explanations of what each command computes.

use colored::Colorize;
use ipfilter::engine::Address;

/// Command explanation builder.
pub struct Explain {
    description: String,
    what_happens: Vec<String>,
    example: Option<String>,
}

impl Explain {
    fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            what_happens: Vec::new(),
            example: None,
        }
    }

    fn step(mut self, step: &str) -> Self {
        self.what_happens.push(step.to_string());
        self
    }

    fn example(mut self, example: &str) -> Self {
        self.example = Some(example.to_string());
        self
    }

    /// Print the explanation to stdout.
    pub fn print(&self) {
        println!();
        println!("{}", "=== What This Does ===".bold().cyan());
        println!("{}", self.description);
        println!();

        if !self.what_happens.is_empty() {
            println!("{}", "How it works:".bold());
            for (i, step) in self.what_happens.iter().enumerate() {
                println!("  {}. {}", i + 1, step);
            }
            println!();
        }

        if let Some(example) = &self.example {
            println!("{} {}", "Example:".bold(), example.dimmed());
            println!();
        }

        println!("{}", "=== Results ===".bold().cyan());
        println!();
    }

    // ========================================================================
    // Factory methods for each command
    // ========================================================================

    pub fn check(env_prefix: &str) -> Self {
        Self::new("Decides whether each address may pass the allow/deny policy.")
            .step("Each list is loaded into 32 buckets, one per prefix length /1 to /32.")
            .step("Ranges become aligned CIDR blocks, so every entry is a network and a length.")
            .step("A lookup masks the address per non-empty bucket and binary searches it.")
            .step("The address passes only if the allow list matches and the deny list does not.")
            .step(&format!(
                "config_key_* entries are read from {env_prefix}<key> before [settings]."
            ))
            .example("allow 10.0.0.0;255.0.0.0, deny 10.0.0.13 => .12 permit, .13 deny")
    }

    pub fn blocks(from: Address, to: Address) -> Self {
        Self::new(&format!("Splits {from} - {to} into the fewest aligned CIDR blocks."))
            .step("Start at the low end of the range.")
            .step("Take the largest aligned power-of-two block that stays inside the range.")
            .step("Move past that block and repeat until the high end is covered.")
            .step("Each block becomes one entry in the bucket for its prefix length.")
            .example("10.0.0.10 - 10.0.0.20 => .10/31 .12/30 .16/30 .20/32")
    }
}

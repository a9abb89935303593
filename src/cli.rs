//! Command-line interface (CLI) argument parsing module.
//!
//! This module provides CLI argument parsing using `clap`.
//! Validation that clap cannot express (mutually exclusive output flags,
//! at least one domain) happens in
//! [`QueryConfig::from_cli`](crate::config::QueryConfig::from_cli) so that it
//! is reported as a configuration error.

use crate::config::DEFAULT_TIMEOUT_SECS;
use clap::Parser;

const EXAMPLES: &str = "\
EXAMPLES:
  # Basic lookup
  whodis example.com

  # Multiple domains
  whodis example.com github.com

  # JSON output
  whodis --json example.com

  # Short table format
  whodis --short example.com github.com

  # Raw WHOIS output
  whodis --raw example.com

  # Custom timeout
  whodis --timeout 10 example.com";

/// CLI argument parser using clap derive macro.
///
/// # Example
///
/// ```ignore
/// let cli = Cli::parse();
/// let config = QueryConfig::from_cli(&cli)?;
/// ```
#[derive(Parser, Debug)]
#[command(
    name = "whodis",
    about = "whodis - pretty WHOIS lookup tool",
    long_about = "A modern, colorful CLI tool that makes WHOIS queries more readable",
    after_help = EXAMPLES,
    disable_version_flag = true
)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,

    /// Output minimal information in table format
    #[arg(short, long)]
    pub short: bool,

    /// Output raw WHOIS data
    #[arg(short, long)]
    pub raw: bool,

    /// Query timeout in seconds
    #[arg(
        short,
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Show debug information
    #[arg(short, long)]
    pub debug: bool,

    /// Show version information
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Domains to look up
    #[arg(value_name = "DOMAIN")]
    pub domains: Vec<String>,
}

/// Version line printed by `--version`.
#[must_use]
pub fn version_string() -> String {
    format!("whodis v{}", env!("CARGO_PKG_VERSION"))
}

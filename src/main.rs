//! whodis - pretty WHOIS lookup tool
//!
//! Binary entry point for the whodis CLI application.

#![warn(clippy::all, warnings)]
#![warn(clippy::pedantic, clippy::nursery)]

use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use std::io::{IsTerminal, Write};
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use whodis::cli::{self, Cli};
use whodis::error::Result;
use whodis::{get_renderer, Lookup, QueryConfig, TcpWhoisClient, TextParser};

/// Set up logging on stderr so it never mixes with rendered output.
///
/// # Arguments
///
/// * `debug` - Enable debug-level logging
fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().without_time().with_writer(std::io::stderr))
        .init();
}

/// Look up every domain and render the results to stdout.
///
/// # Arguments
///
/// * `config` - Validated query configuration
async fn run(config: QueryConfig) -> Result<()> {
    let format = config.format;
    let lookup = Lookup::new(config, TcpWhoisClient::new(), TextParser::new());
    let results = lookup.lookup_all().await?;

    let stdout = std::io::stdout();
    let use_colors = stdout.is_terminal();
    let mut out = stdout.lock();
    get_renderer(format, use_colors).render(&results, &mut out)?;
    out.flush()?;

    Ok(())
}

/// Main entry point for the whodis CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    // Set up panic hook for better error reporting
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("whodis crashed: {}", panic_info);
    }));

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    if cli.version {
        println!("{}", cli::version_string());
        return ExitCode::SUCCESS;
    }

    setup_logging(cli.debug);

    let config = match QueryConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "Error:".yellow().bold());
            eprintln!("\nRun 'whodis --help' for usage information");
            return ExitCode::FAILURE;
        }
    };

    tracing::debug!(
        domains = config.domains.len(),
        format = %config.format,
        timeout_secs = config.timeout_secs,
        "whodis starting..."
    );

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

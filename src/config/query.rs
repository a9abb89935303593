//! Query configuration.
//!
//! [`QueryConfig`] captures the domains to query and the selected output
//! mode, timeout and debug flag. It is validated once and never mutated.

use crate::cli::Cli;
use crate::error::{Error, Result};
use std::time::Duration;

/// Default per-query timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Output format for lookup results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colorized tree (default, human-readable)
    #[default]
    Terminal,
    /// Pretty-printed JSON array
    Json,
    /// One aligned table row per domain
    Short,
    /// Verbatim WHOIS text
    Raw,
}

impl OutputFormat {
    /// Resolve the mutually exclusive `--json`/`--short`/`--raw` flags.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if more than one flag is set.
    pub fn from_flags(json: bool, short: bool, raw: bool) -> Result<Self> {
        match (json, short, raw) {
            (false, false, false) => Ok(Self::Terminal),
            (true, false, false) => Ok(Self::Json),
            (false, true, false) => Ok(Self::Short),
            (false, false, true) => Ok(Self::Raw),
            _ => Err(Error::config(
                "only one output format flag can be specified (--json, --short, or --raw)",
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Terminal => write!(f, "terminal"),
            Self::Json => write!(f, "json"),
            Self::Short => write!(f, "short"),
            Self::Raw => write!(f, "raw"),
        }
    }
}

/// Immutable configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    /// Domains to query, in display order
    pub domains: Vec<String>,
    /// Selected output format
    pub format: OutputFormat,
    /// Per-query timeout in seconds
    pub timeout_secs: u64,
    /// Surface parse failures as errors
    pub debug: bool,
}

impl QueryConfig {
    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `domains` is empty or
    /// `timeout_secs` is zero.
    pub fn new(
        domains: Vec<String>,
        format: OutputFormat,
        timeout_secs: u64,
        debug: bool,
    ) -> Result<Self> {
        if domains.is_empty() {
            return Err(Error::config("no domains specified"));
        }
        if timeout_secs == 0 {
            return Err(Error::config("timeout must be greater than zero"));
        }

        Ok(Self {
            domains,
            format,
            timeout_secs,
            debug,
        })
    }

    /// Build the configuration from parsed command-line arguments.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no domains were given or more
    /// than one output format flag was set.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let format = OutputFormat::from_flags(cli.json, cli.short, cli.raw)?;
        Self::new(cli.domains.clone(), format, cli.timeout, cli.debug)
    }

    /// Per-query timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether structured parsing is skipped.
    #[must_use]
    pub fn is_raw(&self) -> bool {
        self.format == OutputFormat::Raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Result<QueryConfig> {
        let cli = Cli::try_parse_from(std::iter::once("whodis").chain(args.iter().copied()))
            .unwrap();
        QueryConfig::from_cli(&cli)
    }

    #[test]
    fn test_output_format_from_flags() {
        assert_eq!(
            OutputFormat::from_flags(false, false, false).unwrap(),
            OutputFormat::Terminal
        );
        assert_eq!(
            OutputFormat::from_flags(true, false, false).unwrap(),
            OutputFormat::Json
        );
        assert_eq!(
            OutputFormat::from_flags(false, true, false).unwrap(),
            OutputFormat::Short
        );
        assert_eq!(
            OutputFormat::from_flags(false, false, true).unwrap(),
            OutputFormat::Raw
        );
        assert!(OutputFormat::from_flags(true, true, false).is_err());
        assert!(OutputFormat::from_flags(true, true, true).is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Terminal.to_string(), "terminal");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Short.to_string(), "short");
        assert_eq!(OutputFormat::Raw.to_string(), "raw");
    }

    #[test]
    fn test_config_defaults() {
        let config = parse(&["example.com"]).unwrap();
        assert_eq!(config.domains, vec!["example.com"]);
        assert_eq!(config.format, OutputFormat::Terminal);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.debug);
        assert!(!config.is_raw());
    }

    #[test]
    fn test_config_from_flags() {
        let config = parse(&["-r", "-t", "5", "-d", "a.com", "b.org"]).unwrap();
        assert_eq!(config.domains, vec!["a.com", "b.org"]);
        assert!(config.is_raw());
        assert_eq!(config.timeout_secs, 5);
        assert!(config.debug);
    }

    #[test]
    fn test_config_rejects_multiple_formats() {
        let err = parse(&["--json", "--short", "example.com"]).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_config_rejects_no_domains() {
        let err = parse(&["--json"]).unwrap_err();
        assert_eq!(err.to_string(), "no domains specified");
    }

    #[test]
    fn test_config_rejects_zero_timeout() {
        let result = QueryConfig::new(vec!["a.com".into()], OutputFormat::Terminal, 0, false);
        assert!(result.is_err());
    }
}

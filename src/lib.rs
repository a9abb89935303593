//! whodis - A pretty WHOIS lookup tool.
//!
//! This crate provides both a library API and a CLI tool for:
//! - Querying WHOIS servers for many domains concurrently
//! - Parsing WHOIS responses into structured records
//! - Rendering results as a colorized tree, JSON, a short table or raw text
//!
//! # Library Usage
//!
//! ```ignore
//! use whodis::{Lookup, OutputFormat, QueryConfig, TcpWhoisClient, TextParser};
//!
//! let config = QueryConfig::new(vec!["example.com".into()], OutputFormat::Json, 30, false)?;
//! let lookup = Lookup::new(config, TcpWhoisClient::new(), TextParser::new());
//! let results = lookup.lookup_all().await?;
//!
//! whodis::output::get_renderer(OutputFormat::Json, false)
//!     .render(&results, &mut std::io::stdout())?;
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Basic lookup
//! whodis example.com
//!
//! # Multiple domains, short table
//! whodis --short example.com github.com
//!
//! # JSON output with a 10 second timeout
//! whodis --json --timeout 10 example.com
//!
//! # Raw WHOIS text
//! whodis --raw example.com
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod whois;

// Re-export commonly used types
pub use cli::Cli;
pub use config::{OutputFormat, QueryConfig};
pub use error::{Error, Result};
pub use output::{get_renderer, Render};
pub use whois::{
    Contact, DomainRecord, Lookup, TcpWhoisClient, TextParser, WhoisInfo, WhoisParser,
    WhoisResult, WhoisSource,
};

//! WHOIS module.
//!
//! This module provides WHOIS-related functionality including:
//! - The network client seam and its TCP implementation
//! - The text parser seam and its pattern-based implementation
//! - The concurrent lookup coordinator
//! - Core data types

pub mod client;
pub mod lookup;
pub mod parser;
pub mod types;

pub use client::{TcpWhoisClient, WhoisSource};
pub use lookup::Lookup;
pub use parser::{TextParser, WhoisParser};
pub use types::*;

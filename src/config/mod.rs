//! Configuration module.
//!
//! This module provides the immutable query configuration built once
//! from command-line input.

pub mod query;

pub use query::{OutputFormat, QueryConfig, DEFAULT_TIMEOUT_SECS};
